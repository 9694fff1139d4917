//! Big/little-endian unsigned integer decoding over byte slices.
//!
//! FLAC's own fields (block headers, STREAMINFO, SEEKTABLE, CUESHEET,
//! PICTURE) are big-endian; Vorbis comment lengths are little-endian per
//! the vorbis-comment spec. [`ByteReader`](crate::reader::ByteReader) is
//! built on top of these.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

pub(crate) fn be_u16(buf: &[u8]) -> u16 {
    BigEndian::read_u16(buf)
}

pub(crate) fn be_u24(buf: &[u8]) -> u32 {
    BigEndian::read_u24(buf)
}

pub(crate) fn be_u32(buf: &[u8]) -> u32 {
    BigEndian::read_u32(buf)
}

pub(crate) fn be_u64(buf: &[u8]) -> u64 {
    BigEndian::read_u64(buf)
}

pub(crate) fn le_u32(buf: &[u8]) -> u32 {
    LittleEndian::read_u32(buf)
}
