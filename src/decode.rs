use std::io::Read;

use crate::error::Result;
use crate::reader::ByteReader;

/// Decodes `Self` from the whole of a block body.
pub(crate) trait Decode: Sized {
    fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Self>;
}

/// Decodes `Self` given the declared block-body size in bytes, for formats
/// whose element count is implied by the surrounding length field rather
/// than self-describing (APPLICATION, SEEKTABLE).
pub(crate) trait DecodeSized: Sized {
    fn decode_sized<R: Read>(reader: &mut ByteReader<R>, size: usize, validate: bool) -> Result<Self>;
}
