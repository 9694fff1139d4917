//! Shared byte-buffer builders for the integration tests.
//!
//! FLAC test fixtures are built in memory rather than checked into
//! `tests/fixtures/` — there is no `ffmpeg`/`metaflac` available in this
//! environment to author a real audio file, so every test constructs the
//! exact bytes of the block chain it exercises.

#![allow(dead_code)]

pub const MAGIC: &[u8; 4] = b"fLaC";

/// Builds a block header: top bit of `is_last`, low 7 bits `block_type`,
/// followed by the 3-byte big-endian body length.
pub fn header(is_last: bool, block_type: u8, len: u32) -> Vec<u8> {
    let mut out = vec![if is_last { 0x80 } else { 0x00 } | (block_type & 0x7F)];
    out.extend_from_slice(&len.to_be_bytes()[1..]);
    out
}

/// A minimal valid 34-byte STREAMINFO body: min=max=4096, 44100Hz, 2
/// channels, 16 bits, 0 total samples, all-zero MD5 unless overridden.
pub fn stream_info_body(md5: [u8; 16]) -> Vec<u8> {
    let mut body = Vec::with_capacity(34);
    body.extend_from_slice(&4096u16.to_be_bytes()); // min block size
    body.extend_from_slice(&4096u16.to_be_bytes()); // max block size
    body.extend_from_slice(&0u32.to_be_bytes()[1..]); // min frame size (u24)
    body.extend_from_slice(&0u32.to_be_bytes()[1..]); // max frame size (u24)

    // sample_rate:20 | channels:3 | bits_per_sample:5 | total_samples:36
    let sample_rate: u32 = 44100;
    let channels_stored: u32 = 2 - 1;
    let bits_stored: u32 = 16 - 1;
    let total_samples: u64 = 0;

    let packed: u64 = ((sample_rate as u64) << 44)
        | ((channels_stored as u64) << 41)
        | ((bits_stored as u64) << 36)
        | total_samples;
    body.extend_from_slice(&packed.to_be_bytes()); // fills the 8-byte sample region exactly
    body.extend_from_slice(&md5);
    body
}

/// Wraps a STREAMINFO body in its block header; `is_last` controls whether
/// this is the only block in the chain.
pub fn stream_info_block(is_last: bool, md5: [u8; 16]) -> Vec<u8> {
    let body = stream_info_body(md5);
    let mut out = header(is_last, 0, body.len() as u32);
    out.extend_from_slice(&body);
    out
}

/// little-endian length-prefixed string, used by Vorbis comment fields.
fn le_lstr(s: &str) -> Vec<u8> {
    let mut out = (s.len() as u32).to_le_bytes().to_vec();
    out.extend_from_slice(s.as_bytes());
    out
}

/// Builds a VORBIS_COMMENT body: vendor string + `"KEY=value"` fields.
pub fn vorbis_comment_body(vendor: &str, fields: &[&str]) -> Vec<u8> {
    let mut body = le_lstr(vendor);
    body.extend_from_slice(&(fields.len() as u32).to_le_bytes());
    for field in fields {
        body.extend_from_slice(&le_lstr(field));
    }
    body
}

pub fn block(is_last: bool, block_type: u8, body: &[u8]) -> Vec<u8> {
    let mut out = header(is_last, block_type, body.len() as u32);
    out.extend_from_slice(body);
    out
}

/// One CUESHEET track: offset, number, optional ISRC, audio/pre-emphasis
/// flags, and a list of (offset, number) index points.
pub struct TrackSpec {
    pub offset: u64,
    pub number: u8,
    pub isrc: Option<&'static str>,
    pub audio: bool,
    pub pre_emphasis: bool,
    pub index_points: Vec<(u64, u8)>,
}

/// Builds a full CUESHEET block body: the 396-byte fixed prefix followed
/// by per-track records.
pub fn cue_sheet_body(
    mcn: Option<&str>,
    lead_in_samples: u64,
    is_cd_da: bool,
    tracks: &[TrackSpec],
) -> Vec<u8> {
    let mut body = vec![0u8; 128];
    if let Some(mcn) = mcn {
        body[..mcn.len()].copy_from_slice(mcn.as_bytes());
    }
    body.extend_from_slice(&lead_in_samples.to_be_bytes());
    body.push(if is_cd_da { 0x80 } else { 0x00 });
    body.extend_from_slice(&[0u8; 258]);
    body.push(tracks.len() as u8);

    for track in tracks {
        body.extend_from_slice(&track.offset.to_be_bytes());
        body.push(track.number);
        let mut isrc = [0u8; 12];
        if let Some(s) = track.isrc {
            isrc[..s.len()].copy_from_slice(s.as_bytes());
        }
        body.extend_from_slice(&isrc);
        let mut flags = 0u8;
        if !track.audio {
            flags |= 0b1000_0000;
        }
        if track.pre_emphasis {
            flags |= 0b0100_0000;
        }
        body.push(flags);
        body.extend_from_slice(&[0u8; 13]);
        body.push(track.index_points.len() as u8);
        for (offset, number) in &track.index_points {
            body.extend_from_slice(&offset.to_be_bytes());
            body.push(*number);
            body.extend_from_slice(&[0u8; 3]);
        }
    }

    body
}

/// Assembles `fLaC` + each already-header-wrapped block in order.
pub fn flac_stream(blocks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = MAGIC.to_vec();
    for b in blocks {
        out.extend_from_slice(b);
    }
    out
}
