use std::io::Read;

use crate::decode::DecodeSized;
use crate::error::{FlacError, Result};
use crate::reader::ByteReader;

/// APPLICATION (block type 2). Zero or more per stream.
#[derive(Debug, Clone)]
pub struct Application {
    /// Registered application ID (4 ASCII bytes), rendered as a string.
    pub id: String,
    /// Opaque application-defined payload. Empty when the block is exactly
    /// 4 bytes (id only, no payload) — allowed per spec.
    pub data: Vec<u8>,
}

impl DecodeSized for Application {
    fn decode_sized<R: Read>(
        reader: &mut ByteReader<R>,
        size: usize,
        validate: bool,
    ) -> Result<Self> {
        if size < 4 {
            return Err(FlacError::InvalidApplicationBlock {
                path: reader.path().to_string(),
                reason: "block is smaller than the 4-byte application id".to_string(),
            });
        }
        if validate && (size - 4) % 8 != 0 {
            return Err(FlacError::InvalidApplicationBlock {
                path: reader.path().to_string(),
                reason: "(size - 4) is not a multiple of 8".to_string(),
            });
        }
        let id = reader.read_string(4, "APPLICATION id")?;
        let data = reader.read_exact_len(size - 4)?;
        Ok(Application { id, data })
    }
}
