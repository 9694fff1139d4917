use std::fmt;
use std::io::Read;

use crate::decode::DecodeSized;
use crate::error::{FlacError, Result};
use crate::reader::ByteReader;

/// Sentinel `first_sample` value marking an uninitialised seek-point slot.
pub const PLACEHOLDER_SAMPLE: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// SEEKTABLE (block type 3). At most one per stream.
pub struct SeekTable {
    pub seek_points: Vec<SeekPoint>,
}

/// Notes:
/// - for placeholder points, `stream_offset` and `frame_samples` are undefined.
/// - points must be sorted ascending by `first_sample` and unique, except
///   that any number of placeholders may trail the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekPoint {
    /// Sample number of the first sample in the target frame, or
    /// [`PLACEHOLDER_SAMPLE`] for a placeholder point.
    pub first_sample: u64,
    /// Byte offset from the first audio frame's header to the target
    /// frame's header.
    pub stream_offset: u64,
    /// Number of samples in the target frame.
    pub frame_samples: u16,
}

impl SeekPoint {
    pub fn is_placeholder(&self) -> bool {
        self.first_sample == PLACEHOLDER_SAMPLE
    }
}

const SEEK_POINT_SIZE: usize = 18;

impl DecodeSized for SeekTable {
    fn decode_sized<R: Read>(
        reader: &mut ByteReader<R>,
        size: usize,
        validate: bool,
    ) -> Result<Self> {
        if validate && size % SEEK_POINT_SIZE != 0 {
            return Err(FlacError::InvalidSeekTable {
                path: reader.path().to_string(),
                reason: format!("block size {size} is not a multiple of {SEEK_POINT_SIZE}"),
            });
        }
        let n_points = size / SEEK_POINT_SIZE;
        let mut seek_points = Vec::with_capacity(n_points);
        for _ in 0..n_points {
            let first_sample = reader.read_u64_be()?;
            let stream_offset = reader.read_u64_be()?;
            let frame_samples = reader.read_u16_be()?;
            seek_points.push(SeekPoint {
                first_sample,
                stream_offset,
                frame_samples,
            });
        }
        // the declared body size already bounds how much we've read; any
        // trailing partial point (only reachable with validate off) is
        // simply left unread here and skipped by the driver.
        let remainder = size % SEEK_POINT_SIZE;
        if remainder != 0 {
            reader.skip(remainder)?;
        }

        if validate {
            for pair in seek_points.windows(2) {
                let (earlier, later) = (pair[0], pair[1]);
                if !(earlier.first_sample < later.first_sample || later.is_placeholder()) {
                    return Err(FlacError::InvalidSeekTable {
                        path: reader.path().to_string(),
                        reason: "sample numbers are not strictly increasing".to_string(),
                    });
                }
            }
        }

        Ok(SeekTable { seek_points })
    }
}

impl fmt::Debug for SeekTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeekTable")
            .field("seek_points", &self.seek_points.len())
            .finish()
    }
}
