use std::fmt;
use std::io::Read;

use crate::decode::Decode;
use crate::error::{FlacError, Result};
use crate::reader::ByteReader;

/// STREAMINFO (block type 0). Exactly one is required, and it must be the
/// first block in the chain. Fixed 34-byte layout.
pub struct StreamInfo {
    /// Minimum block size (in samples) used in the stream.
    pub minimum_block_size: u16,
    /// Maximum block size (in samples) used in the stream.
    pub maximum_block_size: u16,
    /// Minimum frame size (in bytes). May be 0 to imply unknown.
    pub minimum_frame_size: u32,
    /// Maximum frame size (in bytes). May be 0 to imply unknown.
    pub maximum_frame_size: u32,
    /// Sample rate in Hz (20 bits).
    pub sample_rate: u32,
    /// Number of channels, 1..=8.
    pub n_channels: u8,
    /// Bits per sample, 4..=32.
    pub bits_per_sample: u8,
    /// Total inter-channel samples in the stream; 0 means unknown.
    pub total_samples: u64,
    /// MD5 signature of the unencoded audio data, rendered as lowercase hex.
    pub md5: String,
}

impl StreamInfo {
    /// (minimum == maximum) implies a fixed-blocksize stream.
    pub fn is_fixed_blocksize_stream(&self) -> bool {
        self.minimum_block_size == self.maximum_block_size
    }

    /// Exactly 34 bytes, always enforced — this is a structural check
    /// needed to decode the fixed-schema record at all, not a semantic one,
    /// so it runs unconditionally of `validate`.
    pub(crate) fn decode_exact<R: Read>(reader: &mut ByteReader<R>, size: usize) -> Result<Self> {
        if size != 34 {
            return Err(FlacError::InvalidStreamInfoSize {
                path: reader.path().to_string(),
            });
        }
        Self::decode(reader)
    }

    pub(crate) fn validate(&self, path: &str) -> Result<()> {
        if self.minimum_block_size < 16 || self.maximum_block_size < 16 {
            return Err(FlacError::InvalidBlockSizeBounds {
                path: path.to_string(),
            });
        }
        Ok(())
    }
}

impl Decode for StreamInfo {
    fn decode<R: Read>(reader: &mut ByteReader<R>) -> Result<Self> {
        let minimum_block_size = reader.read_u16_be()?;
        let maximum_block_size = reader.read_u16_be()?;
        let minimum_frame_size = reader.read_u24_be()?;
        let maximum_frame_size = reader.read_u24_be()?;

        let sample_region = reader.read_exact_len(8)?;
        // 20 bits
        let sample_rate = ((sample_region[0] as u32) << 12)
            + ((sample_region[1] as u32) << 4)
            + ((sample_region[2] as u32) >> 4);
        // 3 bits, stored value is (channels - 1)
        let n_channels = ((sample_region[2] >> 1) & 0b0000_0111) + 1;
        // 5 bits, stored value is (bits_per_sample - 1)
        let bits_per_sample =
            ((sample_region[2] & 0b0000_0001) << 4) + (sample_region[3] >> 4) + 1;
        // 36 bits
        let total_samples = ((sample_region[3] as u64 & 0b0000_1111) << 32)
            + ((sample_region[4] as u64) << 24)
            + ((sample_region[5] as u64) << 16)
            + ((sample_region[6] as u64) << 8)
            + (sample_region[7] as u64);

        let md5_bytes = reader.read_exact_len(16)?;
        let md5 = hex::encode(md5_bytes);

        Ok(StreamInfo {
            minimum_block_size,
            maximum_block_size,
            minimum_frame_size,
            maximum_frame_size,
            sample_rate,
            n_channels,
            bits_per_sample,
            total_samples,
            md5,
        })
    }
}

impl fmt::Debug for StreamInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamInfo")
            .field("minimum_block_size", &self.minimum_block_size)
            .field("maximum_block_size", &self.maximum_block_size)
            .field("minimum_frame_size", &self.minimum_frame_size)
            .field("maximum_frame_size", &self.maximum_frame_size)
            .field("sample_rate", &self.sample_rate)
            .field("n_channels", &self.n_channels)
            .field("bits_per_sample", &self.bits_per_sample)
            .field("total_samples", &self.total_samples)
            .field("md5", &self.md5)
            .finish()
    }
}
