//! FLAC metadata block-chain decoder.
//!
//! Reads the `fLaC` magic and the metadata block chain that precedes the
//! audio-frame region: STREAMINFO, PADDING, APPLICATION, SEEKTABLE,
//! VORBIS_COMMENT, CUESHEET and PICTURE. Decoding audio frames, writing
//! FLAC files, and non-FLAC containers are out of scope.

pub mod blocks;
mod decode;
mod decoder;
mod error;
mod ints;
mod metadata;
mod reader;

pub use blocks::{
    Application, CueSheet, CueSheetIndexPoint, CueSheetTrack, DedupPolicy, Picture, PictureData,
    PictureRole, PictureType, SeekPoint, SeekTable, StreamInfo, VorbisComment,
    PLACEHOLDER_SAMPLE,
};
pub use decoder::Decoder;
pub use error::{Diagnostic, DiagnosticSink, FlacError, LoggingSink, Result};
pub use metadata::{BlockKind, Metadata};
