use std::fmt;
use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlacError>;

/// Fatal errors. Any of these abort the whole `Decoder::load`.
#[derive(Error, Debug)]
pub enum FlacError {
    #[error("'{path}' is not a valid FLAC file (bad magic number)")]
    NotAFlacFile { path: String },

    #[error("truncated stream while reading '{path}'")]
    TruncatedStream {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid block type 127 (reserved-invalid) in '{path}'")]
    InvalidBlockType { path: String },

    #[error("unterminated metadata block chain in '{path}': reached end of stream before a last-block flag was seen")]
    UnterminatedBlockChain { path: String },

    #[error("metadata block chain in '{path}' ended without a STREAMINFO block")]
    MissingStreamInfo { path: String },

    #[error("duplicate {block} block in '{path}'")]
    DuplicateBlock { path: String, block: &'static str },

    #[error("invalid STREAMINFO block size in '{path}': expected 34 bytes")]
    InvalidStreamInfoSize { path: String },

    #[error("invalid STREAMINFO block-size bounds in '{path}': min/max block size must be >= 16, max <= 65535")]
    InvalidBlockSizeBounds { path: String },

    #[error("invalid APPLICATION block in '{path}': {reason}")]
    InvalidApplicationBlock { path: String, reason: String },

    #[error("invalid SEEKTABLE block in '{path}': {reason}")]
    InvalidSeekTable { path: String, reason: String },

    #[error("invalid CUESHEET block in '{path}': {reason}")]
    InvalidCueSheet {
        path: String,
        reason: String,
        track: Option<u8>,
        index_point: Option<u8>,
    },

    #[error("malformed Vorbis comment field in '{path}': missing '='")]
    MalformedVorbisField { path: String },

    #[error("invalid UTF-8 in {field} in '{path}'")]
    InvalidUtf8 {
        path: String,
        field: &'static str,
        #[source]
        source: FromUtf8Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FlacError {
    pub(crate) fn cue_sheet(path: &str, reason: impl Into<String>) -> Self {
        FlacError::InvalidCueSheet {
            path: path.to_string(),
            reason: reason.into(),
            track: None,
            index_point: None,
        }
    }

    pub(crate) fn cue_sheet_track(path: &str, reason: impl Into<String>, track: u8) -> Self {
        FlacError::InvalidCueSheet {
            path: path.to_string(),
            reason: reason.into(),
            track: Some(track),
            index_point: None,
        }
    }

    pub(crate) fn cue_sheet_index(
        path: &str,
        reason: impl Into<String>,
        track: u8,
        index_point: u8,
    ) -> Self {
        FlacError::InvalidCueSheet {
            path: path.to_string(),
            reason: reason.into(),
            track: Some(track),
            index_point: Some(index_point),
        }
    }
}

/// Non-fatal conditions reported to a [`DiagnosticSink`] while processing continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A reserved block type (7..126) was skipped.
    UnknownBlockType(u8),
    /// More than one PICTURE block claims the same front/back cover role.
    DuplicateCoverArtRole(crate::blocks::PictureRole),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownBlockType(t) => {
                write!(f, "skipping reserved metadata block type {t}")
            }
            Diagnostic::DuplicateCoverArtRole(role) => {
                write!(f, "more than one PICTURE block claims the {role:?} role")
            }
        }
    }
}

/// Receives non-fatal warnings produced while walking the block chain.
pub trait DiagnosticSink {
    fn emit(&mut self, diagnostic: Diagnostic);
}

/// Default sink: forwards every diagnostic to the `log` crate at `warn` level.
#[derive(Debug, Default)]
pub struct LoggingSink;

impl DiagnosticSink for LoggingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
    }
}
