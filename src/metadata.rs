use crate::blocks::{Application, CueSheet, Picture, SeekTable, StreamInfo, VorbisComment};

/// The top-level decoded aggregate: one typed slot per singleton block type,
/// plus accumulating lists for PADDING/APPLICATION/PICTURE. Constructed by
/// [`crate::Decoder::load`] and immutable thereafter.
#[derive(Debug)]
pub struct Metadata {
    /// Required; always present after a successful `load()`.
    pub stream_info: StreamInfo,
    /// Byte count of each PADDING block encountered, in file order.
    pub padding: Vec<u32>,
    pub application: Vec<Application>,
    pub seek_table: Option<SeekTable>,
    pub vorbis_comment: Option<VorbisComment>,
    pub cue_sheet: Option<CueSheet>,
    pub pictures: Vec<Picture>,
}

/// Tags a metadata block by its on-disk type code, used for duplicate
/// detection and diagnostics in the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    StreamInfo = 0,
    Padding = 1,
    Application = 2,
    SeekTable = 3,
    VorbisComment = 4,
    CueSheet = 5,
    Picture = 6,
}

impl BlockKind {
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::StreamInfo => "STREAMINFO",
            BlockKind::Padding => "PADDING",
            BlockKind::Application => "APPLICATION",
            BlockKind::SeekTable => "SEEKTABLE",
            BlockKind::VorbisComment => "VORBIS_COMMENT",
            BlockKind::CueSheet => "CUESHEET",
            BlockKind::Picture => "PICTURE",
        }
    }

    pub(crate) fn from_type_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BlockKind::StreamInfo),
            1 => Some(BlockKind::Padding),
            2 => Some(BlockKind::Application),
            3 => Some(BlockKind::SeekTable),
            4 => Some(BlockKind::VorbisComment),
            5 => Some(BlockKind::CueSheet),
            6 => Some(BlockKind::Picture),
            _ => None,
        }
    }
}
