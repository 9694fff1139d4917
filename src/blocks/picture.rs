use std::io::Read;

use num_traits::FromPrimitive;

use crate::decode::DecodeSized;
use crate::error::Result;
use crate::reader::ByteReader;

/// URL sentinel: when `mime_type` equals this literal, `data` is a UTF-8 URL
/// rather than raw image bytes.
const URL_MIME_TYPE: &str = "-->";

/// PICTURE (block type 6). Zero or more per stream.
#[derive(Debug)]
pub struct Picture {
    pub picture_type: PictureType,
    pub mime_type: String,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    /// Number of colors used for indexed-color pictures (e.g. GIF); 0 for
    /// non-indexed pictures.
    pub colors: u32,
    pub data: PictureData,
}

/// `data_size` is treated as advisory (per spec): the actual payload is
/// whatever bytes remain in the block body, decoded as UTF-8 when
/// `mime_type == "-->"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureData {
    Inline(Vec<u8>),
    Url(String),
}

impl Picture {
    pub fn color_indexed(&self) -> bool {
        self.colors != 0
    }

    /// Front/back cover-art role, when this picture's type maps to one.
    pub fn role(&self) -> Option<PictureRole> {
        match self.picture_type {
            PictureType::CoverFront => Some(PictureRole::CoverFront),
            PictureType::CoverBack => Some(PictureRole::CoverBack),
            _ => None,
        }
    }
}

/// The two picture types for which the driver tracks duplicate-role
/// diagnostics (at most one of each is expected).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureRole {
    CoverFront,
    CoverBack,
}

impl DecodeSized for Picture {
    fn decode_sized<R: Read>(reader: &mut ByteReader<R>, size: usize, _validate: bool) -> Result<Self> {
        let start = reader.position();
        let picture_type =
            PictureType::from_u32(reader.read_u32_be()?).unwrap_or(PictureType::Unknown);
        let mime_length = reader.read_u32_be()?;
        let mime_type = reader.read_string(mime_length as usize, "PICTURE mime type")?;
        let description_length = reader.read_u32_be()?;
        let description =
            reader.read_string(description_length as usize, "PICTURE description")?;

        let width = reader.read_u32_be()?;
        let height = reader.read_u32_be()?;
        let depth = reader.read_u32_be()?;
        let colors = reader.read_u32_be()?;

        // `data_size` is advisory; the number of bytes actually remaining in
        // the declared block body is authoritative.
        let _data_size = reader.read_u32_be()?;
        let consumed = (reader.position() - start) as usize;
        let remaining = size.saturating_sub(consumed);

        let data = if mime_type == URL_MIME_TYPE {
            PictureData::Url(reader.read_string(remaining, "PICTURE URL")?)
        } else {
            PictureData::Inline(reader.read_exact_len(remaining)?)
        };

        Ok(Picture {
            picture_type,
            mime_type,
            description,
            width,
            height,
            depth,
            colors,
            data,
        })
    }
}

/// The picture type according to the ID3v2 APIC frame. Only types 1 and 2
/// are restricted to appearing once per file; that constraint is enforced by
/// the driver, not here.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, num_derive::FromPrimitive)]
pub enum PictureType {
    Other,
    FileIcon,
    OtherFileIcon,
    CoverFront,
    CoverBack,
    LeafletPage,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    MovieVideoScreenCapture,
    BrightColoredFish,
    Illustration,
    BandArtistLogotype,
    PublisherStudioLogotype,
    Unknown,
}

impl PictureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PictureType::Other => "Other",
            PictureType::FileIcon => "32x32 pixels 'file icon' (PNG only)",
            PictureType::OtherFileIcon => "Other file icon",
            PictureType::CoverFront => "Cover (front)",
            PictureType::CoverBack => "Cover (back)",
            PictureType::LeafletPage => "Leaflet page",
            PictureType::Media => "Media (e.g. label side of CD)",
            PictureType::LeadArtist => "Lead artist/lead performer/soloist",
            PictureType::Artist => "Artist/performer",
            PictureType::Conductor => "Conductor",
            PictureType::Band => "Band/Orchestra",
            PictureType::Composer => "Composer",
            PictureType::Lyricist => "Lyricist/text writer",
            PictureType::RecordingLocation => "Recording Location",
            PictureType::DuringRecording => "During recording",
            PictureType::DuringPerformance => "During performance",
            PictureType::MovieVideoScreenCapture => "Movie/video screen capture",
            PictureType::BrightColoredFish => "A bright coloured fish",
            PictureType::Illustration => "Illustration",
            PictureType::BandArtistLogotype => "Band/artist logotype",
            PictureType::PublisherStudioLogotype => "Publisher/Studio logotype",
            PictureType::Unknown => "Unknown",
        }
    }
}
