use std::io::Read;

use crate::decode::DecodeSized;
use crate::error::{FlacError, Result};
use crate::reader::ByteReader;

const CD_DA_LEAD_OUT: u8 = 170;
const NON_CD_DA_LEAD_OUT: u8 = 255;

/// CUESHEET (block type 5). At most one per stream.
#[derive(Debug)]
pub struct CueSheet {
    /// ASCII, trailing NULs stripped; `None` if empty.
    pub media_catalog_number: Option<String>,
    /// Meaningful only when `is_cd_da`; 0 otherwise.
    pub lead_in_samples: u64,
    pub is_cd_da: bool,
    /// The track count as declared on disk; always equal to `tracks.len()`.
    pub n_tracks: u8,
    pub tracks: Vec<CueSheetTrack>,
}

#[derive(Debug)]
pub struct CueSheetTrack {
    pub offset: u64,
    pub number: u8,
    /// ASCII, zero bytes stripped; `None` if empty.
    pub isrc: Option<String>,
    pub audio: bool,
    pub pre_emphasis: bool,
    /// The index-point count as declared on disk; always equal to
    /// `index_points.len()`.
    pub n_index_points: u8,
    pub index_points: Vec<CueSheetIndexPoint>,
}

#[derive(Debug, Clone, Copy)]
pub struct CueSheetIndexPoint {
    pub offset: u64,
    pub number: u8,
}

impl DecodeSized for CueSheet {
    fn decode_sized<R: Read>(reader: &mut ByteReader<R>, _size: usize, validate: bool) -> Result<Self> {
        let path = reader.path().to_string();

        let mcn_raw = reader.read_exact_len(128)?;
        let media_catalog_number = ascii_trim_nul(&mcn_raw);
        let lead_in_samples = reader.read_u64_be()?;
        let flags = reader.read_u8()?;
        let is_cd_da = flags & 0b1000_0000 != 0;
        let reserved = reader.read_exact_len(258)?;
        if validate && (flags & 0b0111_1111 != 0 || reserved.iter().any(|&b| b != 0)) {
            return Err(FlacError::cue_sheet(
                &path,
                "non-zero bits found in reserved section of CUESHEET block",
            ));
        }

        let n_tracks = reader.read_u8()?;
        let mut tracks = Vec::with_capacity(n_tracks as usize);
        for _ in 0..n_tracks {
            tracks.push(CueSheetTrack::decode_one(reader, validate)?);
        }

        let cue_sheet = CueSheet {
            media_catalog_number,
            lead_in_samples,
            is_cd_da,
            n_tracks,
            tracks,
        };

        if validate {
            cue_sheet.validate(&path)?;
        }

        Ok(cue_sheet)
    }
}

impl CueSheetTrack {
    fn decode_one<R: Read>(reader: &mut ByteReader<R>, validate: bool) -> Result<Self> {
        let path = reader.path().to_string();
        let offset = reader.read_u64_be()?;
        let number = reader.read_u8()?;
        let isrc_raw = reader.read_exact_len(12)?;
        let isrc = strip_zero_bytes(&isrc_raw);

        let flags = reader.read_u8()?;
        let audio = flags & 0b1000_0000 == 0;
        let pre_emphasis = flags & 0b0100_0000 != 0;
        let reserved = reader.read_exact_len(13)?;
        if validate && (flags & 0b0011_1111 != 0 || reserved.iter().any(|&b| b != 0)) {
            return Err(FlacError::cue_sheet_track(
                &path,
                format!("non-zero bits found in reserved section of CUESHEET_TRACK for track {number}"),
                number,
            ));
        }

        let n_index_points = reader.read_u8()?;
        let mut index_points = Vec::with_capacity(n_index_points as usize);
        for _ in 0..n_index_points {
            index_points.push(CueSheetIndexPoint::decode_one(reader, validate, number)?);
        }

        Ok(CueSheetTrack {
            offset,
            number,
            isrc,
            audio,
            pre_emphasis,
            n_index_points,
            index_points,
        })
    }
}

impl CueSheetIndexPoint {
    fn decode_one<R: Read>(reader: &mut ByteReader<R>, validate: bool, track_number: u8) -> Result<Self> {
        let path = reader.path().to_string();
        let offset = reader.read_u64_be()?;
        let number = reader.read_u8()?;
        let reserved = reader.read_exact_len(3)?;
        if validate && reserved.iter().any(|&b| b != 0) {
            return Err(FlacError::cue_sheet_index(
                &path,
                format!(
                    "non-zero bits found in reserved section of CUESHEET_TRACK_INDEX for index point {number} of track {track_number}"
                ),
                track_number,
                number,
            ));
        }
        Ok(CueSheetIndexPoint { offset, number })
    }
}

impl CueSheet {
    fn validate(&self, path: &str) -> Result<()> {
        if self.is_cd_da {
            if let Some(mcn) = &self.media_catalog_number {
                if !matches!(mcn.len(), 0 | 13) {
                    return Err(FlacError::cue_sheet(
                        path,
                        "invalid media catalog number for CD-DA cue sheet",
                    ));
                }
            }
            if self.tracks.len() > 100 {
                return Err(FlacError::cue_sheet(
                    path,
                    "more than 100 tracks specified in CD-DA cue sheet",
                ));
            }
        } else if self.lead_in_samples != 0 {
            return Err(FlacError::cue_sheet(
                path,
                "non-zero number of lead-in samples specified in non-CD-DA cue sheet",
            ));
        }

        // Fewer than 2 tracks means there is no data track before the
        // lead-out (or no tracks at all): both count as "no tracks
        // specified".
        if self.tracks.len() < 2 {
            return Err(FlacError::cue_sheet(path, "no tracks specified in cue sheet"));
        }
        let lead_out = self.tracks.last().expect("checked above");

        let mut seen_track_numbers = std::collections::HashSet::new();
        for track in &self.tracks {
            if self.is_cd_da && track.offset % 588 != 0 {
                return Err(FlacError::cue_sheet_track(
                    path,
                    format!("invalid offset for track {} in CD-DA cue sheet", track.number),
                    track.number,
                ));
            }
            if self.is_cd_da && track.index_points.len() > 100 {
                return Err(FlacError::cue_sheet_track(
                    path,
                    format!(
                        "more than 100 index points specified for track {} in cue sheet",
                        track.number
                    ),
                    track.number,
                ));
            }
            if track.number == 0 {
                return Err(FlacError::cue_sheet(
                    path,
                    "track with track number 0 found in cue sheet",
                ));
            }
            if !seen_track_numbers.insert(track.number) {
                return Err(FlacError::cue_sheet(
                    path,
                    "track with duplicate track number found in cue sheet",
                ));
            }

            track.validate_index_points(path, self.is_cd_da)?;
        }

        let expected_lead_out = if self.is_cd_da {
            CD_DA_LEAD_OUT
        } else {
            NON_CD_DA_LEAD_OUT
        };
        if lead_out.number != expected_lead_out {
            let reason = if self.is_cd_da {
                "lead-out track does not have track number 170 in CD-DA cue sheet"
            } else {
                "lead-out track does not have track number 255 in non-CD-DA cue sheet"
            };
            return Err(FlacError::cue_sheet_track(path, reason, lead_out.number));
        }

        Ok(())
    }
}

impl CueSheetTrack {
    fn validate_index_points(&self, path: &str, is_cd_da: bool) -> Result<()> {
        let Some(first) = self.index_points.first() else {
            return Ok(());
        };
        if is_cd_da && first.offset % 588 != 0 {
            return Err(FlacError::cue_sheet_index(
                path,
                format!(
                    "invalid offset for index point {} of track {} in CD-DA cue sheet",
                    first.number, self.number
                ),
                self.number,
                first.number,
            ));
        }
        if !matches!(first.number, 0 | 1) {
            return Err(FlacError::cue_sheet_track(
                path,
                format!(
                    "first index point in track {} in cue sheet does not have index point number 0 or 1",
                    self.number
                ),
                self.number,
            ));
        }

        let mut seen = std::collections::HashSet::new();
        seen.insert(first.number);
        let mut previous = first.number;
        for index_point in &self.index_points[1..] {
            if is_cd_da && index_point.offset % 588 != 0 {
                return Err(FlacError::cue_sheet_index(
                    path,
                    format!(
                        "invalid offset for index point {} of track {} in CD-DA cue sheet",
                        index_point.number, self.number
                    ),
                    self.number,
                    index_point.number,
                ));
            }
            if !seen.insert(index_point.number) {
                return Err(FlacError::cue_sheet_track(
                    path,
                    format!(
                        "index point with duplicate index point number found for track {} in cue sheet",
                        self.number
                    ),
                    self.number,
                ));
            }
            if index_point.number != previous + 1 {
                return Err(FlacError::cue_sheet_track(
                    path,
                    format!("non-sequential index point numbers found in track {} in cue sheet", self.number),
                    self.number,
                ));
            }
            previous = index_point.number;
            if index_point.number > 99 {
                return Err(FlacError::cue_sheet_index(
                    path,
                    format!(
                        "index point number greater than 99 for track {} in cue sheet",
                        self.number
                    ),
                    self.number,
                    index_point.number,
                ));
            }
        }
        Ok(())
    }
}

/// Strips trailing NUL padding from a fixed-width ASCII field.
fn ascii_trim_nul(bytes: &[u8]) -> Option<String> {
    let trimmed = trim_trailing_zeros(bytes);
    if trimmed.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(trimmed).into_owned())
    }
}

/// Strips every zero byte (not just trailing) from a fixed-width ASCII
/// field — this is how the ISRC field is defined, distinct from the media
/// catalog number's trailing-only NUL padding.
fn strip_zero_bytes(bytes: &[u8]) -> Option<String> {
    let filtered: Vec<u8> = bytes.iter().copied().filter(|&b| b != 0).collect();
    if filtered.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(&filtered).into_owned())
    }
}

fn trim_trailing_zeros(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}
