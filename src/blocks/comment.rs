use std::collections::HashMap;
use std::fmt;
use std::io::Read;

use crate::error::{FlacError, Result};
use crate::reader::ByteReader;

/// How repeated values for the same key are folded into the multimap.
///
/// The vendor format allows a key to repeat; `KeepAll` preserves every
/// occurrence in insertion order (the default), `FirstWins` keeps only the
/// first value seen for each key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    KeepAll,
    FirstWins,
}

impl Default for DedupPolicy {
    fn default() -> Self {
        DedupPolicy::KeepAll
    }
}

/// VORBIS_COMMENT (block type 4). At most one per stream.
///
/// Keys are upper-cased on insert; values preserve the order they were
/// encountered in within a key.
pub struct VorbisComment {
    vendor: String,
    fields: HashMap<String, Vec<String>>,
    n_values: usize,
}

impl VorbisComment {
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Total number of values across all keys, as actually stored (after
    /// dedup policy has been applied).
    pub fn n_values(&self) -> usize {
        self.n_values
    }

    /// Raw upper-case-key lookup. Empty slice if the key is absent.
    pub fn get(&self, key: &str) -> &[String] {
        self.fields
            .get(&key.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// First value for `key`, or `None` if absent.
    fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.first("TITLE")
    }

    pub fn artist(&self) -> Option<&str> {
        self.first("ARTIST")
    }

    pub fn album(&self) -> Option<&str> {
        self.first("ALBUM")
    }

    pub fn album_artist(&self) -> Option<&str> {
        self.first("ALBUMARTIST")
    }

    /// DATE, falling back to YEAR when DATE is absent.
    pub fn date(&self) -> Option<&str> {
        self.first("DATE").or_else(|| self.first("YEAR"))
    }

    pub fn track_number(&self) -> Option<&str> {
        self.first("TRACKNUMBER")
    }

    pub fn track_total(&self) -> Option<&str> {
        self.first("TRACKTOTAL")
    }

    pub fn disc_number(&self) -> Option<&str> {
        self.first("DISCNUMBER")
    }

    pub fn disc_total(&self) -> Option<&str> {
        self.first("DISCTOTAL")
    }

    pub fn genre(&self) -> Option<&str> {
        self.first("GENRE")
    }

    pub fn comment(&self) -> Option<&str> {
        self.first("COMMENT")
    }

    pub fn composer(&self) -> Option<&str> {
        self.first("COMPOSER")
    }

    pub fn performer(&self) -> Option<&str> {
        self.first("PERFORMER")
    }

    pub fn organization(&self) -> Option<&str> {
        self.first("ORGANIZATION")
    }

    pub fn copyright(&self) -> Option<&str> {
        self.first("COPYRIGHT")
    }

    pub fn license(&self) -> Option<&str> {
        self.first("LICENSE")
    }

    pub fn isrc(&self) -> Option<&str> {
        self.first("ISRC")
    }

    pub fn contact(&self) -> Option<&str> {
        self.first("CONTACT")
    }

    pub fn description(&self) -> Option<&str> {
        self.first("DESCRIPTION")
    }

    pub fn encoder(&self) -> Option<&str> {
        self.first("ENCODER")
    }

    pub fn location(&self) -> Option<&str> {
        self.first("LOCATION")
    }

    pub fn version(&self) -> Option<&str> {
        self.first("VERSION")
    }

    fn decode_sized_with_policy<R: Read>(
        reader: &mut ByteReader<R>,
        policy: DedupPolicy,
    ) -> Result<Self> {
        let vendor_length = reader.read_u32_le()?;
        let vendor = reader.read_string(vendor_length as usize, "vendor string")?;
        let field_count = reader.read_u32_le()?;

        let mut fields: HashMap<String, Vec<String>> = HashMap::new();
        let mut n_values = 0usize;
        for _ in 0..field_count {
            let field_length = reader.read_u32_le()?;
            let raw = reader.read_string(field_length as usize, "Vorbis comment field")?;
            let eq = raw.find('=').ok_or_else(|| FlacError::MalformedVorbisField {
                path: reader.path().to_string(),
            })?;
            let key = raw[..eq].to_ascii_uppercase();
            let value = raw[eq + 1..].to_string();

            let values = fields.entry(key).or_default();
            match policy {
                DedupPolicy::KeepAll => {
                    values.push(value);
                    n_values += 1;
                }
                DedupPolicy::FirstWins => {
                    if values.is_empty() {
                        values.push(value);
                        n_values += 1;
                    }
                }
            }
        }

        Ok(VorbisComment {
            vendor,
            fields,
            n_values,
        })
    }
}

impl VorbisComment {
    /// Decodes with an explicit [`DedupPolicy`] — the driver always calls
    /// this directly, passing [`DedupPolicy::KeepAll`] or `FirstWins`
    /// depending on the `ignore_duplicates` setting.
    pub(crate) fn decode_with_policy<R: Read>(
        reader: &mut ByteReader<R>,
        policy: DedupPolicy,
    ) -> Result<Self> {
        Self::decode_sized_with_policy(reader, policy)
    }
}

impl fmt::Debug for VorbisComment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VorbisComment")
            .field("vendor", &self.vendor)
            .field("fields", &self.fields.len())
            .field("n_values", &self.n_values)
            .finish()
    }
}
