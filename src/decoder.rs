use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::OnceCell;

use crate::blocks::{Application, CueSheet, DedupPolicy, Picture, SeekTable, StreamInfo, VorbisComment};
use crate::decode::DecodeSized;
use crate::error::{Diagnostic, DiagnosticSink, FlacError, LoggingSink, Result};
use crate::metadata::{BlockKind, Metadata};
use crate::reader::ByteReader;

const MAGIC: &[u8; 4] = b"fLaC";

/// Walks a FLAC metadata block chain and aggregates the decoded blocks into
/// a single [`Metadata`].
///
/// `load()` is idempotent: the first call decodes the chain and caches the
/// result; later calls return the cached aggregate without touching the
/// underlying reader again.
pub struct Decoder<R> {
    reader: ByteReader<R>,
    tags_only: bool,
    validate: bool,
    ignore_duplicates: bool,
    sink: Box<dyn DiagnosticSink>,
    metadata: OnceCell<Metadata>,
}

impl Decoder<File> {
    /// Opens `path` and prepares a decoder over it. Does not read anything
    /// until [`Decoder::load`] is called.
    pub fn open(path: impl AsRef<Path>, tags_only: bool, validate: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(FlacError::Io)?;
        Ok(Self::from_reader_with_path(
            file,
            path.to_string_lossy().into_owned(),
            tags_only,
            validate,
        ))
    }
}

impl<R: Read> Decoder<R> {
    /// Builds a decoder over an arbitrary [`Read`] source (a file, an
    /// in-memory `Cursor`, a test fixture `&[u8]`). Error messages tag the
    /// source as `"<in-memory>"`.
    pub fn from_reader(reader: R, tags_only: bool, validate: bool) -> Self {
        Self::from_reader_with_path(reader, "<in-memory>".to_string(), tags_only, validate)
    }

    fn from_reader_with_path(reader: R, path: String, tags_only: bool, validate: bool) -> Self {
        Decoder {
            reader: ByteReader::new(reader, path),
            tags_only,
            validate,
            ignore_duplicates: false,
            sink: Box::new(LoggingSink),
            metadata: OnceCell::new(),
        }
    }

    /// Replaces the default [`LoggingSink`] with a caller-supplied
    /// diagnostics sink.
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Sets the Vorbis comment `ignore_duplicates` policy (default `false`,
    /// i.e. every value is kept in order). When `true`, a repeated key keeps
    /// only the first-seen value for each key.
    pub fn with_ignore_duplicates(mut self, ignore_duplicates: bool) -> Self {
        self.ignore_duplicates = ignore_duplicates;
        self
    }

    /// Decodes the block chain on first call; subsequent calls reuse the
    /// cached [`Metadata`] without re-reading.
    pub fn load(&mut self) -> Result<&Metadata> {
        if self.metadata.get().is_none() {
            let decoded = self.decode_chain()?;
            // `metadata` was just observed empty and `self` is borrowed
            // uniquely here, so this can never race a second writer.
            let _ = self.metadata.set(decoded);
        }
        Ok(self.metadata.get().expect("just populated"))
    }

    /// The decoded aggregate, if [`Decoder::load`] has already succeeded.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.get()
    }

    fn decode_chain(&mut self) -> Result<Metadata> {
        let magic = self.reader.read_exact_len(4)?;
        if magic.as_slice() != MAGIC {
            return Err(FlacError::NotAFlacFile {
                path: self.reader.path().to_string(),
            });
        }

        let mut stream_info: Option<StreamInfo> = None;
        let mut padding = Vec::new();
        let mut application = Vec::new();
        let mut seek_table = None;
        let mut vorbis_comment = None;
        let mut cue_sheet = None;
        let mut pictures: Vec<Picture> = Vec::new();
        let mut seen_front = false;
        let mut seen_back = false;

        loop {
            let Some(header_byte) = self.reader.try_read_u8()? else {
                return Err(FlacError::UnterminatedBlockChain {
                    path: self.reader.path().to_string(),
                });
            };
            let is_last = header_byte & 0b1000_0000 != 0;
            let type_code = header_byte & 0b0111_1111;
            let size = self.reader.read_u24_be()? as usize;

            if type_code == 127 {
                return Err(FlacError::InvalidBlockType {
                    path: self.reader.path().to_string(),
                });
            }

            let Some(kind) = BlockKind::from_type_code(type_code) else {
                self.reader.skip(size)?;
                self.sink.emit(Diagnostic::UnknownBlockType(type_code));
                if is_last {
                    return self.finish(
                        stream_info,
                        padding,
                        application,
                        seek_table,
                        vorbis_comment,
                        cue_sheet,
                        pictures,
                    );
                }
                continue;
            };

            self.check_duplicate(
                kind,
                stream_info.is_some(),
                seek_table.is_some(),
                vorbis_comment.is_some(),
                cue_sheet.is_some(),
            )?;

            // STREAMINFO is always fully decoded regardless of `tags_only`:
            // a successful `load()` always exposes it. VORBIS_COMMENT and
            // PICTURE are tag-adjacent and also always decoded.
            let skip_body = self.tags_only
                && !matches!(
                    kind,
                    BlockKind::StreamInfo | BlockKind::VorbisComment | BlockKind::Picture
                );

            if skip_body {
                self.reader.skip(size)?;
            } else {
                match kind {
                    BlockKind::StreamInfo => {
                        let info = self
                            .reader
                            .decode_bounded(size, |r| StreamInfo::decode_exact(r, size))?;
                        if self.validate {
                            info.validate(self.reader.path())?;
                        }
                        stream_info = Some(info);
                    }
                    BlockKind::Padding => {
                        self.reader.skip(size)?;
                        padding.push(size as u32);
                    }
                    BlockKind::Application => {
                        let validate = self.validate;
                        let decoded = self
                            .reader
                            .decode_bounded(size, |r| Application::decode_sized(r, size, validate))?;
                        application.push(decoded);
                    }
                    BlockKind::SeekTable => {
                        let validate = self.validate;
                        let decoded = self
                            .reader
                            .decode_bounded(size, |r| SeekTable::decode_sized(r, size, validate))?;
                        seek_table = Some(decoded);
                    }
                    BlockKind::VorbisComment => {
                        let policy = if self.ignore_duplicates {
                            DedupPolicy::FirstWins
                        } else {
                            DedupPolicy::KeepAll
                        };
                        let decoded = self
                            .reader
                            .decode_bounded(size, |r| VorbisComment::decode_with_policy(r, policy))?;
                        vorbis_comment = Some(decoded);
                    }
                    BlockKind::CueSheet => {
                        let validate = self.validate;
                        let decoded = self
                            .reader
                            .decode_bounded(size, |r| CueSheet::decode_sized(r, size, validate))?;
                        cue_sheet = Some(decoded);
                    }
                    BlockKind::Picture => {
                        let validate = self.validate;
                        let picture = self
                            .reader
                            .decode_bounded(size, |r| Picture::decode_sized(r, size, validate))?;
                        match picture.role() {
                            Some(crate::blocks::PictureRole::CoverFront) if seen_front => {
                                self.sink.emit(Diagnostic::DuplicateCoverArtRole(
                                    crate::blocks::PictureRole::CoverFront,
                                ));
                            }
                            Some(crate::blocks::PictureRole::CoverBack) if seen_back => {
                                self.sink.emit(Diagnostic::DuplicateCoverArtRole(
                                    crate::blocks::PictureRole::CoverBack,
                                ));
                            }
                            Some(crate::blocks::PictureRole::CoverFront) => seen_front = true,
                            Some(crate::blocks::PictureRole::CoverBack) => seen_back = true,
                            None => {}
                        }
                        pictures.push(picture);
                    }
                }
            }

            if is_last {
                return self.finish(
                    stream_info,
                    padding,
                    application,
                    seek_table,
                    vorbis_comment,
                    cue_sheet,
                    pictures,
                );
            }
        }
    }

    fn check_duplicate(
        &self,
        kind: BlockKind,
        has_stream_info: bool,
        has_seek_table: bool,
        has_vorbis_comment: bool,
        has_cue_sheet: bool,
    ) -> Result<()> {
        let duplicate = match kind {
            BlockKind::StreamInfo => has_stream_info,
            BlockKind::SeekTable => has_seek_table,
            BlockKind::VorbisComment => has_vorbis_comment,
            BlockKind::CueSheet => has_cue_sheet,
            BlockKind::Padding | BlockKind::Application | BlockKind::Picture => false,
        };
        if duplicate {
            Err(FlacError::DuplicateBlock {
                path: self.reader.path().to_string(),
                block: kind.name(),
            })
        } else {
            Ok(())
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn finish(
        &self,
        stream_info: Option<StreamInfo>,
        padding: Vec<u32>,
        application: Vec<Application>,
        seek_table: Option<SeekTable>,
        vorbis_comment: Option<VorbisComment>,
        cue_sheet: Option<CueSheet>,
        pictures: Vec<Picture>,
    ) -> Result<Metadata> {
        let stream_info = stream_info.ok_or_else(|| FlacError::MissingStreamInfo {
            path: self.reader.path().to_string(),
        })?;
        Ok(Metadata {
            stream_info,
            padding,
            application,
            seek_table,
            vorbis_comment,
            cue_sheet,
            pictures,
        })
    }
}
