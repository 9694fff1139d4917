mod common;

use flac_meta::{Decoder, FlacError};

#[test]
fn repeated_key_keeps_all_values_case_insensitively() {
    let comment_body =
        common::vorbis_comment_body("libFLAC 1.3.2", &["TITLE=Hello", "title=World"]);
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 4, &comment_body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    let metadata = decoder.load().unwrap();
    let comment = metadata.vorbis_comment.as_ref().unwrap();

    let values: Vec<&str> = comment.get("TITLE").iter().map(String::as_str).collect();
    assert_eq!(values, vec!["Hello", "World"]);
    assert_eq!(comment.get("title").len(), 2, "lookup is case-insensitive");
    assert_eq!(comment.get("Title"), comment.get("TITLE"));
    assert_eq!(comment.vendor(), "libFLAC 1.3.2");
    assert_eq!(comment.n_values(), 2);
}

#[test]
fn ignore_duplicates_keeps_only_first_seen_value() {
    let comment_body =
        common::vorbis_comment_body("libFLAC 1.3.2", &["TITLE=Hello", "TITLE=World"]);
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 4, &comment_body),
    ]);
    let mut decoder =
        Decoder::from_reader(stream.as_slice(), false, true).with_ignore_duplicates(true);
    let metadata = decoder.load().unwrap();
    let comment = metadata.vorbis_comment.as_ref().unwrap();

    assert_eq!(comment.get("TITLE"), ["Hello".to_string()]);
    assert_eq!(comment.n_values(), 1);
}

#[test]
fn date_falls_back_to_year() {
    let comment_body = common::vorbis_comment_body("libFLAC 1.3.2", &["YEAR=1999"]);
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 4, &comment_body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    let metadata = decoder.load().unwrap();
    let comment = metadata.vorbis_comment.as_ref().unwrap();

    assert_eq!(comment.date(), Some("1999"));
}

#[test]
fn date_is_preferred_over_year_when_both_present() {
    let comment_body =
        common::vorbis_comment_body("libFLAC 1.3.2", &["YEAR=1999", "DATE=2021-01-24"]);
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 4, &comment_body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    let metadata = decoder.load().unwrap();
    let comment = metadata.vorbis_comment.as_ref().unwrap();

    assert_eq!(comment.date(), Some("2021-01-24"));
}

#[test]
fn zero_fields_yields_empty_map() {
    let comment_body = common::vorbis_comment_body("libFLAC 1.3.2", &[]);
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 4, &comment_body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    let metadata = decoder.load().unwrap();
    let comment = metadata.vorbis_comment.as_ref().unwrap();

    assert_eq!(comment.n_values(), 0);
    assert!(comment.title().is_none());
}

#[test]
fn missing_equals_sign_is_malformed() {
    let comment_body = common::vorbis_comment_body("libFLAC 1.3.2", &["NOEQUALSIGN"]);
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 4, &comment_body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    match decoder.load() {
        Err(FlacError::MalformedVorbisField { .. }) => {}
        other => panic!("expected MalformedVorbisField, got {other:?}"),
    }
}

/// The block's declared size is larger than what the vendor/field lengths
/// actually describe. The slack must be drained by the bound reader rather
/// than left for the next block header to be misread out of it.
#[test]
fn trailing_slack_within_declared_size_is_drained_not_leaked_into_next_block() {
    let comment_body = common::vorbis_comment_body("libFLAC 1.3.2", &["TITLE=Hello"]);
    let mut oversized_body = comment_body.clone();
    oversized_body.extend_from_slice(&[0u8; 4]);

    let mut vorbis_block = common::header(false, 4, oversized_body.len() as u32);
    vorbis_block.extend_from_slice(&oversized_body);

    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        vorbis_block,
        common::block(true, 1, &[0u8; 8]),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    let metadata = decoder.load().unwrap();

    assert_eq!(
        metadata.vorbis_comment.as_ref().unwrap().title(),
        Some("Hello")
    );
    assert_eq!(metadata.padding, vec![8]);
}

/// The block's declared size is smaller than what the vendor/field lengths
/// demand: the bound reader must stop the sub-decoder's reads dead at the
/// block boundary instead of letting it run into the next block's bytes.
#[test]
fn declared_size_smaller_than_fields_require_is_truncated() {
    let comment_body = common::vorbis_comment_body("libFLAC 1.3.2", &["TITLE=Hello"]);
    let truncated_len = comment_body.len() - 2;

    let mut vorbis_block = common::header(true, 4, truncated_len as u32);
    vorbis_block.extend_from_slice(&comment_body[..truncated_len]);

    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        vorbis_block,
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    match decoder.load() {
        Err(FlacError::TruncatedStream { .. }) => {}
        other => panic!("expected TruncatedStream, got {other:?}"),
    }
}
