mod common;

use flac_meta::{Decoder, FlacError, PLACEHOLDER_SAMPLE};

fn seek_point_bytes(first_sample: u64, stream_offset: u64, frame_samples: u16) -> Vec<u8> {
    let mut out = first_sample.to_be_bytes().to_vec();
    out.extend_from_slice(&stream_offset.to_be_bytes());
    out.extend_from_slice(&frame_samples.to_be_bytes());
    out
}

#[test]
fn seek_table_with_placeholder_is_accepted() {
    let mut body = Vec::new();
    body.extend_from_slice(&seek_point_bytes(0, 0, 4096));
    body.extend_from_slice(&seek_point_bytes(PLACEHOLDER_SAMPLE, 0, 0));
    body.extend_from_slice(&seek_point_bytes(44100, 123_456, 4096));

    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 3, &body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    let metadata = decoder.load().unwrap();

    let table = metadata.seek_table.as_ref().unwrap();
    assert_eq!(table.seek_points.len(), 3);
    assert!(table.seek_points[1].is_placeholder());
}

#[test]
fn non_monotonic_sample_numbers_are_rejected() {
    let mut body = Vec::new();
    body.extend_from_slice(&seek_point_bytes(1000, 0, 4096));
    body.extend_from_slice(&seek_point_bytes(500, 0, 4096)); // decreases, not a placeholder

    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 3, &body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    match decoder.load() {
        Err(FlacError::InvalidSeekTable { .. }) => {}
        other => panic!("expected InvalidSeekTable, got {other:?}"),
    }
}

#[test]
fn size_not_a_multiple_of_18_is_rejected() {
    let body = vec![0u8; 20];
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(true, 3, &body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    match decoder.load() {
        Err(FlacError::InvalidSeekTable { .. }) => {}
        other => panic!("expected InvalidSeekTable, got {other:?}"),
    }
}

#[test]
fn duplicate_seektable_is_rejected() {
    let body = seek_point_bytes(0, 0, 4096);
    let stream = common::flac_stream(&[
        common::stream_info_block(false, [0u8; 16]),
        common::block(false, 3, &body),
        common::block(true, 3, &body),
    ]);
    let mut decoder = Decoder::from_reader(stream.as_slice(), false, true);
    match decoder.load() {
        Err(FlacError::DuplicateBlock { block, .. }) => assert_eq!(block, "SEEKTABLE"),
        other => panic!("expected DuplicateBlock, got {other:?}"),
    }
}
