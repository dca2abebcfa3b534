// Tests for block constants and the small helpers in block/types.rs.

use lz77::block::types::{
    compress_bound, min_length_for_offset, read_le24, read_le32, write_le24, Match,
    BLOCK_HEADER_SIZE, HASH_LOG, HASH_TABLE_SIZE, MAX_BLOCK_SIZE, MAX_CONTINUATION_BYTES,
    MAX_COPY_LENGTH, MAX_LITERAL, MAX_OFFSET, MIN_MATCH, NEAR_OFFSET,
};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn format_constants() {
    assert_eq!(BLOCK_HEADER_SIZE, 3);
    assert_eq!(MAX_BLOCK_SIZE, 16_777_215);
    assert_eq!(MIN_MATCH, 4);
    assert_eq!(MAX_LITERAL, 128);
    assert_eq!(MAX_COPY_LENGTH, 8195);
    assert_eq!(MAX_OFFSET, 2_097_152);
    assert_eq!(NEAR_OFFSET, 16_384);
    assert_eq!(MAX_CONTINUATION_BYTES, 4);
}

#[test]
fn hash_table_has_two_to_the_seventeen_slots() {
    assert_eq!(HASH_LOG, 17);
    assert_eq!(HASH_TABLE_SIZE, 131_072);
}

// ─────────────────────────────────────────────────────────────────────────────
// min_length_for_offset / compress_bound
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn near_matches_need_four_bytes_far_ones_five() {
    assert_eq!(min_length_for_offset(1), 4);
    assert_eq!(min_length_for_offset(NEAR_OFFSET), 4);
    assert_eq!(min_length_for_offset(NEAR_OFFSET + 1), 5);
    assert_eq!(min_length_for_offset(MAX_OFFSET), 5);
}

#[test]
fn min_length_is_monotone() {
    let mut prev = 0;
    for offset in (1..=MAX_OFFSET).step_by(997) {
        let m = min_length_for_offset(offset);
        assert!(m >= prev);
        prev = m;
    }
}

#[test]
fn compress_bound_values() {
    assert_eq!(compress_bound(0), 4);
    assert_eq!(compress_bound(1), 5);
    assert_eq!(compress_bound(128), 3 + 128 + 1 + 1);
    assert_eq!(compress_bound(1000), 3 + 1000 + 7 + 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Match
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn match_none_is_default() {
    assert_eq!(Match::NONE, Match::default());
    assert!(Match::NONE.is_none());
}

#[test]
fn match_end() {
    let m = Match { location: 10, length: 6, offset: 3 };
    assert!(!m.is_none());
    assert_eq!(m.end(), 16);
}

// ─────────────────────────────────────────────────────────────────────────────
// Byte helpers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn le24_layout() {
    let mut buf = [0u8; 3];
    write_le24(&mut buf, 0x0A_0B_0C);
    assert_eq!(buf, [0x0C, 0x0B, 0x0A]);
    assert_eq!(read_le24(&buf), 0x0A_0B_0C);
}

#[test]
fn le24_max() {
    let mut buf = [0u8; 3];
    write_le24(&mut buf, MAX_BLOCK_SIZE);
    assert_eq!(buf, [0xFF; 3]);
}

#[test]
fn le32_reads_at_unaligned_offsets() {
    let buf = [0u8, 1, 2, 3, 4, 5];
    assert_eq!(read_le32(&buf, 1), 0x04_03_02_01);
    assert_eq!(read_le32(&buf, 2), 0x05_04_03_02);
}
