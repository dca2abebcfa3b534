// Tests for the token wire format (block/token.rs).

use lz77::block::decompress::DecompressError;
use lz77::block::token::{
    continuation_len, copy_token_len, literal_control, read_continuation, read_token,
    write_continuation, write_copy, Token,
};
use lz77::block::types::{
    CONTINUATION_FLAG, COPY_FLAG, MAX_COPY_LENGTH, MAX_LITERAL, MAX_OFFSET, MIN_MATCH, NEAR_OFFSET,
};

// ─────────────────────────────────────────────────────────────────────────────
// Literal tokens
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn literal_control_stores_run_minus_one() {
    assert_eq!(literal_control(1), 0);
    assert_eq!(literal_control(MAX_LITERAL), 0x7F);
}

#[test]
fn read_literal_token() {
    let src = [0x03, b'w', b'x', b'y', b'z'];
    assert_eq!(read_token(&src, 0), Ok((Token::Literal { run: 4 }, 1)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Continuation integers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn continuation_widths() {
    assert_eq!(continuation_len(0), 1);
    assert_eq!(continuation_len(0x7F), 1);
    assert_eq!(continuation_len(0x80), 2);
    assert_eq!(continuation_len(NEAR_OFFSET - 1), 2);
    assert_eq!(continuation_len(NEAR_OFFSET), 3);
    assert_eq!(continuation_len(MAX_OFFSET - 1), 3);
    assert_eq!(continuation_len(MAX_OFFSET), 4);
}

#[test]
fn continuation_round_trip_at_width_edges() {
    let mut buf = [0u8; 8];
    for value in [0usize, 1, 127, 128, 16_383, 16_384, 2_097_151, (1 << 28) - 1] {
        let end = write_continuation(&mut buf, 2, value).unwrap();
        assert_eq!(end, 2 + continuation_len(value));
        assert_eq!(read_continuation(&buf, 2), Ok((value, end)));
    }
}

#[test]
fn four_byte_continuation_is_the_limit() {
    let max = [0xFF, 0xFF, 0xFF, 0x7F];
    assert_eq!(read_continuation(&max, 0), Ok(((1 << 28) - 1, 4)));
    let five = [0xFF, 0xFF, 0xFF, 0xFF, 0x7F];
    assert_eq!(read_continuation(&five, 0), Err(DecompressError::OversizedInteger));
}

// ─────────────────────────────────────────────────────────────────────────────
// Copy tokens
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn minimal_copy() {
    let mut buf = [0u8; 2];
    assert_eq!(write_copy(&mut buf, 0, MIN_MATCH, 1), Some(2));
    assert_eq!(buf, [COPY_FLAG, 0]);
    assert_eq!(copy_token_len(MIN_MATCH, 1), 2);
}

#[test]
fn longest_inline_length() {
    let mut buf = [0u8; 4];
    let end = write_copy(&mut buf, 0, MIN_MATCH + 63, 5).unwrap();
    assert_eq!(&buf[..end], &[COPY_FLAG | 63, 4]);
}

#[test]
fn first_extended_length() {
    let mut buf = [0u8; 4];
    let end = write_copy(&mut buf, 0, MIN_MATCH + 64, 5).unwrap();
    assert_eq!(&buf[..end], &[COPY_FLAG | CONTINUATION_FLAG, 1, 4]);
}

#[test]
fn max_length_at_max_offset() {
    let mut buf = [0u8; 8];
    let end = write_copy(&mut buf, 0, MAX_COPY_LENGTH, MAX_OFFSET).unwrap();
    assert_eq!(end, 5);
    assert_eq!(copy_token_len(MAX_COPY_LENGTH, MAX_OFFSET), 5);
    assert_eq!(&buf[..5], &[0xFF, 0x7F, 0xFF, 0xFF, 0x7F]);
    assert_eq!(
        read_token(&buf, 0),
        Ok((
            Token::Copy {
                length: MAX_COPY_LENGTH,
                offset: MAX_OFFSET
            },
            5
        ))
    );
}

#[test]
fn write_copy_reports_missing_room() {
    let mut buf = [0u8; 2];
    assert_eq!(write_copy(&mut buf, 0, MIN_MATCH, NEAR_OFFSET), None);
    assert_eq!(write_copy(&mut buf, 1, MIN_MATCH, 1), None);
}

#[test]
fn copy_tokens_round_trip() {
    let mut buf = [0u8; 16];
    for &length in &[4usize, 5, 67, 68, 500, 4099, MAX_COPY_LENGTH] {
        for &offset in &[1usize, 2, 128, 129, NEAR_OFFSET, NEAR_OFFSET + 1, MAX_OFFSET] {
            let end = write_copy(&mut buf, 3, length, offset).unwrap();
            assert_eq!(end - 3, copy_token_len(length, offset));
            assert_eq!(read_token(&buf, 3), Ok((Token::Copy { length, offset }, end)));
        }
    }
}

#[test]
fn copy_token_truncated() {
    let buf = [COPY_FLAG | CONTINUATION_FLAG, 0x81];
    assert_eq!(read_token(&buf, 0), Err(DecompressError::TruncatedToken));
    assert_eq!(read_token(&[], 0), Err(DecompressError::TruncatedToken));
}
