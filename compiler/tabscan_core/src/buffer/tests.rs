use super::*;
use pretty_assertions::assert_eq;

fn input(source: &str) -> CursorBuffer {
    CursorBuffer::from_source(source.as_bytes(), BufferConfig::default()).unwrap()
}

// === Construction ===

#[test]
fn empty_source() {
    let buf = input("");
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(buf.is_exhausted());
    assert_eq!(buf.peek(), None);
}

#[test]
fn from_source_keeps_bytes_and_starts_at_zero() {
    let buf = input("int x;");
    assert_eq!(buf.as_bytes(), b"int x;");
    assert_eq!(buf.position(), 0);
    assert_eq!(buf.remaining_len(), 6);
}

#[test]
fn null_byte_is_rejected_with_offset() {
    let err = CursorBuffer::from_source(b"ab\0cd", BufferConfig::default()).unwrap_err();
    assert_eq!(err, BufferError::NullByte { offset: 2 });
}

#[test]
fn first_null_byte_is_reported() {
    let err = CursorBuffer::from_source(b"\0a\0", BufferConfig::default()).unwrap_err();
    assert_eq!(err, BufferError::NullByte { offset: 0 });
}

#[test]
fn null_byte_message_is_distinct() {
    let err = BufferError::NullByte { offset: 7 };
    assert_eq!(err.to_string(), "cannot process char \\0 at byte offset 7");
}

// === Growth ===

#[test]
fn small_delta_falls_back_to_default() {
    assert_eq!(BufferConfig::new(0).growth_delta(), DEFAULT_GROWTH_DELTA);
    assert_eq!(BufferConfig::new(1).growth_delta(), DEFAULT_GROWTH_DELTA);
    assert_eq!(BufferConfig::new(2).growth_delta(), 2);
    assert_eq!(BufferConfig::new(100).growth_delta(), 100);
}

#[test]
fn append_keeps_one_byte_of_slack() {
    let mut buf = CursorBuffer::new(BufferConfig::new(4));
    for b in 0..50u8 {
        buf.append(b'a' + b % 26).unwrap();
        assert!(
            buf.len() < buf.capacity(),
            "no slack after {} bytes (capacity {})",
            buf.len(),
            buf.capacity()
        );
    }
    assert_eq!(buf.len(), 50);
}

#[test]
fn append_slice_keeps_one_byte_of_slack() {
    let mut buf = CursorBuffer::new(BufferConfig::new(8));
    buf.append_slice(b"0123456789abcdef").unwrap();
    assert!(buf.len() < buf.capacity());
    buf.append_slice(b"").unwrap();
    buf.append_slice(b"g").unwrap();
    assert_eq!(buf.as_bytes(), b"0123456789abcdefg");
    assert!(buf.len() < buf.capacity());
}

#[test]
fn growth_never_shrinks() {
    let mut buf = CursorBuffer::new(BufferConfig::new(2));
    let mut last = 0;
    for _ in 0..20 {
        buf.append(b'x').unwrap();
        assert!(buf.capacity() >= last);
        last = buf.capacity();
    }
}

// === Cursor ===

#[test]
fn peek_does_not_move() {
    let buf = input("ab");
    assert_eq!(buf.peek(), Some(b'a'));
    assert_eq!(buf.peek(), Some(b'a'));
    assert_eq!(buf.position(), 0);
}

#[test]
fn peek_at_looks_ahead_from_cursor() {
    let mut buf = input("abc");
    assert_eq!(buf.peek_at(0), Some(b'a'));
    assert_eq!(buf.peek_at(2), Some(b'c'));
    assert_eq!(buf.peek_at(3), None);
    buf.skip();
    assert_eq!(buf.peek_at(1), Some(b'c'));
    assert_eq!(buf.peek_at(2), None);
    assert_eq!(buf.peek_at(usize::MAX), None);
}

#[test]
fn advance_returns_current_then_moves() {
    let mut buf = input("hi");
    assert_eq!(buf.advance(), Some(b'h'));
    assert_eq!(buf.advance(), Some(b'i'));
    assert_eq!(buf.advance(), None);
    assert_eq!(buf.position(), 2);
    assert!(buf.is_exhausted());
}

#[test]
fn skip_at_end_is_noop() {
    let mut buf = input("x");
    buf.skip();
    buf.skip();
    assert_eq!(buf.position(), 1);
}

#[test]
fn remaining_tracks_cursor() {
    let mut buf = input("abcd");
    buf.skip();
    buf.skip();
    assert_eq!(buf.remaining(), b"cd");
    assert_eq!(buf.remaining_len(), 2);
}

#[test]
fn skip_while_in_stops_at_non_member() {
    let mut buf = input(" \t\n x");
    let skipped = buf.skip_while_in(&ByteSet::from_bytes(b" \t\n"));
    assert_eq!(skipped, 4);
    assert_eq!(buf.peek(), Some(b'x'));
}

// === Transfers ===

#[test]
fn read_fixed_stops_at_end_without_error() {
    let mut src = input("abc");
    let mut dst = CursorBuffer::default();
    assert_eq!(src.read_fixed(&mut dst, 2).unwrap(), 2);
    assert_eq!(dst.as_bytes(), b"ab");
    assert_eq!(src.read_fixed(&mut dst, 10).unwrap(), 1);
    assert_eq!(dst.as_bytes(), b"abc");
    assert!(src.is_exhausted());
}

#[test]
fn read_while_in_copies_maximal_run() {
    let mut src = input("<<=x");
    let mut dst = CursorBuffer::default();
    let moved = src
        .read_while_in(&mut dst, &ByteSet::from_bytes(b"<="))
        .unwrap();
    assert_eq!(moved, 3);
    assert_eq!(dst.as_bytes(), b"<<=");
    assert_eq!(src.peek(), Some(b'x'));
}

#[test]
fn read_while_in_consumes_nothing_on_first_miss() {
    let mut src = input("x+");
    let mut dst = CursorBuffer::default();
    let moved = src.read_while_in(&mut dst, &ByteSet::from_bytes(b"+")).unwrap();
    assert_eq!(moved, 0);
    assert!(dst.is_empty());
    assert_eq!(src.position(), 0);
}

#[test]
fn read_while_word_char_includes_extra_set() {
    let mut src = input("arr[3].x_y-1");
    let mut dst = CursorBuffer::default();
    src.read_while_word_char(&mut dst).unwrap();
    assert_eq!(dst.as_bytes(), b"arr[3].x_y");
    assert_eq!(src.peek(), Some(b'-'));
}

#[test]
fn read_until_in_leaves_stop_byte() {
    let mut src = input("# define X\r\nnext");
    let mut dst = CursorBuffer::default();
    src.read_until_in(&mut dst, &ByteSet::from_bytes(b"\n\r"))
        .unwrap();
    assert_eq!(dst.as_bytes(), b"# define X");
    assert_eq!(src.peek(), Some(b'\r'));
}

#[test]
fn read_until_in_runs_to_end_of_input() {
    let mut src = input("// trailing");
    let mut dst = CursorBuffer::new(BufferConfig::new(2));
    let moved = src
        .read_until_in(&mut dst, &ByteSet::from_bytes(b"\n\r"))
        .unwrap();
    assert_eq!(moved, 11);
    assert!(src.is_exhausted());
    assert_eq!(dst.as_bytes(), b"// trailing");
}

#[test]
fn word_chars() {
    for b in b"azAZ09_[]." {
        assert!(is_word_char(*b), "{} should be a word char", *b as char);
    }
    for b in b"-+;(){} \t'\"/" {
        assert!(!is_word_char(*b), "{} should not be a word char", *b as char);
    }
}
