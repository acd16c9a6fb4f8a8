//! Table-driven matcher producing one token per scan step.
//!
//! [`Matcher::scan_one`] skips whitespace, then walks the descriptor table in
//! order. For each descriptor it runs the start test, then the consume rule
//! for its [`Shape`]. The first descriptor whose end is detected wins; its
//! bytes move from the input buffer into the lexeme buffer.
//!
//! # End detection
//!
//! Span shapes locate their closing byte(s) before touching the cursor, so a
//! descriptor whose end is not detected leaves the input exactly where it was.
//! An unterminated span ends the walk with `None` at its opening byte, even
//! though later descriptors (the wildcard included) would accept that byte:
//! the pass stops there and [`Scanner::finish`] reports [`PassEnd::Stalled`].

use tracing::{debug, trace};

use crate::buffer::CursorBuffer;
use crate::byte_set::ByteSet;
use crate::descriptor::{Descriptor, DescriptorId, Shape, Start, Table};
use crate::error::BufferError;

/// Bytes skipped before every scan step: space, tab, vertical tab, form feed,
/// newline, carriage return.
pub const WHITESPACE: ByteSet = ByteSet::from_bytes(b" \t\x0B\x0C\n\r");

/// Bytes that end a [`Shape::ToEndOfLine`] token.
const LINE_END: ByteSet = ByteSet::from_bytes(b"\n\r");

/// Matches an ordered descriptor table against a cursor buffer.
#[derive(Clone, Copy, Debug)]
pub struct Matcher<'d> {
    table: Table<'d>,
}

impl<'d> Matcher<'d> {
    pub fn new(table: Table<'d>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> Table<'d> {
        self.table
    }

    /// Scan one token from `input` into `out`.
    ///
    /// Returns the id of the first descriptor that matched, or `None` when no
    /// descriptor matches at the cursor: input is exhausted, or a span opens
    /// here and never closes. On `None` the cursor rests after any leading
    /// whitespace.
    pub fn scan_one(
        &self,
        input: &mut CursorBuffer,
        out: &mut CursorBuffer,
    ) -> Result<Option<DescriptorId>, BufferError> {
        input.skip_while_in(&WHITESPACE);
        let start = input.position();

        for (id, descriptor) in self.table.iter() {
            if !starts_here(descriptor, input) {
                continue;
            }
            if consume(descriptor, input, out)? {
                trace!(
                    descriptor = descriptor.name,
                    offset = start,
                    len = input.position() - start,
                    "matched"
                );
                return Ok(Some(id));
            }
            // Only spans can miss their end, and an unterminated span stops
            // the pass: no later descriptor may claim its opening bytes.
            debug!(
                descriptor = descriptor.name,
                offset = start,
                remaining = input.remaining_len(),
                "unterminated span"
            );
            return Ok(None);
        }

        debug!(
            offset = start,
            remaining = input.remaining_len(),
            "no descriptor matched"
        );
        Ok(None)
    }
}

impl Default for Matcher<'static> {
    fn default() -> Self {
        Self::new(Table::c_language())
    }
}

/// Start test for one descriptor at the cursor.
fn starts_here(descriptor: &Descriptor, input: &CursorBuffer) -> bool {
    match descriptor.start {
        Start::Any => !input.is_exhausted(),
        Start::OneOf(set) => set.contains_opt(input.peek()),
        Start::Prefix([a, b]) => input.peek_at(0) == Some(a) && input.peek_at(1) == Some(b),
    }
}

/// Run the consume rule for a descriptor whose start already matched.
///
/// Returns `false` when the end of the token is not detected. In that case
/// neither buffer has been touched.
fn consume(
    descriptor: &Descriptor,
    input: &mut CursorBuffer,
    out: &mut CursorBuffer,
) -> Result<bool, BufferError> {
    match descriptor.shape {
        Shape::ExactChar => {
            input.read_fixed(out, 1)?;
        }
        Shape::CharInSet => {
            // Validated tables pair this shape with `Start::OneOf` only.
            if let Start::OneOf(set) = descriptor.start {
                input.read_while_in(out, &set)?;
            }
        }
        Shape::Word => {
            // The start test vouched for the first byte, which need not be a
            // word character itself under the wildcard.
            input.read_fixed(out, 1)?;
            input.read_while_word_char(out)?;
        }
        Shape::ToEndOfLine => {
            input.read_until_in(out, &LINE_END)?;
        }
        Shape::Quoted { escape } => {
            let Some(len) = quoted_span_len(input.remaining(), escape) else {
                return Ok(false);
            };
            input.read_span(out, len)?;
        }
        Shape::Marked { close } => {
            let Some(len) = marked_span_len(input.remaining(), close) else {
                return Ok(false);
            };
            input.read_span(out, len)?;
        }
    }
    Ok(true)
}

/// Length of a quoted span at the start of `rest`, closing delimiter included.
///
/// `rest[0]` is the opening delimiter. The span closes at the next unescaped
/// occurrence of that same byte.
fn quoted_span_len(rest: &[u8], escape: Option<u8>) -> Option<usize> {
    let (&open, body) = rest.split_first()?;
    let mut i = 0;
    while i < body.len() {
        let b = body[i];
        if Some(b) == escape {
            i += 2;
        } else if b == open {
            return Some(i + 2);
        } else {
            i += 1;
        }
    }
    None
}

/// Length of a marked span at the start of `rest`, closing marker included.
///
/// The search for `close` starts after the two-byte opener, so `/*/` is not a
/// complete comment.
fn marked_span_len(rest: &[u8], close: [u8; 2]) -> Option<usize> {
    let body = rest.get(2..)?;
    memchr::memmem::find(body, &close).map(|pos| 2 + pos + close.len())
}

// ─── Scanner ──────────────────────────────────────────────────────

/// One reported token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: DescriptorId,
    /// Byte offset of the first lexeme byte in the input.
    pub offset: usize,
    /// The consumed bytes, span delimiters included.
    pub lexeme: CursorBuffer,
}

impl Token {
    pub fn lexeme(&self) -> &[u8] {
        self.lexeme.as_bytes()
    }
}

/// How a scanning pass ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassEnd {
    /// All input was consumed.
    Exhausted,
    /// Scanning stopped at `offset` with `remaining` bytes unread.
    Stalled { offset: usize, remaining: usize },
}

/// Drives a [`Matcher`] over a whole input buffer.
///
/// Yields one `Ok(Token)` per match and stops at the first position where no
/// descriptor matches. A fatal [`BufferError`] is yielded once, after which
/// the iterator is finished.
pub struct Scanner<'d> {
    matcher: Matcher<'d>,
    input: CursorBuffer,
    done: bool,
}

impl<'d> Scanner<'d> {
    /// Scan `input` from its cursor. Lexeme buffers share its growth config.
    pub fn new(matcher: Matcher<'d>, input: CursorBuffer) -> Self {
        Self {
            matcher,
            input,
            done: false,
        }
    }

    pub fn matcher(&self) -> &Matcher<'d> {
        &self.matcher
    }

    /// Display label for a token produced by this scanner.
    pub fn label(&self, token: &Token) -> &'d str {
        self.matcher.table().name(token.id)
    }

    pub fn input(&self) -> &CursorBuffer {
        &self.input
    }

    /// Current read offset in the input.
    pub fn position(&self) -> usize {
        self.input.position()
    }

    /// How the pass ended. Meaningful once the iterator returned `None`.
    pub fn pass_end(&self) -> PassEnd {
        if self.input.is_exhausted() {
            PassEnd::Exhausted
        } else {
            PassEnd::Stalled {
                offset: self.input.position(),
                remaining: self.input.remaining_len(),
            }
        }
    }

    /// Consume the scanner, returning how the pass ended.
    pub fn finish(self) -> PassEnd {
        self.pass_end()
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, BufferError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut lexeme = CursorBuffer::new(self.input.config());
        match self.matcher.scan_one(&mut self.input, &mut lexeme) {
            Ok(Some(id)) if !lexeme.is_empty() => {
                let offset = self.input.position() - lexeme.len();
                Some(Ok(Token { id, offset, lexeme }))
            }
            Ok(_) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}
