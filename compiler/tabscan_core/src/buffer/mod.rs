//! Append-only byte buffer with a forward-only read cursor.
//!
//! The same type serves two roles:
//! - the **input buffer**, loaded once with [`CursorBuffer::from_source`] and
//!   then only read from
//! - a **lexeme buffer**, filled by one scan step and handed to the reporter
//!
//! Reads never move the cursor backwards. End of input is `None` from the
//! peek and advance methods.
//!
//! # Growth
//!
//! Storage grows by a fixed delta (see [`BufferConfig`]) whenever the next
//! byte would leave no slack after the content. Growth goes through
//! [`Vec::try_reserve_exact`], so allocation failure surfaces as
//! [`BufferError::OutOfMemory`] instead of aborting inside the allocator.
//!
//! # Null Bytes
//!
//! [`CursorBuffer::from_source`] rejects any `0x00` byte with
//! [`BufferError::NullByte`] before the buffer exists.

use crate::byte_set::ByteSet;
use crate::error::BufferError;

/// Growth increment used when none is configured.
pub const DEFAULT_GROWTH_DELTA: usize = 32;

/// Word continuation bytes beyond ASCII alphanumerics.
///
/// Brackets and dot keep array and member access (`arr[3].x`) inside one
/// identifier-like token.
pub const WORD_EXTRA: ByteSet = ByteSet::from_bytes(b"_[].");

/// Returns `true` if `byte` may continue an identifier-like word.
#[inline]
pub fn is_word_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || WORD_EXTRA.contains(byte)
}

/// Buffer growth policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferConfig {
    growth_delta: usize,
}

impl BufferConfig {
    /// A growth delta below 2 falls back to [`DEFAULT_GROWTH_DELTA`].
    pub fn new(growth_delta: usize) -> Self {
        let growth_delta = if growth_delta < 2 {
            DEFAULT_GROWTH_DELTA
        } else {
            growth_delta
        };
        Self { growth_delta }
    }

    pub fn growth_delta(&self) -> usize {
        self.growth_delta
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GROWTH_DELTA)
    }
}

/// Growable byte storage with a monotone read cursor.
///
/// # Invariant
///
/// `cursor <= data.len() < data.capacity()` once any byte has been appended:
/// one byte of slack always stays free after the content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CursorBuffer {
    data: Vec<u8>,
    cursor: usize,
    config: BufferConfig,
}

impl CursorBuffer {
    /// Create an empty buffer. Nothing is allocated until the first append.
    pub fn new(config: BufferConfig) -> Self {
        Self {
            data: Vec::new(),
            cursor: 0,
            config,
        }
    }

    /// Create an empty buffer with room for `capacity` bytes plus slack.
    pub fn with_capacity(capacity: usize, config: BufferConfig) -> Result<Self, BufferError> {
        let mut buf = Self::new(config);
        buf.reserve_exact(capacity + 1)?;
        Ok(buf)
    }

    /// Load a whole input, cursor at byte 0.
    ///
    /// Fails with [`BufferError::NullByte`] at the first `0x00` byte.
    pub fn from_source(source: &[u8], config: BufferConfig) -> Result<Self, BufferError> {
        if let Some(offset) = memchr::memchr(0, source) {
            return Err(BufferError::NullByte { offset });
        }
        let mut buf = Self::with_capacity(source.len(), config)?;
        buf.data.extend_from_slice(source);
        Ok(buf)
    }

    // ─── Writing ──────────────────────────────────────────────────

    /// Append one byte, growing by the configured delta when needed.
    #[inline]
    pub fn append(&mut self, byte: u8) -> Result<(), BufferError> {
        if self.data.len() + 1 >= self.data.capacity() {
            self.reserve_exact(self.config.growth_delta)?;
        }
        self.data.push(byte);
        Ok(())
    }

    /// Append a run of bytes, growing in whole multiples of the delta.
    pub fn append_slice(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let needed = self.data.len() + bytes.len() + 1;
        if needed > self.data.capacity() {
            let delta = self.config.growth_delta;
            let shortfall = needed - self.data.len();
            let additional = shortfall.div_ceil(delta) * delta;
            self.reserve_exact(additional)?;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    fn reserve_exact(&mut self, additional: usize) -> Result<(), BufferError> {
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| BufferError::OutOfMemory {
                requested: self.data.len().saturating_add(additional),
            })
    }

    // ─── Cursor ───────────────────────────────────────────────────

    /// Byte at the cursor, or `None` at end of input.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.data.get(self.cursor).copied()
    }

    /// Byte `offset` positions past the cursor, or `None` out of range.
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.data.get(self.cursor.checked_add(offset)?).copied()
    }

    /// Return the byte at the cursor and move past it.
    #[inline]
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.cursor += 1;
        Some(byte)
    }

    /// Move past the byte at the cursor. No-op at end of input.
    #[inline]
    pub fn skip(&mut self) {
        if self.cursor < self.data.len() {
            self.cursor += 1;
        }
    }

    /// Move past every leading byte in `set` without copying it.
    ///
    /// Returns the number of bytes skipped.
    pub fn skip_while_in(&mut self, set: &ByteSet) -> usize {
        let start = self.cursor;
        while set.contains_opt(self.peek()) {
            self.cursor += 1;
        }
        self.cursor - start
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.data.len()
    }

    /// The unread suffix.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.cursor..]
    }

    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Current read offset from the start of the buffer.
    #[inline]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Every byte written, read or not.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Give up the buffer, keeping the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn config(&self) -> BufferConfig {
        self.config
    }

    // ─── Transfers ────────────────────────────────────────────────
    //
    // Each transfer moves bytes from this buffer's cursor into `dst` and
    // returns how many were moved. Reaching end of input is not an error.

    /// Move up to `n` bytes into `dst`.
    pub fn read_fixed(&mut self, dst: &mut CursorBuffer, n: usize) -> Result<usize, BufferError> {
        let mut moved = 0;
        while moved < n {
            let Some(byte) = self.advance() else {
                break;
            };
            dst.append(byte)?;
            moved += 1;
        }
        Ok(moved)
    }

    /// Move bytes into `dst` while they belong to `allowed`.
    pub fn read_while_in(
        &mut self,
        dst: &mut CursorBuffer,
        allowed: &ByteSet,
    ) -> Result<usize, BufferError> {
        self.read_while(dst, |b| allowed.contains(b))
    }

    /// Move bytes into `dst` while they are word characters (see [`is_word_char`]).
    pub fn read_while_word_char(&mut self, dst: &mut CursorBuffer) -> Result<usize, BufferError> {
        self.read_while(dst, is_word_char)
    }

    /// Move bytes into `dst` up to, but not including, the first byte in `stop`.
    pub fn read_until_in(
        &mut self,
        dst: &mut CursorBuffer,
        stop: &ByteSet,
    ) -> Result<usize, BufferError> {
        let rest = self.remaining();
        let len = rest
            .iter()
            .position(|&b| stop.contains(b))
            .unwrap_or(rest.len());
        self.read_span(dst, len)
    }

    /// Move exactly `len` bytes into `dst` in one copy.
    ///
    /// Callers must have checked `len <= remaining_len()`; a longer `len` is
    /// clamped to the unread suffix.
    pub(crate) fn read_span(&mut self, dst: &mut CursorBuffer, len: usize) -> Result<usize, BufferError> {
        let end = self.cursor + len.min(self.remaining_len());
        dst.append_slice(&self.data[self.cursor..end])?;
        let moved = end - self.cursor;
        self.cursor = end;
        Ok(moved)
    }

    fn read_while(
        &mut self,
        dst: &mut CursorBuffer,
        pred: impl Fn(u8) -> bool,
    ) -> Result<usize, BufferError> {
        let mut moved = 0;
        while let Some(byte) = self.peek() {
            if !pred(byte) {
                break;
            }
            dst.append(byte)?;
            self.cursor += 1;
            moved += 1;
        }
        Ok(moved)
    }
}

impl Default for CursorBuffer {
    fn default() -> Self {
        Self::new(BufferConfig::default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
