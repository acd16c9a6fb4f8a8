//! Table-driven tokenizer engine for C-like source text.
//!
//! This crate contains the whole scanning core:
//! - [`CursorBuffer`]: append-only byte storage with a forward-only read cursor
//! - [`Descriptor`] and [`Table`]: the ordered token-type table
//! - [`Matcher`]: matches the table against the input at the cursor
//! - [`Scanner`]: drives the matcher over a whole input, yielding [`Token`]s
//!
//! # Design
//!
//! **Table order is priority.** The matcher tries every descriptor in table
//! order and the first one whose start *and* end are detected wins. The single
//! wildcard descriptor sits last so every structural category gets first
//! refusal.
//!
//! **Single-byte character model.** Input is raw bytes. A `0x00` byte is
//! rejected when the input buffer is loaded, so the matcher never sees one.

mod buffer;
mod byte_set;
mod descriptor;
mod error;
mod matcher;

pub use buffer::{is_word_char, BufferConfig, CursorBuffer, DEFAULT_GROWTH_DELTA, WORD_EXTRA};
pub use byte_set::ByteSet;
pub use descriptor::{Descriptor, DescriptorId, Lookahead, Shape, Start, Table, C_TABLE};
pub use error::{BufferError, TableError};
pub use matcher::{Matcher, PassEnd, Scanner, Token, WHITESPACE};
