//! Error types for buffer handling and table construction.
//!
//! Scanning itself has no error type: a descriptor either matches or defers to
//! the next one, and total table exhaustion is reported as `None` by
//! [`Matcher::scan_one`](crate::Matcher::scan_one).

/// Fatal buffer failures. Both abort the whole run.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// Growing a buffer failed to allocate.
    #[error("buffer: out of memory while growing to {requested} bytes")]
    OutOfMemory { requested: usize },
    /// The raw input contained a `0x00` byte.
    #[error("cannot process char \\0 at byte offset {offset}")]
    NullByte { offset: usize },
}

/// A descriptor table that breaks the priority invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("descriptor table is empty")]
    Empty,
    /// More descriptors than a [`DescriptorId`](crate::DescriptorId) can index.
    #[error("descriptor table has {len} entries, more than 65535")]
    TooLarge { len: usize },
    /// No descriptor has a wildcard start.
    #[error("descriptor table has no wildcard entry")]
    MissingWildcard,
    /// A wildcard descriptor appears before the last position.
    #[error("wildcard descriptor `{name}` at index {index} must be the last entry")]
    WildcardNotLast { index: usize, name: &'static str },
    /// A start set that can never match.
    #[error("descriptor `{name}` at index {index} has an empty start set")]
    EmptyStartSet { index: usize, name: &'static str },
    /// The shape cannot be driven by the descriptor's start condition.
    #[error("descriptor `{name}` at index {index}: {reason}")]
    IncompatibleStart {
        index: usize,
        name: &'static str,
        reason: &'static str,
    },
}
