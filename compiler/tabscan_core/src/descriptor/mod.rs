//! Token-type descriptors and the ordered descriptor table.
//!
//! A [`Descriptor`] pairs a start condition ([`Start`]) with a consume rule
//! ([`Shape`]). The [`Table`] is an ordered slice of descriptors; its order is
//! the match priority used by [`Matcher`](crate::Matcher).
//!
//! # Table invariants
//!
//! Checked by [`Table::new`]:
//! - exactly one descriptor has [`Start::Any`], and it is the last entry
//! - no start set is empty
//! - each shape is paired with a start condition it can work from
//!
//! [`C_TABLE`] is the built-in table for C-like sources.

use crate::byte_set::ByteSet;
use crate::error::TableError;

/// Index of a descriptor within its [`Table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u16);

impl DescriptorId {
    #[inline]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// When a descriptor may begin at the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Start {
    /// Always eligible while input remains (the wildcard).
    Any,
    /// The byte at the cursor is a member of the set.
    OneOf(ByteSet),
    /// The next two bytes equal this literal prefix.
    Prefix([u8; 2]),
}

/// How much input the start test inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookahead {
    /// Classify by the byte at the cursor alone.
    Current,
    /// Compare the next two bytes literally.
    Fixed2,
}

/// Consume rule applied once the start test passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Exactly one byte.
    ExactChar,
    /// A maximal run of bytes from the start set.
    CharInSet,
    /// The start byte, then a maximal run of word characters.
    Word,
    /// Up to, but not including, the next `\n` or `\r`.
    ToEndOfLine,
    /// A span closed by a second occurrence of its opening byte.
    ///
    /// When `escape` is set, the byte after an escape byte never closes the
    /// span.
    Quoted { escape: Option<u8> },
    /// A span opened by a [`Start::Prefix`] and closed by `close`.
    Marked { close: [u8; 2] },
}

/// One entry of the token-type table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptor {
    pub name: &'static str,
    pub start: Start,
    pub shape: Shape,
}

impl Descriptor {
    pub const fn new(name: &'static str, start: Start, shape: Shape) -> Self {
        Self { name, start, shape }
    }

    pub const fn lookahead(&self) -> Lookahead {
        match self.start {
            Start::Prefix(_) => Lookahead::Fixed2,
            Start::Any | Start::OneOf(_) => Lookahead::Current,
        }
    }

    /// Check that the shape can be driven by the start condition.
    fn validate(&self, index: usize) -> Result<(), TableError> {
        let incompatible = |reason| TableError::IncompatibleStart {
            index,
            name: self.name,
            reason,
        };
        if let Start::OneOf(set) = self.start {
            if set.is_empty() {
                return Err(TableError::EmptyStartSet {
                    index,
                    name: self.name,
                });
            }
        }
        match (self.shape, self.start) {
            (Shape::CharInSet | Shape::Quoted { .. }, Start::Any) => {
                Err(incompatible("needs a start set"))
            }
            (Shape::CharInSet | Shape::Quoted { .. }, Start::Prefix(_)) => {
                Err(incompatible("needs a start set, not a prefix"))
            }
            (Shape::Marked { .. }, Start::Any | Start::OneOf(_)) => {
                Err(incompatible("marked spans need a two-byte prefix"))
            }
            _ => Ok(()),
        }
    }
}

const fn set(bytes: &[u8]) -> Start {
    Start::OneOf(ByteSet::from_bytes(bytes))
}

/// The built-in descriptor table for C-like sources, in priority order.
///
/// Both comment forms come before `operator` so `//` and `/*` are never split
/// into a `/` operator. Whitespace has no entry: the matcher skips it before
/// consulting the table.
pub const C_TABLE: &[Descriptor] = &[
    Descriptor::new("macro", set(b"#"), Shape::ToEndOfLine),
    Descriptor::new("cxx_comment", Start::Prefix(*b"//"), Shape::ToEndOfLine),
    Descriptor::new(
        "c_comment",
        Start::Prefix(*b"/*"),
        Shape::Marked { close: *b"*/" },
    ),
    Descriptor::new("operator", set(b"+-*/%<>=!&|^~?:"), Shape::CharInSet),
    Descriptor::new("delimiter", set(b"()[]{},;"), Shape::ExactChar),
    Descriptor::new(
        "char_literal",
        set(b"'"),
        Shape::Quoted { escape: Some(b'\\') },
    ),
    Descriptor::new(
        "string_literal",
        set(b"\""),
        Shape::Quoted { escape: Some(b'\\') },
    ),
    Descriptor::new("number_literal", set(b"1234567890."), Shape::Word),
    Descriptor::new("identifier", Start::Any, Shape::Word),
];

/// Ordered, validated descriptor table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table<'d> {
    descriptors: &'d [Descriptor],
}

impl<'d> Table<'d> {
    /// Validate `descriptors` and wrap them as a table.
    pub fn new(descriptors: &'d [Descriptor]) -> Result<Self, TableError> {
        let Some(last) = descriptors.len().checked_sub(1) else {
            return Err(TableError::Empty);
        };
        if u16::try_from(descriptors.len()).is_err() {
            return Err(TableError::TooLarge {
                len: descriptors.len(),
            });
        }
        for (index, descriptor) in descriptors.iter().enumerate() {
            descriptor.validate(index)?;
            if descriptor.start == Start::Any && index != last {
                return Err(TableError::WildcardNotLast {
                    index,
                    name: descriptor.name,
                });
            }
        }
        if descriptors[last].start != Start::Any {
            return Err(TableError::MissingWildcard);
        }
        Ok(Self { descriptors })
    }

    /// The built-in C table.
    pub fn c_language() -> Table<'static> {
        Table {
            descriptors: C_TABLE,
        }
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn get(&self, id: DescriptorId) -> Option<&'d Descriptor> {
        self.descriptors.get(id.index())
    }

    /// Display label for `id`, or `"?"` for an id from another table.
    pub fn name(&self, id: DescriptorId) -> &'d str {
        self.get(id).map_or("?", |d| d.name)
    }

    /// Look up a descriptor by display label.
    pub fn id_of(&self, name: &str) -> Option<DescriptorId> {
        self.iter().find(|(_, d)| d.name == name).map(|(id, _)| id)
    }

    /// Descriptors with their ids, in priority order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Table::new rejects tables longer than u16::MAX"
    )]
    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &'d Descriptor)> + 'd {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(i, d)| (DescriptorId(i as u16), d))
    }
}

impl Default for Table<'static> {
    fn default() -> Self {
        Self::c_language()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests;
