//! Constant 256-bit membership sets over single bytes.

/// A set of byte values, stored as a 256-bit bitmap.
///
/// Built at compile time with [`ByteSet::from_bytes`] so descriptor tables can
/// be `const`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ByteSet([u64; 4]);

/// Size assertion: four `u64` words, no padding.
const _: () = assert!(std::mem::size_of::<ByteSet>() == 32);

impl ByteSet {
    /// The set with no members.
    pub const EMPTY: ByteSet = ByteSet([0; 4]);

    /// Build a set containing every byte in `bytes`.
    pub const fn from_bytes(bytes: &[u8]) -> Self {
        let mut words = [0u64; 4];
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            words[(b >> 6) as usize] |= 1 << (b & 63);
            i += 1;
        }
        Self(words)
    }

    #[inline]
    pub const fn contains(&self, byte: u8) -> bool {
        self.0[(byte >> 6) as usize] & (1 << (byte & 63)) != 0
    }

    /// Returns `true` if `byte` is present and not end of input.
    #[inline]
    pub fn contains_opt(&self, byte: Option<u8>) -> bool {
        byte.is_some_and(|b| self.contains(b))
    }

    pub const fn is_empty(&self) -> bool {
        self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
    }

    /// Number of members.
    pub const fn len(&self) -> u32 {
        self.0[0].count_ones() + self.0[1].count_ones() + self.0[2].count_ones() + self.0[3].count_ones()
    }

    /// Returns the single member if the set has exactly one.
    pub fn single(&self) -> Option<u8> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Iterate over the members in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(move |&b| self.contains(b))
    }
}

impl std::fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ByteSet(\"")?;
        for b in self.iter() {
            write!(f, "{}", b.escape_ascii())?;
        }
        f.write_str("\")")
    }
}
