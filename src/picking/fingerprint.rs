//! Tag fingerprints for listeners registered by name.

use std::fmt;

/// A 32-bit hash of a listener tag.
///
/// Computed over the UTF-16 code units of the tag as `h = (h << 5) - h + c`
/// with wrapping arithmetic, so equal tags always produce equal fingerprints.
/// Distinct tags can collide in principle; such tags share a registry slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerFingerprint(i32);

impl HandlerFingerprint {
    /// Fingerprint `tag`.
    pub fn of(tag: &str) -> Self {
        let hash = tag.encode_utf16().fold(0i32, |h, c| {
            (h << 5).wrapping_sub(h).wrapping_add(i32::from(c))
        });
        Self(hash)
    }

    /// The raw hash value.
    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<&str> for HandlerFingerprint {
    fn from(tag: &str) -> Self {
        Self::of(tag)
    }
}

impl fmt::Display for HandlerFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}
