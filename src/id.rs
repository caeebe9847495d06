//! Node identity
//!
//! Two kinds of identity take part in reconciliation:
//!
//! - **[`Key`]**: caller-supplied, unique among siblings, stable across
//!   passes. Equal keys (with equal selectors) mean "the same logical node,
//!   wherever it moved to".
//! - **[`VNodeId`]**: engine-assigned token naming one published
//!   description. Clones share it; any public mutation replaces it. Two
//!   descriptions with the same token are treated as the identical object,
//!   which lets `patch` skip a subtree that was reused verbatim.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use compact_str::CompactString;

// =============================================================================
// Key
// =============================================================================

/// Sibling identity token.
///
/// String and numeric keys live in separate spaces: `Key::from("1")` never
/// equals `Key::from(1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// String key
    Str(CompactString),
    /// Numeric key
    Num(i64),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Num(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Self::Str(value.into())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Self::Str(value.into())
    }
}

impl From<CompactString> for Key {
    fn from(value: CompactString) -> Self {
        Self::Str(value)
    }
}

macro_rules! key_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Self::Num(i64::from(value))
                }
            }
        )*
    };
}

key_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        // Sibling indices never get near i64::MAX
        Self::Num(value as i64)
    }
}

// =============================================================================
// VNodeId
// =============================================================================

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token of one published description.
///
/// # Memory Layout
///
/// - 8 bytes (u64), Copy
/// - Never zero
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[must_use]
pub struct VNodeId(u64);

impl VNodeId {
    /// Allocate a fresh, process-unique token.
    pub fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 representation
    #[inline]
    pub const fn as_raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for VNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNodeId({:x})", self.0)
    }
}

impl fmt::Display for VNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_key_spaces_are_distinct() {
        assert_ne!(Key::from("1"), Key::from(1));
        assert_eq!(Key::from("a"), Key::from(String::from("a")));
        assert_eq!(Key::from(7u8), Key::from(7i64));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::from("item-3").to_string(), "item-3");
        assert_eq!(Key::from(-4).to_string(), "-4");
    }

    #[test]
    fn test_vnode_ids_are_unique() {
        let ids: FxHashSet<VNodeId> = (0..100).map(|_| VNodeId::next()).collect();
        assert_eq!(ids.len(), 100);
        assert!(ids.iter().all(|id| id.as_raw() != 0));
    }
}
