//! Comparator strategies
//!
//! A soft heap orders keys with a caller-supplied total order rather than
//! requiring `P: Ord`. Any `Fn(&P, &P) -> Ordering` closure works, and
//! [`Natural`] uses the key's own `Ord` implementation (ascending).
//!
//! ```rust
//! use soft_heap::compare::{Compare, Natural};
//! use std::cmp::Ordering;
//!
//! assert_eq!(Natural.compare(&1, &2), Ordering::Less);
//!
//! let descending = |a: &i32, b: &i32| b.cmp(a);
//! assert_eq!(descending.compare(&1, &2), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// A total order over keys of type `P`
///
/// Implementations must be consistent (antisymmetric and transitive). An
/// inconsistent order does not cause memory unsafety, but the heap's ordering
/// guarantees no longer hold.
pub trait Compare<P: ?Sized> {
    /// Compares two keys
    fn compare(&self, a: &P, b: &P) -> Ordering;

    /// Returns true if `a` orders strictly before `b`
    #[inline]
    fn less(&self, a: &P, b: &P) -> bool {
        self.compare(a, b) == Ordering::Less
    }
}

/// Ascending order through `P: Ord`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<P: Ord + ?Sized> Compare<P> for Natural {
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        a.cmp(b)
    }
}

impl<P: ?Sized, F> Compare<P> for F
where
    F: Fn(&P, &P) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &P, b: &P) -> Ordering {
        self(a, b)
    }
}
