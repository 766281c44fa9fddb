//! Rank type and the rank-dependent sizing rules of the soft heap.
//!
//! # Why u8?
//!
//! A node's rank is the number of `combine` steps below it, so a rank-`k`
//! tree was built from 2ᵏ leaves. Ranks therefore never exceed `log₂(n)`,
//! and `u8` covers any heap that fits in memory while keeping nodes small.
//!
//! # Target sizes
//!
//! Every node carries a *target size*: the number of elements its bucket
//! should hold before `sift` stops pulling from its children. Below the
//! corruption threshold `r` the target is 1 (the node behaves like an exact
//! binary-heap node). Above it the target grows by a factor of roughly 3/2
//! per rank, which is what lets elements share a common key.

/// Type alias for node rank.
pub type Rank = u8;

/// Maximum valid rank value.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`, which would require more than 2²⁵⁵ inserts.
///
/// # Example
///
/// ```rust
/// use soft_heap::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: ranks are bounded by log₂ of the number of inserts \
         and u8::MAX (255) covers up to 2²⁵⁵ of them",
    )
}

/// Computes the corruption threshold `r = ceil(log₂(1/ε)) + slack`.
///
/// `epsilon` is expected in `(0, 1]`; [`Config`](crate::config::Config)
/// validates it. The result saturates at [`MAX_RANK`].
///
/// ```rust
/// use soft_heap::rank::threshold;
///
/// assert_eq!(threshold(1.0 / 3.0, 5), 7);
/// assert_eq!(threshold(1.0, 4), 4);
/// ```
pub fn threshold(epsilon: f64, slack: Rank) -> Rank {
    let bits = (1.0 / epsilon).log2().ceil();
    let bits = if bits >= MAX_RANK as f64 {
        MAX_RANK
    } else if bits > 0.0 {
        bits as Rank
    } else {
        0
    };
    bits.saturating_add(slack)
}

/// Target size of a node of `rank` built by combining two children, the
/// left one having target size `child_target`.
///
/// ```rust
/// use soft_heap::rank::target_size;
///
/// // At or below the threshold every node holds a single element.
/// assert_eq!(target_size(7, 1, 7), 1);
/// // Above it the target grows as floor((3·t + 1) / 2).
/// assert_eq!(target_size(8, 1, 7), 2);
/// assert_eq!(target_size(9, 2, 7), 3);
/// ```
#[inline]
pub fn target_size(rank: Rank, child_target: usize, threshold: Rank) -> usize {
    if rank <= threshold {
        1
    } else {
        child_target.saturating_mul(3).saturating_add(1) / 2
    }
}
