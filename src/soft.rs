//! Soft Heap implementation
//!
//! A soft heap (Chazelle; this is the simplified design of Kaplan and Zwick)
//! is a meldable priority queue that is allowed to *corrupt* keys: an element
//! may be reported under a key larger than the one it was inserted with. In
//! exchange every operation costs O(log 1/ε) amortized, where ε bounds the
//! fraction of corrupted elements held at any time.
//!
//! # Algorithm Overview
//!
//! The heap is a forest of binary merge trees kept in strictly increasing
//! rank order, at most one tree per rank, like the bits of a binary counter.
//! Each tree caches a pointer to the tree with the smallest root key among
//! itself and its successors (its *suffix minimum*), so the global minimum is
//! always reachable from the head.
//!
//! **Key Operations**:
//! - **Insert**: splice a one-element tree at the head, then combine
//!   equal-rank neighbours (carry propagation). Each combine fills the new
//!   root's bucket with `sift`.
//! - **Extract-min**: follow the head's suffix minimum, remove one element from
//!   that root's bucket, and once the bucket is at or below half of its target
//!   size, replenish it with `sift` (or drop the tree if nothing is left).
//! - **Meld**: merge two forests by rank and run the same carry propagation.
//!
//! **Corruption**: below the rank threshold `r` every node holds one element
//! and the heap is exact. Higher nodes hold buckets whose elements all share
//! the node's common key. Heaps that never grow past rank `r`
//! (fewer than 2^(r+1) elements in a single tree) return elements in exact
//! order.

use crate::bucket::Element;
use crate::compare::{Compare, Natural};
use crate::config::Config;
use crate::forest::{Forest, TreeKey};
use crate::node::Node;
use crate::rank::Rank;
use crate::traits::{Heap, HeapError};

/// An element removed by [`SoftHeap::extract_min_with_key`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted<T, P> {
    /// The key the element was inserted with
    pub priority: P,
    /// The caller's payload
    pub item: T,
    /// The key the element was reported under when it was extracted
    pub common_key: P,
}

impl<T, P> Extracted<T, P> {
    /// Returns true if the element was reported under a key larger than
    /// its own.
    pub fn is_corrupted<C: Compare<P>>(&self, cmp: &C) -> bool {
        cmp.less(&self.priority, &self.common_key)
    }

    /// Splits into the `(priority, item)` pair, dropping the common key
    pub fn into_pair(self) -> (P, T) {
        (self.priority, self.item)
    }
}

/// Where a carry propagation pass left the forest
struct Carry {
    /// Last tree whose root was replaced by a combine
    last_changed: TreeKey,
    /// Tree the pass stopped at
    stop: TreeKey,
}

/// Soft Heap
///
/// `P` is the key type, `T` the payload and `C` the comparator ordering keys
/// (ascending `Ord` by default).
///
/// # Example
///
/// ```rust
/// use soft_heap::soft::SoftHeap;
/// use soft_heap::HeapError;
///
/// let mut heap = SoftHeap::new();
/// for key in [5, 1, 4, 2, 3] {
///     heap.insert(key, key * 10);
/// }
/// assert_eq!(heap.len(), 5);
/// assert_eq!(heap.extract_min(), Ok((1, 10)));
///
/// // A custom order: largest key first
/// let mut max_heap = SoftHeap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
/// max_heap.insert(1, ());
/// max_heap.insert(9, ());
/// assert_eq!(max_heap.extract_min(), Ok((9, ())));
/// max_heap.extract_min().unwrap();
/// assert_eq!(max_heap.extract_min(), Err(HeapError::EmptyHeap));
/// ```
#[derive(Debug)]
pub struct SoftHeap<T, P, C = Natural> {
    forest: Forest<T, P>,
    /// Number of elements in the heap
    len: usize,
    /// Largest rank of any tree in the forest
    rank: Rank,
    config: Config,
    /// Cached `config.threshold()`
    threshold: Rank,
    compare: C,
}

impl<T, P: Ord + Clone> SoftHeap<T, P, Natural> {
    /// Creates an empty heap with the default configuration (ε = 1/3)
    /// ordering keys ascending.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty heap with the given configuration, ordering keys
    /// ascending.
    pub fn with_config(config: Config) -> Self {
        Self::with_config_and_comparator(config, Natural)
    }
}

impl<T, P, C> SoftHeap<T, P, C> {
    /// Number of elements in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest rank of any tree in the forest (0 when empty)
    #[inline]
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// Root ranks of the forest's trees, from the head
    ///
    /// Ranks are strictly increasing.
    pub fn tree_ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.forest.roots().map(|root| root.rank)
    }

    /// The configuration the heap was created with
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<T, P: Clone, C: Compare<P>> SoftHeap<T, P, C> {
    /// Creates an empty heap with the default configuration and a custom
    /// key order.
    pub fn with_comparator(compare: C) -> Self {
        Self::with_config_and_comparator(Config::default(), compare)
    }

    /// Creates an empty heap with the given configuration and key order.
    pub fn with_config_and_comparator(config: Config, compare: C) -> Self {
        let threshold = config.threshold();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            epsilon = config.epsilon(),
            rank_slack = config.rank_slack(),
            threshold,
            "soft heap created"
        );

        Self {
            forest: Forest::new(),
            len: 0,
            rank: 0,
            config,
            threshold,
            compare,
        }
    }

    /// Inserts an element with the given priority
    ///
    /// **Time Complexity**: O(1) amortized plus the amortized cost of `sift`,
    /// O(log 1/ε) overall.
    ///
    /// **Algorithm**: like incrementing a binary counter
    /// 1. Splice a rank-0 tree holding the element at the head of the forest
    /// 2. While the current tree has the same rank as its successor, combine
    ///    them into one tree of the next rank
    /// 3. Refresh the suffix-min caches from the last combined tree to the head
    pub fn insert(&mut self, priority: P, item: T) {
        let head = self.forest.insert_after(None, Node::leaf(priority, item));
        let carry = self.carry(head, 0);
        self.forest
            .refresh_suffix_min(carry.last_changed, &self.compare);
        self.len += 1;
    }

    /// Removes and returns the element with the smallest reported key
    ///
    /// The returned element's own priority may be smaller than the key it was
    /// reported under (see [`extract_min_with_key`](Self::extract_min_with_key)).
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap holds no elements; the
    /// heap is left untouched.
    pub fn extract_min(&mut self) -> Result<(P, T), HeapError> {
        self.extract_min_with_key().map(Extracted::into_pair)
    }

    /// Removes the element with the smallest reported key, returning it
    /// together with the key it was reported under.
    ///
    /// **Algorithm**:
    /// 1. Follow the head's suffix minimum to the tree with the smallest root key
    /// 2. Pick any element of the root's bucket
    /// 3. If the bucket dropped to half of its target size or below:
    ///    - if the root still has children, `sift` it and refresh the
    ///      suffix-min caches from that tree back to the head
    ///    - if the root is an empty leaf, unlink the tree
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap holds no elements.
    pub fn extract_min_with_key(&mut self) -> Result<Extracted<T, P>, HeapError> {
        let first = self.forest.first().ok_or(HeapError::EmptyHeap)?;
        let min = self.forest.suffix_min(first, &self.compare);

        let root = self.forest.root_mut(min);
        let Element { priority, item } = root.bucket.pick().ok_or(HeapError::EmptyHeap)?;
        let common_key = root.ckey.clone();

        if root.bucket.len() * 2 <= root.target {
            if !root.is_leaf() {
                root.sift(&self.compare);

                #[cfg(feature = "tracing")]
                tracing::trace!(
                    rank = root.rank,
                    target = root.target,
                    refilled = root.bucket.len(),
                    "replenished root bucket"
                );

                self.forest.refresh_suffix_min(min, &self.compare);
            } else if root.is_dead() {
                self.remove_tree(min);
            }
        }

        self.len -= 1;
        Ok(Extracted {
            priority,
            item,
            common_key,
        })
    }

    /// Returns the element the next [`extract_min`](Self::extract_min) would
    /// remove, without removing it.
    pub fn peek(&self) -> Option<(&P, &T)> {
        let min = self.forest.min_tree(&self.compare)?;
        self.forest
            .root(min)
            .bucket
            .peek()
            .map(|element| (&element.priority, &element.item))
    }

    /// Melds another heap into this one, consuming it
    ///
    /// The other heap's trees are merged into this forest by rank and
    /// equal-rank trees are combined as in [`insert`](Self::insert). Keys of
    /// the merged elements are ordered by this heap's comparator from now on.
    ///
    /// **Time Complexity**: O(log n) plus the amortized cost of `sift`.
    pub fn meld(&mut self, mut other: Self) {
        if other.forest.is_empty() {
            return;
        }

        #[cfg(feature = "tracing")]
        let incoming_trees = other.forest.len();
        let k = self.rank.min(other.rank);
        self.rank = self.rank.max(other.rank);

        // Both forests are sorted by rank: place each incoming tree before the
        // first tree of equal or greater rank.
        let mut cursor: Option<TreeKey> = None;
        let mut candidate = self.forest.first();
        while let Some(root) = other.forest.pop_front() {
            while let Some(key) = candidate {
                if self.forest.rank(key) >= root.rank {
                    break;
                }
                cursor = Some(key);
                candidate = self.forest.next(key);
            }
            cursor = Some(self.forest.insert_after(cursor, root));
        }

        if let Some(first) = self.forest.first() {
            let carry = self.carry(first, k);
            // Trees after the stopping point are untouched, or were moved in
            // from `other` with stale caches that resolve lazily.
            self.forest.refresh_suffix_min(carry.stop, &self.compare);
        }

        self.len += other.len;
        other.len = 0;
        other.rank = 0;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            incoming_trees,
            trees = self.forest.len(),
            len = self.len,
            rank = self.rank,
            "melded heaps"
        );
    }

    /// Number of elements currently reported under a key larger than their
    /// own.
    ///
    /// Walks every node: O(n). Intended for tests and diagnostics.
    pub fn corrupted_count(&self) -> usize {
        let mut count = 0;
        for root in self.forest.roots() {
            root.for_each(&mut |node| {
                count += node
                    .bucket
                    .iter()
                    .filter(|element| self.compare.less(&element.priority, &node.ckey))
                    .count();
            });
        }
        count
    }

    /// Carry propagation starting at `start`
    ///
    /// Combines adjacent trees of equal rank. When three trees share a rank
    /// the first is left alone and the latter two are combined, so each rank
    /// ends up with a single tree. Once the current tree's rank differs from
    /// its successor's and exceeds `k`, no further carries are possible.
    fn carry(&mut self, start: TreeKey, k: Rank) -> Carry {
        let mut current = start;
        let mut last_changed = start;

        while let Some(next) = self.forest.next(current) {
            let rank = self.forest.rank(current);
            if rank == self.forest.rank(next) {
                let third = self
                    .forest
                    .next(next)
                    .is_some_and(|after| self.forest.rank(after) == rank);
                if third {
                    current = next;
                    continue;
                }
                let detached = self.forest.detach_pair(current);
                debug_assert!(detached.is_some(), "carry lost track of a tree");
                let Some((prev, x, y)) = detached else {
                    break;
                };
                let combined = Node::combine(x, y, self.threshold, &self.compare);
                current = self.forest.insert_after(prev, combined);
                last_changed = current;
            } else if rank > k {
                break;
            } else {
                current = next;
            }
        }

        self.rank = self.rank.max(self.forest.rank(current));
        Carry { last_changed, stop: current }
    }

    /// Unlinks a tree whose root has drained.
    fn remove_tree(&mut self, key: TreeKey) {
        let prev = self.forest.prev(key);
        let was_last = self.forest.next(key).is_none();
        self.forest.remove(key);

        if was_last {
            self.rank = prev.map_or(0, |prev| self.forest.rank(prev));
        }
        if let Some(prev) = prev {
            self.forest.refresh_suffix_min(prev, &self.compare);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(trees = self.forest.len(), rank = self.rank, "removed drained tree");
    }
}

impl<T, P: Ord + Clone> Default for SoftHeap<T, P, Natural> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord + Clone> Heap<T, P> for SoftHeap<T, P, Natural> {
    fn new() -> Self {
        Self::with_config(Config::default())
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, priority: P, item: T) {
        self.insert(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        SoftHeap::peek(self)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.extract_min().ok()
    }

    fn merge(&mut self, other: Self) {
        self.meld(other);
    }
}
