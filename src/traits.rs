//! Common heap trait and error type
//!
//! [`Heap`] is the `BinaryHeap`-like interface: `push`, `pop`, `peek` and
//! `merge` over `(priority, item)` pairs. [`SoftHeap`](crate::soft::SoftHeap)
//! implements it for keys ordered by their own `Ord`; its inherent API
//! (`insert`, `extract_min`, `meld`) also accepts caller-supplied comparators
//! and reports emptiness as a [`HeapError`].
//!
//! Unlike an exact heap, a soft heap may `pop` an element whose priority is
//! larger than that of an element still inside it. The trait documents the
//! shape of the API, not an exact ordering guarantee.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `extract_min` was called on a heap holding no elements
    EmptyHeap,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "cannot extract from an empty heap"),
        }
    }
}

impl std::error::Error for HeapError {}

/// Base trait for heap/priority queue data structures
///
/// # Example
///
/// ```rust
/// use soft_heap::Heap;
/// use soft_heap::soft::SoftHeap;
///
/// let mut heap = SoftHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the element `pop` would remove next, without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the (approximately) minimum element
    fn pop(&mut self) -> Option<(P, T)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}
