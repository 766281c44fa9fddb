//! Buckets: the unordered element lists held by soft heap nodes
//!
//! A bucket never needs to be searched or ordered. The elements in it are all
//! reported under the owning node's common key, so any element is as good as
//! any other when one has to be removed. That is why two O(1) operations are
//! enough:
//!
//! - [`Bucket::pick`] removes the head element
//! - [`Bucket::append`] splices another bucket onto the tail
//!
//! The chain is a `LinkedList`, whose `append` relinks the two lists without
//! touching their elements.

use std::collections::LinkedList;

/// An element stored in the heap: its true key and its payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element<T, P> {
    /// The key the element was inserted with
    pub priority: P,
    /// The caller's payload
    pub item: T,
}

impl<T, P> Element<T, P> {
    /// Creates a new element
    pub fn new(priority: P, item: T) -> Self {
        Self { priority, item }
    }

    /// Splits the element into its `(priority, item)` pair
    pub fn into_pair(self) -> (P, T) {
        (self.priority, self.item)
    }
}

/// An unordered chain of elements with O(1) pick and O(1) concatenation
#[derive(Debug)]
pub struct Bucket<T, P> {
    elements: LinkedList<Element<T, P>>,
}

impl<T, P> Bucket<T, P> {
    /// Creates an empty bucket
    pub fn new() -> Self {
        Self {
            elements: LinkedList::new(),
        }
    }

    /// Creates a bucket holding a single element
    pub fn singleton(element: Element<T, P>) -> Self {
        let mut elements = LinkedList::new();
        elements.push_back(element);
        Self { elements }
    }

    /// Number of elements in the bucket
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the bucket holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Removes and returns an arbitrary element (the head)
    ///
    /// Returns `None` only for an empty bucket; the heap never picks from one.
    #[inline]
    pub fn pick(&mut self) -> Option<Element<T, P>> {
        self.elements.pop_front()
    }

    /// The element [`pick`](Self::pick) would return
    #[inline]
    pub fn peek(&self) -> Option<&Element<T, P>> {
        self.elements.front()
    }

    /// Moves all of `other`'s elements onto the tail of this bucket,
    /// leaving `other` empty. O(1).
    #[inline]
    pub fn append(&mut self, other: &mut Self) {
        self.elements.append(&mut other.elements);
    }

    /// Iterates over the elements in chain order
    pub fn iter(&self) -> impl Iterator<Item = &Element<T, P>> {
        self.elements.iter()
    }
}

impl<T, P> Default for Bucket<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_pick() {
        let mut bucket = Bucket::singleton(Element::new(3, "three"));
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.peek().map(|e| e.priority), Some(3));
        assert_eq!(bucket.pick(), Some(Element::new(3, "three")));
        assert!(bucket.is_empty());
        assert_eq!(bucket.pick(), None);
    }

    #[test]
    fn test_append_moves_everything() {
        let mut a = Bucket::singleton(Element::new(1, 'a'));
        let mut b = Bucket::singleton(Element::new(2, 'b'));
        b.append(&mut Bucket::singleton(Element::new(3, 'c')));

        a.append(&mut b);

        assert!(b.is_empty());
        assert_eq!(a.len(), 3);
        let keys: Vec<i32> = a.iter().map(|e| e.priority).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_pick_takes_head() {
        let mut bucket = Bucket::new();
        bucket.append(&mut Bucket::singleton(Element::new(10, ())));
        bucket.append(&mut Bucket::singleton(Element::new(5, ())));

        assert_eq!(bucket.pick().map(Element::into_pair), Some((10, ())));
        assert_eq!(bucket.pick().map(Element::into_pair), Some((5, ())));
    }

    #[test]
    fn test_append_empty_is_noop() {
        let mut a: Bucket<(), i32> = Bucket::new();
        let mut b = Bucket::new();
        a.append(&mut b);
        assert!(a.is_empty());
        assert!(b.is_empty());
    }
}
