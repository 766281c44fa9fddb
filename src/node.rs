//! Binary merge-tree nodes
//!
//! Every tree in a soft heap's forest is a binary tree of [`Node`]s. A node
//! owns its two children and a [`Bucket`] of elements, all of which are
//! reported under the node's *common key* (`ckey`).
//!
//! **Key Operations**:
//! - **Leaf**: a rank-0 node holding one element, its ckey is that element's key
//! - **Combine**: two rank-`k` nodes become the children of a fresh rank-`k+1`
//!   node, which is then filled by `sift`
//! - **Sift**: while the bucket is below its target size, splice in the bucket
//!   of the child with the smaller ckey and adopt that ckey, then refill the
//!   child recursively
//!
//! **Corruption**: adopting the child's ckey raises the reported key of every
//! element already in the bucket. Because ckeys are heap-ordered (a node's
//! ckey never exceeds its children's), a ckey only ever increases, so every
//! element's true key is at most its node's ckey.

use crate::bucket::{Bucket, Element};
use crate::compare::Compare;
use crate::rank::{checked_increment, target_size, Rank};
use std::cmp::Ordering;
use std::mem;

/// A node of a soft heap merge tree
#[derive(Debug)]
pub(crate) struct Node<T, P> {
    /// Common key: the key every element in `bucket` is reported under
    pub(crate) ckey: P,
    pub(crate) rank: Rank,
    /// Number of elements `sift` aims to keep in `bucket`
    pub(crate) target: usize,
    pub(crate) left: Option<Box<Node<T, P>>>,
    pub(crate) right: Option<Box<Node<T, P>>>,
    pub(crate) bucket: Bucket<T, P>,
}

impl<T, P: Clone> Node<T, P> {
    /// Creates a rank-0 node holding a single element.
    pub(crate) fn leaf(priority: P, item: T) -> Self {
        Self {
            ckey: priority.clone(),
            rank: 0,
            target: 1,
            left: None,
            right: None,
            bucket: Bucket::singleton(Element::new(priority, item)),
        }
    }

    /// Combines two nodes of equal rank into a node one rank higher.
    ///
    /// `x` becomes the left child and `y` the right child. The new node's
    /// target size follows [`target_size`] and its bucket is filled by
    /// [`sift`](Self::sift) before it is returned.
    pub(crate) fn combine<C: Compare<P>>(x: Self, y: Self, threshold: Rank, cmp: &C) -> Self {
        debug_assert_eq!(x.rank, y.rank, "combine requires equal ranks");

        let rank = checked_increment(x.rank);
        let mut node = Node {
            // Placeholder until the first sift pass, which always runs: the
            // node has two children and an empty bucket.
            ckey: y.ckey.clone(),
            rank,
            target: target_size(rank, x.target, threshold),
            left: Some(Box::new(x)),
            right: Some(Box::new(y)),
            bucket: Bucket::new(),
        };
        node.sift(cmp);
        node
    }

    /// Refills the bucket from the children until it reaches its target size
    /// or the node runs out of children.
    pub(crate) fn sift<C: Compare<P>>(&mut self, cmp: &C) {
        while self.bucket.len() < self.target && !self.is_leaf() {
            let swap = match (&self.left, &self.right) {
                (None, _) => true,
                (Some(left), Some(right)) => {
                    cmp.compare(&left.ckey, &right.ckey) == Ordering::Greater
                }
                (Some(_), None) => false,
            };
            if swap {
                mem::swap(&mut self.left, &mut self.right);
            }

            let Some(left) = self.left.as_deref_mut() else {
                break;
            };
            self.bucket.append(&mut left.bucket);
            self.ckey = left.ckey.clone();

            if left.is_leaf() {
                // Drained: the other child (if any) takes the only slot
                self.left = self.right.take();
            } else {
                left.sift(cmp);
            }
        }
    }
}

impl<T, P> Node<T, P> {
    /// Returns true if the node has no children
    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns true if the node has no children and no elements
    #[inline]
    pub(crate) fn is_dead(&self) -> bool {
        self.is_leaf() && self.bucket.is_empty()
    }

    /// Visits this node and all of its descendants.
    pub(crate) fn for_each<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Node<T, P>),
    {
        f(self);
        if let Some(left) = &self.left {
            left.for_each(f);
        }
        if let Some(right) = &self.right {
            right.for_each(f);
        }
    }

    /// Total number of elements held in this subtree.
    #[cfg(test)]
    pub(crate) fn element_count(&self) -> usize {
        let mut count = 0;
        self.for_each(&mut |node| count += node.bucket.len());
        count
    }
}
