//! The forest: a rank-ordered, doubly linked sequence of trees
//!
//! Trees live in a [`SlotMap`] arena and link to each other by key. Removing
//! a tree (because it was absorbed by a carry, or because its root drained)
//! tombstones its slot; slotmap keys are generational, so a stale key never
//! resolves to a tree inserted later.
//!
//! Each tree caches `suffix_min`: the tree with the smallest root ckey among
//! itself and every tree after it. The cache is trusted only while the tree it
//! names is still in the arena; a tombstoned target is recomputed on access.
//! Whoever changes a root ckey must call
//! [`refresh_suffix_min`](Forest::refresh_suffix_min) from that tree, which
//! walks back to the head.

use crate::compare::Compare;
use crate::node::Node;
use crate::rank::Rank;
use slotmap::{new_key_type, Key, SlotMap};
use std::cmp::Ordering;

new_key_type! {
    /// Arena key of a tree in the forest
    pub(crate) struct TreeKey;
}

#[derive(Debug)]
pub(crate) struct Tree<T, P> {
    pub(crate) root: Node<T, P>,
    next: Option<TreeKey>,
    prev: Option<TreeKey>,
    suffix_min: TreeKey,
}

/// Doubly linked, rank-ordered list of trees backed by an arena
#[derive(Debug)]
pub(crate) struct Forest<T, P> {
    trees: SlotMap<TreeKey, Tree<T, P>>,
    first: Option<TreeKey>,
}

impl<T, P> Forest<T, P> {
    pub(crate) fn new() -> Self {
        Self {
            trees: SlotMap::with_key(),
            first: None,
        }
    }

    #[inline]
    pub(crate) fn first(&self) -> Option<TreeKey> {
        self.first
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Number of trees in the forest
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.trees.len()
    }

    #[inline]
    pub(crate) fn next(&self, key: TreeKey) -> Option<TreeKey> {
        self.trees[key].next
    }

    #[inline]
    pub(crate) fn prev(&self, key: TreeKey) -> Option<TreeKey> {
        self.trees[key].prev
    }

    #[inline]
    pub(crate) fn rank(&self, key: TreeKey) -> Rank {
        self.trees[key].root.rank
    }

    #[inline]
    pub(crate) fn root(&self, key: TreeKey) -> &Node<T, P> {
        &self.trees[key].root
    }

    #[inline]
    pub(crate) fn root_mut(&mut self, key: TreeKey) -> &mut Node<T, P> {
        &mut self.trees[key].root
    }

    /// Links a new tree holding `root` right after `prev`, or at the head
    /// when `prev` is `None`.
    ///
    /// The new tree's suffix-min cache starts stale; callers refresh it.
    pub(crate) fn insert_after(&mut self, prev: Option<TreeKey>, root: Node<T, P>) -> TreeKey {
        let next = match prev {
            Some(prev) => self.trees[prev].next,
            None => self.first,
        };
        let key = self.trees.insert(Tree {
            root,
            next,
            prev,
            suffix_min: TreeKey::null(),
        });

        match prev {
            Some(prev) => self.trees[prev].next = Some(key),
            None => self.first = Some(key),
        }
        if let Some(next) = next {
            self.trees[next].prev = Some(key);
        }
        key
    }

    /// Unlinks a tree and tombstones its slot, returning its root.
    pub(crate) fn remove(&mut self, key: TreeKey) -> Option<Node<T, P>> {
        let tree = self.trees.remove(key)?;
        match tree.prev {
            Some(prev) => self.trees[prev].next = tree.next,
            None => self.first = tree.next,
        }
        if let Some(next) = tree.next {
            self.trees[next].prev = tree.prev;
        }
        Some(tree.root)
    }

    /// Unlinks `key` together with its successor, returning the tree they
    /// followed and both roots in order.
    ///
    /// Returns `None` and leaves the forest untouched unless both trees are
    /// live.
    pub(crate) fn detach_pair(
        &mut self,
        key: TreeKey,
    ) -> Option<(Option<TreeKey>, Node<T, P>, Node<T, P>)> {
        let tree = self.trees.get(key)?;
        let prev = tree.prev;
        let next = tree.next.filter(|&next| self.trees.contains_key(next))?;

        // Both keys are live here, so neither removal can fail
        let first = self.remove(key)?;
        let second = self.remove(next)?;
        Some((prev, first, second))
    }

    /// Removes the head tree, returning its root.
    pub(crate) fn pop_front(&mut self) -> Option<Node<T, P>> {
        let first = self.first?;
        self.remove(first)
    }

    /// Iterates over tree keys from the head.
    pub(crate) fn keys(&self) -> impl Iterator<Item = TreeKey> + '_ {
        std::iter::successors(self.first, move |&key| self.trees[key].next)
    }

    /// Iterates over tree roots from the head.
    pub(crate) fn roots(&self) -> impl Iterator<Item = &Node<T, P>> + '_ {
        self.keys().map(move |key| &self.trees[key].root)
    }

    /// Returns whichever of `a` and `b` has the smaller root ckey, preferring `a`.
    fn smaller<C: Compare<P>>(&self, a: TreeKey, b: TreeKey, cmp: &C) -> TreeKey {
        match cmp.compare(&self.trees[a].root.ckey, &self.trees[b].root.ckey) {
            Ordering::Greater => b,
            _ => a,
        }
    }

    /// Resolves the suffix minimum of `key` without updating any cache.
    fn resolve<C: Compare<P>>(&self, key: TreeKey, cmp: &C) -> TreeKey {
        let cached = self.trees[key].suffix_min;
        if self.trees.contains_key(cached) {
            return cached;
        }
        match self.trees[key].next {
            Some(next) => {
                let after = self.resolve(next, cmp);
                self.smaller(key, after, cmp)
            }
            None => key,
        }
    }

    /// The tree with the smallest root ckey at or after `key`; recomputes and
    /// caches the answer if the cached tree has been removed.
    pub(crate) fn suffix_min<C: Compare<P>>(&mut self, key: TreeKey, cmp: &C) -> TreeKey {
        let best = self.resolve(key, cmp);
        self.trees[key].suffix_min = best;
        best
    }

    /// The tree with the globally smallest root ckey, read-only.
    pub(crate) fn min_tree<C: Compare<P>>(&self, cmp: &C) -> Option<TreeKey> {
        self.first.map(|first| self.resolve(first, cmp))
    }

    /// Recomputes the suffix-min cache of `from` and of every tree before it.
    pub(crate) fn refresh_suffix_min<C: Compare<P>>(&mut self, from: TreeKey, cmp: &C) {
        let mut cursor = Some(from);
        while let Some(key) = cursor {
            let best = match self.trees[key].next {
                Some(next) => {
                    let after = self.suffix_min(next, cmp);
                    self.smaller(key, after, cmp)
                }
                None => key,
            };
            let tree = &mut self.trees[key];
            tree.suffix_min = best;
            cursor = tree.prev;
        }
    }
}
