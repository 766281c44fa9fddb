//! Soft Heap for Rust
//!
//! A soft heap is a meldable priority queue that may report some elements
//! under a key larger than their own (*corruption*) in exchange for
//! O(log 1/ε) amortized time per operation, where ε bounds the fraction of
//! corrupted elements. It is the building block of linear-time selection and
//! Chazelle's minimum spanning tree algorithm.
//!
//! This crate implements the simplified design of Kaplan and Zwick:
//!
//! - **Insert**: O(1) amortized, carry propagation over a rank-ordered forest
//! - **Extract-min**: O(log 1/ε) amortized, replenishing buckets with `sift`
//! - **Meld**: merge two forests by rank
//!
//! # Modules
//!
//! - [`soft`]: the [`SoftHeap`] itself
//! - [`config`]: ε and the rank threshold derived from it
//! - [`compare`]: comparator strategies ([`Natural`] or any closure)
//! - [`bucket`]: the unordered element lists held by nodes
//! - [`rank`]: rank type and target-size rule
//! - [`traits`]: the [`Heap`] trait and [`HeapError`]
//!
//! # Example
//!
//! ```rust
//! use soft_heap::{Config, SoftHeap};
//!
//! let mut heap = SoftHeap::with_config(Config::new(0.1).unwrap());
//! for key in [5, 1, 4, 2, 3] {
//!     heap.insert(key, ());
//! }
//!
//! let mut drained = Vec::new();
//! while let Ok((key, ())) = heap.extract_min() {
//!     drained.push(key);
//! }
//! // Small heaps stay below the rank threshold and are exact.
//! assert_eq!(drained, vec![1, 2, 3, 4, 5]);
//! ```

pub mod bucket;
pub mod compare;
pub mod config;
mod forest;
mod node;
pub mod rank;
pub mod soft;
pub mod traits;

pub use compare::{Compare, Natural};
pub use config::{Config, ConfigError};
pub use soft::{Extracted, SoftHeap};
pub use traits::{Heap, HeapError};
