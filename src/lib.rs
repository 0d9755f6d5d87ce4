//! Classic in-memory collections for Rust.
//!
//! This crate provides four general-purpose, generic data structures plus
//! capability traits that unify them:
//!
//! - [`CircularList`] - a circular-buffer-backed sequence with O(1) front
//!   and back insertion/removal
//! - [`ArrayPriorityQueue`] - a stable priority queue that keeps its
//!   elements sorted inside a `CircularList` via binary-search insertion
//! - [`TreeMap`] - a key-ordered binary search tree map
//! - [`ChainedHashMap`] - a separate-chaining hash map with prime-sized
//!   bucket arrays and load-factor-driven resizing
//!
//! The two maps implement the [`Map`] capability and the queue/list pair
//! implements the [`Queue`] capability, so callers can stay polymorphic over
//! the iteration-order and performance trade-offs.
//!
//! # Example
//!
//! ```
//! use satchel::{ArrayPriorityQueue, Map, TreeMap};
//!
//! // Tally words, then drain them ranked by count.
//! let mut counts = TreeMap::new();
//! for word in ["tea", "cake", "tea", "scone", "tea", "cake"] {
//!     let count = counts.get(&word).copied().unwrap_or(0);
//!     counts.insert(word, count + 1);
//! }
//!
//! let mut ranked: ArrayPriorityQueue<(core::cmp::Reverse<u32>, &str)> =
//!     counts.iter().map(|(&w, &c)| (core::cmp::Reverse(c), w)).collect();
//!
//! assert_eq!(ranked.poll(), Some((core::cmp::Reverse(3), "tea")));
//! assert_eq!(ranked.poll(), Some((core::cmp::Reverse(2), "cake")));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library
//!   dependency
//! - **Single-threaded by design** - No internal synchronization; wrap an
//!   instance in a lock to share it across threads
//! - **Amortized resizing** - Sequence growth and hash-table resize are the
//!   only operations that exceed their advertised cost, and only
//!   occasionally
//!
//! Every operation is synchronous and CPU-bound. Each instance exclusively
//! owns its backing storage and the elements inside it for its lifetime;
//! nothing is shared between instances and no global state exists.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod capability;
mod error;

pub mod circular_list;
pub mod hash_map;
pub mod priority_queue;
pub mod tree_map;

pub use capability::{Map, Queue};
pub use circular_list::CircularList;
pub use error::{Error, Result};
pub use hash_map::ChainedHashMap;
pub use priority_queue::ArrayPriorityQueue;
pub use tree_map::TreeMap;
