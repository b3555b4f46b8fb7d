//! B-tree index.
//!
//! An in-memory, ordered key-value map over byte strings.
//!
//! # Components
//! - [`BTree`] - Owns the root, handles root growth and shrinkage
//! - `Node` - Search, split, insert, delete and underflow repair
//! - [`Item`] - An owned key/value pair
//! - [`TreeStats`] - Counters for splits, borrows and merges
//! - [`InvariantViolation`] - What [`BTree::validate`] reports
//!
//! # Fan-out
//! Node capacity comes from a [`BTreeConfig`](crate::BTreeConfig) chosen at
//! construction, so trees with different fan-outs can coexist.

mod display;
mod item;
mod node;
mod stats;
mod tree;
mod validate;

pub use item::Item;
pub use stats::{StatsSnapshot, TreeStats};
pub use tree::BTree;
pub use validate::InvariantViolation;
