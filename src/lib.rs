//! saplingdb - an in-memory ordered key-value store backed by a B-tree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                           saplingdb                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Command Layer (cli/)                     │   │
//! │  │        Command parsing → Session → printed results       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               Index Layer (index/btree/)                 │   │
//! │  │   BTree: root split / root collapse                      │   │
//! │  │   Node:  search, split, insert, delete, borrow / merge   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                 Common (common/)                         │   │
//! │  │          BTreeConfig (fan-out) + Error / Result          │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Fan-out configuration and error types
//! - [`index`] - The B-tree
//! - [`cli`] - Interactive command session
//!
//! # Quick Start
//! ```
//! use saplingdb::{BTree, BTreeConfig};
//!
//! let mut tree = BTree::with_config(BTreeConfig::new(3).unwrap());
//! for i in 0u32..100 {
//!     tree.insert(i.to_be_bytes(), format!("value-{i}"));
//! }
//!
//! assert_eq!(tree.find(&42u32.to_be_bytes()).unwrap(), b"value-42");
//! assert!(tree.delete(&42u32.to_be_bytes()));
//! assert_eq!(tree.len(), 99);
//! ```

pub mod cli;
pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MIN_CHILDREN, MIN_BRANCHING};
pub use common::{BTreeConfig, Error, Result};
pub use index::btree::{BTree, InvariantViolation, Item, StatsSnapshot, TreeStats};
