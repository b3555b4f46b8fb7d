//! Structural invariant checks.
//!
//! A violation is always a bug in the tree, never a runtime condition.
//! Tests call [`BTree::validate`] after every mutation and fail on `Err`.

use thiserror::Error as ThisError;

use crate::common::BTreeConfig;
use crate::index::btree::node::Node;
use crate::index::btree::tree::BTree;

/// The first broken invariant found by [`BTree::validate`].
///
/// `depth` counts from 0 at the root.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum InvariantViolation {
    #[error("items out of order at depth {depth}")]
    Unordered { depth: usize },

    #[error("key {key:?} at depth {depth} escapes the range set by its ancestors")]
    OutOfRange { depth: usize, key: String },

    #[error("node at depth {depth} has {items} items but {children} children")]
    ChildCount {
        depth: usize,
        items: usize,
        children: usize,
    },

    #[error("node at depth {depth} has {items} items, below the minimum of {min}")]
    Underfull { depth: usize, items: usize, min: usize },

    #[error("node at depth {depth} has {items} items, above the maximum of {max}")]
    Overfull { depth: usize, items: usize, max: usize },

    #[error("leaf at depth {found}, expected every leaf at depth {expected}")]
    UnevenLeaves { expected: usize, found: usize },

    #[error("root holds no items")]
    EmptyRoot,

    #[error("tree reports {tracked} items but holds {actual}")]
    LengthMismatch { tracked: usize, actual: usize },
}

impl BTree {
    /// Check every structural invariant of the tree.
    ///
    /// - items in each node strictly increase
    /// - every key lies between the separators above it
    /// - internal nodes have exactly one more child than items
    /// - non-root nodes hold `min_items..=max_items` items
    /// - all leaves sit at the same depth
    /// - [`len`](Self::len) matches the number of stored items
    ///
    /// # Errors
    /// The first [`InvariantViolation`] found, in depth-first order.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let actual = match self.root() {
            None => 0,
            Some(root) => {
                if root.items.is_empty() {
                    return Err(InvariantViolation::EmptyRoot);
                }
                let mut checker = Checker {
                    config: self.config(),
                    leaf_depth: None,
                };
                checker.check(root, 0, None, None)?
            }
        };

        if actual != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                tracked: self.len(),
                actual,
            });
        }
        Ok(())
    }
}

struct Checker<'a> {
    config: &'a BTreeConfig,
    leaf_depth: Option<usize>,
}

impl Checker<'_> {
    /// Check the subtree at `node`, whose keys must lie strictly inside
    /// `(lower, upper)`. Returns the number of items in the subtree.
    fn check(
        &mut self,
        node: &Node,
        depth: usize,
        lower: Option<&[u8]>,
        upper: Option<&[u8]>,
    ) -> Result<usize, InvariantViolation> {
        let items = node.items.len();

        if items > self.config.max_items() {
            return Err(InvariantViolation::Overfull {
                depth,
                items,
                max: self.config.max_items(),
            });
        }
        if depth > 0 && items < self.config.min_items() {
            return Err(InvariantViolation::Underfull {
                depth,
                items,
                min: self.config.min_items(),
            });
        }
        if node.items.windows(2).any(|pair| pair[0].key >= pair[1].key) {
            return Err(InvariantViolation::Unordered { depth });
        }

        for item in &node.items {
            let key = item.key.as_slice();
            let above = lower.map_or(true, |lower| key > lower);
            let below = upper.map_or(true, |upper| key < upper);
            if !(above && below) {
                return Err(InvariantViolation::OutOfRange {
                    depth,
                    key: String::from_utf8_lossy(key).into_owned(),
                });
            }
        }

        if node.is_leaf() {
            match self.leaf_depth {
                None => self.leaf_depth = Some(depth),
                Some(expected) if expected != depth => {
                    return Err(InvariantViolation::UnevenLeaves {
                        expected,
                        found: depth,
                    });
                }
                Some(_) => {}
            }
            return Ok(items);
        }

        if node.children.len() != items + 1 {
            return Err(InvariantViolation::ChildCount {
                depth,
                items,
                children: node.children.len(),
            });
        }

        let mut count = items;
        for (i, child) in node.children.iter().enumerate() {
            let child_lower = if i == 0 {
                lower
            } else {
                Some(node.items[i - 1].key.as_slice())
            };
            let child_upper = node.items.get(i).map(|item| item.key.as_slice()).or(upper);
            count += self.check(child, depth + 1, child_lower, child_upper)?;
        }
        Ok(count)
    }
}
