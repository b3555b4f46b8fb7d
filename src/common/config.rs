//! Configuration for saplingdb trees.

use crate::common::{Error, Result};

/// Default minimum number of children for a non-root internal node.
///
/// With a minimum of 2 children the tree is a 2-3-4 tree:
/// - max children: 4
/// - max items per node: 3
/// - min items per non-root node: 1
pub const DEFAULT_MIN_CHILDREN: usize = 2;

/// Smallest legal `min_children`.
///
/// Below 2 a node could split into an empty half, so no B-tree exists.
pub const MIN_BRANCHING: usize = 2;

/// Fan-out of a [`BTree`](crate::BTree), fixed when the tree is built.
///
/// Every bound is derived from `min_children`:
///
/// | quantity       | formula              | default |
/// |----------------|----------------------|---------|
/// | `max_children` | `2 * min_children`   | 4       |
/// | `max_items`    | `max_children - 1`   | 3       |
/// | `min_items`    | `min_children - 1`   | 1       |
///
/// # Example
/// ```
/// use saplingdb::BTreeConfig;
///
/// let config = BTreeConfig::new(3).unwrap();
/// assert_eq!(config.max_items(), 5);
/// assert_eq!(config.min_items(), 2);
///
/// assert!(BTreeConfig::new(1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BTreeConfig {
    min_children: usize,
}

impl BTreeConfig {
    /// Create a config with the given minimum child count.
    ///
    /// # Errors
    /// `Error::InvalidBranchingFactor` if `min_children < MIN_BRANCHING`.
    pub fn new(min_children: usize) -> Result<Self> {
        if min_children < MIN_BRANCHING {
            return Err(Error::InvalidBranchingFactor(min_children));
        }
        Ok(Self { min_children })
    }

    #[inline]
    pub fn min_children(&self) -> usize {
        self.min_children
    }

    #[inline]
    pub fn max_children(&self) -> usize {
        self.min_children * 2
    }

    /// Most items any node may hold.
    #[inline]
    pub fn max_items(&self) -> usize {
        self.max_children() - 1
    }

    /// Fewest items a non-root node may hold.
    #[inline]
    pub fn min_items(&self) -> usize {
        self.min_children - 1
    }
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self {
            min_children: DEFAULT_MIN_CHILDREN,
        }
    }
}
