//! Key/value entries stored in tree nodes.

use std::cmp::Ordering;

/// An owned key/value pair.
///
/// Keys are ordered by lexicographic byte comparison, which is exactly how
/// `[u8]` implements `Ord`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub key: Vec<u8>,
    pub value: Vec<u8>,
}

impl Item {
    pub fn new(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Compare a search key against this item's key.
    #[inline]
    pub(crate) fn cmp_key(&self, key: &[u8]) -> Ordering {
        self.key.as_slice().cmp(key)
    }
}
