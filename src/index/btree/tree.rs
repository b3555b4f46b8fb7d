//! The B-tree: root ownership and the root-only invariants.

use crate::common::{BTreeConfig, Error, Result};
use crate::index::btree::item::Item;
use crate::index::btree::node::Node;
use crate::index::btree::stats::TreeStats;

/// An in-memory ordered map from byte keys to byte values.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │ BTree                                        │
/// │   root: Option<Box<Node>>   config   stats   │
/// └──────┬───────────────────────────────────────┘
///        ▼
///     [ Node ] ── Box ──▶ [ Node ] ── Box ──▶ [ leaf ]
/// ```
///
/// All real work happens in recursive [`Node`] methods. The tree handles the
/// two cases no node can handle about itself:
/// - splitting a full root before an insert (height + 1)
/// - replacing an emptied root with its only child after a delete (height - 1)
///
/// # Thread Safety
/// Mutation takes `&mut self`; wrap the tree in a lock to share it between
/// writers.
///
/// # Example
/// ```
/// use saplingdb::{BTree, Error};
///
/// let mut tree = BTree::new();
/// tree.insert("apple", "red");
/// tree.insert("banana", "yellow");
///
/// assert_eq!(tree.find(b"apple").unwrap(), b"red");
/// assert!(tree.delete(b"apple"));
/// assert!(matches!(tree.find(b"apple"), Err(Error::KeyNotFound)));
/// assert!(!tree.delete(b"apple"));
/// ```
#[derive(Debug)]
pub struct BTree {
    root: Option<Box<Node>>,
    config: BTreeConfig,
    len: usize,
    stats: TreeStats,
}

impl BTree {
    /// Create an empty tree with the default fan-out.
    pub fn new() -> Self {
        Self::with_config(BTreeConfig::default())
    }

    /// Create an empty tree with the given fan-out.
    pub fn with_config(config: BTreeConfig) -> Self {
        Self {
            root: None,
            config,
            len: 0,
            stats: TreeStats::new(),
        }
    }

    // ========================================================================
    // Public API: Lookup
    // ========================================================================

    /// Look up the value stored under `key`.
    ///
    /// # Errors
    /// `Error::KeyNotFound` if no item has this key.
    pub fn find(&self, key: &[u8]) -> Result<&[u8]> {
        let mut next = self.root.as_deref();
        while let Some(node) = next {
            let (pos, found) = node.search(key);
            if found {
                return Ok(&node.items[pos].value);
            }
            next = node.children.get(pos).map(|child| &**child);
        }
        Err(Error::KeyNotFound)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.find(key).is_ok()
    }

    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert a key/value pair, overwriting the value if the key exists.
    pub fn insert(&mut self, key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) {
        let item = Item::new(key, value);
        let config = self.config;

        let mut root = match self.root.take() {
            Some(root) => root,
            None => Box::new(Node::new(&config)),
        };
        if root.items.len() >= config.max_items() {
            root = self.split_root(root);
        }

        if root.insert(item, &config, &self.stats) {
            self.len += 1;
        }
        self.root = Some(root);
    }

    /// Delete `key`, returning `true` iff an item was removed.
    pub fn delete(&mut self, key: &[u8]) -> bool {
        self.remove(key).is_some()
    }

    /// Delete `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        let mut root = self.root.take()?;
        let removed = root.delete(key, false, &self.config, &self.stats);

        self.root = if !root.items.is_empty() {
            Some(root)
        } else if root.is_leaf() {
            None
        } else {
            TreeStats::record(&self.stats.root_collapses);
            Some(root.remove_child_at(0))
        };

        let removed = removed?;
        self.len -= 1;
        Some(removed.value)
    }

    /// Drop every item. Counters in [`stats`](Self::stats) are kept.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    // ========================================================================
    // Public API: Shape and stats
    // ========================================================================

    /// Number of items in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut next = self.root.as_deref();
        while let Some(node) = next {
            height += 1;
            next = node.children.first().map(|child| &**child);
        }
        height
    }

    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    /// Structural event counters.
    pub fn stats(&self) -> &TreeStats {
        &self.stats
    }

    pub(crate) fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    // ========================================================================
    // Internal: Root growth
    // ========================================================================

    /// Split a full root, returning the new root above its two halves.
    fn split_root(&self, mut old_root: Box<Node>) -> Box<Node> {
        let (middle, right) = old_root.split(&self.config);

        let mut new_root = Node::new(&self.config);
        new_root.insert_item_at(0, middle);
        new_root.insert_child_at(0, old_root);
        new_root.insert_child_at(1, right);

        TreeStats::record(&self.stats.splits);
        TreeStats::record(&self.stats.root_splits);
        Box::new(new_root)
    }
}

impl Default for BTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(keys: &[&str]) -> BTree {
        let mut tree = BTree::new();
        for key in keys {
            tree.insert(*key, key.to_uppercase());
        }
        tree
    }

    fn root_keys(tree: &BTree) -> Vec<Vec<u8>> {
        tree.root()
            .map(|root| root.items.iter().map(|item| item.key.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_empty_tree() {
        let tree = BTree::new();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(matches!(tree.find(b"a"), Err(Error::KeyNotFound)));
    }

    #[test]
    fn test_insert_and_find() {
        let tree = tree_with(&["b", "a", "c"]);

        assert_eq!(tree.find(b"a").unwrap(), b"A");
        assert_eq!(tree.find(b"b").unwrap(), b"B");
        assert_eq!(tree.find(b"c").unwrap(), b"C");
        assert!(tree.find(b"d").is_err());
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.height(), 1);
    }

    #[test]
    fn test_overwrite_keeps_len() {
        let mut tree = tree_with(&["a", "b", "c", "d", "e"]);

        tree.insert("c", "v2");

        assert_eq!(tree.find(b"c").unwrap(), b"v2");
        assert_eq!(tree.len(), 5);
        tree.validate().unwrap();
    }

    #[test]
    fn test_root_splits_before_fourth_insert() {
        let tree = tree_with(&["a", "b", "c", "d"]);

        assert_eq!(root_keys(&tree), vec![b"b".to_vec()]);
        assert_eq!(tree.height(), 2);
        let snapshot = tree.stats().snapshot();
        assert_eq!(snapshot.root_splits, 1);
        assert_eq!(snapshot.splits, 1);
    }

    #[test]
    fn test_delete_collapses_root() {
        let mut tree = tree_with(&["a", "b", "c", "d"]);

        assert!(tree.delete(b"d"));
        assert!(tree.delete(b"c"));
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.stats().snapshot().root_collapses, 1);
        tree.validate().unwrap();

        assert!(tree.delete(b"a"));
        assert!(tree.delete(b"b"));
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn test_remove_returns_value() {
        let mut tree = tree_with(&["a", "b"]);

        assert_eq!(tree.remove(b"a"), Some(b"A".to_vec()));
        assert_eq!(tree.remove(b"a"), None);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_delete_on_empty_tree() {
        let mut tree = BTree::new();
        assert!(!tree.delete(b"missing"));
        assert!(tree.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut tree = tree_with(&["a", "b", "c", "d", "e", "f"]);

        tree.clear();

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(!tree.contains_key(b"a"));
    }

    #[test]
    fn test_empty_key_and_value() {
        let mut tree = BTree::new();
        tree.insert(Vec::new(), Vec::new());

        assert_eq!(tree.find(b"").unwrap(), b"");
        assert!(tree.delete(b""));
    }

    #[test]
    fn test_larger_fan_out() {
        let mut tree = BTree::with_config(BTreeConfig::new(4).unwrap());
        for i in 0u32..500 {
            tree.insert(i.to_be_bytes(), i.to_le_bytes());
        }
        tree.validate().unwrap();
        assert_eq!(tree.len(), 500);

        for i in (0u32..500).step_by(2) {
            assert!(tree.delete(&i.to_be_bytes()));
        }
        tree.validate().unwrap();
        assert_eq!(tree.len(), 250);
        assert_eq!(tree.find(&7u32.to_be_bytes()).unwrap(), 7u32.to_le_bytes());
    }
}
