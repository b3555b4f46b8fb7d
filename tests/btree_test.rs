//! B-tree scenario tests.
//!
//! Each test drives the public API and checks structure through
//! `validate()`, `Display`, `height()` and the stats counters.

use saplingdb::{BTree, BTreeConfig, Error};

fn tree_with(keys: &[&str]) -> BTree {
    let mut tree = BTree::new();
    for key in keys {
        tree.insert(*key, format!("v-{key}"));
        tree.validate().unwrap();
    }
    tree
}

fn configs() -> Vec<BTreeConfig> {
    (2..=6).map(|n| BTreeConfig::new(n).unwrap()).collect()
}

// ============================================================================
// Concrete 2-3-4 scenario
// ============================================================================

/// Four inserts into a tree with three items per node split the root once,
/// before the fourth key goes in.
#[test]
fn test_fourth_insert_splits_root() {
    let tree = tree_with(&["a", "b", "c"]);
    assert_eq!(tree.height(), 1);
    assert_eq!(tree.stats().snapshot().root_splits, 0);

    let tree = tree_with(&["a", "b", "c", "d"]);

    assert_eq!(tree.height(), 2);
    assert_eq!(tree.stats().snapshot().root_splits, 1);
    assert_eq!(tree.to_string(), "[b]\n├── [a]\n└── [c, d]\n");
}

/// Deleting "a" empties the left leaf, which borrows through the root from
/// its right sibling.
#[test]
fn test_delete_after_root_split_repairs_leaf() {
    let mut tree = tree_with(&["a", "b", "c", "d"]);

    assert!(tree.delete(b"a"));

    let snapshot = tree.stats().snapshot();
    assert!(snapshot.rebalances() >= 1);
    assert_eq!(snapshot.borrows_right, 1);
    assert_eq!(tree.to_string(), "[c]\n├── [b]\n└── [d]\n");
    tree.validate().unwrap();
}

/// The last child has no right sibling: with a minimal left sibling it must
/// merge leftwards, never borrow.
#[test]
fn test_last_child_underflow_merges_left() {
    let mut tree = tree_with(&["a", "b", "c", "d"]);
    assert!(tree.delete(b"d"));
    assert_eq!(tree.to_string(), "[b]\n├── [a]\n└── [c]\n");

    assert!(tree.delete(b"c"));

    let snapshot = tree.stats().snapshot();
    assert_eq!(snapshot.merges, 1);
    assert_eq!(snapshot.borrows_right, 0);
    assert_eq!(snapshot.root_collapses, 1);
    assert_eq!(tree.to_string(), "[a, b]\n");
    tree.validate().unwrap();
}

/// A rich left sibling lends to the last child.
#[test]
fn test_last_child_borrows_from_left() {
    let mut tree = tree_with(&["c", "d", "e", "a", "b"]);
    assert_eq!(tree.to_string(), "[d]\n├── [a, b, c]\n└── [e]\n");

    assert!(tree.delete(b"e"));

    assert_eq!(tree.stats().snapshot().borrows_left, 1);
    assert_eq!(tree.to_string(), "[c]\n├── [a, b]\n└── [d]\n");
    tree.validate().unwrap();
}

// ============================================================================
// Testable properties
// ============================================================================

#[test]
fn test_round_trip() {
    for config in configs() {
        let mut tree = BTree::with_config(config);
        for i in 0u32..1_000 {
            let key = i.wrapping_mul(2_654_435_761).to_be_bytes();
            tree.insert(key, i.to_string());
        }
        tree.validate().unwrap();

        for i in 0u32..1_000 {
            let key = i.wrapping_mul(2_654_435_761).to_be_bytes();
            assert_eq!(tree.find(&key).unwrap(), i.to_string().as_bytes());
        }
    }
}

#[test]
fn test_overwrite_semantics() {
    let mut tree = tree_with(&["a", "b", "c", "d", "e", "f", "g"]);
    let len = tree.len();

    tree.insert("d", "v1");
    tree.insert("d", "v2");

    assert_eq!(tree.find(b"d").unwrap(), b"v2");
    assert_eq!(tree.len(), len);
    tree.validate().unwrap();
}

#[test]
fn test_delete_correctness() {
    let mut tree = tree_with(&["m", "n", "o", "p", "q", "r"]);

    tree.insert("k", "v");
    assert!(tree.delete(b"k"));
    assert!(matches!(tree.find(b"k"), Err(Error::KeyNotFound)));
    assert!(!tree.delete(b"k"));
    tree.validate().unwrap();
}

#[test]
fn test_idempotent_absence() {
    let mut empty = BTree::new();
    assert!(!empty.delete(b"ghost"));
    assert!(empty.is_empty());

    let mut tree = tree_with(&["a", "c", "e", "g", "i", "k", "m", "o"]);
    let before = tree.to_string();
    let stats_before = tree.stats().snapshot();

    for missing in ["b", "d", "j", "z", "", "aa"] {
        assert!(!tree.delete(missing.as_bytes()));
    }

    assert_eq!(tree.to_string(), before);
    assert_eq!(tree.stats().snapshot(), stats_before);
    assert_eq!(tree.len(), 8);
}

#[test]
fn test_root_collapse_returns_to_empty() {
    for config in configs() {
        let mut tree = BTree::with_config(config);
        let count = config.max_items() as u32 + 1;

        for i in 0..count {
            tree.insert(i.to_be_bytes(), "");
        }
        assert_eq!(tree.height(), 2);

        for i in 0..count {
            assert!(tree.delete(&i.to_be_bytes()));
            tree.validate().unwrap();
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }
}

// ============================================================================
// Larger workloads
// ============================================================================

#[test]
fn test_ascending_then_descending_deletes() {
    for config in configs() {
        let mut tree = BTree::with_config(config);
        for i in 0u16..600 {
            tree.insert(i.to_be_bytes(), "x");
        }
        tree.validate().unwrap();

        for i in (0u16..600).rev() {
            assert!(tree.delete(&i.to_be_bytes()));
            tree.validate().unwrap();
        }
        assert!(tree.is_empty());
    }
}

#[test]
fn test_delete_internal_keys_first() {
    let mut tree = BTree::new();
    for i in 0u16..300 {
        tree.insert(i.to_be_bytes(), "x");
    }

    // Deleting from the middle out hits internal separators early.
    let mut order: Vec<u16> = (0..300).collect();
    order.sort_by_key(|i| (i.abs_diff(150), *i));
    for (n, i) in order.iter().enumerate() {
        assert!(tree.delete(&i.to_be_bytes()));
        tree.validate().unwrap();
        assert_eq!(tree.len(), 300 - n - 1);
    }

    let snapshot = tree.stats().snapshot();
    assert!(snapshot.merges > 0);
    assert!(snapshot.root_collapses > 0);
}

#[test]
fn test_trees_with_different_fan_out_coexist() {
    let mut narrow = BTree::with_config(BTreeConfig::new(2).unwrap());
    let mut wide = BTree::with_config(BTreeConfig::new(32).unwrap());

    for i in 0u32..2_000 {
        narrow.insert(i.to_be_bytes(), "");
        wide.insert(i.to_be_bytes(), "");
    }

    assert!(narrow.height() > wide.height());
    assert_eq!(narrow.len(), wide.len());
    narrow.validate().unwrap();
    wide.validate().unwrap();
}
