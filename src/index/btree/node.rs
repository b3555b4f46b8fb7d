//! B-tree nodes.
//!
//! A [`Node`] owns its items and (if internal) its children directly through
//! `Box`es, so the whole tree is a plain ownership tree: no parent pointers,
//! no sharing. Every operation here is local to one node and its direct
//! children; root-level growth and shrinkage live in [`super::tree`].
//!
//! # Layout
//! ```text
//!            items:     [ k0 ][ k1 ][ k2 ]
//!            children: c0    c1    c2    c3
//!
//!   keys(c0) < k0 < keys(c1) < k1 < keys(c2) < k2 < keys(c3)
//! ```

use std::cmp::Ordering;
use std::mem;

use crate::common::BTreeConfig;
use crate::index::btree::item::Item;
use crate::index::btree::stats::TreeStats;

#[derive(Debug)]
pub(crate) struct Node {
    /// Strictly increasing by key, at most `max_items` long.
    pub(crate) items: Vec<Item>,

    /// Empty for a leaf, otherwise exactly `items.len() + 1` subtrees.
    pub(crate) children: Vec<Box<Node>>,
}

impl Node {
    pub(crate) fn new(config: &BTreeConfig) -> Self {
        Self {
            items: Vec::with_capacity(config.max_items()),
            children: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Binary search over this node's items.
    ///
    /// Returns the first index whose key is `>= key` and whether that key is
    /// an exact match. On a miss in an internal node the index is also the
    /// child to descend into.
    pub(crate) fn search(&self, key: &[u8]) -> (usize, bool) {
        match self.items.binary_search_by(|item| item.cmp_key(key)) {
            Ok(pos) => (pos, true),
            Err(pos) => (pos, false),
        }
    }

    /// Split a full node in two around its middle item.
    ///
    /// This node keeps items `[0, min_items)` and children `[0, min_items]`;
    /// everything after the middle moves to the returned right sibling. The
    /// caller inserts the middle item and the sibling into the parent.
    pub(crate) fn split(&mut self, config: &BTreeConfig) -> (Item, Box<Node>) {
        debug_assert_eq!(self.items.len(), config.max_items(), "split of a non-full node");

        let mid = config.min_items();
        let mut right = Node::new(config);
        right.items.extend(self.items.drain(mid + 1..));
        if !self.is_leaf() {
            right.children.extend(self.children.drain(mid + 1..));
        }
        let middle = self.remove_item_at(mid);

        (middle, Box::new(right))
    }

    /// Insert an item into the subtree rooted here.
    ///
    /// Full children are split before descending into them, so this node
    /// never has to absorb a split from below after the fact. The caller
    /// guarantees this node itself is not full.
    ///
    /// Returns `true` if the key was new, `false` if an existing value was
    /// overwritten.
    pub(crate) fn insert(&mut self, item: Item, config: &BTreeConfig, stats: &TreeStats) -> bool {
        let (mut pos, found) = self.search(&item.key);

        if found {
            self.items[pos].value = item.value;
            return false;
        }

        if self.is_leaf() {
            self.insert_item_at(pos, item);
            return true;
        }

        if self.children[pos].items.len() >= config.max_items() {
            let (middle, right) = self.children[pos].split(config);
            self.insert_item_at(pos, middle);
            self.insert_child_at(pos + 1, right);
            TreeStats::record(&stats.splits);

            // The promoted item now separates the two halves.
            match self.items[pos].cmp_key(&item.key) {
                Ordering::Greater => {}
                Ordering::Less => pos += 1,
                Ordering::Equal => {
                    self.items[pos].value = item.value;
                    return false;
                }
            }
        }

        self.children[pos].insert(item, config, stats)
    }

    pub(crate) fn insert_item_at(&mut self, pos: usize, item: Item) {
        self.items.insert(pos, item);
    }

    pub(crate) fn insert_child_at(&mut self, pos: usize, child: Box<Node>) {
        self.children.insert(pos, child);
    }

    pub(crate) fn remove_item_at(&mut self, pos: usize) -> Item {
        self.items.remove(pos)
    }

    pub(crate) fn remove_child_at(&mut self, pos: usize) -> Box<Node> {
        self.children.remove(pos)
    }

    /// Repair `children[pos]` after it dropped below `min_items`.
    ///
    /// Exactly one of three cases fires, tried in order:
    ///
    /// ```text
    /// borrow left          borrow right          merge
    ///    ┌ M ┐      =>      ┌ M ┐     =>          ┌ C ┬ M ┬ X ┐   =>  ┌ C ┬ X ┐
    ///  A,B,C  Z        A    X,Y,Z                 A    L    N    Z     A  L,M,N  Z
    ///  ┌ C ┐                ┌ X ┐
    ///  A,B  M,Z           A,M  Y,Z
    /// ```
    pub(crate) fn fill_child_at(&mut self, pos: usize, config: &BTreeConfig, stats: &TreeStats) {
        let min_items = config.min_items();

        if pos > 0 && self.children[pos - 1].items.len() > min_items {
            self.borrow_from_left(pos);
            TreeStats::record(&stats.borrows_left);
        } else if pos + 1 < self.children.len() && self.children[pos + 1].items.len() > min_items {
            self.borrow_from_right(pos);
            TreeStats::record(&stats.borrows_right);
        } else {
            // The last child has no right sibling: merge it into its left one.
            let left = pos.min(self.items.len() - 1);
            self.merge_children(left);
            TreeStats::record(&stats.merges);
        }
    }

    /// Rotate the left sibling's last item up and the separator down into
    /// the front of `children[pos]`.
    fn borrow_from_left(&mut self, pos: usize) {
        let (head, tail) = self.children.split_at_mut(pos);
        let left = &mut head[pos - 1];
        let child = &mut tail[0];

        let lifted = left.remove_item_at(left.items.len() - 1);
        let separator = mem::replace(&mut self.items[pos - 1], lifted);
        child.insert_item_at(0, separator);

        if !left.is_leaf() {
            let moved = left.remove_child_at(left.children.len() - 1);
            child.insert_child_at(0, moved);
        }
    }

    /// Rotate the right sibling's first item up and the separator down onto
    /// the end of `children[pos]`.
    fn borrow_from_right(&mut self, pos: usize) {
        let (head, tail) = self.children.split_at_mut(pos + 1);
        let child = &mut head[pos];
        let right = &mut tail[0];

        let lifted = right.remove_item_at(0);
        let separator = mem::replace(&mut self.items[pos], lifted);
        child.insert_item_at(child.items.len(), separator);

        if !right.is_leaf() {
            let moved = right.remove_child_at(0);
            child.insert_child_at(child.children.len(), moved);
        }
    }

    /// Pull `items[pos]` down into `children[pos]` and append all of
    /// `children[pos + 1]` after it. The right sibling is dropped.
    fn merge_children(&mut self, pos: usize) {
        let separator = self.remove_item_at(pos);
        let right = self.remove_child_at(pos + 1);
        let Node { items, children } = *right;

        let left = &mut self.children[pos];
        left.items.push(separator);
        left.items.extend(items);
        left.children.extend(children);
    }

    /// Delete `key` from the subtree rooted here.
    ///
    /// A key found in an internal node is replaced by its in-order successor,
    /// the minimum of `children[pos + 1]`; `seeking_successor` marks that
    /// descent. Children left below `min_items` are repaired on the way back
    /// up, so only the root can end up underfull.
    ///
    /// Returns the removed item, or `None` if the key is absent (in which
    /// case nothing was touched).
    pub(crate) fn delete(
        &mut self,
        key: &[u8],
        seeking_successor: bool,
        config: &BTreeConfig,
        stats: &TreeStats,
    ) -> Option<Item> {
        let (pos, found) = self.search(key);

        if self.is_leaf() {
            return if found {
                Some(self.remove_item_at(pos))
            } else if seeking_successor {
                Some(self.remove_item_at(0))
            } else {
                None
            };
        }

        let child_pos = if found { pos + 1 } else { pos };
        let removed =
            self.children[child_pos].delete(key, found || seeking_successor, config, stats)?;
        let removed = if found {
            mem::replace(&mut self.items[pos], removed)
        } else {
            removed
        };

        if self.children[child_pos].items.len() < config.min_items() {
            self.fill_child_at(child_pos, config, stats);
        }

        Some(removed)
    }
}
