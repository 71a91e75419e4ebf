//! # redblack-rs
//!
//! An ordered map backed by a red-black tree whose nodes live in an index arena.
//!
//! Lookups and structural operations are O(log n). Positions are exposed as
//! [`Cursor`]s: small `Copy` handles that can sit before the first entry or
//! after the last one, and that step in both directions against the tree.
//!
//! ## Example
//!
//! ```rust
//! use redblack_rs::RedBlackTree;
//!
//! let mut tree: RedBlackTree<u32, &str> = RedBlackTree::new();
//! let (_, inserted) = tree.insert(2, "two");
//! assert!(inserted);
//! tree.insert(1, "one");
//!
//! // Duplicate keys keep the first value.
//! let (_, inserted) = tree.insert(2, "deux");
//! assert!(!inserted);
//!
//! let mut cursor = tree.begin();
//! assert_eq!(tree.key_value(cursor), Ok((&1, &"one")));
//! tree.advance(&mut cursor).unwrap();
//! assert_eq!(tree.key_value(cursor), Ok((&2, &"two")));
//! tree.advance(&mut cursor).unwrap();
//! assert_eq!(cursor, tree.end());
//!
//! assert_eq!(tree.remove(&1), 1);
//! assert_eq!(tree.remove(&1), 0);
//! ```

#![forbid(unsafe_code)]

mod arena;
mod cursor;
mod error;
mod insert;
mod iter;
mod remove;
mod validate;

use std::borrow::Borrow;
use std::cmp::Ordering;

use tracing::debug;

use arena::{Color, NodeArena, NodeId, Side};

pub use cursor::Cursor;
pub use error::{CursorError, InvariantViolation};
pub use iter::{Iter, Keys, Values};

// =============================================================================
// Tree
// =============================================================================

/// An ordered map with unique keys, balanced as a red-black tree.
///
/// Inserting a key that is already present leaves the stored value untouched.
#[derive(Clone)]
pub struct RedBlackTree<K, V> {
    nodes: NodeArena<K, V>,
    /// `NodeId::SENTINEL` when empty.
    root: NodeId,
    count: usize,
}

impl<K, V> RedBlackTree<K, V> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree with room for `capacity` entries before the node
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            root: NodeId::SENTINEL,
            count: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_sentinel()
    }

    /// Bytes reserved by the node arena.
    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity_bytes()
    }

    /// Returns trailing released slots to the allocator. Cursors to live
    /// entries stay valid.
    pub fn shrink_to_fit(&mut self) {
        let dropped = self.nodes.shrink_to_fit();
        debug!(dropped, len = self.count, "shrunk node arena");
    }

    /// Removes every entry. All outstanding cursors become stale.
    pub fn clear(&mut self) {
        debug!(len = self.count, "clearing tree");
        self.nodes.clear();
        self.root = NodeId::SENTINEL;
        self.count = 0;
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.extreme_entry(Side::Left)
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.extreme_entry(Side::Right)
    }

    fn extreme_entry(&self, side: Side) -> Option<(&K, &V)> {
        if self.is_empty() {
            return None;
        }
        let (k, v) = self.nodes.entry(self.extreme(self.root, side))?;
        Some((k, v))
    }
}

// =============================================================================
// Lookup
// =============================================================================

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Returns a cursor at `key`, or [`end`](Self::end) if it is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.search(key) {
            Some(node) => Cursor::at(node),
            None => self.end(),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search(key)?;
        self.nodes.entry(node).map(|(_, v)| v)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search(key)?;
        self.nodes.entry_mut(node).map(|(_, v)| v)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    fn search<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while !current.is_sentinel() {
            current = match key.cmp(self.nodes.key(current).borrow()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => self.nodes[current].left,
                Ordering::Greater => self.nodes[current].right,
            };
        }
        None
    }
}

// =============================================================================
// Structural primitives
// =============================================================================

impl<K, V> RedBlackTree<K, V> {
    #[inline]
    fn parent(&self, node: NodeId) -> NodeId {
        self.nodes[node].parent
    }

    #[inline]
    fn child(&self, node: NodeId, side: Side) -> NodeId {
        self.nodes[node].child(side)
    }

    /// The sentinel and the root's missing parent are black.
    #[inline]
    fn is_red(&self, node: NodeId) -> bool {
        !node.is_none() && self.nodes[node].color == Color::Red
    }

    #[inline]
    fn set_color(&mut self, node: NodeId, color: Color) {
        self.nodes[node].color = color;
    }

    /// Which child of its parent `node` is. `node` must not be the root; it may
    /// be the sentinel while a delete fixup is walking up from it.
    #[inline]
    fn side_of(&self, node: NodeId) -> Side {
        let parent = self.parent(node);
        debug_assert!(!parent.is_none());
        if self.nodes[parent].left == node {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Points `parent`'s link to `old` (or the root, if `parent` is `NONE`) at
    /// `new`. Does not touch `new.parent`.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_none() {
            self.root = new;
        } else if self.nodes[parent].left == old {
            self.nodes[parent].left = new;
        } else {
            debug_assert_eq!(self.nodes[parent].right, old);
            self.nodes[parent].right = new;
        }
    }

    /// Rotates the subtree at `x` towards `side`: `rotate(x, Side::Left)` is the
    /// classic left rotation, lifting `x`'s right child into `x`'s place.
    ///
    /// Rotations are the only operations that change the shape of the tree
    /// beyond linking a fresh leaf or splicing out a node.
    fn rotate(&mut self, x: NodeId, side: Side) {
        let up = side.opposite();
        let y = self.child(x, up);
        debug_assert!(!x.is_sentinel() && !y.is_sentinel());

        let inner = self.child(y, side);
        self.nodes[x].set_child(up, inner);
        if !inner.is_sentinel() {
            self.nodes[inner].parent = x;
        }

        let parent = self.parent(x);
        self.nodes[y].parent = parent;
        self.replace_child(parent, x, y);

        self.nodes[y].set_child(side, x);
        self.nodes[x].parent = y;
    }

    /// Leftmost (`Side::Left`) or rightmost node of the subtree at `node`.
    fn extreme(&self, mut node: NodeId, side: Side) -> NodeId {
        loop {
            let next = self.child(node, side);
            if next.is_sentinel() {
                return node;
            }
            node = next;
        }
    }

    /// In-order neighbour of `node`: the successor for `Side::Right`, the
    /// predecessor for `Side::Left`.
    fn step(&self, node: NodeId, side: Side) -> Option<NodeId> {
        let down = self.child(node, side);
        if !down.is_sentinel() {
            return Some(self.extreme(down, side.opposite()));
        }
        let mut current = node;
        loop {
            let parent = self.parent(current);
            if parent.is_none() {
                return None;
            }
            if self.child(parent, side) != current {
                return Some(parent);
            }
            current = parent;
        }
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for RedBlackTree<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for RedBlackTree<K, V> {
    /// Keys already present keep their current value.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}


#[cfg(test)]
mod proptests;
