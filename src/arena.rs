//! Node storage.
//!
//! Every node lives in one growable slot vector and is addressed by a [`NodeId`].
//! Child and parent links are indices, so the ownership graph has no cycles and
//! dropping the tree is a flat `Vec` drop. Slot 0 is the sentinel: it is black,
//! holds no entry, and stands in for every missing child.

use std::ops::{Index, IndexMut};

// =============================================================================
// Handles
// =============================================================================

/// Index of a node slot.
///
/// Copying a handle shares the node; `==` is identity. The arena owns the node
/// until [`NodeArena::release`] is called on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) const SENTINEL: NodeId = NodeId(0);
    /// Parent of the root. Never a valid slot.
    pub(crate) const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    fn from_index(idx: usize) -> Self {
        let raw = u32::try_from(idx).expect("node arena exceeds u32 slot space");
        debug_assert_ne!(raw, u32::MAX);
        Self(raw)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        debug_assert!(!self.is_none());
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }

    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self == Self::NONE
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a parent. Fixups are written once against a `Side` and
/// its opposite instead of twice for left and right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

// =============================================================================
// Node
// =============================================================================

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    /// `None` for the sentinel and for released slots.
    pub(crate) entry: Option<(K, V)>,
    pub(crate) color: Color,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    /// Non-owning back-reference; `NodeId::NONE` for the root.
    pub(crate) parent: NodeId,
}

impl<K, V> Node<K, V> {
    fn vacant() -> Self {
        Self {
            entry: None,
            color: Color::Black,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
            parent: NodeId::NONE,
        }
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> NodeId {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: NodeId) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }
}

// =============================================================================
// Arena
// =============================================================================

/// Slot arena with a free list of released slots.
#[derive(Clone)]
pub(crate) struct NodeArena<K, V> {
    slots: Vec<Node<K, V>>,
    free: Vec<NodeId>,
}

impl<K, V> NodeArena<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity.saturating_add(1));
        slots.push(Node::vacant());
        Self {
            slots,
            free: Vec::new(),
        }
    }

    /// Creates a red, unlinked node holding `key` and `value`.
    pub(crate) fn alloc(&mut self, key: K, value: V) -> NodeId {
        let node = Node {
            entry: Some((key, value)),
            color: Color::Red,
            left: NodeId::SENTINEL,
            right: NodeId::SENTINEL,
            parent: NodeId::NONE,
        };
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = node;
            id
        } else {
            let id = NodeId::from_index(self.slots.len());
            self.slots.push(node);
            id
        }
    }

    /// Returns the slot to the free list and hands back its entry. The caller
    /// must already have unlinked the node from the tree.
    pub(crate) fn release(&mut self, id: NodeId) -> (K, V) {
        debug_assert!(!id.is_sentinel(), "the sentinel is never released");
        let node = std::mem::replace(&mut self.slots[id.index()], Node::vacant());
        self.free.push(id);
        node.entry.expect("released node must hold an entry")
    }

    /// Whether `id` addresses a slot that currently holds an entry.
    #[inline]
    pub(crate) fn is_live(&self, id: NodeId) -> bool {
        self.entry(id).is_some()
    }

    #[inline]
    pub(crate) fn entry(&self, id: NodeId) -> Option<&(K, V)> {
        if id.is_none() {
            return None;
        }
        self.slots.get(id.index())?.entry.as_ref()
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, id: NodeId) -> Option<&mut (K, V)> {
        if id.is_none() {
            return None;
        }
        self.slots.get_mut(id.index())?.entry.as_mut()
    }

    /// Key of a node that is linked into the tree.
    #[inline]
    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.slots[id.index()]
            .entry
            .as_ref()
            .expect("linked node must hold an entry")
            .0
    }

    /// Drops every entry and keeps only the sentinel.
    pub(crate) fn clear(&mut self) {
        self.slots.truncate(1);
        self.slots[0] = Node::vacant();
        self.free.clear();
    }

    /// Pops released slots off the end of the slot vector, then shrinks both
    /// vectors. Live handles keep their indices.
    pub(crate) fn shrink_to_fit(&mut self) -> usize {
        let before = self.slots.len();
        while self.slots.len() > 1 && self.slots.last().is_some_and(|n| n.entry.is_none()) {
            self.slots.pop();
        }
        let len = self.slots.len();
        self.free.retain(|id| id.index() < len);
        self.slots.shrink_to_fit();
        self.free.shrink_to_fit();
        before - len
    }

    pub(crate) fn capacity_bytes(&self) -> usize {
        self.slots.capacity() * std::mem::size_of::<Node<K, V>>()
            + self.free.capacity() * std::mem::size_of::<NodeId>()
    }

    /// Number of slots, including the sentinel and released slots.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }
}

impl<K, V> Index<NodeId> for NodeArena<K, V> {
    type Output = Node<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<K, V> {
        &self.slots[id.index()]
    }
}

impl<K, V> IndexMut<NodeId> for NodeArena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.slots[id.index()]
    }
}
