use std::cmp::Ordering;

use tracing::trace;

use crate::arena::{Color, NodeId, Side};
use crate::{Cursor, RedBlackTree};

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// Returns a cursor at the entry for `key` and whether a new entry was
    /// created. An existing entry keeps its value; `value` is dropped.
    pub fn insert(&mut self, key: K, value: V) -> (Cursor, bool) {
        let mut parent = NodeId::NONE;
        let mut side = Side::Left;
        let mut current = self.root;
        while !current.is_sentinel() {
            side = match key.cmp(self.nodes.key(current)) {
                Ordering::Equal => {
                    trace!(len = self.count, "duplicate key, insert skipped");
                    return (Cursor::at(current), false);
                }
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            parent = current;
            current = self.child(current, side);
        }

        let node = self.nodes.alloc(key, value);
        self.nodes[node].parent = parent;
        if parent.is_none() {
            self.root = node;
        } else {
            self.nodes[parent].set_child(side, node);
        }

        self.insert_fixup(node);
        self.count += 1;
        trace!(len = self.count, "inserted entry");
        (Cursor::at(node), true)
    }

    /// Restores the red invariant upwards from the freshly linked red `node`.
    fn insert_fixup(&mut self, mut node: NodeId) {
        loop {
            let parent = self.parent(node);
            if !self.is_red(parent) {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let grand = self.parent(parent);
            let side = self.side_of(parent);
            let uncle = self.child(grand, side.opposite());

            if self.is_red(uncle) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grand, Color::Red);
                node = grand;
                continue;
            }

            if node == self.child(parent, side.opposite()) {
                node = parent;
                self.rotate(node, side);
            }

            let parent = self.parent(node);
            let grand = self.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grand, Color::Red);
            self.rotate(grand, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }
}
