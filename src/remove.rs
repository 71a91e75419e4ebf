use std::borrow::Borrow;

use tracing::trace;

use crate::arena::{Color, NodeId, Side};
use crate::RedBlackTree;

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Removes `key`, returning how many entries were removed (0 or 1).
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        usize::from(self.remove_entry(key).is_some())
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node = self.search(key)?;
        let entry = self.unlink(node);
        self.count -= 1;
        trace!(len = self.count, "removed entry");
        Some(entry)
    }
}

impl<K, V> RedBlackTree<K, V> {
    /// Takes `node`'s entry out of the tree and rebalances.
    ///
    /// A node with two children is replaced by its in-order successor node,
    /// which takes over `node`'s links and color. Entries never move between
    /// slots, so only `node`'s own slot is released.
    fn unlink(&mut self, node: NodeId) -> (K, V) {
        let (left, right) = (self.nodes[node].left, self.nodes[node].right);

        // `x` may be the sentinel; its parent is only meaningful until the fixup ends.
        let (x, removed_color) = if left.is_sentinel() || right.is_sentinel() {
            let x = if left.is_sentinel() { right } else { left };
            self.transplant(node, x);
            (x, self.nodes[node].color)
        } else {
            let successor = self.extreme(right, Side::Left);
            let removed_color = self.nodes[successor].color;
            let x = self.nodes[successor].right;

            if self.parent(successor) == node {
                self.nodes[x].parent = successor;
            } else {
                self.transplant(successor, x);
                self.nodes[successor].right = right;
                self.nodes[right].parent = successor;
            }

            self.transplant(node, successor);
            self.nodes[successor].left = left;
            self.nodes[left].parent = successor;
            self.nodes[successor].color = self.nodes[node].color;
            (x, removed_color)
        };

        let entry = self.nodes.release(node);
        if removed_color == Color::Black {
            self.remove_fixup(x);
        }
        self.nodes[NodeId::SENTINEL].parent = NodeId::NONE;
        entry
    }

    /// Puts `new` where `old` hangs, including under the root.
    fn transplant(&mut self, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        self.replace_child(parent, old, new);
        self.nodes[new].parent = parent;
    }

    /// `x` carries an extra black after its black parent-side ancestor was
    /// spliced out; push it up until it lands on a red node or the root.
    fn remove_fixup(&mut self, mut x: NodeId) {
        while x != self.root && !self.is_red(x) {
            let side = self.side_of(x);
            let mut parent = self.parent(x);
            let mut sibling = self.child(parent, side.opposite());

            if self.is_red(sibling) {
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate(parent, side);
                parent = self.parent(x);
                sibling = self.child(parent, side.opposite());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());
            if !self.is_red(near) && !self.is_red(far) {
                self.set_color(sibling, Color::Red);
                x = parent;
                continue;
            }

            if !self.is_red(far) {
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, side.opposite());
                sibling = self.child(parent, side.opposite());
            }

            let parent_color = self.nodes[parent].color;
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far = self.child(sibling, side.opposite());
            self.set_color(far, Color::Black);
            self.rotate(parent, side);
            x = self.root;
        }
        self.set_color(x, Color::Black);
    }
}
