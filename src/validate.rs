use std::cmp::Ordering;

use crate::arena::{Color, NodeId};
use crate::{InvariantViolation, RedBlackTree};

fn slot(id: NodeId) -> usize {
    if id.is_none() {
        usize::MAX
    } else {
        id.index()
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Walks the whole tree and checks key order, the red and black-height
    /// rules, the root color, parent back-references, the sentinel, and the
    /// entry count.
    ///
    /// O(n); intended for tests and debugging.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let sentinel = &self.nodes[NodeId::SENTINEL];
        if sentinel.color != Color::Black
            || sentinel.entry.is_some()
            || !sentinel.parent.is_none()
            || !sentinel.left.is_sentinel()
            || !sentinel.right.is_sentinel()
        {
            return Err(InvariantViolation::Sentinel);
        }

        if self.root.is_sentinel() {
            return if self.count == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::Count {
                    expected: self.count,
                    found: 0,
                })
            };
        }

        if self.is_red(self.root) {
            return Err(InvariantViolation::RedRoot {
                node: slot(self.root),
            });
        }
        if !self.parent(self.root).is_none() {
            return Err(InvariantViolation::ParentLink {
                node: slot(self.root),
                expected: slot(NodeId::NONE),
                found: slot(self.parent(self.root)),
            });
        }

        let mut found = 0;
        self.check_subtree(self.root, None, None, &mut found)?;
        if found != self.count {
            return Err(InvariantViolation::Count {
                expected: self.count,
                found,
            });
        }
        Ok(())
    }

    /// Returns the black height of the subtree at `node`, counting the
    /// sentinel but not `node` itself.
    fn check_subtree(
        &self,
        node: NodeId,
        lower: Option<&K>,
        upper: Option<&K>,
        found: &mut usize,
    ) -> Result<usize, InvariantViolation> {
        if node.is_sentinel() {
            return Ok(0);
        }
        *found += 1;

        let key = self.nodes.key(node);
        let in_order = lower.map_or(true, |lo| lo.cmp(key) == Ordering::Less)
            && upper.map_or(true, |hi| key.cmp(hi) == Ordering::Less);
        if !in_order {
            return Err(InvariantViolation::Order { node: slot(node) });
        }

        let n = &self.nodes[node];
        let mut heights = [0usize; 2];
        for (i, (child, lo, hi)) in [(n.left, lower, Some(key)), (n.right, Some(key), upper)]
            .into_iter()
            .enumerate()
        {
            if child.is_sentinel() {
                heights[i] = 1;
                continue;
            }
            if self.parent(child) != node {
                return Err(InvariantViolation::ParentLink {
                    node: slot(child),
                    expected: slot(node),
                    found: slot(self.parent(child)),
                });
            }
            if n.color == Color::Red && self.is_red(child) {
                return Err(InvariantViolation::RedRed { node: slot(node) });
            }
            let below = self.check_subtree(child, lo, hi, found)?;
            heights[i] = below + usize::from(!self.is_red(child));
        }

        if heights[0] != heights[1] {
            return Err(InvariantViolation::BlackHeight {
                node: slot(node),
                left: heights[0],
                right: heights[1],
            });
        }
        Ok(heights[0])
    }
}
