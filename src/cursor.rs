//! Bidirectional positions in a [`RedBlackTree`].
//!
//! A [`Cursor`] does not borrow the tree it came from; it is stepped and
//! dereferenced through tree methods. Besides sitting on an entry, a cursor can
//! be *before the first* or *after the last* entry. `end()` is the last node
//! with the after-last flag set, so retreating from it lands on the last entry
//! without searching.

use crate::arena::{NodeId, Side};
use crate::{CursorError, RedBlackTree};

/// A position in a [`RedBlackTree`].
///
/// Two cursors are equal when they refer to the same node with the same
/// boundary flags. On an empty tree `begin()` and `end()` are both the
/// detached cursor, which has both flags set.
///
/// Removing the entry a cursor refers to makes it stale, while cursors to
/// every other entry stay valid. Stale cursors are safe to use: dereferencing
/// reports [`CursorError::Stale`] until the slot is reused by a later insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    node: NodeId,
    before_first: bool,
    after_last: bool,
}

impl Cursor {
    #[inline]
    pub(crate) fn at(node: NodeId) -> Self {
        Self {
            node,
            before_first: false,
            after_last: false,
        }
    }

    #[inline]
    fn detached() -> Self {
        Self {
            node: NodeId::SENTINEL,
            before_first: true,
            after_last: true,
        }
    }

    #[inline]
    pub fn is_before_first(&self) -> bool {
        self.before_first
    }

    #[inline]
    pub fn is_after_last(&self) -> bool {
        self.after_last
    }
}

impl Default for Cursor {
    /// The detached cursor; equal to `begin()` and `end()` of an empty tree.
    fn default() -> Self {
        Self::detached()
    }
}

impl<K, V> RedBlackTree<K, V> {
    /// Cursor at the smallest entry.
    pub fn begin(&self) -> Cursor {
        if self.is_empty() {
            return Cursor::detached();
        }
        Cursor::at(self.extreme(self.root, Side::Left))
    }

    /// Cursor one past the largest entry.
    pub fn end(&self) -> Cursor {
        if self.is_empty() {
            return Cursor::detached();
        }
        Cursor {
            after_last: true,
            ..Cursor::at(self.extreme(self.root, Side::Right))
        }
    }

    /// Moves `cursor` to the next entry in key order.
    ///
    /// From the last entry the cursor stays on that node and becomes
    /// after-last. A before-first cursor only drops its flag.
    pub fn advance(&self, cursor: &mut Cursor) -> Result<(), CursorError> {
        if cursor.after_last {
            return Err(CursorError::AdvancePastEnd);
        }
        if cursor.before_first {
            cursor.before_first = false;
            return Ok(());
        }
        self.step_cursor(cursor, Side::Right)
    }

    /// Moves `cursor` to the previous entry in key order. Mirror of
    /// [`advance`](Self::advance).
    pub fn retreat(&self, cursor: &mut Cursor) -> Result<(), CursorError> {
        if cursor.before_first {
            return Err(CursorError::RetreatPastBegin);
        }
        if cursor.after_last {
            cursor.after_last = false;
            return Ok(());
        }
        self.step_cursor(cursor, Side::Left)
    }

    fn step_cursor(&self, cursor: &mut Cursor, side: Side) -> Result<(), CursorError> {
        if !self.nodes.is_live(cursor.node) {
            return Err(CursorError::Stale);
        }
        match self.step(cursor.node, side) {
            Some(next) => cursor.node = next,
            None => match side {
                Side::Right => cursor.after_last = true,
                Side::Left => cursor.before_first = true,
            },
        }
        Ok(())
    }

    /// The entry under `cursor`.
    pub fn key_value(&self, cursor: Cursor) -> Result<(&K, &V), CursorError> {
        Self::check_boundary(cursor)?;
        let (k, v) = self.nodes.entry(cursor.node).ok_or(CursorError::Stale)?;
        Ok((k, v))
    }

    /// Mutable access to the value under `cursor`. Keys are never handed out
    /// mutably.
    pub fn value_mut(&mut self, cursor: Cursor) -> Result<&mut V, CursorError> {
        Self::check_boundary(cursor)?;
        let (_, v) = self.nodes.entry_mut(cursor.node).ok_or(CursorError::Stale)?;
        Ok(v)
    }

    #[inline]
    fn check_boundary(cursor: Cursor) -> Result<(), CursorError> {
        if cursor.before_first {
            Err(CursorError::BeforeFirst)
        } else if cursor.after_last {
            Err(CursorError::AfterLast)
        } else {
            Ok(())
        }
    }
}
