/// Errors from stepping or dereferencing a [`Cursor`](crate::Cursor).
///
/// The cursor's position after a failed step is unspecified; callers should
/// not rely on it.
#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum CursorError {
    /// Dereferenced a cursor that sits before the first entry.
    #[error("cursor is positioned before the first entry")]
    BeforeFirst,
    /// Dereferenced a cursor that sits after the last entry.
    #[error("cursor is positioned after the last entry")]
    AfterLast,
    /// Advanced a cursor that was already after the last entry.
    #[error("cannot advance a cursor past the end")]
    AdvancePastEnd,
    /// Retreated a cursor that was already before the first entry.
    #[error("cannot retreat a cursor before the beginning")]
    RetreatPastBegin,
    /// The cursor's node has been removed from the tree.
    #[error("cursor refers to an entry that is no longer in the tree")]
    Stale,
}

/// A broken red-black or bookkeeping invariant, reported by
/// [`RedBlackTree::check_invariants`](crate::RedBlackTree::check_invariants).
///
/// `node` fields are arena slot indices.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("keys out of order at node {node}")]
    Order { node: usize },
    #[error("red node {node} has a red child")]
    RedRed { node: usize },
    #[error("black height differs below node {node}: left {left}, right {right}")]
    BlackHeight {
        node: usize,
        left: usize,
        right: usize,
    },
    #[error("root {node} is red")]
    RedRoot { node: usize },
    #[error("node {node} has parent link {found}, expected {expected}")]
    ParentLink {
        node: usize,
        expected: usize,
        found: usize,
    },
    #[error("sentinel was modified")]
    Sentinel,
    #[error("tree reports {expected} entries but {found} are reachable")]
    Count { expected: usize, found: usize },
}
