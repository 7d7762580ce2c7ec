use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Node storage could not be obtained. The tree is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("node limit of {limit} reached")]
    NodeLimitReached { limit: usize },

    #[error("node index space exhausted")]
    IndexSpaceExhausted,

    #[error("failed to reserve node storage: {0}")]
    Reserve(#[from] TryReserveError),
}

/// A broken red-black or bookkeeping invariant, reported by
/// [`RbTree::check_invariants`](crate::RbTree::check_invariants).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("root is red")]
    RedRoot,

    #[error("red node has a red child")]
    RedChildOfRed,

    #[error("black height mismatch: expected {expected}, found {found}")]
    BlackHeight { expected: usize, found: usize },

    #[error("parent link disagrees with child link")]
    BrokenParentLink,

    #[error("in-order sequence is not sorted")]
    Unsorted,

    #[error("cached minimum or maximum is stale")]
    StaleBoundary,

    #[error("reachable node count {found} differs from length {expected}")]
    LengthMismatch { expected: usize, found: usize },
}
