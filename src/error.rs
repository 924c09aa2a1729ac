//! Errors reported by the trees in this crate.

use thiserror::Error;

/// Errors returned by the fallible operations on [`Tree`][crate::redblack::Tree] and
/// [`Set`][crate::set::Set].
///
/// None of these leave a tree half-modified: every check runs before the tree is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The key isn't in the tree.
    #[error("key not found")]
    NotFound,
    /// The comparator can't place the key in a total order (e.g. a `NaN` float).
    #[error("key cannot be totally ordered by the tree's comparator")]
    InvalidOrdering,
    /// A key list contained an empty entry.
    #[error("missing key at position {0}")]
    NullKey(usize),
    /// A key list contained an entry that couldn't be parsed.
    #[error("could not parse key `{0}`")]
    Parse(String),
}

/// A broken red-black invariant, as reported by [`Tree::check`][crate::redblack::Tree::check].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    /// The root is red.
    #[error("root is red")]
    RedRoot,
    /// A red node has a red child.
    #[error("red node at in-order position {0} has a red child")]
    RedChildOfRed(usize),
    /// Two paths below the same node see a different number of black nodes.
    #[error("black heights differ below in-order position {position}: {left} vs {right}")]
    BlackHeight {
        /// In-order position of the node whose subtrees disagree.
        position: usize,
        /// Black-height of the left subtree.
        left: usize,
        /// Black-height of the right subtree.
        right: usize,
    },
    /// In-order traversal isn't strictly ascending.
    #[error("keys out of order at in-order position {0}")]
    OutOfOrder(usize),
    /// A child doesn't point back at its parent.
    #[error("parent link broken at in-order position {0}")]
    ParentLink(usize),
    /// The stored length doesn't match the number of reachable nodes.
    #[error("length is {stored} but {reachable} nodes are reachable")]
    Length {
        /// What the tree thinks its length is.
        stored: usize,
        /// How many nodes can actually be reached from the root.
        reachable: usize,
    },
}
