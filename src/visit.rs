//! Traversal orders and the callback that receives each visited entry.

/// The order in which [`Tree::traverse`][crate::redblack::Tree::traverse] visits nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, node, right subtree. Keys come out sorted.
    In,
    /// Left subtree, right subtree, then node.
    Post,
    /// Breadth first, top level to bottom level, left to right within a level.
    Level,
}

/// Receives every entry of a tree exactly once during a traversal.
///
/// Any `FnMut(&K, &V)` closure is a `Visitor`.
pub trait Visitor<K, V> {
    /// Called once per node.
    fn visit(&mut self, key: &K, value: &V);
}

impl<K, V, F> Visitor<K, V> for F
where
    F: FnMut(&K, &V),
{
    fn visit(&mut self, key: &K, value: &V) {
        self(key, value)
    }
}
