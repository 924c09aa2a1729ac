//! The key-only flavour of the red-black tree, for when there's nothing to associate with a
//! key.
//!
//! # Examples
//!
//! ```
//! use rbindex::set::Set;
//!
//! let mut set = Set::new();
//!
//! assert!(set.insert(2));
//! assert!(set.insert(1));
//! assert!(!set.insert(2));
//!
//! assert!(set.contains(&1));
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
//!
//! assert!(set.remove(&1));
//! assert!(!set.remove(&1));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::compare::{Comparator, Natural};
use crate::error::Error;
use crate::inspect::TreeInfo;
use crate::redblack::{Keys, NodeRef, Tree};
use crate::visit::Order;

/// An ordered set of keys backed by a [`Tree`] with `()` values.
#[derive(Clone)]
pub struct Set<K, C = Natural> {
    tree: Tree<K, (), C>,
}

impl<K, C: Default> Default for Set<K, C> {
    fn default() -> Self {
        Self {
            tree: Tree::default(),
        }
    }
}

impl<K: fmt::Debug, C> fmt::Debug for Set<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K> Set<K> {
    /// Generate a new, empty `Set` ordered by the keys' [`Ord`] implementation.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }
}

impl<K, C> Set<K, C> {
    /// Generate a new, empty `Set` ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: Tree::with_comparator(comparator),
        }
    }

    /// The number of keys in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the set has no keys.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.tree.clear()
    }

    /// See [`Tree::height`].
    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// The smallest key.
    pub fn first(&self) -> Option<&K> {
        self.tree.first().map(|(k, _)| k)
    }

    /// The largest key.
    pub fn last(&self) -> Option<&K> {
        self.tree.last().map(|(k, _)| k)
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Keys<'_, K, (), C> {
        self.tree.keys()
    }

    /// Calls `visit` once for every key, in the given `order`.
    pub fn traverse(&self, order: Order, mut visit: impl FnMut(&K)) {
        self.tree.traverse(order, &mut |key: &K, _: &()| visit(key));
    }

    /// The tree underneath, for inspection.
    pub fn as_tree(&self) -> &Tree<K, (), C> {
        &self.tree
    }
}

impl<K, C> Set<K, C>
where
    C: Comparator<K>,
{
    /// Adds `key`, returning whether it wasn't already there. An equal key that was already
    /// there is replaced by `key`.
    ///
    /// ## Panics
    ///
    /// When the comparator doesn't admit `key`.
    pub fn insert(&mut self, key: K) -> bool {
        self.tree.insert(key, ()).is_none()
    }

    /// Like [`Set::insert`] but returns [`Error::InvalidOrdering`] instead of panicking.
    pub fn try_insert(&mut self, key: K) -> Result<bool, Error> {
        self.tree.try_insert(key, ()).map(|old| old.is_none())
    }

    /// Removes `key`, returning whether it was there.
    pub fn remove(&mut self, key: &K) -> bool {
        self.tree.remove(key).is_some()
    }

    /// Whether `key` is in the set.
    pub fn contains(&self, key: &K) -> bool {
        self.tree.contains_key(key)
    }

    /// The smallest key greater than `key`.
    pub fn successor(&self, key: &K) -> Option<&K> {
        self.tree.successor(key).map(|(k, _)| k)
    }

    /// The largest key less than `key`.
    pub fn predecessor(&self, key: &K) -> Option<&K> {
        self.tree.predecessor(key).map(|(k, _)| k)
    }
}

impl<'a, K, C> IntoIterator for &'a Set<K, C> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, C> Extend<K> for Set<K, C>
where
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.tree.extend(iter.into_iter().map(|key| (key, ())));
    }
}

impl<K, C> FromIterator<K> for Set<K, C>
where
    C: Comparator<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

/// Builds a set from a comma separated list such as `"13,8,17"`. Nothing is built if any entry
/// is missing or fails to parse.
impl<K> FromStr for Set<K>
where
    K: FromStr + Ord,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(Self {
            tree: s.parse()?,
        })
    }
}

impl<K, C> TreeInfo for Set<K, C>
where
    K: fmt::Display,
{
    type Node = NodeRef;

    fn root(&self) -> Option<NodeRef> {
        self.tree.root()
    }

    fn left(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.left(node)
    }

    fn right(&self, node: NodeRef) -> Option<NodeRef> {
        self.tree.right(node)
    }

    fn label(&self, node: NodeRef) -> String {
        self.tree.label(node)
    }
}
