//! Ordering capabilities a tree can be built with.
//!
//! Most trees just use [`Natural`], i.e. the key's own [`Ord`] implementation. Keys that only
//! implement [`PartialOrd`] (floats, mostly) can use [`Partial`], which refuses keys that
//! can't be compared with themselves. Any `Fn(&K, &K) -> Ordering` closure works too.
//!
//! ```
//! use rbindex::redblack::Tree;
//!
//! // Reverse ordering with a closure.
//! let mut tree = Tree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
//! tree.insert(1, "one");
//! tree.insert(2, "two");
//!
//! assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![2, 1]);
//! ```

use std::cmp::Ordering;

/// Decides how keys in a tree are ordered.
pub trait Comparator<K: ?Sized> {
    /// Compares two keys. Must be a total order over every key [`admits`][Self::admits]
    /// accepts.
    fn compare(&self, a: &K, b: &K) -> Ordering;

    /// Whether `key` can take part in the order at all. Keys that aren't admitted are rejected
    /// before the tree is modified.
    fn admits(&self, _key: &K) -> bool {
        true
    }
}

/// Orders keys with their [`Ord`] implementation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Orders keys with their [`PartialOrd`] implementation. A key that isn't comparable with
/// itself (`f64::NAN`, say) is not admitted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Partial;

impl<K: PartialOrd + ?Sized> Comparator<K> for Partial {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        // Only admitted keys get this far, and those are comparable with everything else that
        // was admitted.
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }

    fn admits(&self, key: &K) -> bool {
        key.partial_cmp(key).is_some()
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}
