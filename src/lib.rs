//! This crate exposes a red-black tree: an ordered index with `O(lg N)` insert, find, and
//! remove, no matter what order keys arrive in.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)`, and a plain BST fed ascending keys turns into a linked list
//! with height `N`. A red-black tree colors its nodes and recolors/rotates after every change
//! so that the height stays below `2 lg(N + 1)`. See [`redblack`] for how.
//!
//! ## Layout
//!
//! - [`redblack::Tree`] (also exported as [`RedBlackIndex`]) maps keys to values.
//! - [`set::Set`] stores keys only.
//! - [`compare`] has the ordering capabilities a tree can be built with.
//! - [`visit`] has the traversal orders and the [`Visitor`][visit::Visitor] callback.
//! - [`inspect`] exposes the tree's shape for printing.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod compare;
pub mod error;
pub mod inspect;
pub mod redblack;
pub mod set;
pub mod util;
pub mod visit;

pub use error::{Error, Violation};

/// The red-black tree under the name used for it as an ordered index.
pub type RedBlackIndex<K, V, C = compare::Natural> = redblack::Tree<K, V, C>;
