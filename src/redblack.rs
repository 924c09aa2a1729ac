//! A red-black tree. Nodes live in an arena (a `Vec` of slots) and refer to each other by
//! index, so the parent back-links that rebalancing needs are plain indices rather than raw
//! pointers.
//!
//! A red-black tree colors every node red or black and keeps these invariants:
//!
//! 1. The root is black.
//! 2. A red node never has a red child.
//! 3. Every path from a node down to a missing child passes the same number of black nodes.
//!
//! Together they keep the longest root-to-leaf path at most twice as long as the shortest, so
//! the tree's height is `O(lg N)`. Viewed another way, a black node and its red children form a
//! node of a B-tree of order 4; insert fix-up splits overflowing nodes and remove fix-up borrows
//! from or merges with siblings on underflow.
//!
//! # Examples
//!
//! ```
//! use rbindex::redblack::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert(1, 2);
//! assert_eq!(tree.find(&1), Some(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! tree.insert(1, 3);
//! assert_eq!(tree.find(&1), Some(&3));
//!
//! // Removing a node returns its value.
//! let removed_value = tree.remove(&1);
//!
//! assert_eq!(removed_value, Some(3));
//! assert_eq!(tree.find(&1), None);
//! ```

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::str::FromStr;

use log::{debug, trace};

use crate::compare::{Comparator, Natural};
use crate::error::{Error, Violation};
use crate::inspect::TreeInfo;
use crate::visit::{Order, Visitor};

/// Index of a node's slot in the arena.
type NodeId = usize;

/// The color of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// New nodes start red.
    Red,
    /// The root, and anything counted by black-height.
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    color: Color,
    // Non-owning: only used to walk upwards. Slots are only freed by `Tree::release`.
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Option<NodeId>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
        }
    }

    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Option<NodeId> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// A self-balancing Binary Search Tree (specifically, a red-black tree). This can be used for
/// inserting, finding, and removing keys and values in `O(lg N)` time.
///
/// Keys are ordered by `C`, which defaults to the key's own [`Ord`]. See
/// [`compare`][crate::compare] for the alternatives.
#[derive(Clone)]
pub struct Tree<K, V, C = Natural> {
    nodes: Vec<Option<Node<K, V>>>,
    // Slots in `nodes` that are empty and can be reused.
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
    comparator: C,
}

impl<K, V, C: Default> Default for Tree<K, V, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<K, V, C> fmt::Debug for Tree<K, V, C>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generate a new, empty `Tree` ordered by the keys' [`Ord`] implementation.
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }

    /// Generate a new, empty `Tree` with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> Tree<K, V, C> {
    /// Generate a new, empty `Tree` ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_capacity_and_comparator(0, comparator)
    }

    /// Generate a new, empty `Tree` ordered by `comparator` with room for `capacity` nodes.
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: None,
            len: 0,
            comparator,
        }
    }

    /// The number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        debug!("clearing tree of {} entries", self.len);
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// The comparator ordering this tree.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The number of levels in the tree: 0 when empty, 1 for a lone root, and so on.
    ///
    /// Computed breadth first: each time a level has been consumed the queue holds exactly the
    /// next level.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), 0);
    ///
    /// // Ascending inserts don't degrade into a chain.
    /// for key in 0..7 {
    ///     tree.insert(key, ());
    /// }
    /// assert_eq!(tree.height(), 4);
    /// ```
    pub fn height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut queue = VecDeque::from([root]);
        let mut remaining_in_level = 1;
        let mut height = 0;
        while let Some(id) = queue.pop_front() {
            let node = self.node(id);
            queue.extend(node.left);
            queue.extend(node.right);

            remaining_in_level -= 1;
            if remaining_in_level == 0 {
                remaining_in_level = queue.len();
                height += 1;
            }
        }

        height
    }

    /// The number of black nodes on any path from the root down to a missing child, not
    /// counting the root itself.
    pub fn black_height(&self) -> usize {
        let mut cur = self.root.and_then(|root| self.node(root).left);
        let mut black_height = 0;
        while let Some(id) = cur {
            let node = self.node(id);
            if node.color == Color::Black {
                black_height += 1;
            }
            cur = node.left;
        }

        black_height
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(self.leftmost(root)))
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        self.root.map(|root| self.entry(self.rightmost(root)))
    }

    /// Iterates over the entries in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::redblack::Tree;
    ///
    /// let tree: Tree<_, _> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    /// let entries: Vec<_> = tree.iter().collect();
    ///
    /// assert_eq!(entries, vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, C> {
        Iter {
            tree: self,
            front: self.root.map(|root| self.leftmost(root)),
            back: self.root.map(|root| self.rightmost(root)),
            remaining: self.len,
        }
    }

    /// Iterates over the keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V, C> {
        Keys(self.iter())
    }

    /// Iterates over the values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V, C> {
        Values(self.iter())
    }

    /// Calls `visitor` once for every entry, in the given `order`. The visitor can't modify the
    /// tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::redblack::Tree;
    /// use rbindex::visit::Order;
    ///
    /// let tree: Tree<_, _> = (1..=3).map(|k| (k, ())).collect();
    ///
    /// let mut pre = Vec::new();
    /// tree.traverse(Order::Pre, &mut |k: &i32, _: &()| pre.push(*k));
    /// assert_eq!(pre, vec![2, 1, 3]);
    ///
    /// let mut post = Vec::new();
    /// tree.traverse(Order::Post, &mut |k: &i32, _: &()| post.push(*k));
    /// assert_eq!(post, vec![1, 3, 2]);
    /// ```
    pub fn traverse<F>(&self, order: Order, visitor: &mut F)
    where
        F: Visitor<K, V> + ?Sized,
    {
        match order {
            Order::Pre => self.pre_order(self.root, visitor),
            Order::In => self.in_order(self.root, visitor),
            Order::Post => self.post_order(self.root, visitor),
            Order::Level => {
                let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
                while let Some(id) = queue.pop_front() {
                    let node = self.node(id);
                    visitor.visit(&node.key, &node.value);
                    queue.extend(node.left);
                    queue.extend(node.right);
                }
            }
        }
    }

    fn pre_order<F>(&self, id: Option<NodeId>, visitor: &mut F)
    where
        F: Visitor<K, V> + ?Sized,
    {
        if let Some(id) = id {
            let node = self.node(id);
            visitor.visit(&node.key, &node.value);
            self.pre_order(node.left, visitor);
            self.pre_order(node.right, visitor);
        }
    }

    fn in_order<F>(&self, id: Option<NodeId>, visitor: &mut F)
    where
        F: Visitor<K, V> + ?Sized,
    {
        if let Some(id) = id {
            let node = self.node(id);
            self.in_order(node.left, visitor);
            visitor.visit(&node.key, &node.value);
            self.in_order(node.right, visitor);
        }
    }

    fn post_order<F>(&self, id: Option<NodeId>, visitor: &mut F)
    where
        F: Visitor<K, V> + ?Sized,
    {
        if let Some(id) = id {
            let node = self.node(id);
            self.post_order(node.left, visitor);
            self.post_order(node.right, visitor);
            visitor.visit(&node.key, &node.value);
        }
    }

    fn node(&self, id: NodeId) -> &Node<K, V> {
        self.nodes[id]
            .as_ref()
            .expect("Linked node ids always refer to live slots")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.nodes[id]
            .as_mut()
            .expect("Linked node ids always refer to live slots")
    }

    fn entry(&self, id: NodeId) -> (&K, &V) {
        let node = self.node(id);
        (&node.key, &node.value)
    }

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Some(node);
                id
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Frees the slot of a node that nothing links to anymore.
    fn release(&mut self, id: NodeId) -> Node<K, V> {
        let node = self.nodes[id]
            .take()
            .expect("Only live nodes are released");
        self.free.push(id);
        node
    }

    fn color(&self, id: NodeId) -> Color {
        self.node(id).color
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        self.node_mut(id).color = color;
    }

    /// Missing children count as black.
    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.map_or(false, |id| self.color(id) == Color::Red)
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).child(side)
    }

    /// Which child of its parent `id` is.
    ///
    /// ## Panics
    ///
    /// When called on the root.
    fn side_of(&self, id: NodeId) -> Side {
        let parent = self.node(id).parent.expect("Only non-root nodes have a side");
        if self.node(parent).left == Some(id) {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// The in-order successor of `id`: the leftmost node of its right subtree, or else the
    /// nearest ancestor reached through a left-child link.
    fn next(&self, mut id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }
        while let Some(parent) = self.node(id).parent {
            if self.node(parent).left == Some(id) {
                return Some(parent);
            }
            id = parent;
        }
        None
    }

    /// Mirror of [`Self::next`].
    fn prev(&self, mut id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }
        while let Some(parent) = self.node(id).parent {
            if self.node(parent).right == Some(id) {
                return Some(parent);
            }
            id = parent;
        }
        None
    }

    /// Points whatever owned `old` (its parent or the root) at `new` instead, and points `new`
    /// back at that parent.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent = self.node_mut(parent);
                if parent.left == Some(old) {
                    parent.left = new;
                } else {
                    parent.right = new;
                }
            }
        }
        if let Some(new) = new {
            self.node_mut(new).parent = parent;
        }
    }

    /// Rotate `id` to the left. This moves the right child up vertically and `id` down
    /// vertically. It must only be called when there _is_ a right child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a right child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///  Option<parent>                  Option<parent>
    ///      /                             /
    ///   old_root (i.e. "id")          pivot
    ///    /   \                        /   \
    ///   x    pivot     rotate ->  old_root  z
    ///        /  \                  /  \
    ///       y    z                x    y
    /// ```
    fn rotate_left(&mut self, id: NodeId) {
        let pivot = self.node(id).right.expect("Rotate left => right child");
        let inner = self.node(pivot).left;
        let parent = self.node(id).parent;

        self.node_mut(id).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(id);
        }
        self.replace_child(parent, id, Some(pivot));
        self.node_mut(pivot).left = Some(id);
        self.node_mut(id).parent = Some(pivot);

        self.debug_check_links(pivot);
    }

    /// Rotate `id` to the right. This moves the left child up vertically and `id` down
    /// vertically. It must only be called when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      Option<parent>            Option<parent>
    ///        /                         /
    ///     old_root (i.e. "id")       pivot
    ///      /     \                  /     \
    ///    pivot    z     rotate ->  x    old_root
    ///    / \                               /  \
    ///   x   y                             y    z
    /// ```
    fn rotate_right(&mut self, id: NodeId) {
        let pivot = self.node(id).left.expect("Rotate right => left child");
        let inner = self.node(pivot).right;
        let parent = self.node(id).parent;

        self.node_mut(id).left = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(id);
        }
        self.replace_child(parent, id, Some(pivot));
        self.node_mut(pivot).right = Some(id);
        self.node_mut(id).parent = Some(pivot);

        self.debug_check_links(pivot);
    }

    /// Rotates `id` down towards `side`: a left rotation for [`Side::Left`].
    fn rotate_toward(&mut self, id: NodeId, side: Side) {
        match side {
            Side::Left => self.rotate_left(id),
            Side::Right => self.rotate_right(id),
        }
    }

    fn debug_check_links(&self, id: NodeId) {
        if cfg!(debug_assertions) {
            let node = self.node(id);
            for child in [node.left, node.right].into_iter().flatten() {
                assert_eq!(self.node(child).parent, Some(id));
            }
            match node.parent {
                Some(parent) => {
                    let parent = self.node(parent);
                    assert!(parent.left == Some(id) || parent.right == Some(id));
                }
                None => assert_eq!(self.root, Some(id)),
            }
        }
    }

    /// Restores the red-black invariants after `id` was linked in as a red leaf.
    ///
    /// Walks upwards while a red parent has a red uncle (a B-tree node splitting and pushing
    /// its middle key up), then finishes with at most two rotations.
    fn fix_after_insert(&mut self, mut id: NodeId) {
        loop {
            let Some(parent) = self.node(id).parent else {
                // The split reached the root. This is the only way the black-height grows.
                self.set_color(id, Color::Black);
                return;
            };
            if self.color(parent) == Color::Black {
                return;
            }
            let grandparent = self
                .node(parent)
                .parent
                .expect("A red node always has a parent");
            let parent_side = self.side_of(parent);

            if let Some(uncle) = self
                .child(grandparent, parent_side.opposite())
                .filter(|&uncle| self.color(uncle) == Color::Red)
            {
                trace!("insert: red uncle, recoloring and moving up");
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                id = grandparent;
                continue;
            }

            match (parent_side, self.side_of(id)) {
                (Side::Left, Side::Left) => {
                    trace!("insert: left-left, rotating grandparent right");
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
                (Side::Left, Side::Right) => {
                    trace!("insert: left-right, double rotation");
                    self.set_color(id, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(parent);
                    self.rotate_right(grandparent);
                }
                (Side::Right, Side::Left) => {
                    trace!("insert: right-left, double rotation");
                    self.set_color(id, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(parent);
                    self.rotate_left(grandparent);
                }
                (Side::Right, Side::Right) => {
                    trace!("insert: right-right, rotating grandparent left");
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
            return;
        }
    }

    /// Unlinks `id`, which has at most one child, promoting that child into its place, and
    /// rebalances. Returns the unlinked node.
    fn splice(&mut self, id: NodeId) -> Node<K, V> {
        let (parent, child, color) = {
            let node = self.node(id);
            debug_assert!(node.left.is_none() || node.right.is_none());
            (node.parent, node.left.or(node.right), node.color)
        };
        // Captured before unlinking: afterwards `id` no longer has a side.
        let side = parent.map(|_| self.side_of(id));

        self.replace_child(parent, id, child);
        self.len -= 1;
        let node = self.release(id);

        if color == Color::Black {
            match (child, parent.zip(side)) {
                // A lone child under a black node is always red. Painting it black puts back
                // the black node this path lost.
                (Some(child), _) => self.set_color(child, Color::Black),
                (None, Some((parent, side))) => {
                    let sibling = self
                        .child(parent, side.opposite())
                        .expect("A black leaf always has a sibling");
                    self.fix_after_remove(parent, side, sibling);
                }
                // That was the last node.
                (None, None) => {}
            }
        }

        node
    }

    /// Restores the red-black invariants when the `side` subtree of `parent` is one black node
    /// short (a B-tree underflow). `sibling` is the other child of `parent`.
    fn fix_after_remove(&mut self, mut parent: NodeId, mut side: Side, mut sibling: NodeId) {
        loop {
            if self.color(sibling) == Color::Red {
                // The sibling's children are black. Rotating makes one of them the new sibling
                // under a now-red parent.
                trace!("remove: red sibling, rotating parent {:?}", side);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate_toward(parent, side);
                sibling = self
                    .child(parent, side.opposite())
                    .expect("A red sibling has two black children");
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.opposite());

            if self.is_red(near) || self.is_red(far) {
                // Borrow from the sibling.
                let (sibling, far) = if self.is_red(far) {
                    (sibling, far)
                } else {
                    trace!("remove: near nephew red, rotating sibling first");
                    self.rotate_toward(sibling, side.opposite());
                    (near.expect("Near nephew is red"), Some(sibling))
                };
                trace!("remove: borrowing from sibling, rotating parent {:?}", side);
                let parent_color = self.color(parent);
                self.set_color(sibling, parent_color);
                self.set_color(parent, Color::Black);
                if let Some(far) = far {
                    self.set_color(far, Color::Black);
                }
                self.rotate_toward(parent, side);
                return;
            }

            // Nothing to borrow, merge with the sibling by pulling the parent down.
            self.set_color(sibling, Color::Red);
            if self.color(parent) == Color::Red {
                trace!("remove: merging into red parent");
                self.set_color(parent, Color::Black);
                return;
            }

            trace!("remove: merging into black parent, moving up");
            let Some(grandparent) = self.node(parent).parent else {
                // The whole tree lost one level of black-height.
                return;
            };
            side = self.side_of(parent);
            parent = grandparent;
            sibling = self
                .child(parent, side.opposite())
                .expect("A short subtree with black-height >= 1 has a sibling");
        }
    }

    fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        let (low, high) = (a.min(b), a.max(b));
        let (head, tail) = self.nodes.split_at_mut(high);
        let low = head[low].as_mut().expect("Swapped nodes are live");
        let high = tail[0].as_mut().expect("Swapped nodes are live");
        mem::swap(&mut low.key, &mut high.key);
        mem::swap(&mut low.value, &mut high.value);
    }

    fn debug_check_root(&self) {
        if cfg!(debug_assertions) {
            assert!(!self.is_red(self.root));
            if let Some(root) = self.root {
                assert_eq!(self.node(root).parent, None);
            }
            assert_eq!(self.len == 0, self.root.is_none());
        }
    }
}

impl<K, V, C> Tree<K, V, C>
where
    C: Comparator<K>,
{
    fn search(&self, key: &K) -> Option<NodeId> {
        if !self.comparator.admits(key) {
            return None;
        }
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.node(id);
            cur = match self.comparator.compare(key, &node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Potentially finds the value associated with the given key in this tree. If no node has the
    /// corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    ///
    /// assert_eq!(tree.get(&1), Some(&2));
    /// assert_eq!(tree.get(&42), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.search(key).map(|id| &self.node(id).value)
    }

    /// Same as [`Tree::get`].
    pub fn find(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    /// A mutable reference to the value stored at `key`, if there is one.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.search(key)?;
        Some(&mut self.node_mut(id).value)
    }

    /// Whether the tree has an entry for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Inserts the given value into the tree stored at the given key. Inserting a new value for an
    /// existing key overwrites the stored key and value, returning the old value, and leaves the
    /// shape of the tree alone.
    ///
    /// ## Panics
    ///
    /// When the comparator doesn't admit `key`. Use [`Tree::try_insert`] to get an error
    /// instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1, 2), None);
    /// assert_eq!(tree.find(&1), Some(&2));
    ///
    /// assert_eq!(tree.insert(1, 3), Some(2));
    /// assert_eq!(tree.find(&1), Some(&3));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(old) => old,
            Err(err) => panic!("Cannot insert key: {err}"),
        }
    }

    /// Like [`Tree::insert`] but returns [`Error::InvalidOrdering`] instead of panicking when the
    /// comparator doesn't admit `key`. The tree is left untouched in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::compare::Partial;
    /// use rbindex::redblack::Tree;
    /// use rbindex::Error;
    ///
    /// let mut tree = Tree::with_comparator(Partial);
    ///
    /// assert_eq!(tree.try_insert(0.5, "half"), Ok(None));
    /// assert_eq!(tree.try_insert(f64::NAN, "nan"), Err(Error::InvalidOrdering));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>, Error> {
        if !self.comparator.admits(&key) {
            return Err(Error::InvalidOrdering);
        }

        let mut parent = None;
        let mut side = Side::Left;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.node(id);
            match self.comparator.compare(&key, &node.key) {
                Ordering::Less => {
                    side = Side::Left;
                    cur = node.left;
                }
                Ordering::Equal => {
                    let node = self.node_mut(id);
                    node.key = key;
                    return Ok(Some(mem::replace(&mut node.value, value)));
                }
                Ordering::Greater => {
                    side = Side::Right;
                    cur = node.right;
                }
            }
            parent = Some(id);
        }

        let id = self.alloc(Node::new(key, value, parent));
        match parent {
            Some(parent) => *self.node_mut(parent).child_mut(side) = Some(id),
            None => self.root = Some(id),
        }
        self.len += 1;
        self.fix_after_insert(id);

        self.debug_check_root();
        Ok(None)
    }

    /// Removes the node containing the given key from the tree and returns its value. If the tree
    /// does not contain a node with the key, nothing happens.
    ///
    /// A node with two children swaps its entry with its in-order successor, and the successor's
    /// node (which has at most one child) is the one actually unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::redblack::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, 2);
    /// let removed_value = tree.remove(&1);
    ///
    /// assert_eq!(removed_value, Some(2));
    /// assert_eq!(tree.find(&1), None);
    /// assert_eq!(tree.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.search(key)?;
        let target = match (self.node(id).left, self.node(id).right) {
            (Some(_), Some(right)) => {
                let successor = self.leftmost(right);
                self.swap_entries(id, successor);
                successor
            }
            _ => id,
        };
        let removed = self.splice(target);

        self.debug_check_root();
        Some(removed.value)
    }

    /// Like [`Tree::remove`] but reports a missing key as [`Error::NotFound`].
    pub fn try_remove(&mut self, key: &K) -> Result<V, Error> {
        self.remove(key).ok_or(Error::NotFound)
    }

    /// The entry with the smallest key greater than `key`, whether or not `key` itself is in
    /// the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbindex::redblack::Tree;
    ///
    /// let tree: Tree<_, _> = [(10, 'a'), (20, 'b'), (30, 'c')].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&10), Some((&20, &'b')));
    /// assert_eq!(tree.successor(&15), Some((&20, &'b')));
    /// assert_eq!(tree.successor(&30), None);
    /// ```
    pub fn successor(&self, key: &K) -> Option<(&K, &V)> {
        self.neighbor(key, Ordering::Less)
            .map(|id| self.entry(id))
    }

    /// The entry with the largest key less than `key`, whether or not `key` itself is in the
    /// tree.
    pub fn predecessor(&self, key: &K) -> Option<(&K, &V)> {
        self.neighbor(key, Ordering::Greater)
            .map(|id| self.entry(id))
    }

    /// Descends towards `key`, remembering the last node passed where `key` compared as
    /// `toward`. `Less` finds the successor and `Greater` the predecessor.
    fn neighbor(&self, key: &K, toward: Ordering) -> Option<NodeId> {
        if !self.comparator.admits(key) {
            return None;
        }
        let (closer, farther) = match toward {
            Ordering::Less => (Side::Left, Side::Right),
            _ => (Side::Right, Side::Left),
        };
        let mut best = None;
        let mut cur = self.root;
        while let Some(id) = cur {
            let node = self.node(id);
            let ordering = self.comparator.compare(key, &node.key);
            if ordering == Ordering::Equal {
                return match closer {
                    Side::Left => self.next(id),
                    Side::Right => self.prev(id),
                };
            }
            if ordering == toward {
                best = Some(id);
                cur = node.child(closer);
            } else {
                cur = node.child(farther);
            }
        }
        best
    }

    /// Verifies every structural invariant: strictly ascending keys, consistent parent links, a
    /// black root, no red node with a red child, equal black-heights, and the stored length.
    /// Returns the [black-height][Tree::black_height] on success.
    ///
    /// This visits every node, so it's meant for tests.
    pub fn check(&self) -> Result<usize, Violation> {
        if self.is_red(self.root) {
            return Err(Violation::RedRoot);
        }
        if let Some(root) = self.root {
            if self.node(root).parent.is_some() {
                return Err(Violation::ParentLink(0));
            }
        }

        let mut walk = CheckWalk {
            position: 0,
            previous: None,
        };
        let black_height = self.check_subtree(self.root, None, &mut walk)?;
        if walk.position != self.len {
            return Err(Violation::Length {
                stored: self.len,
                reachable: walk.position,
            });
        }

        // `check_subtree` counts the root too.
        Ok(black_height.saturating_sub(1))
    }

    fn check_subtree(
        &self,
        id: Option<NodeId>,
        parent: Option<NodeId>,
        walk: &mut CheckWalk,
    ) -> Result<usize, Violation> {
        let Some(id) = id else {
            return Ok(0);
        };
        let node = self.node(id);
        if node.parent != parent {
            return Err(Violation::ParentLink(walk.position));
        }

        let left = self.check_subtree(node.left, Some(id), walk)?;

        let position = walk.position;
        if let Some(previous) = walk.previous {
            if self.comparator.compare(&self.node(previous).key, &node.key) != Ordering::Less {
                return Err(Violation::OutOfOrder(position));
            }
        }
        walk.previous = Some(id);
        walk.position += 1;

        if node.color == Color::Red && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(Violation::RedChildOfRed(position));
        }

        let right = self.check_subtree(node.right, Some(id), walk)?;
        if left != right {
            return Err(Violation::BlackHeight {
                position,
                left,
                right,
            });
        }

        Ok(left + usize::from(node.color == Color::Black))
    }
}

struct CheckWalk {
    // In-order position of the next node to be visited.
    position: usize,
    previous: Option<NodeId>,
}

/// An opaque handle to a node, handed out through [`TreeInfo`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(NodeId);

impl<K, V, C> Tree<K, V, C> {
    /// The color of the node behind `node`.
    pub fn color_of(&self, node: NodeRef) -> Color {
        self.color(node.0)
    }

    /// The key stored in the node behind `node`.
    pub fn key_of(&self, node: NodeRef) -> &K {
        &self.node(node.0).key
    }
}

impl<K, V, C> TreeInfo for Tree<K, V, C>
where
    K: fmt::Display,
{
    type Node = NodeRef;

    fn root(&self) -> Option<NodeRef> {
        self.root.map(NodeRef)
    }

    fn left(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node.0).left.map(NodeRef)
    }

    fn right(&self, node: NodeRef) -> Option<NodeRef> {
        self.node(node.0).right.map(NodeRef)
    }

    /// `key(parent key)`, with a `_R` suffix for red nodes. The root has no parent part.
    fn label(&self, node: NodeRef) -> String {
        let node = self.node(node.0);
        let mut label = node.key.to_string();
        if let Some(parent) = node.parent {
            label.push_str(&format!("({})", self.node(parent).key));
        }
        if node.color == Color::Red {
            label.push_str("_R");
        }
        label
    }
}

/// An in-order iterator over a [`Tree`]'s entries. Created by [`Tree::iter`].
pub struct Iter<'a, K, V, C> {
    tree: &'a Tree<K, V, C>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K, V, C> Clone for Iter<'a, K, V, C> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, C> Iterator for Iter<'a, K, V, C> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.next(id);
        self.remaining -= 1;
        Some(self.tree.entry(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Iter<'a, K, V, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.prev(id);
        self.remaining -= 1;
        Some(self.tree.entry(id))
    }
}

impl<'a, K, V, C> ExactSizeIterator for Iter<'a, K, V, C> {}
impl<'a, K, V, C> FusedIterator for Iter<'a, K, V, C> {}

/// An in-order iterator over a [`Tree`]'s keys. Created by [`Tree::keys`].
pub struct Keys<'a, K, V, C>(Iter<'a, K, V, C>);

impl<'a, K, V, C> Iterator for Keys<'a, K, V, C> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.0.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Keys<'a, K, V, C> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.0.next_back().map(|(k, _)| k)
    }
}

impl<'a, K, V, C> ExactSizeIterator for Keys<'a, K, V, C> {}

/// An iterator over a [`Tree`]'s values in key order. Created by [`Tree::values`].
pub struct Values<'a, K, V, C>(Iter<'a, K, V, C>);

impl<'a, K, V, C> Iterator for Values<'a, K, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a, K, V, C> DoubleEndedIterator for Values<'a, K, V, C> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.0.next_back().map(|(_, v)| v)
    }
}

impl<'a, K, V, C> ExactSizeIterator for Values<'a, K, V, C> {}

impl<'a, K, V, C> IntoIterator for &'a Tree<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C> Extend<(K, V)> for Tree<K, V, C>
where
    C: Comparator<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, C> FromIterator<(K, V)> for Tree<K, V, C>
where
    C: Comparator<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

/// Builds a key-only tree from a comma separated list such as `"13,8,17"`.
impl<K> FromStr for Tree<K, ()>
where
    K: FromStr + Ord,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        let keys = crate::util::parse_keys(s)?;
        Ok(keys.into_iter().map(|key| (key, ())).collect())
    }
}
