//! Structural introspection for printing trees without knowing how they're laid out.
//!
//! [`TreeInfo`] is the only way the internal shape of a tree is exposed: a handle to the root,
//! the children of any handle, and a label for it. [`render`] uses it to draw the tree.
//!
//! ```
//! use rbindex::inspect::render;
//! use rbindex::set::Set;
//!
//! let set: Set<i32> = "2,1,3".parse().unwrap();
//!
//! assert_eq!(render(&set), "2\n├── 1(2)_R\n└── 3(2)_R\n");
//! ```

/// Read-only access to the shape of a binary tree.
pub trait TreeInfo {
    /// A handle to one node.
    type Node: Copy;

    /// The root, if the tree isn't empty.
    fn root(&self) -> Option<Self::Node>;

    /// The left child of `node`.
    fn left(&self, node: Self::Node) -> Option<Self::Node>;

    /// The right child of `node`.
    fn right(&self, node: Self::Node) -> Option<Self::Node>;

    /// How `node` is shown when printed.
    fn label(&self, node: Self::Node) -> String;
}

/// Draws the tree top-down, one node per line, left child before right child. A node with
/// only one child shows the missing one as `·` so left and right stay distinguishable.
pub fn render<T: TreeInfo + ?Sized>(tree: &T) -> String {
    let mut out = String::new();
    if let Some(root) = tree.root() {
        out.push_str(&tree.label(root));
        out.push('\n');
        render_children(tree, root, "", &mut out);
    }
    out
}

fn render_children<T: TreeInfo + ?Sized>(tree: &T, node: T::Node, prefix: &str, out: &mut String) {
    let children = [tree.left(node), tree.right(node)];
    if children.iter().all(Option::is_none) {
        return;
    }

    for (i, child) in children.into_iter().enumerate() {
        let last = i == 1;
        out.push_str(prefix);
        out.push_str(if last { "└── " } else { "├── " });
        match child {
            Some(child) => {
                out.push_str(&tree.label(child));
                out.push('\n');
                let prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
                render_children(tree, child, &prefix, out);
            }
            None => out.push_str("·\n"),
        }
    }
}
