use rbindex::inspect::TreeInfo;
use rbindex::redblack::{Color, NodeRef, Tree};
use rbindex::visit::Order;

use std::collections::{HashMap, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a hashmap, checking every red-black invariant
/// after each one. This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of keys in the map.
fn do_ops<K, V>(ops: &[Op<K, V>], tree: &mut Tree<K, V>, map: &mut HashMap<K, V>)
where
    K: std::hash::Hash + Eq + Clone + Ord,
    V: std::fmt::Debug + PartialEq + Clone,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                assert_eq!(tree.insert(k.clone(), v.clone()), map.insert(k.clone(), v.clone()));
            }
            Op::Remove(k) => {
                assert_eq!(tree.remove(k), map.remove(k));
            }
        }
        let black_height = tree.check().unwrap();
        assert_eq!(tree.black_height(), black_height);
    }
}

/// Keys in in-order traversal order.
fn in_order<K: Clone, V>(tree: &Tree<K, V>) -> Vec<K> {
    let mut keys = Vec::new();
    tree.traverse(Order::In, &mut |k: &K, _: &V| keys.push(k.clone()));
    keys
}

/// The tree's shape as (key, color) pairs in pre-order, with `None` for missing children.
fn shape<V>(tree: &Tree<i16, V>) -> Vec<Option<(i16, Color)>> {
    fn walk<V>(tree: &Tree<i16, V>, node: Option<NodeRef>, out: &mut Vec<Option<(i16, Color)>>) {
        match node {
            None => out.push(None),
            Some(node) => {
                out.push(Some((*tree.key_of(node), tree.color_of(node))));
                walk(tree, tree.left(node), out);
                walk(tree, tree.right(node), out);
            }
        }
    }
    let mut out = Vec::new();
    walk(tree, tree.root(), &mut out);
    out
}

/// Same as [`shape`] but visiting right before left and negating keys, so the mirror image of
/// a tree produces the same output.
fn mirrored_shape(tree: &Tree<i16, ()>) -> Vec<Option<(i16, Color)>> {
    fn walk(tree: &Tree<i16, ()>, node: Option<NodeRef>, out: &mut Vec<Option<(i16, Color)>>) {
        match node {
            None => out.push(None),
            Some(node) => {
                out.push(Some((-*tree.key_of(node), tree.color_of(node))));
                walk(tree, tree.right(node), out);
                walk(tree, tree.left(node), out);
            }
        }
    }
    let mut out = Vec::new();
    walk(tree, tree.root(), &mut out);
    out
}

/// How many children the node holding `key` has.
fn degree(tree: &Tree<i16, ()>, key: i16) -> Option<usize> {
    let mut cur = tree.root();
    while let Some(node) = cur {
        cur = match key.cmp(tree.key_of(node)) {
            std::cmp::Ordering::Less => tree.left(node),
            std::cmp::Ordering::Equal => {
                return Some(tree.left(node).is_some() as usize + tree.right(node).is_some() as usize)
            }
            std::cmp::Ordering::Greater => tree.right(node),
        };
    }
    None
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    crate::init_logging();
    let mut tree = Tree::new();
    let mut map = HashMap::new();

    do_ops(&ops, &mut tree, &mut map);
    tree.len() == map.len() && map.keys().all(|key| tree.find(key) == map.get(key))
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i32>) -> bool {
    let tree: Tree<i32, ()> = xs.iter().map(|&x| (x, ())).collect();

    let keys = in_order(&tree);
    keys.windows(2).all(|pair| pair[0] < pair[1]) && keys.len() == tree.len()
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.remove(delete);
        tree.check().unwrap();
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn insert_then_remove_is_a_no_op(xs: Vec<i16>, extra: i16) -> bool {
    let mut tree: Tree<i16, ()> = xs.iter().map(|&x| (x, ())).collect();
    if tree.contains_key(&extra) {
        return true;
    }
    let before = in_order(&tree);
    let len = tree.len();

    tree.insert(extra, ());
    tree.remove(&extra);

    tree.check().is_ok() && tree.len() == len && in_order(&tree) == before
}

#[quickcheck]
fn overwriting_changes_only_the_value(xs: Vec<i16>, pick: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree: Tree<i16, i16> = xs.iter().map(|&x| (x, 0)).collect();
    let key = xs[pick % xs.len()];
    let shape_before = shape(&tree);
    let len_before = tree.len();

    tree.insert(key, 1);

    shape(&tree) == shape_before && tree.len() == len_before && tree.get(&key) == Some(&1)
}

#[quickcheck]
fn removal_fix_up_is_mirror_symmetric(xs: Vec<i16>, removes: Vec<i16>) -> bool {
    // `i16::MIN` has no negation.
    let xs: Vec<i16> = xs.into_iter().filter(|&x| x != i16::MIN).collect();
    let removes: Vec<i16> = removes.into_iter().filter(|&x| x != i16::MIN).collect();

    let mut tree: Tree<i16, ()> = xs.iter().map(|&x| (x, ())).collect();
    let mut mirror: Tree<i16, ()> = xs.iter().map(|&x| (-x, ())).collect();
    if shape(&tree) != mirrored_shape(&mirror) {
        return false;
    }

    // Removing a node with two children borrows its in-order successor, and the successor of
    // `-x` mirrors the predecessor of `x`, so the shapes only have to match until the first
    // such removal. Both trees must stay valid regardless.
    let mut mirrored = true;
    for &x in removes.iter().chain(&xs) {
        if degree(&tree, x) == Some(2) {
            mirrored = false;
        }
        tree.remove(&x);
        mirror.remove(&-x);

        if tree.check().is_err() || mirror.check().is_err() {
            return false;
        }
        if mirrored && shape(&tree) != mirrored_shape(&mirror) {
            return false;
        }
        let keys: Vec<i16> = tree.keys().copied().collect();
        let mirror_keys: Vec<i16> = mirror.keys().rev().map(|k| -k).collect();
        if keys != mirror_keys {
            return false;
        }
    }

    tree.is_empty() && mirror.is_empty()
}

#[quickcheck]
fn level_order_visits_every_key_once(xs: Vec<i8>) -> bool {
    let tree: Tree<i8, ()> = xs.iter().map(|&x| (x, ())).collect();
    for order in [Order::Pre, Order::Post, Order::Level] {
        let mut visited = Vec::new();
        tree.traverse(order, &mut |k: &i8, _: &()| visited.push(*k));
        visited.sort_unstable();
        if visited != in_order(&tree) {
            return false;
        }
    }
    true
}
