use rbindex::inspect::{render, TreeInfo};
use rbindex::redblack::{Color, Tree};
use rbindex::visit::Order;
use rbindex::{Error, RedBlackIndex};

#[test]
fn ascending_keys_rotate_instead_of_chaining() {
    crate::init_logging();
    let mut tree = RedBlackIndex::new();
    for key in [10, 20, 30] {
        tree.insert(key, ());
    }

    let root = tree.root().unwrap();
    let left = tree.left(root).unwrap();
    let right = tree.right(root).unwrap();
    assert_eq!((*tree.key_of(root), tree.color_of(root)), (20, Color::Black));
    assert_eq!(*tree.key_of(left), 10);
    assert_eq!(*tree.key_of(right), 30);
    assert_eq!(tree.color_of(left), tree.color_of(right));
    assert_eq!(tree.height(), 2);
    assert_eq!(tree.check(), Ok(0));
}

#[test]
fn removing_a_node_with_two_children() {
    crate::init_logging();
    let keys = [13, 8, 17, 1, 11, 15, 25, 6, 22, 27];
    let mut tree: Tree<i32, String> = keys.iter().map(|k| (*k, k.to_string())).collect();
    let eight = {
        let mut cur = tree.root();
        while let Some(node) = cur {
            if *tree.key_of(node) == 8 {
                break;
            }
            cur = if 8 < *tree.key_of(node) {
                tree.left(node)
            } else {
                tree.right(node)
            };
        }
        cur.unwrap()
    };
    assert!(tree.left(eight).is_some() && tree.right(eight).is_some());

    assert_eq!(tree.remove(&8), Some("8".to_string()));

    let mut expected: Vec<i32> = keys.into_iter().filter(|&k| k != 8).collect();
    expected.sort_unstable();
    let mut in_order = Vec::new();
    tree.traverse(Order::In, &mut |k: &i32, _: &String| in_order.push(*k));
    assert_eq!(in_order, expected);
    assert_eq!(tree.color_of(tree.root().unwrap()), Color::Black);
    tree.check().unwrap();
}

#[test]
fn removing_the_only_key_empties_the_tree() {
    let mut tree = Tree::new();
    tree.insert("only", 1);

    assert_eq!(tree.remove(&"only"), Some(1));

    assert!(tree.root().is_none());
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(render(&tree), "");
}

#[test]
fn sequential_keys_stay_logarithmic() {
    let mut tree = Tree::new();
    for key in 0..100_000u32 {
        tree.insert(key, key);
    }

    let height = tree.height();
    assert!(height <= 34, "height {height} is not logarithmic");
    assert_eq!(tree.len(), 100_000);
    assert_eq!(tree.first(), Some((&0, &0)));
    assert_eq!(tree.last(), Some((&99_999, &99_999)));
}

#[test]
fn missing_keys_are_reported_not_fatal() {
    let mut tree: Tree<i32, ()> = "1,2,3".parse().unwrap();

    assert_eq!(tree.remove(&4), None);
    assert_eq!(tree.try_remove(&4), Err(Error::NotFound));
    assert_eq!(tree.try_remove(&2), Ok(()));
    assert!(!tree.contains_key(&2));
    assert_eq!(tree.len(), 2);
}

#[test]
fn bad_key_lists_build_nothing() {
    assert_eq!("3, ,1".parse::<Tree<i32, ()>>().map(|t| t.len()), Err(Error::NullKey(1)));
    assert_eq!(
        "3,one".parse::<Tree<i32, ()>>().map(|t| t.len()),
        Err(Error::Parse("one".to_string()))
    );
}

#[test]
fn clear_resets_everything() {
    let mut tree: Tree<u8, ()> = (0..50).map(|k| (k, ())).collect();
    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.iter().next(), None);

    tree.insert(7, ());
    assert_eq!(tree.len(), 1);
    tree.check().unwrap();
}

#[test]
fn get_mut_updates_in_place() {
    let mut tree: Tree<&str, Vec<u8>> = Tree::new();
    tree.insert("a", vec![]);
    tree.get_mut(&"a").unwrap().push(1);

    assert_eq!(tree.get(&"a"), Some(&vec![1]));
    assert!(tree.get_mut(&"b").is_none());
}
