use rbindex::compare::Partial;
use rbindex::inspect::render;
use rbindex::set::Set;
use rbindex::visit::Order;

use std::collections::BTreeSet;

#[quickcheck]
fn matches_btreeset(inserts: Vec<u8>, removes: Vec<u8>) -> bool {
    let mut set = Set::new();
    let mut model = BTreeSet::new();
    for x in &inserts {
        if set.insert(*x) != model.insert(*x) {
            return false;
        }
    }
    for x in &removes {
        if set.remove(x) != model.remove(x) {
            return false;
        }
    }

    set.as_tree().check().is_ok() && set.iter().eq(model.iter()) && set.len() == model.len()
}

#[quickcheck]
fn successor_matches_btreeset(xs: Vec<i16>, probe: i16) -> bool {
    let set: Set<i16> = xs.iter().copied().collect();
    let model: BTreeSet<i16> = xs.into_iter().collect();

    set.successor(&probe) == model.range(probe.saturating_add(1)..).next().filter(|&&k| k > probe)
        && set.predecessor(&probe) == model.range(..probe).next_back()
}

#[quickcheck]
fn finite_floats_sort(xs: Vec<f64>) -> bool {
    let mut set = Set::with_comparator(Partial);
    for x in xs.iter().filter(|x| !x.is_nan()) {
        set.insert(*x);
    }

    let keys: Vec<f64> = set.iter().copied().collect();
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[test]
fn prints_with_colors() {
    let set: Set<i32> = "10,20,30,40".parse().unwrap();

    let expected = "\
20
├── 10(20)
└── 30(20)
    ├── ·
    └── 40(30)_R
";
    assert_eq!(render(&set), expected);
}

#[test]
fn traverse_pre_and_post() {
    let set: Set<i32> = "10,20,30,40".parse().unwrap();

    let mut pre = Vec::new();
    set.traverse(Order::Pre, |k| pre.push(*k));
    let mut post = Vec::new();
    set.traverse(Order::Post, |k| post.push(*k));

    assert_eq!(pre, vec![20, 10, 30, 40]);
    assert_eq!(post, vec![10, 40, 30, 20]);
}
