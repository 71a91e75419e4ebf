use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;

/// Full structural check plus cursor traversals in both directions.
fn validate_tree<V>(t: &RedBlackTree<u16, V>) {
    if let Err(e) = t.check_invariants() {
        panic!("invariant violated: {e}");
    }

    let mut forward = Vec::with_capacity(t.len());
    let mut c = t.begin();
    while c != t.end() {
        forward.push(*t.key_value(c).expect("cursor inside the tree").0);
        t.advance(&mut c).expect("advance before end");
    }
    assert_eq!(forward.len(), t.len(), "forward traversal must visit every entry");
    assert!(
        forward.windows(2).all(|w| w[0] < w[1]),
        "forward traversal must be strictly ascending"
    );

    let mut backward = Vec::with_capacity(t.len());
    if !t.is_empty() {
        let mut c = t.end();
        loop {
            t.retreat(&mut c).expect("retreat after begin");
            if c.is_before_first() {
                break;
            }
            backward.push(*t.key_value(c).expect("cursor inside the tree").0);
        }
    }
    backward.reverse();
    assert_eq!(forward, backward, "backward traversal must mirror forward");
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    Insert(#[proptest(strategy = "0u16..512")] u16, u32),
    Remove(#[proptest(strategy = "0u16..512")] u16),
    Find(#[proptest(strategy = "0u16..512")] u16),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=1000)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_with_btreemap(ops in ops_strategy()) {
        let mut t: RedBlackTree<u16, u32> = RedBlackTree::new();
        let mut m: BTreeMap<u16, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let fresh = !m.contains_key(&key);
                    m.entry(key).or_insert(value);
                    let (c, inserted) = t.insert(key, value);
                    prop_assert_eq!(inserted, fresh);
                    prop_assert_eq!(t.key_value(c), Ok((&key, &m[&key])));
                }
                Op::Remove(key) => {
                    let expected = usize::from(m.remove(&key).is_some());
                    prop_assert_eq!(t.remove(&key), expected);
                    prop_assert_eq!(t.find(&key), t.end());
                }
                Op::Find(key) => {
                    let c = t.find(&key);
                    match m.get(&key) {
                        Some(v) => {
                            prop_assert_eq!(t.key_value(c), Ok((&key, v)));
                        }
                        None => {
                            prop_assert_eq!(c, t.end());
                        }
                    }
                }
            }

            prop_assert_eq!(t.len(), m.len());
            prop_assert_eq!(t.is_empty(), m.is_empty());
            prop_assert!(t.check_invariants().is_ok());
        }

        validate_tree(&t);
        let got: Vec<(u16, u32)> = t.iter().map(|(k, v)| (*k, *v)).collect();
        let expected: Vec<(u16, u32)> = m.into_iter().collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn prop_insert_all_then_remove_all(
        (keys, order) in prop::collection::btree_set(any::<u16>(), 0..=300)
            .prop_flat_map(|set| {
                let keys: Vec<u16> = set.into_iter().collect();
                (Just(keys.clone()).prop_shuffle(), Just(keys).prop_shuffle())
            })
    ) {
        let mut t: RedBlackTree<u16, ()> = RedBlackTree::new();
        for &k in &keys {
            prop_assert!(t.insert(k, ()).1);
        }
        validate_tree(&t);

        for (removed, &k) in order.iter().enumerate() {
            prop_assert_eq!(t.remove(&k), 1);
            prop_assert_eq!(t.remove(&k), 0);
            prop_assert_eq!(t.len(), keys.len() - removed - 1);
            prop_assert!(t.check_invariants().is_ok());
        }
        prop_assert!(t.is_empty());
        prop_assert_eq!(t.begin(), t.end());
    }
}

fn for_each_permutation<T: Clone>(items: &[T], mut f: impl FnMut(Vec<T>)) {
    fn rec<T: Clone>(items: &[T], used: &mut [bool], out: &mut Vec<T>, f: &mut impl FnMut(Vec<T>)) {
        if out.len() == items.len() {
            f(out.clone());
            return;
        }
        for i in 0..items.len() {
            if used[i] {
                continue;
            }
            used[i] = true;
            out.push(items[i].clone());
            rec(items, used, out, f);
            out.pop();
            used[i] = false;
        }
    }

    let mut used = vec![false; items.len()];
    let mut out = Vec::with_capacity(items.len());
    rec(items, &mut used, &mut out, &mut f);
}

#[test]
fn exhaustive_insert_order_small_set() {
    let keys: Vec<u16> = (1..=7).collect();

    for_each_permutation(&keys, |perm| {
        let mut t: RedBlackTree<u16, u16> = RedBlackTree::new();
        for &k in &perm {
            assert!(t.insert(k, k).1);
            validate_tree(&t);
        }
        let got: Vec<u16> = t.keys().copied().collect();
        assert_eq!(got, keys);
    });
}

#[test]
fn exhaustive_remove_order_small_set() {
    let keys: Vec<u16> = (1..=7).collect();

    // Insert in a fixed order, then remove in all permutations.
    let base: RedBlackTree<u16, u16> = keys.iter().map(|&k| (k, k)).collect();

    for_each_permutation(&keys, |perm| {
        let mut t = base.clone();
        let mut m: BTreeMap<u16, u16> = keys.iter().map(|&k| (k, k)).collect();

        for k in perm {
            assert_eq!(t.remove_entry(&k), m.remove(&k).map(|v| (k, v)));
            assert_eq!(t.len(), m.len());
            validate_tree(&t);
        }
        assert!(t.is_empty());
        assert!(t.root.is_sentinel());
    });
}
