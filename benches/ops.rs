//! Insert / lookup / remove / traversal compared to `BTreeMap`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use redblack_rs::RedBlackTree;
use std::collections::BTreeMap;

fn shuffled_keys(n: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(42));
    keys
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [1_000u64, 10_000, 100_000] {
        let keys = shuffled_keys(size);

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("RedBlackTree", size), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = RedBlackTree::with_capacity(keys.len());
                for &k in keys {
                    tree.insert(k, k);
                }
                black_box(tree)
            });
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in [1_000u64, 10_000, 100_000] {
        let keys = shuffled_keys(size);
        let map: BTreeMap<u64, u64> = keys.iter().map(|&k| (k, k)).collect();
        let tree: RedBlackTree<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(map.get(k));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("RedBlackTree", size), &keys, |b, keys| {
            b.iter(|| {
                for k in keys {
                    black_box(tree.get(k));
                }
            });
        });
    }

    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");

    for size in [1_000u64, 10_000] {
        let keys = shuffled_keys(size);
        let tree: RedBlackTree<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

        group.bench_with_input(BenchmarkId::new("RedBlackTree", size), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = tree.clone();
                for k in keys {
                    tree.remove(k);
                }
                black_box(tree)
            });
        });
    }

    group.finish();
}

fn bench_traverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("traverse");
    let keys = shuffled_keys(100_000);
    let tree: RedBlackTree<u64, u64> = keys.iter().map(|&k| (k, k)).collect();

    group.bench_function("cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut cursor = tree.begin();
            let end = tree.end();
            while cursor != end {
                if let Ok((_, v)) = tree.key_value(cursor) {
                    sum = sum.wrapping_add(*v);
                }
                if tree.advance(&mut cursor).is_err() {
                    break;
                }
            }
            black_box(sum)
        });
    });

    group.bench_function("iter", |b| {
        b.iter(|| black_box(tree.values().fold(0u64, |acc, v| acc.wrapping_add(*v))));
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_lookup, bench_remove, bench_traverse);
criterion_main!(benches);
