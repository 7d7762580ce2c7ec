use std::collections::{BTreeMap, BTreeSet};
use std::hint::black_box;
use std::time::{Duration, Instant};

use bench::{
    apply_large_runtime_config, apply_small_runtime_config, distinct_keys, duplicate_heavy_keys,
    seed_base, seed_for_iter, seeded_rng, shuffled_keys,
};
use criterion::measurement::Measurement;
use criterion::{BatchSize, BenchmarkGroup, BenchmarkId};
use rand::Rng;
use rb_tree::RbTree;

const SIZES: [usize; 4] = [1_000, 16_000, 64_000, 256_000];
const OPS_PER_ITER: usize = 200;
const DUPLICATE_FANOUT: u64 = 16;

pub fn bench_build<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_large_runtime_config(group);
        let shuffled = shuffled_keys(size, seed_base(1, size as u64));
        let duplicated = duplicate_heavy_keys(
            size,
            (size as u64 / DUPLICATE_FANOUT).max(1),
            seed_base(2, size as u64),
        );

        group.bench_function(BenchmarkId::new("unique_shuffled", size), |b| {
            b.iter(|| {
                let mut tree = RbTree::<u64>::new();
                for &k in &shuffled {
                    black_box(tree.insert_unique(k).unwrap());
                }
                tree
            })
        });
        group.bench_function(BenchmarkId::new("unique_ascending", size), |b| {
            b.iter(|| {
                let mut tree = RbTree::<u64>::new();
                for k in 0..size as u64 {
                    black_box(tree.insert_unique(k).unwrap());
                }
                tree
            })
        });
        group.bench_function(BenchmarkId::new("multi_duplicates", size), |b| {
            b.iter(|| {
                let mut tree = RbTree::<u64>::new();
                for &k in &duplicated {
                    black_box(tree.insert_multi(k).unwrap());
                }
                tree
            })
        });
        group.bench_function(BenchmarkId::new("std_btree_set", size), |b| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in &shuffled {
                    black_box(set.insert(k));
                }
                set
            })
        });
    }
}

pub fn bench_query<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_small_runtime_config(group);
        let base_seed = seed_base(3, size as u64);
        let keys = distinct_keys(size, base_seed);
        let mut tree = RbTree::<u64>::new();
        tree.insert_unique_iter(keys.iter().copied()).unwrap();
        let oracle: BTreeSet<u64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("find", size), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = seeded_rng(seed_for_iter(base_seed, iter));
                    let probes: Vec<u64> = (0..OPS_PER_ITER)
                        .map(|_| keys[rng.random_range(0..keys.len())])
                        .collect();
                    let start = Instant::now();
                    for k in &probes {
                        black_box(tree.find(k));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
        group.bench_function(BenchmarkId::new("lower_bound", size), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = seeded_rng(seed_for_iter(base_seed, iter));
                    let probes: Vec<u64> = (0..OPS_PER_ITER).map(|_| rng.random()).collect();
                    let start = Instant::now();
                    for k in &probes {
                        black_box(tree.get_at(tree.lower_bound(k)));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
        group.bench_function(BenchmarkId::new("std_btree_range", size), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let mut rng = seeded_rng(seed_for_iter(base_seed, iter));
                    let probes: Vec<u64> = (0..OPS_PER_ITER).map(|_| rng.random()).collect();
                    let start = Instant::now();
                    for &k in &probes {
                        black_box(oracle.range(k..).next());
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

pub fn bench_churn<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_small_runtime_config(group);
        let base_seed = seed_base(4, size as u64);
        let keys = distinct_keys(size, base_seed);
        let mut tree = RbTree::<(u64, u64), rb_tree::First>::new();
        let mut oracle = BTreeMap::new();
        for &k in &keys {
            tree.insert_unique((k, k)).unwrap();
            oracle.insert(k, k);
        }

        // Each iteration inserts fresh keys and removes them again, so the
        // tree size stays at `size`.
        group.bench_function(BenchmarkId::new("insert_erase", size), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let fresh = distinct_keys(OPS_PER_ITER, seed_for_iter(base_seed, iter + 1));
                    let start = Instant::now();
                    for &k in &fresh {
                        black_box(tree.insert_multi((k, k)).unwrap());
                    }
                    for k in &fresh {
                        black_box(tree.erase_unique(k));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
        group.bench_function(BenchmarkId::new("std_btree_map", size), |b| {
            b.iter_custom(|iters| {
                let mut total = Duration::ZERO;
                for iter in 0..iters {
                    let fresh = distinct_keys(OPS_PER_ITER, seed_for_iter(base_seed, iter + 1));
                    let start = Instant::now();
                    for &k in &fresh {
                        black_box(oracle.insert(k, k));
                    }
                    for k in &fresh {
                        black_box(oracle.remove(k));
                    }
                    total += start.elapsed();
                }
                total
            })
        });
    }
}

pub fn bench_copy<T>(group: &mut BenchmarkGroup<'_, T>)
where
    T: Measurement<Value = Duration>,
{
    for &size in &SIZES {
        apply_large_runtime_config(group);
        let keys = distinct_keys(size, seed_base(5, size as u64));
        let tree: RbTree<u64> = keys.iter().copied().collect();

        group.bench_function(BenchmarkId::new("clone", size), |b| {
            b.iter(|| black_box(tree.clone()))
        });
        group.bench_function(BenchmarkId::new("teardown", size), |b| {
            b.iter_batched(|| tree.clone(), drop, BatchSize::LargeInput)
        });
    }
}
