use chained_hashmap::ChainTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("chain_table_insert_10k", |b| {
        b.iter_batched(
            ChainTable::<u64>::new,
            |mut t| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    t.insert(&key(x), i as u64);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("chain_table_get_hit", |b| {
        let mut t = ChainTable::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("chain_table_get_miss", |b| {
        let mut t = ChainTable::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.insert(&key(x), i as u64);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in the table
            let k = key(miss.next().unwrap());
            black_box(t.get(&k));
        })
    });
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("chain_table_remove_reinsert", |b| {
        let mut t = ChainTable::new();
        let keys: Vec<_> = lcg(23).take(10_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.insert(k, i as u64);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let v = t.remove(k).unwrap();
            t.insert(k, v);
        })
    });
}

fn bench_iterate_keys(c: &mut Criterion) {
    c.bench_function("chain_table_keys_10k", |b| {
        let mut t = ChainTable::new();
        for (i, x) in lcg(31).take(10_000).enumerate() {
            t.insert(&key(x), i as u64);
        }
        b.iter(|| {
            let mut n = 0usize;
            for k in t.keys() {
                n += k.len();
            }
            black_box(n)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_remove_reinsert, bench_iterate_keys
}
criterion_main!(benches);
