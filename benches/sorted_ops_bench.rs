use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rc_array::{RcArray, RefCount, RefCounted, Shared};
use std::cmp::Ordering;
use std::time::Duration;

struct Node {
    refs: RefCount,
    key: u64,
}

impl RefCounted for Node {
    fn inc_reference_count(&self) {
        self.refs.increment()
    }
    fn dec_reference_count_without_deleting(&self) -> bool {
        self.refs.decrement()
    }
}

fn node(key: u64) -> Shared<Node> {
    Shared::new(Node {
        refs: RefCount::new(),
        key,
    })
}

fn by_key(a: Option<&Node>, b: Option<&Node>) -> Ordering {
    a.map(|o| o.key).cmp(&b.map(|o| o.key))
}

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_add_sorted(c: &mut Criterion) {
    c.bench_function("rc_array_add_sorted_4k", |b| {
        let pool: Vec<_> = lcg(1).take(4_096).map(node).collect();
        b.iter_batched(
            RcArray::<Node>::new,
            |mut arr| {
                for p in &pool {
                    arr.add_sorted(by_key, Some(p));
                }
                black_box(arr)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_index_of_sorted_hit(c: &mut Criterion) {
    c.bench_function("rc_array_index_of_sorted_hit", |b| {
        // Distinct even keys so hits are certain and misses have a home.
        let pool: Vec<_> = (0..8_192u64).map(|n| node(n * 2)).collect();
        let mut arr = RcArray::<Node>::new();
        for p in &pool {
            arr.add_sorted(by_key, Some(p));
        }
        let mut it = pool.iter().cycle();
        b.iter(|| {
            let p = it.next().unwrap();
            black_box(arr.index_of_sorted(by_key, Some(p)));
        })
    });
}

fn bench_index_of_sorted_miss(c: &mut Criterion) {
    c.bench_function("rc_array_index_of_sorted_miss", |b| {
        let pool: Vec<_> = (0..8_192u64).map(|n| node(n * 2)).collect();
        let mut arr = RcArray::<Node>::new();
        for p in &pool {
            arr.add_sorted(by_key, Some(p));
        }
        // Odd keys are never present.
        let needles: Vec<_> = lcg(5).take(256).map(|k| node(k | 1)).collect();
        let mut it = needles.iter().cycle();
        b.iter(|| {
            let n = it.next().unwrap();
            black_box(arr.index_of_sorted(by_key, Some(n)));
        })
    });
}

fn bench_sort_unstable(c: &mut Criterion) {
    c.bench_function("rc_array_sort_unstable_10k", |b| {
        let pool: Vec<_> = lcg(9).take(10_000).map(node).collect();
        let mut shuffled = RcArray::<Node>::new();
        for p in &pool {
            shuffled.push(Some(p));
        }
        b.iter_batched(
            || shuffled.clone(),
            |mut arr| {
                arr.sort(by_key, false);
                black_box(arr)
            },
            BatchSize::SmallInput,
        )
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
    targets = bench_add_sorted,
        bench_index_of_sorted_hit,
        bench_index_of_sorted_miss,
        bench_sort_unstable
}
criterion_main!(benches);
