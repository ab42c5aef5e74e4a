use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rc_array::{RcArray, RefCount, RefCounted, Shared};
use std::time::Duration;

// Identity-only element: the structural benchmarks never look inside.
struct Node {
    refs: RefCount,
}

impl RefCounted for Node {
    fn inc_reference_count(&self) {
        self.refs.increment()
    }
    fn dec_reference_count_without_deleting(&self) -> bool {
        self.refs.decrement()
    }
}

fn node() -> Shared<Node> {
    Shared::new(Node {
        refs: RefCount::new(),
    })
}

fn bench_push(c: &mut Criterion) {
    c.bench_function("rc_array_push_10k", |b| {
        let pool: Vec<_> = (0..10_000).map(|_| node()).collect();
        b.iter_batched(
            RcArray::<Node>::new,
            |mut arr| {
                for p in &pool {
                    arr.push(Some(p));
                }
                black_box(arr)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_clone(c: &mut Criterion) {
    c.bench_function("rc_array_clone_10k", |b| {
        let pool: Vec<_> = (0..10_000).map(|_| node()).collect();
        let mut arr = RcArray::<Node>::new();
        for p in &pool {
            arr.push(Some(p));
        }
        b.iter(|| black_box(arr.clone()))
    });
}

fn bench_index_of_hit(c: &mut Criterion) {
    c.bench_function("rc_array_index_of_hit", |b| {
        let pool: Vec<_> = (0..4_096).map(|_| node()).collect();
        let mut arr = RcArray::<Node>::new();
        for p in &pool {
            arr.push(Some(p));
        }
        let mut it = pool.iter().cycle();
        b.iter(|| {
            let p = it.next().unwrap();
            black_box(arr.index_of(Some(p)));
        })
    });
}

fn bench_remove_front(c: &mut Criterion) {
    c.bench_function("rc_array_remove_front_1k", |b| {
        let pool: Vec<_> = (0..1_000).map(|_| node()).collect();
        b.iter_batched(
            || {
                let mut arr = RcArray::<Node>::new();
                for p in &pool {
                    arr.push(Some(p));
                }
                arr
            },
            |mut arr| {
                while !arr.is_empty() {
                    arr.remove(0);
                }
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
    targets = bench_push, bench_clone, bench_index_of_hit, bench_remove_front
}
criterion_main!(benches);
