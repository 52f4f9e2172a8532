//! Insert and erase throughput for both containers.
//!
//! Run with: cargo bench -p linear-collections

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use linear_collections::{ArrayList, LinkedList, Sequence};

const SIZES: [usize; 2] = [1_000, 10_000];

fn fill_end<S: Sequence<Item = String> + Default>(n: usize) -> S {
    let mut seq = S::default();
    for _ in 0..n {
        seq.append(black_box("testEnd".to_string()));
    }
    seq
}

fn fill_begin<S: Sequence<Item = String> + Default>(n: usize) -> S {
    let mut seq = S::default();
    for _ in 0..n {
        seq.prepend(black_box("testBegin".to_string()));
    }
    seq
}

fn erase_second<S: Sequence<Item = String>>(seq: &mut S, n: usize) {
    for _ in 0..n {
        let Ok(second) = seq.begin().next(seq) else {
            break;
        };
        black_box(seq.erase(second).ok());
    }
}

fn bench_insert_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_end");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("array", n), &n, |b, &n| {
            b.iter(|| fill_end::<ArrayList<String>>(n));
        });
        group.bench_with_input(BenchmarkId::new("list", n), &n, |b, &n| {
            b.iter(|| fill_end::<LinkedList<String>>(n));
        });
    }
    group.finish();
}

fn bench_insert_begin(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_begin");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("array", n), &n, |b, &n| {
            b.iter(|| fill_begin::<ArrayList<String>>(n));
        });
        group.bench_with_input(BenchmarkId::new("list", n), &n, |b, &n| {
            b.iter(|| fill_begin::<LinkedList<String>>(n));
        });
    }
    group.finish();
}

fn bench_erase_second(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_second");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("array", n), &n, |b, &n| {
            b.iter_batched(
                || fill_end::<ArrayList<String>>(n + 1),
                |mut seq| erase_second(&mut seq, n),
                BatchSize::LargeInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("list", n), &n, |b, &n| {
            b.iter_batched(
                || fill_end::<LinkedList<String>>(n + 1),
                |mut seq| erase_second(&mut seq, n),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_end,
    bench_insert_begin,
    bench_erase_second
);
criterion_main!(benches);
