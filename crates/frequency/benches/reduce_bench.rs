use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use frequency::{normalize_all, reduce_by_confidence, reduce_by_range, FrequencyTable};

fn zipf_table(words: usize) -> FrequencyTable {
    (1..=words)
        .map(|rank| (format!("word{rank}"), (words / rank).max(2) as u64))
        .collect()
}

fn bench_reduce(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    for size in [1_000usize, 10_000, 100_000].iter() {
        let table = zipf_table(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("range_{size}"), |b| {
            b.iter(|| reduce_by_range(black_box(&table), 2, 10))
        });
        group.bench_function(format!("confidence_{size}"), |b| {
            b.iter(|| reduce_by_confidence(black_box(&table), 0.5))
        });
        group.bench_function(format!("normalize_{size}"), |b| {
            b.iter(|| normalize_all(black_box(&table)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_reduce);
criterion_main!(benches);
