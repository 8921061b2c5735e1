use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use sentgraph::{import_sentences, Pipeline, SentgraphConfig};
use similarity::SilentProgress;
use store::InMemoryStore;

const WORDS: &[&str] = &[
    "Hund", "Katze", "Garten", "Haus", "jagt", "schläft", "Vogel", "singt", "Baum", "Wald",
    "läuft", "Sonne", "scheint", "Regen", "fällt", "Stadt", "Fluss", "Brücke", "Weg", "Feld",
    "Berg", "Tal", "Licht", "Nacht", "Morgen", "Abend", "Winter", "Sommer", "Straße", "Markt",
];

// Deterministic corpus with a skewed word distribution.
fn demo_corpus(sentences: usize) -> String {
    let mut out = String::new();
    let mut state = 0x2545_f491_u64;
    for id in 1..=sentences {
        let mut words = Vec::new();
        for _ in 0..8 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let r = (state % 1000) as usize;
            words.push(WORDS[(r * r) / 1000 * WORDS.len() / 1000]);
        }
        out.push_str(&format!("{id}\tDer {}.\n", words.join(" ")));
    }
    out
}

fn seeded_store(corpus: &str) -> InMemoryStore {
    let store = InMemoryStore::new();
    import_sentences(&store, corpus.as_bytes()).expect("bench import");
    store
}

fn pipeline(extra: &str) -> Pipeline {
    let yaml = format!("version: \"1\"\ncorpora: [bench]\nstore:\n  backend: in_memory\n{extra}");
    let cfg = SentgraphConfig::from_yaml(&yaml).expect("bench config");
    Pipeline::from_config(&cfg)
        .expect("bench pipeline")
        .with_observer(Arc::new(SilentProgress))
}

fn import_bench(c: &mut Criterion) {
    let corpus = demo_corpus(2_000);
    c.bench_function("import_2k_sentences", |b| {
        b.iter(|| {
            let store = InMemoryStore::new();
            let written = import_sentences(&store, black_box(corpus.as_bytes())).expect("import");
            black_box(written);
        });
    });
}

fn full_run_bench(c: &mut Criterion) {
    let corpus = demo_corpus(500);
    let sequential = pipeline("similarity:\n  threshold: 0.3\n");
    let parallel = pipeline("similarity:\n  threshold: 0.3\n  use_parallel: true\n");

    let mut group = c.benchmark_group("pipeline_500_sentences");
    group.sample_size(20);
    group.bench_function("sequential", |b| {
        b.iter_batched(
            || seeded_store(&corpus),
            |store| black_box(sequential.run_corpus("bench", &store).expect("run")),
            BatchSize::LargeInput,
        );
    });
    group.bench_function("parallel", |b| {
        b.iter_batched(
            || seeded_store(&corpus),
            |store| black_box(parallel.run_corpus("bench", &store).expect("run")),
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

fn reduced_run_bench(c: &mut Criterion) {
    let corpus = demo_corpus(500);
    let reduced = pipeline(
        "reduction:\n  method: frequency\n  lower_freq: 2\n  higher_freq: 200\n\
         similarity:\n  threshold: 0.2\n  minimum_match_length: 2\n  use_parallel: true\n",
    );

    c.bench_function("pipeline_500_sentences_range_reduction", |b| {
        b.iter_batched(
            || seeded_store(&corpus),
            |store| black_box(reduced.run_corpus("bench", &store).expect("run")),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(pipeline_benches, import_bench, full_run_bench, reduced_run_bench);
criterion_main!(pipeline_benches);
