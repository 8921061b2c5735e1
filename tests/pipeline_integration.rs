use sentgraph::{
    import_sentences, CorpusStore, Pipeline, SentgraphConfig, SimilarityEntry, Table,
};
use store::InMemoryStore;

const CORPUS: &str = "\
1\tDer Hund jagt die Katze im Garten.
2\tDie Katze jagt den Hund im Garten.
3\tEin Vogel singt im Garten.
4\tDer Hund schläft im Haus.
5\tDie Sonne scheint über dem Haus.
";

fn config(extra: &str) -> SentgraphConfig {
    let yaml = format!(
        "version: \"1.0\"\ncorpora: [tiere]\nstore:\n  backend: in_memory\n{extra}"
    );
    SentgraphConfig::from_yaml(&yaml).expect("valid config")
}

fn seeded_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    import_sentences(&store, CORPUS.as_bytes()).expect("import");
    store
}

#[test]
fn full_run_counts_and_links_sentences() {
    let store = seeded_store();
    let cfg = config("similarity:\n  threshold: 0.3\n");
    let report = Pipeline::from_config(&cfg)
        .expect("pipeline")
        .run_corpus("tiere", &store)
        .expect("run");

    assert!(!report.nothing_to_do);
    assert_eq!(report.sentences_loaded, 5);

    let frequencies = store.frequencies().expect("frequencies");
    assert_eq!(frequencies.get("im"), Some(4));
    assert_eq!(frequencies.get("Hund"), Some(3));
    assert_eq!(frequencies.get("Garten"), Some(3));
    assert_eq!(frequencies.get("Vogel"), None, "singletons are not stored");
    assert_eq!(frequencies.get("Der"), None, "leading words are not counted");
    assert_eq!(frequencies.len(), 6);
    assert_eq!(report.word_count.expect("counted").distinct_words, 6);

    let stored = store.similarities().expect("similarities");
    assert_eq!(stored.len(), report.entries_written);
    assert!(stored.contains(&SimilarityEntry::new(1, 2, 0.0)));

    let matrix = report.matrix.expect("matrix");
    assert_eq!(matrix.compared_pairs(), 10);
    let sum: f64 = report.distribution.expect("distribution").iter().sum();
    assert!((sum - 1.0).abs() < 1e-9);
}

#[test]
fn range_reduction_drops_sentences_without_enough_rare_words() {
    let store = seeded_store();
    let cfg = config(
        "reduction:\n  method: frequency\n  lower_freq: 2\n  higher_freq: 3\n\
         similarity:\n  threshold: 0.3\n  minimum_match_length: 2\n",
    );
    let report = Pipeline::from_config(&cfg)
        .expect("pipeline")
        .run_corpus("tiere", &store)
        .expect("run");

    assert_eq!(report.vocabulary_size, Some(5));
    let matrix = report.matrix.expect("matrix");
    // Sentences 3 and 5 keep a single vocabulary word and are left out.
    assert_eq!(matrix.sentences(), 3);
    assert_eq!(matrix.zero_count(), 2);
    assert_eq!(matrix.entries().len(), 1);

    let entry = matrix.entries()[0];
    assert_eq!((entry.sentence_a, entry.sentence_b), (1, 2));
    // 4 of 4 words, 19 of 27 characters
    let expected = 0.5 * (1.0 + 19.0 / 27.0);
    assert!((entry.score - expected).abs() < 1e-5);
}

#[test]
fn percent_reduction_reports_its_band() {
    let store = seeded_store();
    let cfg = config("reduction:\n  method: percent\n  percent: 0.5\n");
    let report = Pipeline::from_config(&cfg)
        .expect("pipeline")
        .run_corpus("tiere", &store)
        .expect("run");

    let band = report.confidence_band.expect("band");
    assert_eq!(band.seed, 4);
    assert_eq!((band.lower, band.upper), (3, 4));
    assert_eq!(band.selected, 3);
    assert_eq!(report.vocabulary_size, Some(3));
}

#[test]
fn similarity_only_run_reuses_stored_frequencies() {
    let store = seeded_store();
    let full = config(
        "reduction:\n  method: frequency\n  lower_freq: 2\n  higher_freq: 4\n\
         similarity:\n  threshold: 0.2\n",
    );
    let first = Pipeline::from_config(&full)
        .expect("pipeline")
        .run_corpus("tiere", &store)
        .expect("first run");

    let similarity_only = config(
        "reduction:\n  method: frequency\n  lower_freq: 2\n  higher_freq: 4\n\
         similarity:\n  threshold: 0.2\n\
         pipeline:\n  update_word_counts: false\n",
    );
    let second = Pipeline::from_config(&similarity_only)
        .expect("pipeline")
        .run_corpus("tiere", &store)
        .expect("second run");

    assert!(second.word_count.is_none());
    assert_eq!(second.sentences_loaded, 5);
    assert_eq!(first.entries_written, second.entries_written);
    assert_eq!(store.similarities().expect("similarities").len(), second.entries_written);
}

#[test]
fn sentence_limit_loads_lowest_ids_first() {
    let store = seeded_store();
    let cfg = config("pipeline:\n  sentence_limit: 2\n");
    let report = Pipeline::from_config(&cfg)
        .expect("pipeline")
        .run_corpus("tiere", &store)
        .expect("run");

    assert_eq!(report.sentences_loaded, 2);
    assert_eq!(report.matrix.expect("matrix").compared_pairs(), 1);
}

#[cfg(feature = "embedded")]
#[test]
fn redb_store_persists_a_run() {
    let dir = tempfile::tempdir().expect("tempdir");
    let yaml = format!(
        "version: \"1\"\ncorpora: [tiere]\nstore:\n  backend: redb\n  directory: {}\n\
         similarity:\n  threshold: 0.3\n",
        dir.path().display()
    );
    let cfg = SentgraphConfig::from_yaml(&yaml).expect("valid config");

    let written = {
        let store = cfg.store.store_config("tiere").build().expect("open store");
        import_sentences(store.as_ref(), CORPUS.as_bytes()).expect("import");
        Pipeline::from_config(&cfg)
            .expect("pipeline")
            .run_corpus("tiere", store.as_ref())
            .expect("run")
            .entries_written
    };
    assert!(written > 0);
    assert!(dir.path().join("tiere.redb").exists());

    let store = cfg.store.store_config("tiere").build().expect("reopen store");
    assert!(!store.is_empty(Table::WordFrequency).expect("is_empty"));
    assert_eq!(store.similarities().expect("similarities").len(), written);
    assert_eq!(store.frequencies().expect("frequencies").get("im"), Some(4));
}
