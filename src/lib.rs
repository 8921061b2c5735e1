//! Workspace umbrella crate for sentgraph.
//!
//! This crate stitches the stage crates into one per-corpus run:
//!
//! 1. load the corpus sentences from its [`CorpusStore`] and tokenize them
//! 2. count words and replace the stored frequency table
//! 3. reduce the stored table to an informative vocabulary
//! 4. build the similarity matrix and upsert its edges into the store
//!
//! Which steps run, and with which settings, comes from a
//! [`SentgraphConfig`] loaded from YAML.

pub mod config;
pub mod import;

pub use canonical::{tokenize, Sentence, SentenceId, TokenizeConfig};
pub use config::{ConfigLoadError, SentgraphConfig};
pub use frequency::{
    count_words, normalize_all, reduce_by_confidence, reduce_by_confidence_with_band,
    reduce_by_range, ConfidenceBand, CountConfig, CountReport, FrequencyError, FrequencyTable,
    ReductionPolicy, VocabularyWeights,
};
pub use import::{import_sentences, parse_sentence_line};
pub use similarity::{
    ProgressObserver, SimilarityConfig, SimilarityEngine, SimilarityEntry, SimilarityError,
    SimilarityMatrix,
};
pub use store::{CorpusStore, SentenceRecord, StoreConfig, StoreError, Table};

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn, Level};

/// Errors that can occur while running the pipeline for a corpus.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("data access error: {0}")]
    Store(#[from] StoreError),

    #[error("vocabulary reduction failed: {0}")]
    Frequency(#[from] FrequencyError),

    #[error("similarity build failed: {0}")]
    Similarity(#[from] SimilarityError),

    #[error("corpus {corpus:?} has no entries in table {table}")]
    EmptyTable { corpus: String, table: Table },

    #[error("import failed at line {line}: {reason}")]
    Import { line: usize, reason: String },
}

/// What one corpus run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusReport {
    pub corpus: String,
    /// Neither counting nor the similarity build was enabled.
    pub nothing_to_do: bool,
    pub sentences_loaded: usize,
    pub word_count: Option<CountReport>,
    pub vocabulary_size: Option<usize>,
    pub confidence_band: Option<ConfidenceBand>,
    pub entries_written: usize,
    pub zero_count: u64,
    pub distribution: Option<Vec<f64>>,
    pub elapsed_micros: u128,
    #[serde(skip)]
    pub matrix: Option<SimilarityMatrix>,
}

/// Per-corpus pipeline built from a [`SentgraphConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    tokenize: TokenizeConfig,
    count: CountConfig,
    reduction: ReductionPolicy,
    engine: SimilarityEngine,
    buckets: usize,
    update_word_counts: bool,
    update_similarities: bool,
    sentence_limit: Option<usize>,
}

impl Pipeline {
    pub fn from_config(cfg: &SentgraphConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            tokenize: cfg.tokenizer.tokenize_config(),
            count: cfg.tokenizer.count_config(),
            reduction: cfg.reduction.policy()?,
            engine: SimilarityEngine::new(cfg.similarity.similarity_config()),
            buckets: cfg.similarity.distribution_buckets,
            update_word_counts: cfg.pipeline.update_word_counts,
            update_similarities: cfg.pipeline.update_similarities,
            sentence_limit: cfg.pipeline.sentence_limit,
        })
    }

    /// Replaces the default tracing progress observer.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.engine = self.engine.with_observer(observer);
        self
    }

    /// Runs the enabled steps for one corpus.
    ///
    /// A failing step aborts the run; tables written by earlier steps stay
    /// in the store.
    pub fn run_corpus(
        &self,
        corpus: &str,
        store: &dyn CorpusStore,
    ) -> Result<CorpusReport, PipelineError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "pipeline.run", corpus = %corpus);
        let _guard = span.enter();

        match self.run_inner(corpus, store) {
            Ok(mut report) => {
                report.elapsed_micros = start.elapsed().as_micros();
                info!(
                    sentences = report.sentences_loaded,
                    entries = report.entries_written,
                    nothing_to_do = report.nothing_to_do,
                    elapsed_micros = report.elapsed_micros,
                    "pipeline_success"
                );
                Ok(report)
            }
            Err(err) => {
                let elapsed_micros = start.elapsed().as_micros();
                warn!(error = %err, elapsed_micros, "pipeline_failure");
                Err(err)
            }
        }
    }

    fn run_inner(&self, corpus: &str, store: &dyn CorpusStore) -> Result<CorpusReport, PipelineError> {
        let mut report = CorpusReport {
            corpus: corpus.to_string(),
            ..CorpusReport::default()
        };

        if !self.update_word_counts && !self.update_similarities {
            info!("nothing_to_do");
            report.nothing_to_do = true;
            return Ok(report);
        }

        let mut sentences = None;

        if self.update_word_counts {
            let loaded = self.load_sentences(corpus, store)?;
            report.sentences_loaded = loaded.len();

            if !store.is_empty(Table::WordFrequency)? {
                store.clear(Table::WordFrequency)?;
            }
            let (table, count_report) = count_words(&loaded, &self.count);
            store.replace_frequencies(&table)?;
            report.word_count = Some(count_report);
            sentences = Some(loaded);
        }

        if self.update_similarities {
            let vocabulary = self.reduce(corpus, store, &mut report)?;

            let sentences = match sentences {
                Some(sentences) => sentences,
                None => {
                    let loaded = self.load_sentences(corpus, store)?;
                    report.sentences_loaded = loaded.len();
                    loaded
                }
            };

            if !store.is_empty(Table::SentenceSimilarity)? {
                store.clear(Table::SentenceSimilarity)?;
            }

            let matrix = self.engine.build(&sentences, vocabulary.as_ref())?;
            if matrix.entries().is_empty() {
                info!("nothing_to_commit");
            } else {
                store.upsert_similarities(matrix.entries())?;
                report.entries_written = matrix.entries().len();
            }
            report.zero_count = matrix.zero_count();
            report.distribution = Some(matrix.distribution(self.buckets)?);
            report.matrix = Some(matrix);
        }

        Ok(report)
    }

    fn load_sentences(
        &self,
        corpus: &str,
        store: &dyn CorpusStore,
    ) -> Result<Vec<Sentence>, PipelineError> {
        if store.is_empty(Table::Sentences)? {
            return Err(PipelineError::EmptyTable {
                corpus: corpus.to_string(),
                table: Table::Sentences,
            });
        }
        Ok(store.load_sentences(self.sentence_limit, &self.tokenize)?)
    }

    fn reduce(
        &self,
        corpus: &str,
        store: &dyn CorpusStore,
        report: &mut CorpusReport,
    ) -> Result<Option<VocabularyWeights>, PipelineError> {
        if self.reduction.is_off() {
            return Ok(None);
        }
        if store.is_empty(Table::WordFrequency)? {
            return Err(PipelineError::EmptyTable {
                corpus: corpus.to_string(),
                table: Table::WordFrequency,
            });
        }

        let table = store.frequencies()?;
        let vocabulary = match self.reduction {
            ReductionPolicy::Percent(percent) => {
                let (weights, band) = reduce_by_confidence_with_band(&table, percent)?;
                report.confidence_band = Some(band);
                weights
            }
            policy => match policy.apply(&table)? {
                Some(weights) => weights,
                None => return Ok(None),
            },
        };
        report.vocabulary_size = Some(vocabulary.len());
        Ok(Some(vocabulary))
    }
}

/// Installs the global tracing subscriber for the binary.
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(cfg: &config::LoggingYamlConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cfg.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::InMemoryStore;

    fn config(yaml_tail: &str) -> SentgraphConfig {
        let yaml = format!("version: \"1\"\ncorpora: [test]\nstore:\n  backend: in_memory\n{yaml_tail}");
        SentgraphConfig::from_yaml(&yaml).unwrap()
    }

    #[test]
    fn errors_keep_their_source() {
        use std::error::Error as _;
        let err = PipelineError::from(StoreError::InvalidLimit(0));
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "data access error: invalid limit 0; expected at least 1");
    }

    #[test]
    fn disabled_steps_mean_nothing_to_do() {
        let cfg = config("pipeline:\n  update_word_counts: false\n  update_similarities: false\n");
        let report = Pipeline::from_config(&cfg)
            .unwrap()
            .run_corpus("test", &InMemoryStore::new())
            .unwrap();
        assert!(report.nothing_to_do);
        assert!(report.matrix.is_none());
    }

    #[test]
    fn counting_needs_sentences() {
        let cfg = config("");
        let err = Pipeline::from_config(&cfg)
            .unwrap()
            .run_corpus("test", &InMemoryStore::new())
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::EmptyTable { table: Table::Sentences, .. }
        ));
    }
}
