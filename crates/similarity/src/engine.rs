//! Pairwise similarity build.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use canonical::Sentence;
use frequency::VocabularyWeights;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::{SimilarityConfig, SimilarityError};
use crate::entry::SimilarityEntry;
use crate::matrix::SimilarityMatrix;
use crate::progress::{ProgressObserver, ProgressTracker, TracingProgress};

/// Scores two sentences.
///
/// `0.5 * (matched / avg_words + match_len / avg_len)` where `matched` is the
/// number of distinct words of `a` that also occur in `b`, `match_len` their
/// summed character length, `avg_words` the mean token count and `avg_len`
/// the mean original length. An empty side scores 0.
pub fn score_pair(a: &Sentence, b: &Sentence) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let other: HashSet<&str> = b.iter().map(String::as_str).collect();
    let mut matched: HashSet<&str> = HashSet::new();
    let mut match_len = 0usize;
    for word in a.iter() {
        if other.contains(word.as_str()) && matched.insert(word.as_str()) {
            match_len += word.chars().count();
        }
    }

    let avg_words = 0.5f32 * (a.len() + b.len()) as f32;
    let avg_len = 0.5f32 * (a.original_length() + b.original_length()) as f32;
    0.5 * (ratio(matched.len() as f32, avg_words) + ratio(match_len as f32, avg_len))
}

fn ratio(part: f32, whole: f32) -> f32 {
    if whole > 0.0 {
        part / whole
    } else {
        0.0
    }
}

/// Sentences that take part in the comparison.
///
/// Without a vocabulary this is the input unchanged. With one, every
/// sentence keeps only vocabulary words and is dropped when fewer than
/// `minimum_match_length` remain. Kept sentences carry their original length.
pub fn working_set(
    sentences: &[Sentence],
    vocabulary: Option<&VocabularyWeights>,
    minimum_match_length: usize,
) -> Vec<Sentence> {
    match vocabulary {
        None => sentences.to_vec(),
        Some(vocabulary) => sentences
            .iter()
            .map(|s| s.retain_tokens(|word| vocabulary.contains(word)))
            .filter(|s| s.len() >= minimum_match_length)
            .collect(),
    }
}

#[derive(Default)]
struct RowResult {
    entries: Vec<SimilarityEntry>,
    zero_count: u64,
}

fn score_row(set: &[Sentence], i: usize, threshold: f64) -> RowResult {
    let mut row = RowResult::default();
    let a = &set[i];
    for b in &set[i + 1..] {
        let score = score_pair(a, b);
        if f64::from(score) > threshold {
            row.entries.push(SimilarityEntry::new(a.id(), b.id(), score));
        } else {
            row.zero_count += 1;
        }
    }
    row
}

/// Builds similarity matrices.
#[derive(Clone)]
pub struct SimilarityEngine {
    config: SimilarityConfig,
    observer: Arc<dyn ProgressObserver>,
}

impl SimilarityEngine {
    /// Engine reporting progress through `tracing`.
    pub fn new(config: SimilarityConfig) -> Self {
        Self {
            config,
            observer: Arc::new(TracingProgress),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Compares every pair of the working set once.
    ///
    /// Sequential and parallel builds return identical matrices: rows are
    /// scored independently and concatenated in row order.
    pub fn build(
        &self,
        sentences: &[Sentence],
        vocabulary: Option<&VocabularyWeights>,
    ) -> Result<SimilarityMatrix, SimilarityError> {
        self.config.validate().inspect_err(|err| {
            warn!(error = %err, "similarity_config_invalid");
        })?;

        let start = Instant::now();
        let set = working_set(sentences, vocabulary, self.config.minimum_match_length);
        let n = set.len();
        let total_pairs = (n as u64) * (n as u64).saturating_sub(1) / 2;

        let tracker = ProgressTracker::new(self.observer.as_ref(), total_pairs, self.config.progress_step);
        tracker.start(n);

        let threshold = self.config.threshold;
        let run_row = |i: usize| {
            let row = score_row(&set, i, threshold);
            tracker.advance((n - 1 - i) as u64);
            row
        };
        let rows: Vec<RowResult> = if self.config.use_parallel {
            (0..n).into_par_iter().map(run_row).collect()
        } else {
            (0..n).map(run_row).collect()
        };

        let mut entries = Vec::new();
        let mut zero_count = 0u64;
        for row in rows {
            entries.extend(row.entries);
            zero_count += row.zero_count;
        }
        tracker.finish(entries.len(), zero_count);

        info!(
            input_sentences = sentences.len(),
            working_set = n,
            total_pairs,
            entries = entries.len(),
            zero_count,
            parallel = self.config.use_parallel,
            reduced = vocabulary.is_some(),
            elapsed_micros = start.elapsed().as_micros(),
            "similarity_build_finished"
        );

        Ok(SimilarityMatrix::finished(entries, zero_count, n))
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(SimilarityConfig::default())
    }
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
