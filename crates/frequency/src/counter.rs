//! Corpus word counting.

use std::time::Instant;

use canonical::Sentence;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::CountConfig;
use crate::table::FrequencyTable;

/// Words with more characters than this are never counted.
pub const MAX_WORD_CHARS: usize = 69;

/// Summary of a counting run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CountReport {
    pub sentences_processed: usize,
    pub distinct_words: usize,
    pub singletons_removed: usize,
}

/// Counts word occurrences over `sentences`.
///
/// The first token of every sentence is not counted. Tokens longer than
/// [`MAX_WORD_CHARS`] are skipped, and with `only_nouns` so is every token
/// that does not start with an uppercase character. Words seen exactly once
/// in the whole corpus are removed before the table is returned.
pub fn count_words(sentences: &[Sentence], cfg: &CountConfig) -> (FrequencyTable, CountReport) {
    let start = Instant::now();
    let mut table = FrequencyTable::new();

    for sentence in sentences {
        for word in sentence.tokens().iter().skip(1) {
            if word.chars().count() > MAX_WORD_CHARS {
                continue;
            }
            if cfg.only_nouns && !starts_uppercase(word) {
                continue;
            }
            table.increment(word);
        }
    }

    let singletons_removed = table.remove_singletons();
    let report = CountReport {
        sentences_processed: sentences.len(),
        distinct_words: table.len(),
        singletons_removed,
    };

    info!(
        sentences = report.sentences_processed,
        distinct_words = report.distinct_words,
        singletons_removed = report.singletons_removed,
        elapsed_micros = start.elapsed().as_micros(),
        "word_count_finished"
    );

    (table, report)
}

// An empty token has no first character and is skipped rather than counted.
fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}
