//! Word counting and rare-word vocabulary reduction.
//!
//! [`count_words`] turns tokenized sentences into a [`FrequencyTable`] with
//! corpus singletons removed. A [`ReductionPolicy`] then picks the
//! informative vocabulary out of a (possibly persisted and reloaded) table:
//!
//! - [`reduce_by_range`]: a fixed inclusive frequency range, weighted by the
//!   table maximum
//! - [`reduce_by_confidence`]: a band around an automatically chosen seed
//!   frequency, grown until it covers a share of the distinct words
//! - [`normalize_all`]: every word, weighted by the table maximum
//!
//! Every call returns a fresh [`VocabularyWeights`]; nothing accumulates
//! between calls.
//!
//! ```rust
//! use frequency::{reduce_by_range, FrequencyTable};
//!
//! let table: FrequencyTable = [("a", 3), ("b", 5), ("c", 5), ("d", 8)].into_iter().collect();
//! let weights = reduce_by_range(&table, 5, 5).unwrap();
//! assert_eq!(weights.get("b"), Some(0.625));
//! ```

mod confidence;
mod config;
mod counter;
mod reduce;
mod table;

pub use crate::confidence::{
    clamp_percent, reduce_by_confidence, reduce_by_confidence_with_band, ConfidenceBand,
    DEFAULT_PERCENT,
};
pub use crate::config::{CountConfig, FrequencyError};
pub use crate::counter::{count_words, CountReport, MAX_WORD_CHARS};
pub use crate::reduce::{normalize_all, reduce_by_range, ReductionPolicy};
pub use crate::table::{FrequencyTable, VocabularyWeights};

#[cfg(test)]
mod tests {
    use super::*;
    use canonical::{Sentence, TokenizeConfig};
    use proptest::prelude::*;

    #[test]
    fn word_seen_once_never_reaches_the_table() {
        let cfg = TokenizeConfig::default();
        let corpus = vec![
            Sentence::from_text(1, "Heute scheint die Sonne", &cfg),
            Sentence::from_text(2, "Morgen scheint die Sonne nicht", &cfg),
        ];
        let (table, _) = count_words(&corpus, &CountConfig::default());
        assert_eq!(table.get("nicht"), None);
        assert_eq!(table.get("Sonne"), Some(2));

        let weights = normalize_all(&table);
        assert!(weights.iter().all(|(_, p)| p > 0.0 && p <= 1.0));
    }

    proptest! {
        #[test]
        fn counted_words_occur_at_least_twice(
            words in proptest::collection::vec("[a-e]{2}", 0..60)
        ) {
            let cfg = TokenizeConfig::default();
            let corpus: Vec<Sentence> = words
                .chunks(6)
                .enumerate()
                .map(|(i, chunk)| Sentence::from_text(i as i64, &chunk.join(" "), &cfg))
                .collect();
            let (table, _) = count_words(&corpus, &CountConfig::default());
            for (_, count) in table.iter() {
                prop_assert!(count >= 2);
            }
        }

        #[test]
        fn confidence_band_covers_its_target(
            counts in proptest::collection::vec(2u64..40, 1..80),
            percent in 0.05f64..=1.0,
        ) {
            let table: FrequencyTable = counts
                .iter()
                .enumerate()
                .map(|(i, &c)| (format!("w{i}"), c))
                .collect();
            // An unreachable band is reported, never looped on.
            if let Ok((weights, band)) = reduce_by_confidence_with_band(&table, percent) {
                prop_assert!(band.selected as f64 >= band.target);
                prop_assert_eq!(weights.len() as u64, band.selected);
                prop_assert!(band.lower <= band.seed && band.seed <= band.upper);
            }
        }
    }
}
