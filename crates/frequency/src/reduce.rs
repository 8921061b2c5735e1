//! Vocabulary reduction policies over a persisted frequency table.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::FrequencyError;
use crate::confidence::reduce_by_confidence;
use crate::table::{FrequencyTable, VocabularyWeights};

/// Selects words with `lower <= frequency <= upper`.
///
/// Weights are divided by the highest frequency of the whole table, not of
/// the selected slice.
pub fn reduce_by_range(
    table: &FrequencyTable,
    lower: u64,
    upper: u64,
) -> Result<VocabularyWeights, FrequencyError> {
    if lower > upper {
        return Err(FrequencyError::InvalidRange { lower, upper });
    }

    let start = Instant::now();
    let max = table.max_frequency() as f64;
    let weights: VocabularyWeights = table
        .iter()
        .filter(|(_, f)| (lower..=upper).contains(f))
        .map(|(w, f)| (w, f as f64 / max))
        .collect();

    info!(
        lower,
        upper,
        selected = weights.len(),
        table_size = table.len(),
        elapsed_micros = start.elapsed().as_micros(),
        "range_reduction_finished"
    );
    Ok(weights)
}

/// Every word of the table weighted by `frequency / max_frequency`.
pub fn normalize_all(table: &FrequencyTable) -> VocabularyWeights {
    let max = table.max_frequency() as f64;
    table.iter().map(|(w, f)| (w, f as f64 / max)).collect()
}

/// How the informative vocabulary is chosen before the similarity build.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReductionPolicy {
    /// Compare sentences on all of their tokens.
    #[default]
    Off,
    /// Confidence-band search covering this share of the vocabulary.
    Percent(f64),
    /// Fixed frequency range, both ends inclusive.
    Range { lower: u64, upper: u64 },
}

impl ReductionPolicy {
    pub fn is_off(&self) -> bool {
        matches!(self, ReductionPolicy::Off)
    }

    /// Runs the policy. `Off` yields `None`.
    pub fn apply(&self, table: &FrequencyTable) -> Result<Option<VocabularyWeights>, FrequencyError> {
        match *self {
            ReductionPolicy::Off => Ok(None),
            ReductionPolicy::Percent(percent) => reduce_by_confidence(table, percent).map(Some),
            ReductionPolicy::Range { lower, upper } => {
                reduce_by_range(table, lower, upper).map(Some)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FrequencyTable {
        [("drei", 3), ("fuenf", 5), ("funf", 5), ("acht", 8)]
            .into_iter()
            .collect()
    }

    #[test]
    fn range_divides_by_table_maximum() {
        let weights = reduce_by_range(&sample(), 5, 5).expect("valid range");
        assert_eq!(weights.len(), 2);
        assert_eq!(weights.get("fuenf"), Some(5.0 / 8.0));
        assert_eq!(weights.get("funf"), Some(5.0 / 8.0));
        assert!(!weights.contains("acht"));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let weights = reduce_by_range(&sample(), 3, 8).expect("valid range");
        assert_eq!(weights.len(), 4);
        assert_eq!(weights.get("acht"), Some(1.0));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = reduce_by_range(&sample(), 9, 2).unwrap_err();
        assert_eq!(err, FrequencyError::InvalidRange { lower: 9, upper: 2 });
    }

    #[test]
    fn range_over_empty_table_is_empty() {
        let weights = reduce_by_range(&FrequencyTable::new(), 1, 10).expect("valid range");
        assert!(weights.is_empty());
    }

    #[test]
    fn normalize_keeps_every_word_with_fractional_weights() {
        let weights = normalize_all(&sample());
        assert_eq!(weights.len(), 4);
        assert_eq!(weights.get("drei"), Some(0.375));
        assert_eq!(weights.get("acht"), Some(1.0));
    }

    #[test]
    fn each_call_returns_a_fresh_table() {
        let first = reduce_by_range(&sample(), 8, 8).expect("valid range");
        let second = reduce_by_range(&sample(), 3, 3).expect("valid range");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert!(second.contains("drei"));
        assert!(!second.contains("acht"));
    }

    #[test]
    fn off_policy_yields_nothing() {
        assert_eq!(ReductionPolicy::Off.apply(&sample()), Ok(None));
        assert!(ReductionPolicy::default().is_off());
    }

    #[test]
    fn range_policy_delegates() {
        let policy = ReductionPolicy::Range { lower: 5, upper: 8 };
        let weights = policy.apply(&sample()).expect("valid").expect("some");
        assert_eq!(weights.len(), 3);
    }
}
