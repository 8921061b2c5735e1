//! Confidence-band search for a rare-word vocabulary.
//!
//! The search builds a histogram `frequency -> number of words with that
//! frequency`, seeds a band at the frequency whose word count is closest to a
//! thousandth of the biggest bucket, and widens the band one present
//! frequency at a time (down first, then up) until it covers the requested
//! share of the distinct words.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::FrequencyError;
use crate::table::{FrequencyTable, VocabularyWeights};

/// Share used when the caller passes a non-positive percentage.
pub const DEFAULT_PERCENT: f64 = 0.5;

/// Outcome of the band search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ConfidenceBand {
    /// Lowest selected frequency.
    pub lower: u64,
    /// Highest selected frequency.
    pub upper: u64,
    /// Frequency the band grew from.
    pub seed: u64,
    /// Words covered by the band.
    pub selected: u64,
    /// `percent * distinct_words` after clamping.
    pub target: f64,
    pub percent: f64,
}

/// Maps out-of-range inputs onto a share in `(0, 1]`.
///
/// `percent <= 0` becomes [`DEFAULT_PERCENT`]; values above 1 are read as a
/// percentage and divided by 100.
pub fn clamp_percent(percent: f64) -> f64 {
    if percent <= 0.0 {
        DEFAULT_PERCENT
    } else if percent > 1.0 {
        percent / 100.0
    } else {
        percent
    }
}

/// [`reduce_by_confidence_with_band`] without the band.
pub fn reduce_by_confidence(
    table: &FrequencyTable,
    percent: f64,
) -> Result<VocabularyWeights, FrequencyError> {
    reduce_by_confidence_with_band(table, percent).map(|(weights, _)| weights)
}

/// Selects the words inside the confidence band and weights them by
/// `frequency / distinct_words`.
pub fn reduce_by_confidence_with_band(
    table: &FrequencyTable,
    percent: f64,
) -> Result<(VocabularyWeights, ConfidenceBand), FrequencyError> {
    let start = Instant::now();
    let clamped = clamp_percent(percent);
    if clamped != percent {
        warn!(requested = percent, used = clamped, "percent_out_of_range");
    }

    let band = search_band(table, clamped).inspect_err(|err| {
        warn!(error = %err, percent = clamped, "confidence_search_failed");
    })?;

    let size = table.len() as f64;
    let weights: VocabularyWeights = table
        .iter()
        .filter(|(_, f)| (band.lower..=band.upper).contains(f))
        .map(|(w, f)| (w, f as f64 / size))
        .collect();

    info!(
        lower = band.lower,
        upper = band.upper,
        seed = band.seed,
        selected = weights.len(),
        target = band.target,
        elapsed_micros = start.elapsed().as_micros(),
        "confidence_reduction_finished"
    );
    Ok((weights, band))
}

fn histogram(table: &FrequencyTable) -> BTreeMap<u64, u64> {
    let mut runs = BTreeMap::new();
    for (_, frequency) in table.iter() {
        *runs.entry(frequency).or_insert(0) += 1;
    }
    runs
}

fn search_band(table: &FrequencyTable, percent: f64) -> Result<ConfidenceBand, FrequencyError> {
    let runs = histogram(table);
    let largest_run = runs.values().copied().max().ok_or_else(|| {
        FrequencyError::DegenerateComputation("frequency table is empty".into())
    })?;
    let target = percent * table.len() as f64;

    // Ascending scan with `<=` hands ties to the later key.
    let find = largest_run / 1000;
    let mut seed = 0;
    let mut best = u64::MAX;
    for (&key, &run) in &runs {
        let diff = run.abs_diff(find);
        if diff <= best {
            best = diff;
            seed = key;
        }
    }

    let mut minus = seed;
    let mut plus = seed;
    let mut count = runs.get(&seed).copied().unwrap_or(0);

    while (count as f64) < target {
        let before = count;

        if minus > 1 {
            match runs.range(1..minus).next_back() {
                Some((&key, &run)) => {
                    minus = key;
                    count += run;
                }
                None => minus = 1,
            }
        }

        if (count as f64) < target && plus < largest_run {
            match runs.range(plus + 1..=largest_run).next() {
                Some((&key, &run)) => {
                    plus = key;
                    count += run;
                }
                None => plus = largest_run,
            }
        }

        if count == before {
            return Err(FrequencyError::DegenerateComputation(format!(
                "band [{minus}, {plus}] covers {count} words, target {target} unreachable"
            )));
        }
    }

    Ok(ConfidenceBand {
        lower: minus,
        upper: plus,
        seed,
        selected: count,
        target,
        percent,
    })
}
