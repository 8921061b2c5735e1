use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SimilarityError;
use crate::entry::SimilarityEntry;

/// Buckets and entries shown by the `Display` report.
pub const REPORT_ENTRIES: usize = 10;

/// Result of one similarity build.
///
/// Holds the above-threshold pairs in row-major upper-triangular order and
/// the number of compared pairs that fell at or below the threshold. A
/// default matrix is unbuilt: it has no data and refuses to report a
/// distribution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SimilarityMatrix {
    entries: Vec<SimilarityEntry>,
    zero_count: u64,
    sentences: usize,
    finished: bool,
}

impl SimilarityMatrix {
    pub(crate) fn finished(entries: Vec<SimilarityEntry>, zero_count: u64, sentences: usize) -> Self {
        Self {
            entries,
            zero_count,
            sentences,
            finished: true,
        }
    }

    pub fn entries(&self) -> &[SimilarityEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<SimilarityEntry> {
        self.entries
    }

    pub fn zero_count(&self) -> u64 {
        self.zero_count
    }

    /// Size of the compared working set.
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pairs compared, stored or not.
    pub fn compared_pairs(&self) -> u64 {
        self.zero_count + self.entries.len() as u64
    }

    /// Share of compared pairs per score bucket.
    ///
    /// Bucket 0 also absorbs every below-threshold pair. A score of exactly
    /// 1.0 lands in the last bucket.
    pub fn distribution(&self, buckets: usize) -> Result<Vec<f64>, SimilarityError> {
        if buckets == 0 {
            return Err(SimilarityError::InvalidBuckets);
        }
        if !self.finished {
            return Err(SimilarityError::NotFinished);
        }

        let mut counts = vec![0u64; buckets];
        counts[0] = self.zero_count;
        for entry in &self.entries {
            let position = (entry.score.max(0.0) * buckets as f32) as usize;
            counts[position.min(buckets - 1)] += 1;
        }

        let total = self.compared_pairs();
        if total == 0 {
            return Ok(vec![0.0; buckets]);
        }
        Ok(counts.into_iter().map(|c| c as f64 / total as f64).collect())
    }
}

impl fmt::Display for SimilarityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Ok(distribution) = self.distribution(REPORT_ENTRIES) else {
            return f.write_str("There is no data!");
        };

        writeln!(f, "Distribution: {distribution:?}")?;
        f.write_str("Similarities:")?;
        for entry in self.entries.iter().take(REPORT_ENTRIES) {
            write!(f, "\n{entry}")?;
        }
        if self.entries.len() > REPORT_ENTRIES {
            f.write_str("\n(.....)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(scores: &[f32], zero_count: u64) -> SimilarityMatrix {
        let entries = scores
            .iter()
            .enumerate()
            .map(|(i, &s)| SimilarityEntry::new(0, i as i64 + 1, s))
            .collect();
        SimilarityMatrix::finished(entries, zero_count, scores.len() + 1)
    }

    #[test]
    fn zero_buckets_is_an_error() {
        assert_eq!(matrix(&[0.5], 0).distribution(0), Err(SimilarityError::InvalidBuckets));
    }

    #[test]
    fn unbuilt_matrix_has_no_distribution() {
        let m = SimilarityMatrix::default();
        assert_eq!(m.distribution(10), Err(SimilarityError::NotFinished));
        assert_eq!(m.to_string(), "There is no data!");
    }

    #[test]
    fn zero_count_lands_in_first_bucket() {
        let dist = matrix(&[0.95, 1.0, 0.55], 1).distribution(10).expect("built");
        assert_eq!(dist[0], 0.25);
        assert_eq!(dist[5], 0.25);
        assert_eq!(dist[9], 0.5);
        let sum: f64 = dist.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn no_pairs_gives_all_zero_distribution() {
        let dist = matrix(&[], 0).distribution(4).expect("built");
        assert_eq!(dist, vec![0.0; 4]);
    }

    #[test]
    fn display_truncates_after_ten_entries() {
        let scores = vec![0.5f32; 12];
        let text = matrix(&scores, 0).to_string();
        assert!(text.starts_with("Distribution: [0.0, 0.0, 0.0, 0.0, 0.0, 1.0,"));
        assert!(text.contains("Similarities:\n(0|1) : 0.5"));
        assert!(text.ends_with("(0|10) : 0.5\n(.....)"));
        assert!(!text.contains("(0|11)"));
    }

    #[test]
    fn display_without_truncation_has_no_marker() {
        let text = matrix(&[0.5, 0.25], 3).to_string();
        assert!(text.ends_with("(0|2) : 0.25"));
        assert!(!text.contains("(.....)"));
    }
}
