//! Configuration and error types for the similarity build.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for [`SimilarityEngine`](crate::SimilarityEngine).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Pairs scoring at or below this value are only counted, not stored.
    pub threshold: f64,
    /// With a vocabulary, sentences keeping fewer tokens than this are left
    /// out of the comparison entirely.
    pub minimum_match_length: usize,
    /// Score rows on the rayon pool.
    pub use_parallel: bool,
    /// Fraction of the total pair count between two progress reports.
    pub progress_step: f64,
}

impl SimilarityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_minimum_match_length(mut self, minimum_match_length: usize) -> Self {
        self.minimum_match_length = minimum_match_length;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_progress_step(mut self, progress_step: f64) -> Self {
        self.progress_step = progress_step;
        self
    }

    pub fn validate(&self) -> Result<(), SimilarityError> {
        if !self.threshold.is_finite() {
            return Err(SimilarityError::InvalidThreshold(self.threshold));
        }
        if !(self.progress_step > 0.0 && self.progress_step <= 1.0) {
            return Err(SimilarityError::InvalidProgressStep(self.progress_step));
        }
        Ok(())
    }
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            minimum_match_length: 0,
            use_parallel: false,
            progress_step: 0.05,
        }
    }
}

/// Errors returned by the similarity stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimilarityError {
    #[error("distribution needs at least one bucket")]
    InvalidBuckets,

    #[error("similarity matrix has not been built")]
    NotFinished,

    #[error("invalid similarity threshold {0}; expected a finite number")]
    InvalidThreshold(f64),

    #[error("invalid progress step {0}; expected 0 < step <= 1")]
    InvalidProgressStep(f64),
}
