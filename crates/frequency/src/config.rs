//! Configuration and error types for word counting and vocabulary reduction.
//!
//! Both are free of I/O: the counter and reducers are pure functions of
//! `(input, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options for [`count_words`](crate::count_words).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CountConfig {
    /// Count only tokens whose first character is uppercase.
    ///
    /// Meant for German text, where nouns are capitalized. Pointless together
    /// with case folding in the tokenizer, which is why the configuration
    /// surface exposes the two as one `filter` choice.
    #[serde(default)]
    pub only_nouns: bool,
}

impl CountConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only_nouns(mut self, only_nouns: bool) -> Self {
        self.only_nouns = only_nouns;
        self
    }
}

/// Errors returned by the frequency stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FrequencyError {
    /// The confidence-band search has no way to reach its target.
    #[error("degenerate computation: {0}")]
    DegenerateComputation(String),

    #[error("invalid frequency range: lower {lower} > upper {upper}")]
    InvalidRange { lower: u64, upper: u64 },
}
