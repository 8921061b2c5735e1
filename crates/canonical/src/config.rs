//! Configuration types for sentence tokenization.
//!
//! [`TokenizeConfig`] holds the two switches that change what a token looks
//! like: case folding and umlaut transliteration. Everything else in the
//! cleanup cascade is fixed.
//!
//! # Examples
//!
//! ```rust
//! use canonical::TokenizeConfig;
//!
//! let config = TokenizeConfig::default();
//! assert!(!config.ignore_cases);
//! assert!(!config.edit_umlauts);
//!
//! let folded = TokenizeConfig {
//!     ignore_cases: true,
//!     ..Default::default()
//! };
//! assert!(folded.ignore_cases);
//! ```

use serde::{Deserialize, Serialize};

/// Options applied to every sentence before it is split into tokens.
///
/// The struct is cheap to copy and serde-friendly so it can be embedded in
/// higher-level configuration files:
///
/// ```json
/// {
///   "ignore_cases": true,
///   "edit_umlauts": false
/// }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TokenizeConfig {
    /// Lowercase the whole sentence before splitting.
    ///
    /// Lowercasing uses Rust's locale-free `str::to_lowercase`.
    #[serde(default)]
    pub ignore_cases: bool,

    /// Transliterate German umlauts and sharp s.
    ///
    /// ```text
    /// Ä → Ae   Ö → Oe   Ü → Ue
    /// ä → ae   ö → oe   ü → ue
    /// ß → ss
    /// ```
    ///
    /// Runs after lowercasing, so with `ignore_cases` only the lowercase
    /// forms are ever seen.
    #[serde(default)]
    pub edit_umlauts: bool,
}

impl TokenizeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ignore_cases(mut self, ignore_cases: bool) -> Self {
        self.ignore_cases = ignore_cases;
        self
    }

    pub fn with_edit_umlauts(mut self, edit_umlauts: bool) -> Self {
        self.edit_umlauts = edit_umlauts;
        self
    }
}
