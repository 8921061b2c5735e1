//! The tokenized sentence type shared by every downstream stage.
//!
//! A [`Sentence`] pairs an externally assigned id with its cleaned tokens
//! and the character length of the full token set. That length is fixed at
//! construction: [`Sentence::retain_tokens`] produces a derived sentence with
//! fewer tokens but the same `original_length`.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{Sentence, TokenizeConfig};
//!
//! let cfg = TokenizeConfig::default();
//! let sentence = Sentence::from_text(7, "Rust ist schnell.", &cfg);
//!
//! assert_eq!(sentence.id(), 7);
//! assert_eq!(sentence.tokens(), &["Rust", "ist", "schnell"]);
//! assert_eq!(sentence.original_length(), 14);
//!
//! let filtered = sentence.retain_tokens(|t| t != "ist");
//! assert_eq!(filtered.len(), 2);
//! assert_eq!(filtered.original_length(), 14);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TokenizeConfig;
use crate::token::{token_char_length, tokenize, Token};

/// Externally assigned sentence identifier.
pub type SentenceId = i64;

/// An immutable, tokenized sentence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sentence {
    id: SentenceId,
    tokens: Vec<Token>,
    original_length: usize,
}

impl Sentence {
    /// Tokenizes `text` and records the character length of the result.
    pub fn from_text(id: SentenceId, text: &str, cfg: &TokenizeConfig) -> Self {
        Self::from_tokens(id, tokenize(text, cfg))
    }

    /// Builds a sentence from tokens that are already clean.
    pub fn from_tokens(id: SentenceId, tokens: Vec<Token>) -> Self {
        let original_length = token_char_length(&tokens);
        Self {
            id,
            tokens,
            original_length,
        }
    }

    /// Builds a sentence that carries the length of the sentence it was
    /// derived from rather than the length of `tokens`.
    pub fn with_original_length(id: SentenceId, original_length: usize, tokens: Vec<Token>) -> Self {
        Self {
            id,
            tokens,
            original_length,
        }
    }

    /// Derives a sentence keeping only the tokens accepted by `keep`.
    pub fn retain_tokens<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        let tokens = self
            .tokens
            .iter()
            .filter(|t| keep(t.as_str()))
            .cloned()
            .collect();
        Self::with_original_length(self.id, self.original_length, tokens)
    }

    pub fn id(&self) -> SentenceId {
        self.id
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Character length of the token set this sentence was created from.
    pub fn original_length(&self) -> usize {
        self.original_length
    }

    /// Number of tokens currently held.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }
}

impl<'a> IntoIterator for &'a Sentence {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

/// Renders the tokens joined by single spaces.
impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

/// Tokenizes a batch of `(id, text)` records in input order.
pub fn tokenize_records<I, S>(records: I, cfg: &TokenizeConfig) -> Vec<Sentence>
where
    I: IntoIterator<Item = (SentenceId, S)>,
    S: AsRef<str>,
{
    records
        .into_iter()
        .map(|(id, text)| Sentence::from_text(id, text.as_ref(), cfg))
        .collect()
}
