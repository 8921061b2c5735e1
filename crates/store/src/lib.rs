//! # sentgraph store
//!
//! Persistence for one corpus: raw sentence records, the corpus word
//! frequency table and the similarity graph. The pipeline only talks to the
//! [`CorpusStore`] trait; two backends ship with the crate:
//!
//! - [`InMemoryStore`] keeps everything in `RwLock`ed maps (tests, one-shot runs)
//! - `RedbStore` keeps each corpus in one redb file (feature `backend-redb`,
//!   enabled by default)
//!
//! Backends are chosen at runtime through [`StoreConfig`].
//!
//! ```
//! use store::{CorpusStore, SentenceRecord, StoreConfig, Table};
//!
//! let store = StoreConfig::in_memory().build().unwrap();
//! store.put_sentences(&[SentenceRecord::new(1, "Der Hund bellt.")]).unwrap();
//! assert!(!store.is_empty(Table::Sentences).unwrap());
//! ```

use std::fmt;

use canonical::SentenceId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod backend;

pub use crate::backend::{CorpusStore, InMemoryStore, StoreConfig};

#[cfg(feature = "backend-redb")]
pub use crate::backend::RedbStore;

/// A raw sentence as imported into a corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SentenceRecord {
    pub id: SentenceId,
    pub text: String,
}

impl SentenceRecord {
    pub fn new(id: SentenceId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

/// The three tables a corpus store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Sentences,
    WordFrequency,
    SentenceSimilarity,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Sentences, Table::WordFrequency, Table::SentenceSimilarity];

    pub fn name(&self) -> &'static str {
        match self {
            Table::Sentences => "sentences",
            Table::WordFrequency => "word_frequency",
            Table::SentenceSimilarity => "sentence_similarity",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors returned by store backends.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An insert that must carry data was called with none.
    #[error("refusing to write an empty {0} table")]
    EmptyInput(Table),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("invalid limit {0}; expected at least 1")]
    InvalidLimit(usize),

    #[error("codec error: {0}")]
    Codec(String),
}

impl StoreError {
    pub fn backend<E: fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }

    pub fn codec<E: fmt::Display>(err: E) -> Self {
        Self::Codec(err.to_string())
    }
}

pub(crate) fn check_limit(limit: Option<usize>) -> Result<usize, StoreError> {
    match limit {
        Some(0) => Err(StoreError::InvalidLimit(0)),
        Some(n) => Ok(n),
        None => Ok(usize::MAX),
    }
}
