use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use canonical::{Sentence, SentenceId, TokenizeConfig};
use frequency::FrequencyTable;
use similarity::SimilarityEntry;
use tracing::info;

use crate::{check_limit, SentenceRecord, StoreError, Table};

/// Storage for one corpus.
pub trait CorpusStore: Send + Sync {
    /// Sentence records in ascending id order, at most `limit` of them.
    fn sentences(&self, limit: Option<usize>) -> Result<Vec<SentenceRecord>, StoreError>;

    fn sentence_by_id(&self, id: SentenceId) -> Result<Option<SentenceRecord>, StoreError>;

    /// Inserts or overwrites sentence records; returns how many were written.
    fn put_sentences(&self, records: &[SentenceRecord]) -> Result<usize, StoreError>;

    fn is_empty(&self, table: Table) -> Result<bool, StoreError>;

    fn clear(&self, table: Table) -> Result<(), StoreError>;

    /// Replaces the whole frequency table. An empty table is rejected.
    fn replace_frequencies(&self, table: &FrequencyTable) -> Result<(), StoreError>;

    fn frequencies(&self) -> Result<FrequencyTable, StoreError>;

    /// Writes similarity edges; an existing edge for the same unordered pair
    /// is overwritten. An empty slice is rejected.
    fn upsert_similarities(&self, entries: &[SimilarityEntry]) -> Result<(), StoreError>;

    fn similarities(&self) -> Result<Vec<SimilarityEntry>, StoreError>;

    /// Loads sentence records and tokenizes them.
    fn load_sentences(
        &self,
        limit: Option<usize>,
        cfg: &TokenizeConfig,
    ) -> Result<Vec<Sentence>, StoreError> {
        let records = self.sentences(limit)?;
        Ok(canonical::tokenize_records(
            records.iter().map(|r| (r.id, r.text.as_str())),
            cfg,
        ))
    }
}

/// Selects and builds a store backend.
///
/// ```
/// use store::StoreConfig;
///
/// let memory = StoreConfig::in_memory();
/// let disk = StoreConfig::redb("/data/news.redb");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StoreConfig {
    /// One redb database file per corpus.
    Redb { path: PathBuf },
    #[default]
    InMemory,
}

impl StoreConfig {
    pub fn in_memory() -> Self {
        StoreConfig::InMemory
    }

    pub fn redb<P: Into<PathBuf>>(path: P) -> Self {
        StoreConfig::Redb { path: path.into() }
    }

    pub fn build(&self) -> Result<Box<dyn CorpusStore>, StoreError> {
        match self {
            StoreConfig::InMemory => Ok(Box::new(InMemoryStore::new())),
            StoreConfig::Redb { path } => {
                #[cfg(feature = "backend-redb")]
                {
                    Ok(Box::new(RedbStore::open(path)?))
                }
                #[cfg(not(feature = "backend-redb"))]
                {
                    let _ = path;
                    Err(StoreError::backend("redb backend disabled at compile time"))
                }
            }
        }
    }
}

/// In-memory store over `RwLock`ed ordered maps.
#[derive(Default)]
pub struct InMemoryStore {
    sentences: RwLock<BTreeMap<SentenceId, String>>,
    frequencies: RwLock<FrequencyTable>,
    similarities: RwLock<BTreeMap<(SentenceId, SentenceId), SimilarityEntry>>,
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::backend("poisoned lock")
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CorpusStore for InMemoryStore {
    fn sentences(&self, limit: Option<usize>) -> Result<Vec<SentenceRecord>, StoreError> {
        let limit = check_limit(limit)?;
        let guard = self.sentences.read().map_err(poisoned)?;
        Ok(guard
            .iter()
            .take(limit)
            .map(|(id, text)| SentenceRecord::new(*id, text.clone()))
            .collect())
    }

    fn sentence_by_id(&self, id: SentenceId) -> Result<Option<SentenceRecord>, StoreError> {
        let guard = self.sentences.read().map_err(poisoned)?;
        Ok(guard.get(&id).map(|text| SentenceRecord::new(id, text.clone())))
    }

    fn put_sentences(&self, records: &[SentenceRecord]) -> Result<usize, StoreError> {
        let mut guard = self.sentences.write().map_err(poisoned)?;
        for record in records {
            guard.insert(record.id, record.text.clone());
        }
        Ok(records.len())
    }

    fn is_empty(&self, table: Table) -> Result<bool, StoreError> {
        Ok(match table {
            Table::Sentences => self.sentences.read().map_err(poisoned)?.is_empty(),
            Table::WordFrequency => self.frequencies.read().map_err(poisoned)?.is_empty(),
            Table::SentenceSimilarity => self.similarities.read().map_err(poisoned)?.is_empty(),
        })
    }

    fn clear(&self, table: Table) -> Result<(), StoreError> {
        match table {
            Table::Sentences => self.sentences.write().map_err(poisoned)?.clear(),
            Table::WordFrequency => *self.frequencies.write().map_err(poisoned)? = FrequencyTable::new(),
            Table::SentenceSimilarity => self.similarities.write().map_err(poisoned)?.clear(),
        }
        Ok(())
    }

    fn replace_frequencies(&self, table: &FrequencyTable) -> Result<(), StoreError> {
        if table.is_empty() {
            return Err(StoreError::EmptyInput(Table::WordFrequency));
        }
        *self.frequencies.write().map_err(poisoned)? = table.clone();
        info!(words = table.len(), backend = "in_memory", "frequencies_replaced");
        Ok(())
    }

    fn frequencies(&self) -> Result<FrequencyTable, StoreError> {
        Ok(self.frequencies.read().map_err(poisoned)?.clone())
    }

    fn upsert_similarities(&self, entries: &[SimilarityEntry]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Err(StoreError::EmptyInput(Table::SentenceSimilarity));
        }
        let mut guard = self.similarities.write().map_err(poisoned)?;
        for entry in entries {
            guard.insert(entry.unordered_pair(), *entry);
        }
        info!(entries = entries.len(), backend = "in_memory", "similarities_upserted");
        Ok(())
    }

    fn similarities(&self) -> Result<Vec<SimilarityEntry>, StoreError> {
        Ok(self.similarities.read().map_err(poisoned)?.values().copied().collect())
    }
}

#[cfg(feature = "backend-redb")]
pub mod redb;

#[cfg(feature = "backend-redb")]
pub use self::redb::RedbStore;
