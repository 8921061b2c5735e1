//! redb backed corpus store.
//!
//! One database file holds one corpus:
//!
//! | table                 | key          | value                     |
//! |-----------------------|--------------|---------------------------|
//! | `sentences`           | `i64` id     | sentence text             |
//! | `word_frequency`      | word         | `u64` count               |
//! | `sentence_similarity` | `(min, max)` | JSON encoded entry        |
//!
//! Every call runs in its own transaction; writes are durable on return.

use std::path::Path;
use std::sync::Arc;

use canonical::SentenceId;
use frequency::FrequencyTable;
use redb::{Database, Key, ReadTransaction, ReadableDatabase, ReadableTable, TableDefinition, Value, WriteTransaction};
use similarity::SimilarityEntry;
use tracing::info;

use crate::backend::CorpusStore;
use crate::{check_limit, SentenceRecord, StoreError, Table};

const SENTENCES: TableDefinition<i64, &str> = TableDefinition::new("sentences");
const WORD_FREQUENCY: TableDefinition<&str, u64> = TableDefinition::new("word_frequency");
const SENTENCE_SIMILARITY: TableDefinition<(i64, i64), &[u8]> =
    TableDefinition::new("sentence_similarity");

/// Corpus store persisted in a redb file.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Opens the database at `path`, creating the file and its tables when
    /// missing.
    ///
    /// ```no_run
    /// use store::RedbStore;
    ///
    /// let store = RedbStore::open("/tmp/news.redb").unwrap();
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let db = Database::create(path).map_err(StoreError::backend)?;

        let write_txn = db.begin_write().map_err(StoreError::backend)?;
        {
            write_txn.open_table(SENTENCES).map_err(StoreError::backend)?;
            write_txn.open_table(WORD_FREQUENCY).map_err(StoreError::backend)?;
            write_txn
                .open_table(SENTENCE_SIMILARITY)
                .map_err(StoreError::backend)?;
        }
        write_txn.commit().map_err(StoreError::backend)?;

        Ok(Self { db: Arc::new(db) })
    }

    fn read(&self) -> Result<ReadTransaction, StoreError> {
        self.db.begin_read().map_err(StoreError::backend)
    }

    fn write(&self) -> Result<WriteTransaction, StoreError> {
        self.db.begin_write().map_err(StoreError::backend)
    }
}

fn table_is_empty<K: Key + 'static, V: Value + 'static>(
    txn: &ReadTransaction,
    definition: TableDefinition<K, V>,
) -> Result<bool, StoreError> {
    let table = txn.open_table(definition).map_err(StoreError::backend)?;
    let mut iter = table.iter().map_err(StoreError::backend)?;
    let empty = iter.next().is_none();
    Ok(empty)
}

// Dropping and reopening leaves an empty table behind in the same transaction.
fn reset_table<K: Key + 'static, V: Value + 'static>(
    txn: &WriteTransaction,
    definition: TableDefinition<K, V>,
) -> Result<(), StoreError> {
    txn.delete_table(definition).map_err(StoreError::backend)?;
    txn.open_table(definition).map_err(StoreError::backend)?;
    Ok(())
}

impl CorpusStore for RedbStore {
    fn sentences(&self, limit: Option<usize>) -> Result<Vec<SentenceRecord>, StoreError> {
        let limit = check_limit(limit)?;
        let read_txn = self.read()?;
        let table = read_txn.open_table(SENTENCES).map_err(StoreError::backend)?;

        let mut records = Vec::new();
        for item in table.iter().map_err(StoreError::backend)?.take(limit) {
            let (id, text) = item.map_err(StoreError::backend)?;
            records.push(SentenceRecord::new(id.value(), text.value()));
        }
        Ok(records)
    }

    fn sentence_by_id(&self, id: SentenceId) -> Result<Option<SentenceRecord>, StoreError> {
        let read_txn = self.read()?;
        let table = read_txn.open_table(SENTENCES).map_err(StoreError::backend)?;
        let record = table
            .get(id)
            .map_err(StoreError::backend)?
            .map(|text| SentenceRecord::new(id, text.value()));
        Ok(record)
    }

    fn put_sentences(&self, records: &[SentenceRecord]) -> Result<usize, StoreError> {
        let write_txn = self.write()?;
        {
            let mut table = write_txn.open_table(SENTENCES).map_err(StoreError::backend)?;
            for record in records {
                table
                    .insert(record.id, record.text.as_str())
                    .map_err(StoreError::backend)?;
            }
        }
        write_txn.commit().map_err(StoreError::backend)?;
        Ok(records.len())
    }

    fn is_empty(&self, table: Table) -> Result<bool, StoreError> {
        let read_txn = self.read()?;
        match table {
            Table::Sentences => table_is_empty(&read_txn, SENTENCES),
            Table::WordFrequency => table_is_empty(&read_txn, WORD_FREQUENCY),
            Table::SentenceSimilarity => table_is_empty(&read_txn, SENTENCE_SIMILARITY),
        }
    }

    fn clear(&self, table: Table) -> Result<(), StoreError> {
        let write_txn = self.write()?;
        match table {
            Table::Sentences => reset_table(&write_txn, SENTENCES)?,
            Table::WordFrequency => reset_table(&write_txn, WORD_FREQUENCY)?,
            Table::SentenceSimilarity => reset_table(&write_txn, SENTENCE_SIMILARITY)?,
        }
        write_txn.commit().map_err(StoreError::backend)
    }

    fn replace_frequencies(&self, frequencies: &FrequencyTable) -> Result<(), StoreError> {
        if frequencies.is_empty() {
            return Err(StoreError::EmptyInput(Table::WordFrequency));
        }

        let write_txn = self.write()?;
        reset_table(&write_txn, WORD_FREQUENCY)?;
        {
            let mut table = write_txn
                .open_table(WORD_FREQUENCY)
                .map_err(StoreError::backend)?;
            for (word, count) in frequencies.iter() {
                table.insert(word, count).map_err(StoreError::backend)?;
            }
        }
        write_txn.commit().map_err(StoreError::backend)?;

        info!(words = frequencies.len(), backend = "redb", "frequencies_replaced");
        Ok(())
    }

    fn frequencies(&self) -> Result<FrequencyTable, StoreError> {
        let read_txn = self.read()?;
        let table = read_txn
            .open_table(WORD_FREQUENCY)
            .map_err(StoreError::backend)?;

        let mut frequencies = FrequencyTable::new();
        for item in table.iter().map_err(StoreError::backend)? {
            let (word, count) = item.map_err(StoreError::backend)?;
            frequencies.insert(word.value(), count.value());
        }
        Ok(frequencies)
    }

    fn upsert_similarities(&self, entries: &[SimilarityEntry]) -> Result<(), StoreError> {
        if entries.is_empty() {
            return Err(StoreError::EmptyInput(Table::SentenceSimilarity));
        }

        let write_txn = self.write()?;
        {
            let mut table = write_txn
                .open_table(SENTENCE_SIMILARITY)
                .map_err(StoreError::backend)?;
            for entry in entries {
                let encoded = serde_json::to_vec(entry).map_err(StoreError::codec)?;
                table
                    .insert(entry.unordered_pair(), encoded.as_slice())
                    .map_err(StoreError::backend)?;
            }
        }
        write_txn.commit().map_err(StoreError::backend)?;

        info!(entries = entries.len(), backend = "redb", "similarities_upserted");
        Ok(())
    }

    fn similarities(&self) -> Result<Vec<SimilarityEntry>, StoreError> {
        let read_txn = self.read()?;
        let table = read_txn
            .open_table(SENTENCE_SIMILARITY)
            .map_err(StoreError::backend)?;

        let mut entries = Vec::new();
        for item in table.iter().map_err(StoreError::backend)? {
            let (_, value) = item.map_err(StoreError::backend)?;
            entries.push(serde_json::from_slice(value.value()).map_err(StoreError::codec)?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn redb_store_honours_the_contract() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = RedbStore::open(temp_file.path()).unwrap();
        crate::contract::exercise(&store);
    }

    #[test]
    fn data_survives_reopening() {
        let temp_file = NamedTempFile::new().unwrap();
        {
            let store = RedbStore::open(temp_file.path()).unwrap();
            store
                .put_sentences(&[SentenceRecord::new(5, "Ein Satz.")])
                .unwrap();
            let table: FrequencyTable = [("satz", 2)].into_iter().collect();
            store.replace_frequencies(&table).unwrap();
        }

        let store = RedbStore::open(temp_file.path()).unwrap();
        assert_eq!(
            store.sentence_by_id(5).unwrap(),
            Some(SentenceRecord::new(5, "Ein Satz."))
        );
        assert_eq!(store.frequencies().unwrap().get("satz"), Some(2));
    }

    #[test]
    fn config_builds_redb_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::StoreConfig::redb(dir.path().join("corpus.redb"))
            .build()
            .unwrap();
        assert!(store.is_empty(Table::WordFrequency).unwrap());
    }

    #[test]
    fn corrupt_similarity_value_is_a_codec_error() {
        let temp_file = NamedTempFile::new().unwrap();
        let store = RedbStore::open(temp_file.path()).unwrap();
        let write_txn = store.write().unwrap();
        {
            let mut table = write_txn.open_table(SENTENCE_SIMILARITY).unwrap();
            table.insert((1i64, 2i64), b"not json".as_slice()).unwrap();
        }
        write_txn.commit().unwrap();

        assert!(matches!(store.similarities(), Err(StoreError::Codec(_))));
    }
}
