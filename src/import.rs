//! Loading `id<TAB>text` sentence files into a corpus store.

use std::io::BufRead;

use store::{CorpusStore, SentenceRecord};
use tracing::info;

use crate::PipelineError;

/// Records are written to the store in batches of this size.
pub const IMPORT_BATCH: usize = 10_000;

/// Parses one `id<TAB>text` line. Blank lines yield `None`.
pub fn parse_sentence_line(line: &str, line_no: usize) -> Result<Option<SentenceRecord>, PipelineError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (id, text) = line.split_once('\t').ok_or_else(|| PipelineError::Import {
        line: line_no,
        reason: "expected `id<TAB>text`".to_string(),
    })?;
    let id = id.trim().parse().map_err(|err| PipelineError::Import {
        line: line_no,
        reason: format!("invalid sentence id {id:?}: {err}"),
    })?;
    Ok(Some(SentenceRecord::new(id, text)))
}

/// Reads every line of `reader` into `store`; returns the number of records
/// written. Existing sentences with the same id are overwritten.
pub fn import_sentences<R: BufRead>(store: &dyn CorpusStore, reader: R) -> Result<usize, PipelineError> {
    let mut batch = Vec::with_capacity(IMPORT_BATCH);
    let mut written = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| PipelineError::Import {
            line: index + 1,
            reason: err.to_string(),
        })?;
        if let Some(record) = parse_sentence_line(&line, index + 1)? {
            batch.push(record);
        }
        if batch.len() == IMPORT_BATCH {
            written += store.put_sentences(&batch)?;
            batch.clear();
        }
    }
    if !batch.is_empty() {
        written += store.put_sentences(&batch)?;
    }

    info!(sentences = written, "import_finished");
    Ok(written)
}
