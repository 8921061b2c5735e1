//! Pairwise sentence similarity.
//!
//! [`SimilarityEngine::build`] compares every pair of a sentence list once
//! and keeps the pairs scoring above a threshold as [`SimilarityEntry`]
//! edges. Pairs at or below the threshold are only counted, so the
//! [`SimilarityMatrix`] can still report a score distribution over all
//! compared pairs.
//!
//! Given a reduced vocabulary, sentences are first cut down to vocabulary
//! words and short remainders are dropped before comparison.
//!
//! The build is O(n²) in the working-set size. With `use_parallel` rows are
//! fanned out over rayon; the result is identical to the sequential build.
//!
//! ```rust
//! use canonical::{Sentence, TokenizeConfig};
//! use similarity::{SimilarityConfig, SimilarityEngine};
//!
//! let cfg = TokenizeConfig::default();
//! let sentences = vec![
//!     Sentence::from_text(1, "Der Hund jagt die Katze", &cfg),
//!     Sentence::from_text(2, "Der Hund jagt den Ball", &cfg),
//! ];
//! let matrix = SimilarityEngine::new(SimilarityConfig::new().with_threshold(0.3))
//!     .build(&sentences, None)
//!     .unwrap();
//! assert_eq!(matrix.entries().len(), 1);
//! ```

mod config;
mod engine;
mod entry;
mod matrix;
mod progress;

pub use crate::config::{SimilarityConfig, SimilarityError};
pub use crate::engine::{score_pair, working_set, SimilarityEngine};
pub use crate::entry::SimilarityEntry;
pub use crate::matrix::{SimilarityMatrix, REPORT_ENTRIES};
pub use crate::progress::{ProgressObserver, SilentProgress, TracingProgress};
