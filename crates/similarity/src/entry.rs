use std::fmt;
use std::hash::{Hash, Hasher};

use canonical::SentenceId;
use serde::{Deserialize, Serialize};

/// One stored edge of the similarity graph.
///
/// `sentence_a` comes from the earlier position of the compared set. Two
/// entries are equal when they join the same two sentences, in either order;
/// the score takes no part in equality or hashing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimilarityEntry {
    pub sentence_a: SentenceId,
    pub sentence_b: SentenceId,
    pub score: f32,
}

impl SimilarityEntry {
    pub fn new(sentence_a: SentenceId, sentence_b: SentenceId, score: f32) -> Self {
        Self {
            sentence_a,
            sentence_b,
            score,
        }
    }

    /// The id pair with the smaller id first.
    pub fn unordered_pair(&self) -> (SentenceId, SentenceId) {
        if self.sentence_a <= self.sentence_b {
            (self.sentence_a, self.sentence_b)
        } else {
            (self.sentence_b, self.sentence_a)
        }
    }
}

impl PartialEq for SimilarityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.unordered_pair() == other.unordered_pair()
    }
}

impl Eq for SimilarityEntry {}

impl Hash for SimilarityEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.unordered_pair().hash(state);
    }
}

impl fmt::Display for SimilarityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}|{}) : {}", self.sentence_a, self.sentence_b, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn equality_ignores_order_and_score() {
        let a = SimilarityEntry::new(4, 9, 0.5);
        let b = SimilarityEntry::new(9, 4, 0.9);
        assert_eq!(a, b);
        assert_ne!(a, SimilarityEntry::new(4, 8, 0.5));
    }

    #[test]
    fn set_keeps_one_entry_per_pair() {
        let set: HashSet<SimilarityEntry> = [
            SimilarityEntry::new(1, 2, 0.1),
            SimilarityEntry::new(2, 1, 0.2),
            SimilarityEntry::new(1, 3, 0.3),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display_matches_report_format() {
        assert_eq!(SimilarityEntry::new(1, 2, 0.5).to_string(), "(1|2) : 0.5");
    }
}
