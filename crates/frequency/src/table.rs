//! Word → count and word → weight tables.

use std::collections::hash_map;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Corpus-wide word occurrence counts.
///
/// Tables produced by [`count_words`](crate::count_words) never contain a
/// word with count 1. Tables read back from a store may hold any count ≥ 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments `word`, starting at 1 on first sight.
    pub fn increment(&mut self, word: &str) {
        match self.counts.get_mut(word) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(word.to_string(), 1);
            }
        }
    }

    /// Sets the count for `word`, replacing any previous value.
    pub fn insert(&mut self, word: impl Into<String>, count: u64) {
        self.counts.insert(word.into(), count);
    }

    pub fn get(&self, word: &str) -> Option<u64> {
        self.counts.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Highest count in the table, 0 when empty.
    pub fn max_frequency(&self) -> u64 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// Removes every word whose count is exactly 1 and returns how many went.
    pub fn remove_singletons(&mut self) -> usize {
        let before = self.counts.len();
        self.counts.retain(|_, count| *count != 1);
        before - self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// `(word, count)` pairs sorted by count, then word.
    pub fn sorted_by_frequency(&self) -> Vec<(&str, u64)> {
        let mut pairs: Vec<(&str, u64)> = self.iter().collect();
        pairs.sort_unstable_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        pairs
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().map(|(w, c)| (w.into(), c)).collect(),
        }
    }
}

impl IntoIterator for FrequencyTable {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Per-word relative weights of the informative vocabulary.
///
/// Values are `frequency / denominator` where the denominator depends on the
/// reduction policy. They are weights, not a distribution, and need not sum
/// to 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct VocabularyWeights {
    weights: HashMap<String, f64>,
}

impl VocabularyWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: impl Into<String>, weight: f64) {
        self.weights.insert(word.into(), weight);
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.weights.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.weights.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(w, p)| (w.as_str(), *p))
    }

    /// Merges `other` into `self`; `other` wins on shared words.
    pub fn extend(&mut self, other: VocabularyWeights) {
        self.weights.extend(other.weights);
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for VocabularyWeights {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(w, p)| (w.into(), p)).collect(),
        }
    }
}
