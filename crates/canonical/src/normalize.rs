//! Sentence-level string transforms applied before splitting.
//!
//! Each function is a pure `&str -> String` transform. [`normalize_sentence`]
//! chains them in the fixed order the tokenizer relies on:
//!
//! 1. [`strip_marks`]
//! 2. lowercasing (when `ignore_cases` is set)
//! 3. [`edit_umlauts`] (when `edit_umlauts` is set)
//! 4. [`collapse_double_space`]
//!
//! # Examples
//!
//! ```rust
//! use canonical::{normalize_sentence, TokenizeConfig};
//!
//! let cfg = TokenizeConfig::new().with_ignore_cases(true);
//! assert_eq!(normalize_sentence("Grüße, (Welt)!", &cfg), "grüße welt");
//! ```

use crate::config::TokenizeConfig;

/// Punctuation and structural marks removed from every sentence.
///
/// Removal is by literal substring, so `->` disappears as a unit while a
/// lone `-` or `>` survives.
pub const STRIPPED_MARKS: &[&str] = &[
    "\"", "?", "!", ",", ";", "(", ")", "[", "]", "{", "}", "->", "%", "&", "+",
];

const UMLAUTS: &[(&str, &str)] = &[
    ("Ä", "Ae"),
    ("Ö", "Oe"),
    ("Ü", "Ue"),
    ("ä", "ae"),
    ("ö", "oe"),
    ("ü", "ue"),
    ("ß", "ss"),
];

/// Removes every occurrence of each entry in [`STRIPPED_MARKS`].
pub fn strip_marks(text: &str) -> String {
    let mut out = text.to_string();
    for mark in STRIPPED_MARKS {
        if out.contains(mark) {
            out = out.replace(mark, "");
        }
    }
    out
}

/// Transliterates German umlauts and `ß` into their ASCII digraphs.
pub fn edit_umlauts(text: &str) -> String {
    let mut out = text.to_string();
    for (umlaut, replacement) in UMLAUTS {
        if out.contains(umlaut) {
            out = out.replace(umlaut, replacement);
        }
    }
    out
}

/// Replaces the first double space with a single space, exactly once.
///
/// Runs of three or more spaces are not fully collapsed; the empty tokens
/// they leave behind after splitting are dropped by the token cleanup.
pub fn collapse_double_space(text: &str) -> String {
    text.replacen("  ", " ", 1)
}

/// Applies the sentence-level transforms in tokenizer order.
pub fn normalize_sentence(text: &str, cfg: &TokenizeConfig) -> String {
    let mut sentence = strip_marks(text);
    if cfg.ignore_cases {
        sentence = sentence.to_lowercase();
    }
    if cfg.edit_umlauts {
        sentence = edit_umlauts(&sentence);
    }
    collapse_double_space(&sentence)
}
