use crate::config::TokenizeConfig;
use crate::normalize::normalize_sentence;

/// A cleaned word unit.
pub type Token = String;

/// Tokenizes a raw sentence into cleaned word tokens.
///
/// The sentence is normalized (see [`normalize_sentence`]), split on single
/// spaces, and every piece is run through [`clean_token`]. Pieces the cleanup
/// rejects are dropped. Never fails: malformed text just yields fewer tokens.
pub fn tokenize(text: &str, cfg: &TokenizeConfig) -> Vec<Token> {
    let sentence = normalize_sentence(text, cfg);
    sentence.split(' ').filter_map(clean_token).collect()
}

/// Sum of the character lengths of `tokens`.
pub fn token_char_length<S: AsRef<str>>(tokens: &[S]) -> usize {
    tokens.iter().map(|t| t.as_ref().chars().count()).sum()
}

/// Runs the per-token cleanup cascade. Returns `None` when the token is
/// dropped.
///
/// The rules run in a fixed order and each one sees the output of the
/// previous rule:
///
/// | pattern                   | action                 |
/// |---------------------------|------------------------|
/// | `-` + word chars          | strip the leading `-`  |
/// | `:` + word chars          | strip the `:`          |
/// | word chars + `:`          | strip the `:`          |
/// | letters/hyphens + `.`     | strip the `.`          |
/// | 3–10 digits + `.`         | strip the `.`          |
/// | `dd:dd`                   | drop                   |
/// | empty or a lone space     | drop                   |
/// | fewer than 2 chars        | drop                   |
///
/// Word chars are ASCII letters, digits and `_`.
///
/// ```rust
/// use canonical::clean_token;
///
/// assert_eq!(clean_token("-abc"), Some("abc".to_string()));
/// assert_eq!(clean_token("Haus."), Some("Haus".to_string()));
/// assert_eq!(clean_token("12:30"), None);
/// assert_eq!(clean_token("a"), None);
/// ```
pub fn clean_token(raw: &str) -> Option<Token> {
    let mut word = raw;

    if let Some(rest) = word.strip_prefix('-') {
        if all_word_chars(rest) {
            word = rest;
        }
    }
    if let Some(rest) = word.strip_prefix(':') {
        if all_word_chars(rest) {
            word = rest;
        }
    }
    if let Some(head) = word.strip_suffix(':') {
        if all_word_chars(head) {
            word = head;
        }
    }
    if let Some(head) = word.strip_suffix('.') {
        if !head.is_empty() && head.chars().all(|c| c.is_ascii_alphabetic() || c == '-') {
            word = head;
        }
    }
    if let Some(head) = word.strip_suffix('.') {
        if (3..=10).contains(&head.len()) && head.chars().all(|c| c.is_ascii_digit()) {
            word = head;
        }
    }

    if is_clock_time(word) || word.is_empty() || word == " " {
        return None;
    }
    if word.chars().count() < 2 {
        return None;
    }
    Some(word.to_string())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn all_word_chars(s: &str) -> bool {
    s.chars().all(is_word_char)
}

fn is_clock_time(word: &str) -> bool {
    let bytes = word.as_bytes();
    bytes.len() == 5
        && bytes[2] == b':'
        && [0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit())
}
