//! Text normalization for comparing natural translations with word alignments
//!
//! Every function here is pure and total: any input string, including the
//! empty string, yields a (possibly empty) result.
//!
//! Two flavours of tokenisation exist side by side:
//! - *normalized* words (lowercased, punctuation stripped) used for validation
//! - *display* tokens (original case, whitespace split) used by editing views

use regex::Regex;
use std::sync::LazyLock;

/// Anything that is not a word character, whitespace, apostrophe or hyphen
static NON_WORD_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s'\-]").expect("valid non-word text regex"));

/// Anything that is not a word character, apostrophe or hyphen
static NON_WORD_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w'\-]").expect("valid non-word part regex"));

/// Leading or trailing characters that are neither word characters nor apostrophes
static EDGE_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\w']+|[^\w']+$").expect("valid edge punctuation regex"));

static TRAILING_PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w]+$").expect("valid trailing punctuation regex"));

/// Sentence terminator followed by whitespace. The upper-case check on the
/// following character is done by hand since the regex crate has no lookahead.
static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence break regex"));

/// Extract comparable words: drop punctuation (apostrophes and hyphens are
/// kept), lowercase, split on whitespace.
///
/// # Example
/// ```
/// use birkenbihl_align::text::extract_normalized_words;
///
/// assert_eq!(
///     extract_normalized_words("Don't worry-free!"),
///     vec!["don't", "worry-free"]
/// );
/// ```
pub fn extract_normalized_words(text: &str) -> Vec<String> {
    NON_WORD_TEXT
        .replace_all(text, "")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Split a compound target word on `-` and strip punctuation from each part.
///
/// `"werde-vermissen"` becomes `["werde", "vermissen"]`, `"hello!"` becomes
/// `["hello"]` and a token made only of punctuation becomes `[]`.
pub fn split_hyphenated(word: &str) -> Vec<String> {
    word.split('-')
        .map(|part| NON_WORD_PART.replace_all(part, "").into_owned())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Whitespace-only split keeping case and punctuation, for display
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Whitespace split with surrounding punctuation removed from each token.
/// Apostrophes and inner hyphens survive, case is kept.
pub fn tokenize_clean(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|word| EDGE_PUNCTUATION.replace_all(word, "").into_owned())
        .filter(|word| !word.is_empty())
        .collect()
}

/// Trim and lowercase a single word so tokens from different sources compare equal
pub fn normalize_word_for_matching(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Separate a display token into the word and its trailing punctuation.
///
/// `"world!"` gives `("world", "!")`, `"test"` gives `("test", "")`.
pub fn clean_trailing_punctuation(word: &str) -> (String, String) {
    match TRAILING_PUNCTUATION.find(word) {
        Some(m) => (word[..m.start()].to_string(), m.as_str().to_string()),
        None => (word.to_string(), String::new()),
    }
}

/// Split text into sentences after `.`, `!` or `?` when the terminator is
/// followed by whitespace and an upper-case letter. Terminators stay with
/// their sentence; abbreviations followed by lower case (`"z.B. das"`) do not
/// split.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        let starts_upper = text[m.end()..]
            .chars()
            .next()
            .is_some_and(char::is_uppercase);
        if !starts_upper {
            continue;
        }
        // Terminators are single-byte ASCII, so the sentence ends right after it
        sentences.push(text[start..m.start() + 1].trim().to_string());
        start = m.end();
    }
    sentences.push(text[start..].trim().to_string());

    sentences.retain(|s| !s.is_empty());
    sentences
}
