//! Error types for the alignment engine
//!
//! Validation failures and redistribution failures are both recoverable: the
//! `Display` text of every variant is meant to be shown to the user as-is and
//! always names every offending word.

use thiserror::Error;

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;

#[derive(Error, Debug)]
pub enum AlignError {
    /// Natural translation is blank but alignments were supplied
    #[error("Natural translation is empty, but word alignments are present")]
    EmptyNaturalTranslation,

    /// Natural translation has words but no alignment covers them
    #[error("No word alignments present")]
    NoAlignments,

    /// Word set of the alignments differs from the natural translation
    #[error("{}", incomplete_message(.missing, .extra))]
    IncompleteAlignment {
        missing: Vec<String>,
        extra: Vec<String>,
    },

    /// Source words whose target word is empty or whitespace only
    #[error("Source words without a target word: {}", quoted(.0))]
    UnmappedSourceWords(Vec<String>),

    /// Merged natural translation did not split into one sentence per source
    #[error(
        "Natural translation split into {actual} sentences but expected {expected}. Natural: {natural_sentences:?}"
    )]
    SentenceCountMismatch {
        expected: usize,
        actual: usize,
        natural_sentences: Vec<String>,
    },

    /// Alignment source token drifted out of sync with the requested sentence
    #[error(
        "Could not match source_word '{found}' to word {position} ('{expected}') of source sentence {sentence_index}"
    )]
    SourceWordMismatch {
        sentence_index: usize,
        position: usize,
        expected: String,
        found: String,
    },

    /// Ran out of alignments before a source sentence was fully covered
    #[error(
        "Source sentence {sentence_index} needs {needed} alignments but only {remaining} remain"
    )]
    AlignmentsExhausted {
        sentence_index: usize,
        needed: usize,
        remaining: usize,
    },

    /// Alignments left over after every source sentence was consumed
    #[error("Alignments not belonging to any source sentence: {}", quoted(.0))]
    UnconsumedAlignments(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AlignError {
    /// Whether this error came out of one of the alignment validators
    pub fn is_validation_failure(&self) -> bool {
        matches!(
            self,
            AlignError::EmptyNaturalTranslation
                | AlignError::NoAlignments
                | AlignError::IncompleteAlignment { .. }
                | AlignError::UnmappedSourceWords(_)
        )
    }

    /// Whether this error came out of merged-response redistribution.
    /// Callers recover by translating each source sentence on its own.
    pub fn is_redistribution_failure(&self) -> bool {
        matches!(
            self,
            AlignError::SentenceCountMismatch { .. }
                | AlignError::SourceWordMismatch { .. }
                | AlignError::AlignmentsExhausted { .. }
                | AlignError::UnconsumedAlignments(_)
        )
    }
}

fn quoted(words: &[String]) -> String {
    words
        .iter()
        .map(|w| format!("'{}'", w))
        .collect::<Vec<_>>()
        .join(", ")
}

fn incomplete_message(missing: &[String], extra: &[String]) -> String {
    match (missing.is_empty(), extra.is_empty()) {
        (false, false) => format!(
            "Missing words: {}; Extra words: {}. The word-by-word translation must use ALL words of the natural translation (no compound words where the natural translation keeps them separate).",
            missing.join(", "),
            extra.join(", ")
        ),
        (false, true) => format!(
            "Missing words: {}. These words from the natural translation are missing from the word alignments.",
            missing.join(", ")
        ),
        (true, false) => format!(
            "Extra words: {}. These words are in the alignments but not in the natural translation.",
            extra.join(", ")
        ),
        (true, true) => "Alignment is incomplete".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_message_names_both_sides() {
        let err = AlignError::IncompleteAlignment {
            missing: vec!["dich".to_string(), "ich".to_string()],
            extra: vec!["du".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Missing words: dich, ich; Extra words: du."));
    }

    #[test]
    fn test_unmapped_words_are_quoted_in_order() {
        let err = AlignError::UnmappedSourceWords(vec!["no".to_string(), "es".to_string()]);
        assert_eq!(
            err.to_string(),
            "Source words without a target word: 'no', 'es'"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(AlignError::NoAlignments.is_validation_failure());
        assert!(!AlignError::NoAlignments.is_redistribution_failure());

        let err = AlignError::SentenceCountMismatch {
            expected: 2,
            actual: 1,
            natural_sentences: vec!["Eins.".to_string()],
        };
        assert!(err.is_redistribution_failure());
        assert!(err.to_string().contains("split into 1 sentences but expected 2"));
    }
}
