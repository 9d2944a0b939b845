//! Data model shared by every component
//!
//! `WordAlignment` and `Sentence` are value objects: edits never mutate them
//! field by field, they produce a new value that replaces the old one.

use serde::{Deserialize, Serialize};

use crate::error::AlignResult;
use crate::validation::{validate_alignment_complete, validate_source_words_mapped};

/// Separator used inside `target_word` when several target words map to one source word
pub const COMPOUND_SEPARATOR: &str = "-";

/// One source word decoded into one or more target words
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordAlignment {
    pub source_word: String,
    /// May hold several words joined with `-`, e.g. `"werde-vermissen"`
    pub target_word: String,
    pub position: usize,
}

impl WordAlignment {
    pub fn new(source_word: &str, target_word: &str, position: usize) -> Self {
        WordAlignment {
            source_word: source_word.to_string(),
            target_word: target_word.to_string(),
            position,
        }
    }

    /// Whether `target_word` joins several target words
    pub fn is_compound(&self) -> bool {
        self.target_word.contains(COMPOUND_SEPARATOR)
    }
}

/// A source sentence with its natural translation and word-by-word decoding
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sentence {
    pub source_text: String,
    pub natural_translation: String,
    #[serde(default)]
    pub word_alignments: Vec<WordAlignment>,
}

impl Sentence {
    pub fn new(
        source_text: &str,
        natural_translation: &str,
        word_alignments: Vec<WordAlignment>,
    ) -> Self {
        Sentence {
            source_text: source_text.to_string(),
            natural_translation: natural_translation.to_string(),
            word_alignments,
        }
    }

    /// Alignments ordered by `position`, for read-only previews
    pub fn alignments_by_position(&self) -> Vec<&WordAlignment> {
        let mut ordered: Vec<&WordAlignment> = self.word_alignments.iter().collect();
        ordered.sort_by_key(|a| a.position);
        ordered
    }

    /// Positions run `0..n-1` in list order
    pub fn has_contiguous_positions(&self) -> bool {
        self.word_alignments
            .iter()
            .enumerate()
            .all(|(idx, a)| a.position == idx)
    }

    /// Replace the alignments wholesale, gated by both validators.
    ///
    /// Source words without targets are reported before word-set
    /// differences. On failure `self` is left untouched.
    pub fn with_alignments(&self, word_alignments: Vec<WordAlignment>) -> AlignResult<Sentence> {
        validate_source_words_mapped(&word_alignments)?;
        validate_alignment_complete(&self.natural_translation, &word_alignments)?;

        Ok(Sentence {
            source_text: self.source_text.clone(),
            natural_translation: self.natural_translation.clone(),
            word_alignments,
        })
    }
}

/// Generator response that merged several source sentences into one.
///
/// Same shape as a `Sentence`; `source_text` is whatever the generator echoed
/// back and is not trusted for splitting.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MergedTranslation {
    #[serde(default)]
    pub source_text: String,
    pub natural_translation: String,
    #[serde(default)]
    pub word_alignments: Vec<WordAlignment>,
}

impl From<Sentence> for MergedTranslation {
    fn from(sentence: Sentence) -> Self {
        MergedTranslation {
            source_text: sentence.source_text,
            natural_translation: sentence.natural_translation,
            word_alignments: sentence.word_alignments,
        }
    }
}
