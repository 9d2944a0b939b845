//! Alignment validation
//!
//! Two independent checks guard every alignment list before it may replace a
//! sentence's stored alignments:
//!
//! 1. [`validate_alignment_complete`] compares word *sets*: every word of the
//!    natural translation is used, and nothing else. Order inside a compound
//!    is irrelevant.
//! 2. [`validate_source_words_mapped`] catches individual source words whose
//!    target is blank, which a set comparison can miss when counts happen to
//!    balance.
//!
//! Both return `Ok(())` when valid and an [`AlignError`] whose message names
//! every offending word otherwise. Neither panics.

use std::collections::BTreeSet;

use tracing::warn;

use crate::error::{AlignError, AlignResult};
use crate::model::{Sentence, WordAlignment};
use crate::text::{extract_normalized_words, split_hyphenated};

/// Check that the alignments use exactly the words of the natural translation.
///
/// # Example
/// ```
/// use birkenbihl_align::{WordAlignment, validate_alignment_complete};
///
/// let alignments = vec![
///     WordAlignment::new("Yo", "Ich", 0),
///     WordAlignment::new("te", "dich", 1),
///     WordAlignment::new("extrañaré", "werde-vermissen", 2),
/// ];
/// assert!(validate_alignment_complete("Ich werde dich vermissen", &alignments).is_ok());
/// ```
pub fn validate_alignment_complete(
    natural_translation: &str,
    alignments: &[WordAlignment],
) -> AlignResult<()> {
    if natural_translation.trim().is_empty() {
        if alignments.is_empty() {
            return Ok(());
        }
        return Err(AlignError::EmptyNaturalTranslation);
    }

    if alignments.is_empty() {
        return Err(AlignError::NoAlignments);
    }

    let expected: BTreeSet<String> = extract_normalized_words(natural_translation)
        .into_iter()
        .collect();
    let actual: BTreeSet<String> = normalized_alignment_words(alignments)
        .into_iter()
        .collect();

    // BTreeSet iteration is already sorted
    let missing: Vec<String> = expected.difference(&actual).cloned().collect();
    let extra: Vec<String> = actual.difference(&expected).cloned().collect();

    if missing.is_empty() && extra.is_empty() {
        return Ok(());
    }

    Err(AlignError::IncompleteAlignment { missing, extra })
}

/// Check that no alignment has an empty or whitespace-only target word.
/// Offending source words are reported in encounter order.
pub fn validate_source_words_mapped(alignments: &[WordAlignment]) -> AlignResult<()> {
    let unmapped: Vec<String> = alignments
        .iter()
        .filter(|a| a.target_word.trim().is_empty())
        .map(|a| a.source_word.clone())
        .collect();

    if unmapped.is_empty() {
        Ok(())
    } else {
        Err(AlignError::UnmappedSourceWords(unmapped))
    }
}

/// Run both checks on a sentence: unmapped source words first, then completeness
pub fn validate_sentence(sentence: &Sentence) -> AlignResult<()> {
    let result = validate_source_words_mapped(&sentence.word_alignments).and_then(|_| {
        validate_alignment_complete(&sentence.natural_translation, &sentence.word_alignments)
    });

    if let Err(e) = &result {
        warn!(source_text = %sentence.source_text, error = %e, "sentence failed validation");
    }
    result
}

/// Flatten the target words of every alignment: lowercase, split compounds on
/// `-`, strip punctuation from each part and drop empty parts.
pub fn normalized_alignment_words(alignments: &[WordAlignment]) -> Vec<String> {
    alignments
        .iter()
        .flat_map(|a| split_hyphenated(&a.target_word.to_lowercase()))
        .collect()
}
