//! Redistribution of merged generator responses
//!
//! A generator asked to translate N sentences independently sometimes answers
//! with a single merged response: one natural translation and one flat list of
//! word alignments spanning all N sentences. This module re-scopes such a
//! response back into one `Sentence` per source sentence.
//!
//! # Algorithm
//!
//! 1. Split the merged natural translation with [`split_into_sentences`]; the
//!    count must equal the number of source sentences.
//! 2. Walk the source sentences in order and consume, from the front of the
//!    alignment queue, exactly as many alignments as the sentence has
//!    whitespace-separated tokens (punctuation-only tokens such as `–` count).
//! 3. Each consumed alignment's source word must match (case-insensitively,
//!    ignoring surrounding punctuation) the sentence token at the same
//!    position.
//! 4. Renumber each sentence's alignments from 0.
//!
//! Matching is purely positional. Only sentence boundaries are reconstructed;
//! any failure means the caller should translate each sentence on its own
//! rather than guess (see [`redistribute_or_else`]).

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::error::{AlignError, AlignResult};
use crate::model::{MergedTranslation, Sentence, WordAlignment};
use crate::text::{normalize_word_for_matching, split_into_sentences, tokenize, tokenize_clean};

/// Split a merged response into one sentence per entry of `source_sentences`.
///
/// # Example
/// ```
/// use birkenbihl_align::{MergedTranslation, WordAlignment, redistribute};
///
/// let merged = MergedTranslation {
///     source_text: "Hello world. How are you".to_string(),
///     natural_translation: "Hallo Welt. Wie geht es dir".to_string(),
///     word_alignments: vec![
///         WordAlignment::new("Hello", "Hallo", 0),
///         WordAlignment::new("world", "Welt", 1),
///         WordAlignment::new("How", "Wie", 2),
///         WordAlignment::new("are", "geht-es", 3),
///         WordAlignment::new("you", "dir", 4),
///     ],
/// };
/// let sources = vec!["Hello world.".to_string(), "How are you".to_string()];
/// let sentences = redistribute(&merged, &sources).unwrap();
///
/// assert_eq!(sentences[0].natural_translation, "Hallo Welt.");
/// assert_eq!(sentences[1].word_alignments[1].target_word, "geht-es");
/// assert_eq!(sentences[1].word_alignments[1].position, 1);
/// ```
pub fn redistribute(
    merged: &MergedTranslation,
    source_sentences: &[String],
) -> AlignResult<Vec<Sentence>> {
    let natural_sentences = split_into_sentences(&merged.natural_translation);
    if natural_sentences.len() != source_sentences.len() {
        return Err(AlignError::SentenceCountMismatch {
            expected: source_sentences.len(),
            actual: natural_sentences.len(),
            natural_sentences,
        });
    }

    let mut queue: VecDeque<&WordAlignment> = merged.word_alignments.iter().collect();
    let mut sentences = Vec::with_capacity(source_sentences.len());

    for (sentence_index, (source, natural)) in
        source_sentences.iter().zip(natural_sentences).enumerate()
    {
        let words = tokenize(source);
        if queue.len() < words.len() {
            return Err(AlignError::AlignmentsExhausted {
                sentence_index,
                needed: words.len(),
                remaining: queue.len(),
            });
        }

        let mut word_alignments = Vec::with_capacity(words.len());
        for (position, expected) in words.iter().enumerate() {
            // Length was checked above
            let Some(alignment) = queue.pop_front() else {
                break;
            };
            if !same_source_word(&alignment.source_word, expected) {
                return Err(AlignError::SourceWordMismatch {
                    sentence_index,
                    position,
                    expected: expected.clone(),
                    found: alignment.source_word.clone(),
                });
            }
            word_alignments.push(WordAlignment {
                source_word: alignment.source_word.clone(),
                target_word: alignment.target_word.clone(),
                position,
            });
        }

        debug!(
            sentence_index,
            alignments = word_alignments.len(),
            "redistributed sentence"
        );
        sentences.push(Sentence {
            source_text: source.clone(),
            natural_translation: natural,
            word_alignments,
        });
    }

    if !queue.is_empty() {
        return Err(AlignError::UnconsumedAlignments(
            queue.iter().map(|a| a.source_word.clone()).collect(),
        ));
    }

    Ok(sentences)
}

/// Redistribute, or fall back to translating each source sentence on its own.
///
/// `fallback` is called once per source sentence, in order, only when
/// redistribution fails. Its first error is returned.
pub fn redistribute_or_else<F, E>(
    merged: &MergedTranslation,
    source_sentences: &[String],
    mut fallback: F,
) -> Result<Vec<Sentence>, E>
where
    F: FnMut(&str) -> Result<Sentence, E>,
{
    match redistribute(merged, source_sentences) {
        Ok(sentences) => Ok(sentences),
        Err(e) => {
            warn!(
                error = %e,
                sentences = source_sentences.len(),
                "redistribution failed, translating sentences individually"
            );
            source_sentences.iter().map(|s| fallback(s.as_str())).collect()
        }
    }
}

/// Compare with surrounding punctuation removed, so `"world."` matches
/// `"World"` and a lone `"–"` matches itself
fn same_source_word(found: &str, expected: &str) -> bool {
    let clean = |word: &str| {
        let cleaned = tokenize_clean(word).join(" ");
        if cleaned.is_empty() {
            normalize_word_for_matching(word)
        } else {
            normalize_word_for_matching(&cleaned)
        }
    };
    clean(found) == clean(expected)
}
