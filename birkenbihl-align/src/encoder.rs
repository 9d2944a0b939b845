//! Turning editing-time mappings into ordered alignment lists
//!
//! An [`AlignmentEncoder`] consumes a `source word -> target words` mapping and
//! emits `WordAlignment`s. Every encoder must:
//! - preserve source insertion order
//! - skip sources with no target words
//! - number positions contiguously from 0
//!
//! [`EncoderRegistry`] keeps an ordered list of encoders and always uses the
//! most recently registered one.

use tracing::debug;

use crate::controller::{MappingController, SourceMappings};
use crate::model::{COMPOUND_SEPARATOR, Sentence, WordAlignment};

pub trait AlignmentEncoder {
    /// Encode `mappings` into alignments. `target_words` is the full ordered
    /// token list of the natural translation, for encoders that need it.
    fn encode(&self, mappings: &SourceMappings, target_words: &[String]) -> Vec<WordAlignment>;

    /// Name used in logs
    fn name(&self) -> &str;
}

/// Joins several target words of one source with `-`:
/// `{"extrañaré": ["werde", "vermissen"]}` becomes
/// `WordAlignment("extrañaré", "werde-vermissen", 0)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HyphenEncoder;

impl AlignmentEncoder for HyphenEncoder {
    fn encode(&self, mappings: &SourceMappings, _target_words: &[String]) -> Vec<WordAlignment> {
        mappings
            .iter()
            .filter(|(_, targets)| !targets.is_empty())
            .enumerate()
            .map(|(position, (source, targets))| WordAlignment {
                source_word: source.clone(),
                target_word: targets.join(COMPOUND_SEPARATOR),
                position,
            })
            .collect()
    }

    fn name(&self) -> &str {
        "hyphenate"
    }
}

/// Emits one alignment per target word instead of joining them
#[derive(Debug, Clone, Copy, Default)]
pub struct PerWordEncoder;

impl AlignmentEncoder for PerWordEncoder {
    fn encode(&self, mappings: &SourceMappings, _target_words: &[String]) -> Vec<WordAlignment> {
        mappings
            .iter()
            .flat_map(|(source, targets)| targets.iter().map(move |t| (source, t)))
            .enumerate()
            .map(|(position, (source, target))| WordAlignment {
                source_word: source.clone(),
                target_word: target.clone(),
                position,
            })
            .collect()
    }

    fn name(&self) -> &str {
        "per-word"
    }
}

/// Ordered list of encoders; the last one registered is the active one
pub struct EncoderRegistry {
    encoders: Vec<Box<dyn AlignmentEncoder>>,
}

impl EncoderRegistry {
    /// Registry with no encoders; [`EncoderRegistry::encode`] returns nothing
    /// until one is registered.
    pub fn empty() -> Self {
        EncoderRegistry {
            encoders: Vec::new(),
        }
    }

    /// Registry with [`HyphenEncoder`] registered
    pub fn new() -> Self {
        let mut registry = EncoderRegistry::empty();
        registry.register(Box::new(HyphenEncoder));
        registry
    }

    pub fn register(&mut self, encoder: Box<dyn AlignmentEncoder>) -> &mut Self {
        self.encoders.push(encoder);
        self
    }

    pub fn active(&self) -> Option<&dyn AlignmentEncoder> {
        self.encoders.last().map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    pub fn encode(&self, mappings: &SourceMappings, target_words: &[String]) -> Vec<WordAlignment> {
        let Some(encoder) = self.active() else {
            return Vec::new();
        };
        debug!(encoder = encoder.name(), sources = mappings.len(), "encoding mappings");
        encoder.encode(mappings, target_words)
    }

    /// Build a new sentence from an editing session. The result is not
    /// validated; pass it through the validators before storing it.
    pub fn encode_sentence(&self, controller: &MappingController, sentence: &Sentence) -> Sentence {
        let word_alignments = self.encode(&controller.get_mappings(), controller.target_words());
        Sentence {
            source_text: sentence.source_text.clone(),
            natural_translation: sentence.natural_translation.clone(),
            word_alignments,
        }
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        EncoderRegistry::new()
    }
}
