//! Editing-time state for assigning target words to source words
//!
//! The controller owns a `source word -> ordered target words` mapping plus the
//! fixed list of target tokens available for the sentence. Views query it for
//! available words and register change observers; every committed mutation
//! fires those observers synchronously, in registration order, each receiving
//! the controller so it can re-read the committed state.
//!
//! A target word should belong to at most one source word at a time. The
//! controller does not enforce this itself: callers move a word by removing it
//! from its old source before adding it to the new one.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt;

use crate::model::{COMPOUND_SEPARATOR, Sentence};
use crate::text::tokenize;

/// Source word to target words, in source insertion order
pub type SourceMappings = IndexMap<String, Vec<String>>;

/// Handle returned by [`MappingController::on_change`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

type Observer = Box<dyn FnMut(&MappingController)>;

pub struct MappingController {
    target_words: Vec<String>,
    mappings: SourceMappings,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: usize,
}

impl MappingController {
    /// Create a controller over `target_words` (kept in their original order)
    /// with an optional starting mapping.
    pub fn new(target_words: Vec<String>, initial_mappings: Option<SourceMappings>) -> Self {
        MappingController {
            target_words,
            mappings: initial_mappings.unwrap_or_default(),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Seed a controller from a stored sentence.
    ///
    /// Target words are the whitespace tokens of the natural translation.
    /// Every existing alignment's compound is split back into its parts,
    /// e.g. `"werde-vermissen"` becomes `["werde", "vermissen"]`.
    pub fn from_sentence(sentence: &Sentence) -> Self {
        let mut mappings = SourceMappings::new();
        for alignment in &sentence.word_alignments {
            let parts: Vec<String> = alignment
                .target_word
                .split(COMPOUND_SEPARATOR)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect();
            mappings.insert(alignment.source_word.clone(), parts);
        }
        MappingController::new(tokenize(&sentence.natural_translation), Some(mappings))
    }

    pub fn target_words(&self) -> &[String] {
        &self.target_words
    }

    /// Register a callback fired after every committed mutation. The callback
    /// gets read access to the controller in its new state.
    pub fn on_change<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&MappingController) + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` if no observer with this id was registered
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Independent copy of the whole mapping
    pub fn get_mappings(&self) -> SourceMappings {
        self.mappings.clone()
    }

    /// Copy of the words assigned to `source_word`; empty if it has none
    pub fn get_assigned_words(&self, source_word: &str) -> Vec<String> {
        self.mappings.get(source_word).cloned().unwrap_or_default()
    }

    /// Target words not assigned to any source, in target order.
    ///
    /// With `for_source_word`, words already assigned to that source are
    /// included again so they can be re-picked for it.
    pub fn get_available_words(&self, for_source_word: Option<&str>) -> Vec<String> {
        let mapped: HashSet<&str> = self
            .mappings
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        let own: HashSet<&str> = for_source_word
            .and_then(|source| self.mappings.get(source))
            .map(|words| words.iter().map(String::as_str).collect())
            .unwrap_or_default();

        self.target_words
            .iter()
            .filter(|w| !mapped.contains(w.as_str()) || own.contains(w.as_str()))
            .cloned()
            .collect()
    }

    pub fn has_available_words(&self) -> bool {
        !self.get_available_words(None).is_empty()
    }

    /// Append `target_word` to `source_word`'s list, creating the entry if
    /// needed. Adding a word the source already holds changes nothing.
    pub fn add_word(&mut self, source_word: &str, target_word: &str) {
        let words = self.mappings.entry(source_word.to_string()).or_default();
        if words.iter().any(|w| w == target_word) {
            return;
        }
        words.push(target_word.to_string());
        self.notify();
    }

    /// Remove `target_word` from `source_word`'s list if it is there
    pub fn remove_word(&mut self, source_word: &str, target_word: &str) {
        let Some(words) = self.mappings.get_mut(source_word) else {
            return;
        };
        let Some(idx) = words.iter().position(|w| w == target_word) else {
            return;
        };
        words.remove(idx);
        self.notify();
    }

    /// Drop every mapping entry
    pub fn clear_mappings(&mut self) {
        if self.mappings.is_empty() {
            return;
        }
        self.mappings.clear();
        self.notify();
    }

    fn notify(&mut self) {
        // Observers are detached while they run so each can borrow `self`
        let mut observers = std::mem::take(&mut self.observers);
        for (_, observer) in observers.iter_mut() {
            observer(&*self);
        }
        self.observers = observers;
    }
}

impl fmt::Debug for MappingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingController")
            .field("target_words", &self.target_words)
            .field("mappings", &self.mappings)
            .field("observers", &self.observers.len())
            .finish()
    }
}
