//! Word-alignment consistency for Birkenbihl dual translations
//!
//! A Birkenbihl dual translation pairs every source sentence with a natural
//! translation and a word-by-word decoding. This crate keeps the word-level
//! alignments consistent with the natural translation: it validates them,
//! edits them through a mapping controller or a column grid, encodes edits back
//! into alignments, and re-splits merged multi-sentence generator responses.
//!
//! # Workflow Example
//!
//! ```
//! use birkenbihl_align::{
//!     EncoderRegistry, MappingController, Sentence, WordAlignment, validate_sentence,
//! };
//!
//! // 1. A stored sentence with a generated alignment
//! let sentence = Sentence::new(
//!     "Yo te extrañaré",
//!     "Ich werde dich vermissen",
//!     vec![
//!         WordAlignment::new("Yo", "Ich", 0),
//!         WordAlignment::new("te", "dich", 1),
//!         WordAlignment::new("extrañaré", "werde-vermissen", 2),
//!     ],
//! );
//! assert!(validate_sentence(&sentence).is_ok());
//!
//! // 2. Edit: drop a word, then hand it back
//! let mut controller = MappingController::from_sentence(&sentence);
//! controller.remove_word("te", "dich");
//! assert_eq!(controller.get_available_words(None), vec!["dich"]);
//! controller.add_word("te", "dich");
//!
//! // 3. Encode the edit and gate it through the validators
//! let edited = EncoderRegistry::new().encode_sentence(&controller, &sentence);
//! let saved = sentence.with_alignments(edited.word_alignments).unwrap();
//! assert_eq!(saved.word_alignments[2].target_word, "werde-vermissen");
//! ```

pub mod controller;
pub mod encoder;
pub mod error;
pub mod grid;
pub mod loader;
pub mod model;
pub mod redistribution;
pub mod text;
pub mod validation;


// Re-export main types for convenient access
pub use controller::{MappingController, ObserverId, SourceMappings};
pub use encoder::{AlignmentEncoder, EncoderRegistry, HyphenEncoder, PerWordEncoder};
pub use error::{AlignError, AlignResult};
pub use grid::{ColumnState, GridState, Slot};
pub use loader::{load_merged_from_file, load_sentences_from_file, parse_sentences};
pub use model::{COMPOUND_SEPARATOR, MergedTranslation, Sentence, WordAlignment};
pub use redistribution::{redistribute, redistribute_or_else};
pub use text::{
    clean_trailing_punctuation, extract_normalized_words, normalize_word_for_matching,
    split_hyphenated, split_into_sentences, tokenize, tokenize_clean,
};
pub use validation::{
    normalized_alignment_words, validate_alignment_complete, validate_sentence,
    validate_source_words_mapped,
};
