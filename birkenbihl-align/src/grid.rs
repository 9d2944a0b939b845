//! Column + pool projection of a sentence for drag-and-drop editing
//!
//! Each source word gets one column holding the target words assigned to it;
//! target words not claimed by any column sit in the unassigned pool. A grid
//! with empty columns is still fully editable; emptiness only blocks
//! [`GridState::save`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{AlignError, AlignResult};
use crate::model::{COMPOUND_SEPARATOR, Sentence, WordAlignment};
use crate::text::{extract_normalized_words, split_hyphenated, tokenize_clean};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnState {
    pub source_word: String,
    #[serde(default)]
    pub assigned_words: Vec<String>,
}

impl ColumnState {
    pub fn new(source_word: &str) -> Self {
        ColumnState {
            source_word: source_word.to_string(),
            assigned_words: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assigned_words.is_empty()
    }
}

/// Where a dragged word lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Column(usize),
    Unassigned,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GridState {
    pub columns: Vec<ColumnState>,
    #[serde(default)]
    pub unassigned_words: Vec<String>,
}

impl GridState {
    /// Project a sentence into columns and an unassigned pool.
    ///
    /// Columns follow the first appearance of each source word in the source
    /// text; a repeated source word still gets a single column. Alignments
    /// whose source word does not occur in the text get trailing columns so
    /// nothing is lost.
    pub fn build(sentence: &Sentence) -> GridState {
        let mut columns: Vec<ColumnState> = Vec::new();

        for token in tokenize_clean(&sentence.source_text) {
            if !columns.iter().any(|c| c.source_word == token) {
                columns.push(ColumnState::new(&token));
            }
        }

        for alignment in sentence.alignments_by_position() {
            let key = column_key(&alignment.source_word);
            let idx = match columns.iter().position(|c| c.source_word == key) {
                Some(idx) => idx,
                None => {
                    columns.push(ColumnState::new(&key));
                    columns.len() - 1
                }
            };
            columns[idx]
                .assigned_words
                .extend(split_hyphenated(&alignment.target_word));
        }

        // Words recovered from alignments always land in their column, so only
        // the natural translation can contribute unclaimed words.
        let claimed: HashSet<String> = columns
            .iter()
            .flat_map(|c| c.assigned_words.iter())
            .map(|w| w.to_lowercase())
            .collect();
        let mut seen = HashSet::new();
        let unassigned_words = extract_normalized_words(&sentence.natural_translation)
            .into_iter()
            .filter(|w| !claimed.contains(w) && seen.insert(w.clone()))
            .collect();

        GridState {
            columns,
            unassigned_words,
        }
    }

    /// Every column has at least one assigned word
    pub fn is_valid(&self) -> bool {
        self.columns.iter().all(|c| !c.is_empty())
    }

    /// Source words of empty columns, in column order
    pub fn get_error_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_empty())
            .map(|c| c.source_word.clone())
            .collect()
    }

    pub fn column(&self, source_word: &str) -> Option<&ColumnState> {
        self.columns.iter().find(|c| c.source_word == source_word)
    }

    /// Encode the columns: empty columns are skipped, words hyphen-joined,
    /// positions renumbered from 0.
    pub fn to_word_alignments(&self) -> Vec<WordAlignment> {
        self.columns
            .iter()
            .filter(|c| !c.is_empty())
            .enumerate()
            .map(|(position, column)| WordAlignment {
                source_word: column.source_word.clone(),
                target_word: column.assigned_words.join(COMPOUND_SEPARATOR),
                position,
            })
            .collect()
    }

    /// Move the first occurrence of `word` from one slot to another, inserting
    /// at `index` (clamped to the target length) or appending.
    ///
    /// Returns `false` without touching the grid if a column index is out of
    /// range or `word` is not in `from`.
    pub fn move_word(&mut self, word: &str, from: Slot, to: Slot, index: Option<usize>) -> bool {
        if !self.slot_exists(from) || !self.slot_exists(to) {
            return false;
        }
        let source = self.slot_mut(from);
        let Some(pos) = source.iter().position(|w| w == word) else {
            return false;
        };
        let moved = source.remove(pos);

        let target = self.slot_mut(to);
        let at = index.unwrap_or(target.len()).min(target.len());
        target.insert(at, moved);
        true
    }

    /// Reorder a word within one column
    pub fn reorder_word(&mut self, column: usize, from_index: usize, to_index: usize) -> bool {
        let Some(col) = self.columns.get_mut(column) else {
            return false;
        };
        let words = &mut col.assigned_words;
        if from_index >= words.len() || to_index >= words.len() {
            return false;
        }
        let word = words.remove(from_index);
        words.insert(to_index, word);
        true
    }

    /// The save action: refused while any column is empty, then gated by the
    /// full alignment validators against `sentence`.
    pub fn save(&self, sentence: &Sentence) -> AlignResult<Sentence> {
        let empty = self.get_error_columns();
        if !empty.is_empty() {
            return Err(AlignError::UnmappedSourceWords(empty));
        }
        sentence.with_alignments(self.to_word_alignments())
    }

    fn slot_exists(&self, slot: Slot) -> bool {
        match slot {
            Slot::Column(idx) => idx < self.columns.len(),
            Slot::Unassigned => true,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Vec<String> {
        match slot {
            Slot::Column(idx) => &mut self.columns[idx].assigned_words,
            Slot::Unassigned => &mut self.unassigned_words,
        }
    }
}

/// Alignment source words are matched against cleaned source-text tokens.
/// A multi-word source such as `"por favor"` keeps its whole trimmed text.
fn column_key(source_word: &str) -> String {
    let mut tokens = tokenize_clean(source_word);
    if tokens.len() == 1 {
        tokens.remove(0)
    } else {
        source_word.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::normalized_alignment_words;

    fn sentence() -> Sentence {
        Sentence::new(
            "Yo te extrañaré.",
            "Ich werde dich vermissen.",
            vec![
                WordAlignment::new("Yo", "Ich", 0),
                WordAlignment::new("te", "dich", 1),
                WordAlignment::new("extrañaré", "werde-vermissen", 2),
            ],
        )
    }

    #[test]
    fn test_build_columns_follow_source_text() {
        let grid = GridState::build(&sentence());
        let sources: Vec<&str> = grid.columns.iter().map(|c| c.source_word.as_str()).collect();
        assert_eq!(sources, vec!["Yo", "te", "extrañaré"]);
        assert_eq!(
            grid.column("extrañaré").unwrap().assigned_words,
            vec!["werde", "vermissen"]
        );
        assert!(grid.unassigned_words.is_empty());
        assert!(grid.is_valid());
    }

    #[test]
    fn test_build_unassigned_pool() {
        let s = Sentence::new(
            "Yo te extrañaré",
            "Ich werde dich vermissen, dich!",
            vec![WordAlignment::new("Yo", "Ich", 0)],
        );
        let grid = GridState::build(&s);
        assert_eq!(grid.unassigned_words, vec!["werde", "dich", "vermissen"]);
        assert_eq!(grid.get_error_columns(), vec!["te", "extrañaré"]);
        assert!(!grid.is_valid());
    }

    #[test]
    fn test_repeated_source_word_gets_one_column() {
        let s = Sentence::new(
            "no no no",
            "nein nein nein",
            vec![WordAlignment::new("no", "nein", 0)],
        );
        let grid = GridState::build(&s);
        assert_eq!(grid.columns.len(), 1);
        assert_eq!(grid.columns[0].assigned_words, vec!["nein"]);
    }

    #[test]
    fn test_alignment_source_missing_from_text_gets_trailing_column() {
        let s = Sentence::new(
            "Hola",
            "Hallo Welt",
            vec![
                WordAlignment::new("Hola", "Hallo", 0),
                WordAlignment::new("mundo", "Welt", 1),
            ],
        );
        let grid = GridState::build(&s);
        assert_eq!(grid.columns.len(), 2);
        assert_eq!(grid.columns[1].source_word, "mundo");
    }

    #[test]
    fn test_multi_word_source_keeps_its_name() {
        let s = Sentence::new(
            "Gracias, por favor",
            "Danke bitte",
            vec![
                WordAlignment::new("Gracias", "Danke", 0),
                WordAlignment::new("por favor", "bitte", 1),
            ],
        );
        let grid = GridState::build(&s);
        assert_eq!(grid.column("por favor").unwrap().assigned_words, vec!["bitte"]);
        assert!(grid.column("por").unwrap().is_empty());

        let alignments = grid.to_word_alignments();
        assert_eq!(alignments[1], WordAlignment::new("por favor", "bitte", 1));
    }

    #[test]
    fn test_round_trip_preserves_alignment_words() {
        let s = sentence();
        let alignments = GridState::build(&s).to_word_alignments();
        assert_eq!(
            normalized_alignment_words(&alignments),
            normalized_alignment_words(&s.word_alignments)
        );
        assert_eq!(alignments[2], WordAlignment::new("extrañaré", "werde-vermissen", 2));
    }

    #[test]
    fn test_to_word_alignments_skips_empty_columns() {
        let grid = GridState {
            columns: vec![
                ColumnState::new("a"),
                ColumnState {
                    source_word: "b".to_string(),
                    assigned_words: vec!["x".to_string(), "y".to_string()],
                },
            ],
            unassigned_words: vec![],
        };
        assert_eq!(grid.to_word_alignments(), vec![WordAlignment::new("b", "x-y", 0)]);
    }

    #[test]
    fn test_move_word_between_columns_and_pool() {
        let mut grid = GridState::build(&sentence());
        assert!(grid.move_word("dich", Slot::Column(1), Slot::Unassigned, None));
        assert_eq!(grid.unassigned_words, vec!["dich"]);
        assert_eq!(grid.get_error_columns(), vec!["te"]);

        // Invalid grids stay editable
        assert!(grid.move_word("vermissen", Slot::Column(2), Slot::Column(0), Some(0)));
        assert_eq!(grid.columns[0].assigned_words, vec!["vermissen", "Ich"]);

        assert!(grid.move_word("dich", Slot::Unassigned, Slot::Column(1), Some(99)));
        assert_eq!(grid.columns[1].assigned_words, vec!["dich"]);
        assert!(grid.unassigned_words.is_empty());
    }

    #[test]
    fn test_move_word_rejects_unknown_word_or_column() {
        let mut grid = GridState::build(&sentence());
        let before = grid.clone();
        assert!(!grid.move_word("Katze", Slot::Column(0), Slot::Unassigned, None));
        assert!(!grid.move_word("Ich", Slot::Column(0), Slot::Column(7), None));
        assert!(!grid.move_word("Ich", Slot::Column(9), Slot::Column(0), None));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_reorder_word() {
        let mut grid = GridState::build(&sentence());
        assert!(grid.reorder_word(2, 1, 0));
        assert_eq!(grid.columns[2].assigned_words, vec!["vermissen", "werde"]);
        assert!(!grid.reorder_word(2, 0, 5));
        assert!(!grid.reorder_word(8, 0, 0));
    }

    #[test]
    fn test_save_blocked_by_empty_column() {
        let mut grid = GridState::build(&sentence());
        grid.move_word("dich", Slot::Column(1), Slot::Unassigned, None);
        match grid.save(&sentence()) {
            Err(AlignError::UnmappedSourceWords(words)) => assert_eq!(words, vec!["te"]),
            other => panic!("Expected UnmappedSourceWords, got {:?}", other),
        }
    }

    #[test]
    fn test_save_runs_validators() {
        let s = sentence();
        let saved = GridState::build(&s).save(&s).unwrap();
        assert_eq!(saved.word_alignments, s.word_alignments);

        let mut grid = GridState::build(&s);
        grid.columns[0].assigned_words = vec!["Du".to_string()];
        assert!(matches!(
            grid.save(&s),
            Err(AlignError::IncompleteAlignment { .. })
        ));
    }
}
