//! JSON input for the command-line tool
//!
//! Sentence files hold either one `Sentence` object or an array of them;
//! merged files hold a single `MergedTranslation`.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::AlignResult;
use crate::model::{MergedTranslation, Sentence};

/// A file may hold a single sentence or a list of them
#[derive(Deserialize)]
#[serde(untagged)]
enum SentenceDocument {
    Many(Vec<Sentence>),
    One(Sentence),
}

/// Parse sentences from JSON text.
///
/// Accepted shapes:
/// ```json
/// {"source_text": "...", "natural_translation": "...", "word_alignments": [...]}
/// ```
/// or a JSON array of such objects.
pub fn parse_sentences(json: &str) -> AlignResult<Vec<Sentence>> {
    let document: SentenceDocument = serde_json::from_str(json)?;
    Ok(match document {
        SentenceDocument::Many(sentences) => sentences,
        SentenceDocument::One(sentence) => vec![sentence],
    })
}

/// Load sentences from a JSON file
///
/// # Errors
/// - File not found or unreadable
/// - Invalid JSON or wrong shape
pub fn load_sentences_from_file(path: &Path) -> AlignResult<Vec<Sentence>> {
    let content = fs::read_to_string(path)?;
    parse_sentences(&content)
}

/// Load a merged generator response from a JSON file
pub fn load_merged_from_file(path: &Path) -> AlignResult<MergedTranslation> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AlignError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ONE: &str = r#"{
        "source_text": "Hola",
        "natural_translation": "Hallo",
        "word_alignments": [{"source_word": "Hola", "target_word": "Hallo", "position": 0}]
    }"#;

    #[test]
    fn test_parse_single_sentence() {
        let sentences = parse_sentences(ONE).unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0].source_text, "Hola");
    }

    #[test]
    fn test_parse_sentence_list() {
        let json = format!("[{}, {}]", ONE, ONE);
        assert_eq!(parse_sentences(&json).unwrap().len(), 2);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_sentences("{not json"),
            Err(AlignError::Json(_))
        ));
        assert!(matches!(
            parse_sentences(r#"{"unrelated": true}"#),
            Err(AlignError::Json(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ONE.as_bytes()).unwrap();
        let sentences = load_sentences_from_file(file.path()).unwrap();
        assert_eq!(sentences[0].natural_translation, "Hallo");
    }

    #[test]
    fn test_load_merged_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(ONE.as_bytes()).unwrap();
        let merged = load_merged_from_file(file.path()).unwrap();
        assert_eq!(merged.word_alignments.len(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_sentences_from_file(Path::new("/nonexistent/sentences.json"));
        assert!(matches!(result, Err(AlignError::Io(_))));
    }
}
