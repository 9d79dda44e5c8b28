//! Word list parsing
//!
//! One word per line: the text, a single whitespace character, then the
//! description. Empty lines are skipped.
//! ```text
//! 猫 cat; ねこ
//! 走る to run
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::models::{WordList, WordRecord};

#[derive(Error, Debug)]
pub enum WordListError {
    #[error("Failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid word entry on line {line}: {content:?}")]
    InvalidEntry { line: usize, content: String },
}

pub type Result<T> = std::result::Result<T, WordListError>;

/// Split a line at its first whitespace character
fn parse_line(line: &str) -> Option<WordRecord> {
    let (index, sep) = line.char_indices().find(|(_, c)| c.is_whitespace())?;
    let text = &line[..index];
    let description = &line[index + sep.len_utf8()..];

    if text.is_empty() || description.is_empty() {
        return None;
    }
    Some(WordRecord::new(text, description))
}

/// Parse the contents of a word list
pub fn parse_words(content: &str) -> Result<WordList> {
    let mut words = WordList::new();

    for (number, line) in content.lines().enumerate() {
        if line.is_empty() {
            continue;
        }

        let word = parse_line(line).ok_or_else(|| WordListError::InvalidEntry {
            line: number + 1,
            content: line.to_string(),
        })?;

        if let Some(previous) = words.insert(word) {
            log::warn!(
                "Duplicate word '{}' on line {}, replacing earlier entry",
                previous.text,
                number + 1
            );
        }
    }

    Ok(words)
}

/// Load the word list at `path`
pub fn load_words(path: &Path) -> Result<WordList> {
    let content = fs::read_to_string(path).map_err(|source| WordListError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let words = parse_words(&content)?;
    log::info!("Loaded {} words from {:?}", words.len(), path);
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_splits_at_first_whitespace() {
        let words = parse_words("猫 cat; a small animal\n走る\tto run\n").unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(words.get("猫").unwrap().description, "cat; a small animal");
        assert_eq!(words.get("走る").unwrap().description, "to run");
    }

    #[test]
    fn test_parse_keeps_file_order_and_skips_blank_lines() {
        let words = parse_words("b second\n\n\na first\r\nc third").unwrap();

        let texts: Vec<&str> = words.iter().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
        assert_eq!(words.get("a").unwrap().description, "first");
    }

    #[test]
    fn test_duplicate_word_last_description_wins() {
        let words = parse_words("猫 cat\n犬 dog\n猫 kitty\n").unwrap();

        assert_eq!(words.len(), 2);
        assert_eq!(words.get("猫").unwrap().description, "kitty");
        assert_eq!(words.iter().next().unwrap().text, "猫");
    }

    #[test]
    fn test_line_without_description_is_rejected() {
        let err = parse_words("猫 cat\n犬\n").unwrap_err();
        match err {
            WordListError::InvalidEntry { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "犬");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_leading_whitespace_is_rejected() {
        assert!(matches!(
            parse_words(" cat").unwrap_err(),
            WordListError::InvalidEntry { line: 1, .. }
        ));
        assert!(matches!(
            parse_words("猫 ").unwrap_err(),
            WordListError::InvalidEntry { line: 1, .. }
        ));
    }

    #[test]
    fn test_load_words_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("words");
        fs::write(&path, "猫 cat\n").unwrap();

        let words = load_words(&path).unwrap();
        assert_eq!(words.get("猫").unwrap(), &WordRecord::new("猫", "cat"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = load_words(&temp.path().join("words")).unwrap_err();
        assert!(matches!(err, WordListError::Io { .. }));
    }
}
