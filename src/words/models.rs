//! Data models for the word list

use indexmap::IndexMap;

/// One entry of the word list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    /// The word itself, also used to locate its recording
    pub text: String,
    /// Meaning or example usage shown by the usage review
    pub description: String,
}

impl WordRecord {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }
}

/// Words keyed by text, in the order they first appear in the file
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: IndexMap<String, WordRecord>,
}

impl WordList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a word, returning the record it replaced
    pub fn insert(&mut self, word: WordRecord) -> Option<WordRecord> {
        self.words.insert(word.text.clone(), word)
    }

    pub fn get(&self, text: &str) -> Option<&WordRecord> {
        self.words.get(text)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WordRecord> {
        self.words.values()
    }
}

impl FromIterator<WordRecord> for WordList {
    fn from_iter<I: IntoIterator<Item = WordRecord>>(iter: I) -> Self {
        let mut list = WordList::new();
        for word in iter {
            list.insert(word);
        }
        list
    }
}
