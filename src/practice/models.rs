//! Data models for practice items and their review history

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a word is reviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    /// Play the recording, then reveal the text
    Audio,
    /// Show the text, then play the recording
    Text,
    /// Show the description, then reveal the word
    Usage,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Audio, Modality::Text, Modality::Usage];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Audio => "audio",
            Modality::Text => "text",
            Modality::Usage => "usage",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one reviewable item: a word drilled in one modality
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PracticeKey {
    pub modality: Modality,
    pub word: String,
}

impl PracticeKey {
    pub fn new(modality: Modality, word: impl Into<String>) -> Self {
        Self {
            modality,
            word: word.into(),
        }
    }
}

impl fmt::Display for PracticeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.modality, self.word)
    }
}

/// Result recorded for a single review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Leveled up
    Ok,
    /// Kept at the current level
    Fail,
    /// Marker for an item that has never been reviewed
    New,
}

impl Outcome {
    pub fn from_leveled_up(leveled_up: bool) -> Self {
        if leveled_up {
            Self::Ok
        } else {
            Self::Fail
        }
    }
}

/// A single point in an item's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub outcome: Outcome,
}

impl HistoryEntry {
    pub fn new(timestamp: DateTime<Utc>, outcome: Outcome) -> Self {
        Self { timestamp, outcome }
    }

    pub fn ok(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, Outcome::Ok)
    }

    pub fn fail(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, Outcome::Fail)
    }
}

/// On-disk form of one practice item and its entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeRecord {
    pub modality: Modality,
    pub word: String,
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

/// Review history of every practice item.
///
/// Keys keep the order in which they were first recorded and entries are
/// only ever appended, so the history of a key is chronological.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PracticeRecord>", into = "Vec<PracticeRecord>")]
pub struct PracticeHistory {
    items: IndexMap<PracticeKey, Vec<HistoryEntry>>,
}

impl PracticeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: &PracticeKey) -> bool {
        self.items.contains_key(key)
    }

    pub fn entries(&self, key: &PracticeKey) -> Option<&[HistoryEntry]> {
        self.items.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PracticeKey, &[HistoryEntry])> {
        self.items.iter().map(|(key, entries)| (key, entries.as_slice()))
    }

    /// Append an entry, creating the key if it has no history yet
    pub fn record(&mut self, key: PracticeKey, entry: HistoryEntry) {
        self.items.entry(key).or_default().push(entry);
    }

    /// Start tracking `key` with a synthesized `ok` entry at `now`.
    ///
    /// Returns false (and changes nothing) if the key already has history.
    pub fn ensure(&mut self, key: PracticeKey, now: DateTime<Utc>) -> bool {
        if self.items.contains_key(&key) {
            return false;
        }
        self.items.insert(key, vec![HistoryEntry::ok(now)]);
        true
    }
}

impl From<Vec<PracticeRecord>> for PracticeHistory {
    fn from(records: Vec<PracticeRecord>) -> Self {
        let mut history = PracticeHistory::new();
        for record in records {
            if record.entries.is_empty() {
                log::warn!(
                    "Dropping {} {} from history: no entries",
                    record.modality,
                    record.word
                );
                continue;
            }
            history
                .items
                .entry(PracticeKey::new(record.modality, record.word))
                .or_default()
                .extend(record.entries);
        }
        history
    }
}

impl From<PracticeHistory> for Vec<PracticeRecord> {
    fn from(history: PracticeHistory) -> Self {
        history
            .items
            .into_iter()
            .map(|(key, entries)| PracticeRecord {
                modality: key.modality,
                word: key.word,
                entries,
            })
            .collect()
    }
}

/// Scheduling view of a practice item, recomputed on every run
#[derive(Debug, Clone, PartialEq)]
pub struct PracticeInfo {
    pub key: PracticeKey,
    /// Time since the last entry
    pub fade: Duration,
    /// Longest gap that ended in a successful review
    pub max: Duration,
    /// `fade` relative to `max`
    pub ratio: f64,
}
