//! Start tracking words that have no history yet

use chrono::{DateTime, Utc};

use super::models::{Modality, PracticeHistory, PracticeKey};
use crate::words::WordList;

/// Give every word/modality pair without history a starting `ok` entry.
///
/// Words are visited in list order and modalities in the given order.
/// Returns the keys that were added.
pub fn discover_practices(
    history: &mut PracticeHistory,
    words: &WordList,
    modalities: &[Modality],
    now: DateTime<Utc>,
) -> Vec<PracticeKey> {
    let mut added = Vec::new();

    for word in words.iter() {
        for &modality in modalities {
            let key = PracticeKey::new(modality, word.text.as_str());
            if history.ensure(key.clone(), now) {
                added.push(key);
            }
        }
    }

    if !added.is_empty() {
        log::info!("Discovered {} new practices", added.len());
    }
    added
}
