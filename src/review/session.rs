//! Review session driver
//!
//! Walks the planned items in order, reviews each one and appends the
//! outcome to its history. The snapshot is saved after every item so an
//! interrupted session loses at most the item in progress.

use thiserror::Error;

use super::error::ReviewError;
use super::reviewer::Reviewer;
use crate::clock::Clock;
use crate::practice::{HistoryEntry, Outcome, PracticeInfo};
use crate::storage::{HistoryStore, StorageError};
use crate::words::WordList;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Review failed: {0}")]
    Review(#[from] ReviewError),

    #[error("Failed to save history: {0}")]
    Storage(#[from] StorageError),
}

/// Counts reported at the end of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub reviewed: usize,
    pub leveled_up: usize,
    pub kept: usize,
    /// Planned items whose word is no longer in the word list
    pub skipped: usize,
}

pub fn run_session<R, C>(
    plan: &[PracticeInfo],
    words: &WordList,
    store: &mut HistoryStore,
    reviewer: &mut R,
    clock: &C,
) -> Result<SessionSummary, SessionError>
where
    R: Reviewer + ?Sized,
    C: Clock + ?Sized,
{
    let mut summary = SessionSummary::default();

    for info in plan {
        let Some(word) = words.get(&info.key.word) else {
            log::warn!("Skipping {}: word is not in the word list", info.key);
            summary.skipped += 1;
            continue;
        };

        reviewer.announce(info)?;
        let leveled_up = reviewer.review(info.key.modality, word)?;
        let outcome = Outcome::from_leveled_up(leveled_up);

        store.record(info.key.clone(), HistoryEntry::new(clock.now(), outcome));
        store.save()?;
        log::info!("Recorded {:?} for {}", outcome, info.key);

        summary.reviewed += 1;
        if leveled_up {
            summary.leveled_up += 1;
        } else {
            summary.kept += 1;
        }
    }

    Ok(summary)
}
