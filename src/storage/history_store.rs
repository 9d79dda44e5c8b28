//! Snapshot storage for practice history
//!
//! Files in the working directory:
//! ```text
//! data        # JSON snapshot of the whole history
//! .data.lock  # held exclusively while a store is open
//! ```
//!
//! The whole history is loaded on open and the whole snapshot is rewritten
//! on every save, through a temporary file renamed into place.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::practice::{HistoryEntry, PracticeHistory, PracticeKey};

/// Snapshot format version written by this build
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("History is locked by another process ({0})")]
    Locked(PathBuf),

    #[error("Unsupported history version {0}")]
    UnsupportedVersion(u32),
}

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Serialize, Deserialize)]
struct HistorySnapshot {
    version: u32,
    #[serde(default)]
    practices: PracticeHistory,
}

/// Practice history loaded from disk, guarded by a lock file
pub struct HistoryStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock: File,
    history: PracticeHistory,
}

impl HistoryStore {
    /// Take the lock and load the snapshot at `path`.
    ///
    /// A missing snapshot yields an empty history.
    pub fn open(path: impl Into<PathBuf>, lock_path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let lock_path = lock_path.into();

        let lock = acquire_lock(&lock_path)?;
        let history = read_snapshot(&path)?;
        log::info!("Opened history {:?} with {} practices", path, history.len());

        Ok(Self {
            path,
            lock_path,
            lock,
            history,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &PracticeHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut PracticeHistory {
        &mut self.history
    }

    /// Append an entry to the in-memory history
    pub fn record(&mut self, key: PracticeKey, entry: HistoryEntry) {
        self.history.record(key, entry);
    }

    /// Write the full snapshot to disk
    pub fn save(&self) -> Result<()> {
        let snapshot = HistorySnapshot {
            version: SNAPSHOT_VERSION,
            practices: self.history.clone(),
        };
        let content = serde_json::to_string_pretty(&snapshot)?;

        let tmp_path = temp_path(&self.path);
        fs::write(&tmp_path, content)?;
        fs::rename(&tmp_path, &self.path)?;

        log::debug!("Saved {} practices to {:?}", self.history.len(), self.path);
        Ok(())
    }
}

impl Drop for HistoryStore {
    fn drop(&mut self) {
        if let Err(e) = self.lock.unlock() {
            log::warn!("Failed to release {:?}: {}", self.lock_path, e);
        }
    }
}

fn acquire_lock(lock_path: &Path) -> Result<File> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(lock_path)?;

    match file.try_lock_exclusive() {
        Ok(()) => Ok(file),
        Err(e) if e.kind() == fs2::lock_contended_error().kind() => {
            Err(StorageError::Locked(lock_path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

fn read_snapshot(path: &Path) -> Result<PracticeHistory> {
    if !path.exists() {
        return Ok(PracticeHistory::new());
    }

    let content = fs::read_to_string(path)?;
    let snapshot: HistorySnapshot = serde_json::from_str(&content)?;
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(StorageError::UnsupportedVersion(snapshot.version));
    }
    Ok(snapshot.practices)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice::{discover_practices, plan_session, Modality, Outcome, SchedulePolicy};
    use crate::words::{WordList, WordRecord};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use chrono::{Duration, TimeZone, Utc};
    use tempfile::TempDir;

    fn open_store(temp: &TempDir) -> Result<HistoryStore> {
        HistoryStore::open(temp.path().join("data"), temp.path().join(".data.lock"))
    }

    #[test]
    fn test_missing_snapshot_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = open_store(&temp).unwrap();

        assert!(store.history().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_and_reopen() {
        let temp = TempDir::new().unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let key = PracticeKey::new(Modality::Usage, "猫");

        {
            let mut store = open_store(&temp).unwrap();
            store.history_mut().ensure(key.clone(), t0);
            store.record(key.clone(), HistoryEntry::fail(t0 + Duration::hours(2)));
            store.save().unwrap();
        }

        let store = open_store(&temp).unwrap();
        let entries = store.history().entries(&key).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].timestamp, t0);
        assert_eq!(entries[1].outcome, Outcome::Fail);
        assert!(!temp_path(store.path()).exists());
    }

    #[test]
    fn test_snapshot_format() {
        let temp = TempDir::new().unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

        let mut store = open_store(&temp).unwrap();
        store.history_mut().ensure(PracticeKey::new(Modality::Audio, "猫"), t0);
        store.save().unwrap();

        let content = fs::read_to_string(temp.path().join("data")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["practices"][0]["modality"], "audio");
        assert_eq!(json["practices"][0]["word"], "猫");
        assert_eq!(json["practices"][0]["entries"][0]["outcome"], "ok");
    }

    #[test]
    fn test_empty_record_is_rediscovered() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("data"),
            r#"{"version":1,"practices":[{"modality":"audio","word":"猫"}]}"#,
        )
        .unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let words: WordList = vec![WordRecord::new("猫", "cat")].into_iter().collect();

        let mut store = open_store(&temp).unwrap();
        let added = discover_practices(store.history_mut(), &words, &[Modality::Audio], t0);
        assert_eq!(added, vec![PracticeKey::new(Modality::Audio, "猫")]);

        let mut rng = StdRng::seed_from_u64(3);
        let plan = plan_session(
            store.history(),
            t0 + Duration::days(365),
            &SchedulePolicy::default(),
            &mut rng,
        );
        assert_eq!(plan.len(), 1);
    }

    #[test]
    fn test_second_open_is_locked() {
        let temp = TempDir::new().unwrap();
        let first = open_store(&temp).unwrap();

        let err = open_store(&temp).err().unwrap();
        assert!(matches!(err, StorageError::Locked(_)));

        drop(first);
        assert!(open_store(&temp).is_ok());
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("data"), "not json").unwrap();

        let err = open_store(&temp).err().unwrap();
        assert!(matches!(err, StorageError::Json(_)));
    }

    #[test]
    fn test_unknown_version_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("data"), r#"{"version": 9, "practices": []}"#).unwrap();

        let err = open_store(&temp).err().unwrap();
        assert!(matches!(err, StorageError::UnsupportedVersion(9)));
    }
}
