mod history_store;

pub use history_store::{HistoryStore, StorageError, SNAPSHOT_VERSION};
