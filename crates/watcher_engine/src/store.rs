use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use thiserror::Error;
use watcher_core::{LoadOutcome, Snapshot};
use watcher_logging::{watch_info, watch_warn};

use crate::{AtomicFileWriter, PersistError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Where the previous cycle's listings live between cycles.
pub trait SnapshotStore: Send + Sync {
    /// Never fails: unusable state is reported through the outcome.
    fn load(&self) -> LoadOutcome;
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSnapshot {
    listings: Vec<String>,
    total_count: u64,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    missed: BTreeMap<String, u32>,
}

/// Snapshot kept as a pretty-printed JSON file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn display_path(&self) -> PathBuf {
        std::path::absolute(&self.path).unwrap_or_else(|_| self.path.clone())
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> LoadOutcome {
        let path = self.display_path();
        watch_info!("Looking for the snapshot at {:?}", path);

        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                watch_info!("Snapshot file does not exist, starting empty");
                return LoadOutcome::Missing;
            }
            Err(err) => {
                watch_warn!("Failed to read snapshot from {:?}: {}", path, err);
                return LoadOutcome::Recovered {
                    reason: format!("unreadable: {err}"),
                };
            }
        };

        let persisted: PersistedSnapshot = match serde_json::from_str(&content) {
            Ok(persisted) => persisted,
            Err(err) => {
                let reason = match err.classify() {
                    Category::Data => format!("unexpected structure: {err}"),
                    Category::Syntax | Category::Eof | Category::Io => {
                        format!("invalid JSON: {err}")
                    }
                };
                watch_warn!("Snapshot at {:?} is unusable ({}), starting empty", path, reason);
                return LoadOutcome::Recovered { reason };
            }
        };

        watch_info!(
            "Loaded {} listings, total count {}",
            persisted.listings.len(),
            persisted.total_count
        );
        LoadOutcome::Loaded(Snapshot {
            listings: persisted.listings.into_iter().collect(),
            total_count: persisted.total_count,
            missed: persisted.missed,
        })
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let persisted = PersistedSnapshot {
            listings: snapshot.listings.iter().cloned().collect(),
            total_count: snapshot.total_count,
            missed: snapshot.missed.clone(),
        };
        let content = serde_json::to_string_pretty(&persisted)?;

        watch_info!("Saving snapshot to {:?}", self.display_path());
        AtomicFileWriter::new(self.path.clone()).write(&content)?;
        Ok(())
    }
}
