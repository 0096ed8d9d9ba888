use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::error::Result;
use crate::export::write_json;
use crate::session::MatchRecord;
use crate::state::MatchState;

/// Persistence port for live snapshots and final records.
///
/// Scoring never calls a store; the host decides when to save and whether
/// a failed save should be retried.
pub trait MatchStore {
    fn save_live(&mut self, match_id: &str, state: &MatchState) -> Result<()>;

    fn load_live(&self, match_id: &str) -> Result<Option<MatchState>>;

    fn save_record(&mut self, match_id: &str, record: &MatchRecord) -> Result<()>;

    fn load_record(&self, match_id: &str) -> Result<Option<MatchRecord>>;
}

/// Generate a match id from the local time, e.g. "match_20240301_181502"
pub fn new_match_id() -> String {
    let now: DateTime<Local> = Local::now();
    format!("match_{}", now.format("%Y%m%d_%H%M%S"))
}

/// One pretty-printed JSON file per snapshot or record
pub struct JsonFileStore {
    base_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn live_path(&self, match_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.live.json", match_id))
    }

    pub fn record_path(&self, match_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.record.json", match_id))
    }

    /// All records in the store directory, sorted by completion time.
    /// Unreadable files are skipped.
    pub fn records(&self) -> Result<Vec<MatchRecord>> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            let is_record = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(".record.json"));
            if !is_record {
                continue;
            }
            match read_json::<MatchRecord>(&path) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable record {}: {}", path.display(), e),
            }
        }
        records.sort_by_key(|r| r.completion_timestamp);
        Ok(records)
    }

    fn write<T: serde::Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        fs::create_dir_all(&self.base_dir)?;
        write_json(path, value)?;
        debug!("Saved {}", path.display());
        Ok(())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn read_optional<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    read_json(path).map(Some)
}

impl MatchStore for JsonFileStore {
    fn save_live(&mut self, match_id: &str, state: &MatchState) -> Result<()> {
        self.write(&self.live_path(match_id), state)
    }

    fn load_live(&self, match_id: &str) -> Result<Option<MatchState>> {
        read_optional(&self.live_path(match_id))
    }

    /// Saving the record also removes the live snapshot
    fn save_record(&mut self, match_id: &str, record: &MatchRecord) -> Result<()> {
        self.write(&self.record_path(match_id), record)?;
        let live = self.live_path(match_id);
        if live.exists() {
            fs::remove_file(live)?;
        }
        Ok(())
    }

    fn load_record(&self, match_id: &str) -> Result<Option<MatchRecord>> {
        read_optional(&self.record_path(match_id))
    }
}

/// In-memory store for hosts without a filesystem, and for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    live: HashMap<String, MatchState>,
    records: HashMap<String, MatchRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> impl Iterator<Item = &MatchRecord> {
        self.records.values()
    }
}

impl MatchStore for MemoryStore {
    fn save_live(&mut self, match_id: &str, state: &MatchState) -> Result<()> {
        self.live.insert(match_id.to_string(), state.clone());
        Ok(())
    }

    fn load_live(&self, match_id: &str) -> Result<Option<MatchState>> {
        Ok(self.live.get(match_id).cloned())
    }

    fn save_record(&mut self, match_id: &str, record: &MatchRecord) -> Result<()> {
        self.live.remove(match_id);
        self.records.insert(match_id.to_string(), record.clone());
        Ok(())
    }

    fn load_record(&self, match_id: &str) -> Result<Option<MatchRecord>> {
        Ok(self.records.get(match_id).cloned())
    }
}
