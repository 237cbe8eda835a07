//! File-backed snapshot storage.
//!
//! [`FileStore`] keeps the single progress snapshot in a JSON file:
//!
//! ```json
//! {"layoutIndex":0,"score":200,"combo":2,"seed":4821,"deckIds":[1,0,0,1],"matchedIds":[0]}
//! ```
//!
//! Writes go through a temporary file that is flushed, synced and renamed
//! over the target, so a crash mid-write leaves the previous save intact.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

pub use tui_pairs_core as core;

use crate::core::{ProgressSnapshot, SnapshotStore, StoreError, StoreResult};

/// Default file name under the state directory.
pub const SAVE_FILE_NAME: &str = "save.json";

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store at `path`. The file is created on first save.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store under the platform state directory.
    ///
    /// Uses `$XDG_STATE_HOME/{app_name}/save.json`, then
    /// `~/.local/state/{app_name}/save.json`, then the current directory.
    #[must_use]
    pub fn default_for_app(app_name: &str) -> Self {
        Self::new(state_dir().join(app_name).join(SAVE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone();
        tmp.set_extension("json.tmp");
        tmp
    }
}

/// State directory, falling back to the current dir if unavailable.
pub fn state_dir() -> PathBuf {
    if let Ok(state_home) = std::env::var("XDG_STATE_HOME") {
        if !state_home.is_empty() {
            return PathBuf::from(state_home);
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("state");
    }
    PathBuf::from(".")
}

impl SnapshotStore for FileStore {
    fn name(&self) -> &str {
        "FileStore"
    }

    fn load(&self) -> StoreResult<Option<ProgressSnapshot>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no save file");
            return Ok(None);
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let snapshot: ProgressSnapshot = serde_json::from_reader(reader).map_err(|e| {
            StoreError::Serialization(format!("failed to parse save file: {e}"))
        })?;

        debug!(
            path = %self.path.display(),
            deck = snapshot.deck_ids.len(),
            "loaded save file"
        );
        Ok(Some(snapshot))
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path();
        {
            let file = File::create(&tmp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, snapshot).map_err(|e| {
                StoreError::Serialization(format!("failed to serialize snapshot: {e}"))
            })?;
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        debug!(
            path = %self.path.display(),
            score = snapshot.score,
            "wrote save file"
        );
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "deleted save file");
        }
        Ok(())
    }

    fn is_available(&self) -> bool {
        let Some(parent) = self.path.parent() else {
            return false;
        };
        if parent.as_os_str().is_empty() {
            return true;
        }
        if !parent.exists() {
            return fs::create_dir_all(parent).is_ok();
        }
        let probe = parent.join(".tui_pairs_write_test");
        if fs::write(&probe, b"test").is_ok() {
            let _ = fs::remove_file(&probe);
            return true;
        }
        false
    }
}

impl fmt::Debug for FileStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> ProgressSnapshot {
        ProgressSnapshot {
            layout_index: 2,
            score: 1200,
            combo: 4,
            seed: 31337,
            deck_ids: vec![3, 1, 0, 2, 2, 0, 1, 3],
            matched_ids: vec![0, 3],
        }
    }

    #[test]
    fn file_store_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("save.json");
        let store = FileStore::new(&path);

        store.save(&sample()).unwrap();
        assert!(path.exists());
        assert!(!store.temp_path().exists());
        assert_eq!(store.load().unwrap(), Some(sample()));
    }

    #[test]
    fn file_store_uses_camel_case_fields() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("save.json");
        FileStore::new(&path).save(&sample()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["layoutIndex"], 2);
        assert_eq!(value["deckIds"].as_array().unwrap().len(), 8);
        assert_eq!(value["matchedIds"], serde_json::json!([0, 3]));
    }

    #[test]
    fn file_store_load_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("missing.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_missing_deck_loads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("save.json");
        std::fs::write(&path, r#"{"layoutIndex":1,"score":50,"combo":0,"seed":1}"#).unwrap();

        let snapshot = FileStore::new(&path).load().unwrap().unwrap();
        assert!(snapshot.deck_ids.is_empty());
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn file_store_corrupt_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("save.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn file_store_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("dirs").join("save.json");
        let store = FileStore::new(&path);
        store.save(&sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_store_clear() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("save.json");
        let store = FileStore::new(&path);
        store.save(&sample()).unwrap();

        store.clear().unwrap();
        assert!(!path.exists());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn file_store_is_available_in_temp_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(FileStore::new(tmp.path().join("save.json")).is_available());
    }
}
