use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use stockroom_inventory::InventoryState;

use super::{SnapshotError, SnapshotStore, decode, encode};

/// File-backed slot: `{dir}/{slot}.json`.
///
/// Saves write a sibling temp file and rename it over the slot, so a crash
/// mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshotStore {
    path: PathBuf,
}

impl JsonFileSnapshotStore {
    /// Slot `{dir}/{slot}.json`.
    pub fn new(dir: impl Into<PathBuf>, slot: &str) -> Self {
        let path = dir.into().join(format!("{slot}.json"));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotStore for JsonFileSnapshotStore {
    fn load(&self) -> Result<Option<InventoryState>, SnapshotError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode(&bytes).map(Some)
    }

    fn save(&self, state: &InventoryState) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let bytes = encode(state)?;
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        tracing::debug!(path = %self.path.display(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_inventory::default_catalog;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path(), "inventory-store");

        assert!(store.load().unwrap().is_none());
        assert_eq!(store.path(), dir.path().join("inventory-store.json"));
    }

    #[test]
    fn save_creates_directories_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path().join("nested/data"), "inventory-store");
        let state = default_catalog(Utc::now());

        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), Some(state));
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn garbage_file_is_an_error_not_a_reseed() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSnapshotStore::new(dir.path(), "inventory-store");
        fs::write(store.path(), b"{ not json").unwrap();

        match store.load().unwrap_err() {
            SnapshotError::Serde(_) => {}
            other => panic!("Expected Serde error, got {other:?}"),
        }
    }
}
