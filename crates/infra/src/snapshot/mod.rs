//! Snapshot persistence: the whole inventory state saved as one unit into a
//! named slot.
//!
//! The slot holds `{"state": {"products": [...], "movements": [...]}, "version": 0}`.
//! Backends only move bytes; consistency is re-checked on load.

pub mod in_memory;
pub mod json_file;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockroom_inventory::InventoryState;

pub use in_memory::InMemorySnapshotStore;
pub use json_file::JsonFileSnapshotStore;

/// Default slot name.
pub const DEFAULT_SLOT: &str = "inventory-store";

/// Layout version written into every slot.
pub const SLOT_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot could not be encoded or decoded: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("snapshot is inconsistent: {0}")]
    Corrupt(String),

    #[error("unsupported snapshot version {found}")]
    UnsupportedVersion { found: u32 },

    #[error("snapshot storage unavailable: {0}")]
    Unavailable(String),
}

/// On-disk envelope around the state.
#[derive(Debug, Serialize, Deserialize)]
pub struct PersistedSlot {
    pub state: InventoryState,
    pub version: u32,
}

/// Encode state into slot contents.
pub fn encode(state: &InventoryState) -> Result<Vec<u8>, SnapshotError> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        state: &'a InventoryState,
        version: u32,
    }

    Ok(serde_json::to_vec_pretty(&Borrowed {
        state,
        version: SLOT_VERSION,
    })?)
}

/// Decode slot contents, rejecting unknown versions and inconsistent state.
pub fn decode(bytes: &[u8]) -> Result<InventoryState, SnapshotError> {
    let slot: PersistedSlot = serde_json::from_slice(bytes)?;
    if slot.version != SLOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion { found: slot.version });
    }
    slot.state
        .verify()
        .map_err(|e| SnapshotError::Corrupt(e.to_string()))?;
    Ok(slot.state)
}

/// Storage for the single persisted snapshot.
pub trait SnapshotStore: Send + Sync {
    /// The saved state, or `None` if nothing was ever saved.
    fn load(&self) -> Result<Option<InventoryState>, SnapshotError>;

    /// Replace the saved state.
    fn save(&self, state: &InventoryState) -> Result<(), SnapshotError>;
}

impl<S> SnapshotStore for Arc<S>
where
    S: SnapshotStore + ?Sized,
{
    fn load(&self) -> Result<Option<InventoryState>, SnapshotError> {
        (**self).load()
    }

    fn save(&self, state: &InventoryState) -> Result<(), SnapshotError> {
        (**self).save(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_inventory::default_catalog;

    #[test]
    fn encode_then_decode_restores_state() {
        let state = default_catalog(Utc::now());
        let bytes = encode(&state).unwrap();

        assert_eq!(decode(&bytes).unwrap(), state);
    }

    #[test]
    fn slot_layout_wraps_state_with_version() {
        let state = default_catalog(Utc::now());
        let json: serde_json::Value = serde_json::from_slice(&encode(&state).unwrap()).unwrap();

        assert_eq!(json["version"], serde_json::json!(0));
        assert_eq!(json["state"]["products"].as_array().unwrap().len(), 6);
        assert_eq!(json["state"]["movements"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn unknown_version_is_rejected() {
        let bytes = br#"{"state": {"products": [], "movements": []}, "version": 3}"#;
        match decode(bytes).unwrap_err() {
            SnapshotError::UnsupportedVersion { found } => assert_eq!(found, 3),
            other => panic!("Expected UnsupportedVersion, got {other:?}"),
        }
    }

    #[test]
    fn dangling_movement_is_corrupt() {
        let bytes = br#"{
            "state": {
                "products": [],
                "movements": [{
                    "id": "01890a5d-ac96-774b-bcce-b302099a8057",
                    "productId": "01890a5d-ac96-774b-bcce-b302099a8058",
                    "type": "saida",
                    "quantity": 3,
                    "date": "2026-03-01T10:00:00Z",
                    "notes": ""
                }]
            },
            "version": 0
        }"#;
        match decode(bytes).unwrap_err() {
            SnapshotError::Corrupt(msg) => assert!(msg.contains("missing product")),
            other => panic!("Expected Corrupt, got {other:?}"),
        }
    }
}
