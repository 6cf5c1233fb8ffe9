use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use stockroom_inventory::InventoryState;

use super::{SnapshotError, SnapshotStore, decode, encode};

/// Slot kept in memory as encoded bytes, so the same encoding path runs as on
/// disk. For tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    slot: RwLock<Option<Vec<u8>>>,
    saves: AtomicUsize,
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `state` already saved.
    pub fn with_state(state: &InventoryState) -> Result<Self, SnapshotError> {
        let store = Self::new();
        store.save(state)?;
        store.saves.store(0, Ordering::SeqCst);
        Ok(store)
    }

    /// Number of successful saves since construction.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> Result<Option<InventoryState>, SnapshotError> {
        let slot = self
            .slot
            .read()
            .map_err(|_| SnapshotError::Unavailable("slot lock poisoned".to_string()))?;
        slot.as_deref().map(decode).transpose()
    }

    fn save(&self, state: &InventoryState) -> Result<(), SnapshotError> {
        let bytes = encode(state)?;
        let mut slot = self
            .slot
            .write()
            .map_err(|_| SnapshotError::Unavailable("slot lock poisoned".to_string()))?;
        *slot = Some(bytes);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_inventory::default_catalog;

    #[test]
    fn empty_slot_loads_none() {
        let store = InMemorySnapshotStore::new();
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn save_replaces_previous_contents() {
        let store = InMemorySnapshotStore::new();
        store.save(&default_catalog(Utc::now())).unwrap();
        store.save(&InventoryState::new()).unwrap();

        assert_eq!(store.load().unwrap(), Some(InventoryState::new()));
        assert_eq!(store.save_count(), 2);
    }
}
