//! Version Store: the single state container for drafts and generated versions.
//!
//! Every mutation goes through [`VersionStore::dispatch`], which applies the
//! pure reducer and synchronously persists the whole resulting snapshot.

pub mod handlers;
pub mod reducer;
pub mod status;
pub mod storage;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::models::AppSnapshot;

pub use reducer::{reduce, Action};
pub use status::{record_error, BusyGuard};
#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::{FileStorage, SnapshotStorage, STORAGE_SLOT};

/// The store as handed to every component through `AppState`.
pub type SharedStore = Arc<Mutex<VersionStore>>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub struct VersionStore {
    state: AppSnapshot,
    storage: Box<dyn SnapshotStorage>,
    /// Last id handed out, in epoch milliseconds.
    last_id_ms: i64,
}

impl VersionStore {
    /// Rehydrates from storage. An absent, unreadable or malformed snapshot
    /// yields the initial state; this never fails.
    pub fn open(storage: impl SnapshotStorage + 'static) -> Self {
        let mut state = match storage.read() {
            Ok(Some(raw)) => decode_snapshot(&raw).unwrap_or_else(|e| {
                warn!("Discarding malformed snapshot in '{STORAGE_SLOT}': {e}");
                AppSnapshot::initial()
            }),
            Ok(None) => {
                info!("No snapshot in '{STORAGE_SLOT}', starting from initial state");
                AppSnapshot::initial()
            }
            Err(e) => {
                warn!("Could not read '{STORAGE_SLOT}', starting from initial state: {e}");
                AppSnapshot::initial()
            }
        };

        // Nothing can be in flight in a fresh process.
        state.draft.is_loading = false;

        let last_id_ms = state
            .generated_versions
            .iter()
            .filter_map(|v| v.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);

        info!(
            "Version store ready with {} generated versions",
            state.generated_versions.len()
        );

        Self {
            state,
            storage: Box::new(storage),
            last_id_ms,
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn snapshot(&self) -> &AppSnapshot {
        &self.state
    }

    /// Applies `action` and persists the full resulting state.
    ///
    /// The in-memory state keeps the mutation even when the write fails.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.persist()
    }

    /// Replaces the whole state with the initial state.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        info!("Resetting store to initial state");
        self.dispatch(Action::ClearState)
    }

    /// Mints a version id from the current clock, never repeating a previous id.
    pub fn next_version_id(&mut self) -> (String, i64) {
        let now_ms = chrono::Utc::now().timestamp_millis();
        self.last_id_ms = next_id_ms(now_ms, self.last_id_ms);
        (self.last_id_ms.to_string(), now_ms)
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let encoded = encode_snapshot(&self.state)?;
        self.storage.write(&encoded).inspect_err(|e| {
            error!("Failed to persist snapshot to '{STORAGE_SLOT}': {e}");
        })
    }
}

/// Locks the shared store. A panic in another holder does not leave the
/// snapshot half-written, so a poisoned lock is still safe to use.
pub fn lock(store: &SharedStore) -> MutexGuard<'_, VersionStore> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn encode_snapshot(state: &AppSnapshot) -> Result<String, StoreError> {
    Ok(serde_json::to_string(state)?)
}

pub fn decode_snapshot(raw: &str) -> Result<AppSnapshot, StoreError> {
    Ok(serde_json::from_str(raw)?)
}

fn next_id_ms(now_ms: i64, last_ms: i64) -> i64 {
    now_ms.max(last_ms + 1)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::models::{GeneratedVersion, Model};

    struct FailingStorage;

    impl SnapshotStorage for FailingStorage {
        fn read(&self) -> Result<Option<String>, StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into())
        }

        fn write(&mut self, _contents: &str) -> Result<(), StoreError> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full").into())
        }
    }

    fn append(store: &mut VersionStore, text: &str) -> String {
        let (id, created_at) = store.next_version_id();
        store
            .dispatch(Action::AddGeneratedVersion(GeneratedVersion {
                id: id.clone(),
                tailored_resume: text.to_string(),
                explanation: "- reworded".to_string(),
                created_at,
            }))
            .unwrap();
        id
    }

    #[test]
    fn test_open_without_snapshot_uses_initial_state() {
        let store = VersionStore::open(MemoryStorage::new());
        assert_eq!(store.snapshot(), &AppSnapshot::initial());
    }

    #[test]
    fn test_open_with_malformed_snapshot_fails_open() {
        let store = VersionStore::open(MemoryStorage::with_contents("{not json"));
        assert_eq!(store.snapshot(), &AppSnapshot::initial());

        let store = VersionStore::open(MemoryStorage::with_contents(r#"{"draft": 42}"#));
        assert_eq!(store.snapshot(), &AppSnapshot::initial());
    }

    #[test]
    fn test_open_with_unreadable_storage_fails_open() {
        let store = VersionStore::open(FailingStorage);
        assert_eq!(store.snapshot(), &AppSnapshot::initial());
    }

    #[test]
    fn test_every_dispatch_persists_full_snapshot() {
        let storage = MemoryStorage::new();
        let mut store = VersionStore::open(storage.clone());

        store
            .dispatch(Action::SetJobDescription("Senior Rust Engineer".into()))
            .unwrap();
        let persisted = decode_snapshot(&storage.contents().unwrap()).unwrap();
        assert_eq!(&persisted, store.snapshot());

        append(&mut store, "# Tailored");
        let persisted = decode_snapshot(&storage.contents().unwrap()).unwrap();
        assert_eq!(persisted.generated_versions.len(), 1);
        assert_eq!(&persisted, store.snapshot());
    }

    #[test]
    fn test_persist_then_rehydrate_round_trips() {
        let storage = MemoryStorage::new();
        let mut store = VersionStore::open(storage.clone());
        store.dispatch(Action::SetApiKey("sk-test".into())).unwrap();
        store
            .dispatch(Action::SetOriginalResume("Jane Doe\nEngineer".into()))
            .unwrap();
        store.dispatch(Action::SetSelectedModel(Model::Gpt4o)).unwrap();
        store
            .dispatch(Action::SetError(Some("Generation failed: timeout".into())))
            .unwrap();
        append(&mut store, "# One");
        append(&mut store, "# Two");

        let rehydrated = VersionStore::open(storage);
        assert_eq!(rehydrated.snapshot(), store.snapshot());
    }

    #[test]
    fn test_rehydrate_clears_stale_busy_flag() {
        let storage = MemoryStorage::new();
        let mut store = VersionStore::open(storage.clone());
        store.dispatch(Action::SetIsLoading(true)).unwrap();

        let rehydrated = VersionStore::open(storage);
        assert!(!rehydrated.snapshot().draft.is_loading);
    }

    #[test]
    fn test_appends_grow_by_one_with_distinct_ids() {
        let mut store = VersionStore::open(MemoryStorage::new());
        let mut ids = HashSet::new();
        for i in 0..50 {
            let id = append(&mut store, &format!("v{i}"));
            assert_eq!(store.snapshot().generated_versions.len(), i + 1);
            assert!(ids.insert(id), "version ids must be pairwise distinct");
        }
    }

    #[test]
    fn test_id_clock_continues_after_rehydrate() {
        let storage = MemoryStorage::new();
        let mut store = VersionStore::open(storage.clone());
        let first = append(&mut store, "first");

        let mut rehydrated = VersionStore::open(storage);
        let (second, _) = rehydrated.next_version_id();
        assert!(second.parse::<i64>().unwrap() > first.parse::<i64>().unwrap());
    }

    #[test]
    fn test_next_id_ms_is_monotonic() {
        assert_eq!(next_id_ms(1_000, 0), 1_000);
        assert_eq!(next_id_ms(1_000, 1_000), 1_001);
        assert_eq!(next_id_ms(900, 1_000), 1_001);
    }

    #[test]
    fn test_reset_yields_initial_state_and_persists_it() {
        let storage = MemoryStorage::new();
        let mut store = VersionStore::open(storage.clone());
        store.dispatch(Action::SetApiKey("sk-test".into())).unwrap();
        store.dispatch(Action::SetSelectedModel(Model::Gpt4Turbo)).unwrap();
        append(&mut store, "# Tailored");

        store.reset().unwrap();
        assert_eq!(store.snapshot(), &AppSnapshot::initial());
        let persisted = decode_snapshot(&storage.contents().unwrap()).unwrap();
        assert_eq!(persisted, AppSnapshot::initial());
    }

    #[test]
    fn test_failed_write_keeps_in_memory_mutation() {
        let mut store = VersionStore::open(FailingStorage);
        let result = store.dispatch(Action::SetJobDescription("jd".into()));
        assert!(matches!(result, Err(StoreError::Io(_))));
        assert_eq!(store.snapshot().draft.job_description, "jd");
    }
}
