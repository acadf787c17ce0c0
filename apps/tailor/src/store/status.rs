//! Busy flag and error slot handling shared by the extraction and generation
//! workflows.

use tracing::{error, warn};

use crate::errors::AppError;
use crate::store::{lock, Action, SharedStore};

/// Holds the busy flag for the duration of one extraction or generation.
///
/// The flag is cleared when the guard drops, on every exit path.
pub struct BusyGuard {
    store: SharedStore,
}

impl BusyGuard {
    /// Sets the busy flag and clears the error slot.
    ///
    /// Fails with [`AppError::Busy`] without touching the store when another
    /// request already holds the flag.
    pub fn acquire(store: &SharedStore) -> Result<Self, AppError> {
        let persisted = {
            let mut guard = lock(store);
            if guard.snapshot().draft.is_loading {
                warn!("Rejecting request: another request is in flight");
                return Err(AppError::Busy);
            }
            guard
                .dispatch(Action::SetIsLoading(true))
                .and_then(|_| guard.dispatch(Action::SetError(None)))
        };

        let busy = BusyGuard {
            store: store.clone(),
        };
        if let Err(e) = persisted {
            let e = AppError::from(e);
            record_error(store, &e);
            return Err(e);
        }
        Ok(busy)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        if let Err(e) = lock(&self.store).dispatch(Action::SetIsLoading(false)) {
            error!("Failed to persist cleared busy flag: {e}");
        }
    }
}

/// Writes `err` into the error slot, replacing any previous error.
pub fn record_error(store: &SharedStore, err: &AppError) {
    let message = err.user_message();
    warn!("{message}");
    if let Err(e) = lock(store).dispatch(Action::SetError(Some(message))) {
        error!("Failed to persist error slot: {e}");
    }
}
