use std::sync::Arc;

use crate::config::Config;
use crate::generation::TailorBackend;
use crate::store::SharedStore;
use crate::view::SharedView;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    /// Transient selection pointer; not part of the persisted snapshot.
    pub view: SharedView,
    /// Pluggable tailoring backend. Default: the Chat Completions `LlmClient`.
    pub backend: Arc<dyn TailorBackend>,
    pub config: Config,
}
