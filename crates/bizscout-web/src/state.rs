use std::sync::Arc;

use bizscout_core::SearchService;
use bizscout_store::LocalStore;
use tokio::sync::Mutex;

/// Shared application state. The store sits behind a mutex because rusqlite
/// connections are single-threaded; writes are single-row so contention is a
/// non-issue for a single-user app.
pub struct AppState {
    pub service: SearchService,
    pub store: Mutex<LocalStore>,
}

pub type SharedState = Arc<AppState>;
