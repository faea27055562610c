use crate::storage::LogStore;

/// Shared by every handler. Holds where the journal lives, never the journal
/// itself: each request reads the file afresh.
#[derive(Clone)]
pub struct AppState {
    pub store: LogStore,
}

impl AppState {
    pub fn new(store: LogStore) -> Self {
        Self { store }
    }
}
