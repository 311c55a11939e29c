//! Shared application state handed to every request handler.

use std::sync::Arc;

use trep_db::Database;
use trep_index::InMemoryIndex;

/// The fuzzy index is always present (possibly empty); the reverse-lookup
/// database is optional, mirroring `trep-cli`'s `Session` (no SQL backend
/// configured is a valid, if limited, deployment).
pub struct ApiState {
    pub index: InMemoryIndex,
    pub db: Option<Database>,
}

pub type AppState = Arc<ApiState>;
