// Application state module
// Immutable per-process state shared across connection tasks

use std::path::PathBuf;

use super::types::Config;
use crate::routes::RouteTable;

/// Application state
///
/// Built once at startup and shared by `Arc` into every connection task.
/// Nothing here is mutated after construction, so no locking is needed.
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub assets_root: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let assets_root = PathBuf::from(&config.assets.root);
        Self {
            config,
            routes: RouteTable::builtin(),
            assets_root,
        }
    }
}
