// Application state module
// Immutable state shared by all request tasks.

use std::path::Path;
use std::sync::Arc;

use crate::assets::AssetTable;
use crate::vfs::{self, VirtualFs};

use super::types::Config;

/// Shared application state: the configuration and the selected filesystem.
pub struct AppState {
    pub config: Config,
    pub fs: Arc<dyn VirtualFs>,
}

impl AppState {
    /// Build state from a configuration and an explicitly constructed table.
    pub fn new(config: Config, table: Arc<AssetTable>) -> Self {
        let fs = vfs::filesystem(
            table,
            config.assets.use_local,
            Path::new(&config.assets.local_root),
        );
        Self { config, fs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_selects_embedded() {
        let config = Config::load_from("does-not-exist").unwrap();
        let state = AppState::new(config, Arc::new(AssetTable::builtin()));
        assert!(state.fs.open("/static/test.js").is_ok());
        assert!(state.fs.open("/static/absent.js").is_err());
    }
}
