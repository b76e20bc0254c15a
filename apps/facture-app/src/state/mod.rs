//! # State Module
//!
//! Everything a command needs, built once per process.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  AppConfig::load(--config)                                              │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  AppState::open(config)                                                 │
//! │        │                                                                │
//! │        ├── config:   AppConfig        (read-only)                       │
//! │        ├── store:    Store            (clients.xlsx, items.xlsx)        │
//! │        └── renderer: DocumentRenderer (company + number format)         │
//! │                                                                         │
//! │  Commands borrow `&AppState`; the CLI runs one command per process,     │
//! │  so no locking is involved.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;

pub use config::{AppConfig, ConfigError, ConfigResult, PathsConfig};

use facture_render::DocumentRenderer;
use facture_store::Store;

use crate::error::ApiResult;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Store,
    pub renderer: DocumentRenderer,
}

impl AppState {
    /// Opens the record store under `config.paths.data_dir`, creating
    /// missing workbooks.
    pub fn open(config: AppConfig) -> ApiResult<Self> {
        let store = Store::open(&config.paths.data_dir)?;
        let renderer = DocumentRenderer::new(config.company.clone(), config.format.clone());
        Ok(AppState {
            config,
            store,
            renderer,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use tempfile::TempDir;

    /// State over empty workbooks in a temporary directory.
    pub fn temp_state() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::default();
        config.paths.data_dir = dir.path().join("data");
        config.paths.output_dir = dir.path().join("out");
        let state = AppState::open(config).unwrap();
        (dir, state)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::temp_state;

    #[test]
    fn test_open_creates_workbooks() {
        let (dir, state) = temp_state();
        assert!(dir.path().join("data").join("clients.xlsx").exists());
        assert!(dir.path().join("data").join("items.xlsx").exists());
        assert_eq!(state.renderer.format().currency, "DINARS");
    }
}
