//! # Record Store
//!
//! Opens the data directory and hands out repositories.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store::open(data_dir)                              │
//! │                                                                         │
//! │  create_dir_all(data_dir)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  clients.xlsx missing? ──► write header row only                        │
//! │  items.xlsx   missing? ──► write header row only                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store { clients(), items() }                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::StoreResult;
use crate::repository::{ClientRepository, ItemRepository};

/// Handle on the data directory.
///
/// ## Usage
/// ```rust,no_run
/// use facture_store::{RecordRepository, Store};
///
/// let store = Store::open("./data")?;
/// for client in store.clients().list_all()? {
///     println!("{} {}", client.id, client.name);
/// }
/// # Ok::<(), facture_store::StoreError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
    clients: ClientRepository,
    items: ItemRepository,
}

impl Store {
    /// Opens (and initialises if needed) the store in `data_dir`.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir)?;

        let clients = ClientRepository::new(&data_dir);
        let items = ItemRepository::new(&data_dir);
        let created_clients = clients.init()?;
        let created_items = items.init()?;

        info!(
            data_dir = %data_dir.display(),
            created_clients,
            created_items,
            "Record store ready"
        );

        Ok(Store {
            data_dir,
            clients,
            items,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Client repository.
    pub fn clients(&self) -> &ClientRepository {
        &self.clients
    }

    /// Item repository.
    pub fn items(&self) -> &ItemRepository {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RecordRepository;

    #[test]
    fn test_open_creates_workbooks() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let store = Store::open(&data_dir).unwrap();

        assert!(data_dir.join("clients.xlsx").exists());
        assert!(data_dir.join("items.xlsx").exists());
        assert!(store.clients().list_all().unwrap().is_empty());
        assert!(store.items().list_all().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path()).unwrap();
        store
            .clients()
            .append(facture_core::NewClient {
                name: "Condor".to_string(),
                address: "Bordj Bou Arreridj".to_string(),
                ..Default::default()
            })
            .unwrap();

        let reopened = Store::open(dir.path()).unwrap();
        assert_eq!(reopened.clients().list_all().unwrap().len(), 1);
    }
}
