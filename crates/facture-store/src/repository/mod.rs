//! # Repository Module
//!
//! Record repositories for Facture.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  App command                                                            │
//! │       │                                                                 │
//! │       │  store.clients().find_by_id(3)                                  │
//! │       ▼                                                                 │
//! │  RecordRepository (trait)                                              │
//! │  ├── list_all(&self)                                                   │
//! │  ├── find_by_id(&self, id)                                             │
//! │  ├── append(&self, draft)                                              │
//! │  └── delete_by_id(&self, id)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SheetRepository<Client> / SheetRepository<Item>                       │
//! │       │  row ↔ record mapping in client.rs / item.rs                    │
//! │       ▼                                                                 │
//! │  clients.xlsx / items.xlsx                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ClientRepository`] - Customers documents are addressed to
//! - [`ItemRepository`] - Catalogue articles

pub mod client;
pub mod item;

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info, warn};

use facture_core::RecordId;

use crate::error::{StoreError, StoreResult};
use crate::sheet::{CellValue, SheetFile};

pub use client::ClientRepository;
pub use item::ItemRepository;

// =============================================================================
// Traits
// =============================================================================

/// Storage-agnostic access to one kind of record.
pub trait RecordRepository {
    type Record;
    type Draft;

    /// Every record, in file order.
    fn list_all(&self) -> StoreResult<Vec<Self::Record>>;

    /// ## Errors
    /// [`StoreError::NotFound`] when no record has this id.
    fn find_by_id(&self, id: RecordId) -> StoreResult<Self::Record>;

    /// Validates the draft, allocates the next id and stores the record.
    fn append(&self, draft: Self::Draft) -> StoreResult<Self::Record>;

    /// ## Errors
    /// [`StoreError::NotFound`] when no record has this id.
    fn delete_by_id(&self, id: RecordId) -> StoreResult<()>;
}

/// Mapping between a record type and one row of its workbook.
pub trait SheetRecord: Clone {
    type Draft;

    /// Entity name used in errors and logs.
    const ENTITY: &'static str;
    const FILE_NAME: &'static str;
    const SHEET_NAME: &'static str;
    const HEADERS: &'static [&'static str];

    fn id(&self) -> RecordId;

    /// Builds a record from a data row. `cells[0]` is the id column.
    fn from_row(id: RecordId, cells: &[String]) -> Self;

    fn to_row(&self) -> Vec<CellValue>;

    fn from_draft(draft: Self::Draft, id: RecordId) -> StoreResult<Self>;
}

/// Returns the trimmed cell at `idx`, or "" for short rows.
pub(crate) fn cell(cells: &[String], idx: usize) -> String {
    cells.get(idx).map(|c| c.trim().to_string()).unwrap_or_default()
}

/// Parses an id cell ("3" or "3.0"). Blank or garbage gives `None`.
pub(crate) fn parse_id(raw: &str) -> Option<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<RecordId>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.fract() == 0.0 && *v >= 0.0 && *v <= RecordId::MAX as f64)
            .map(|v| v as RecordId)
    })
}

// =============================================================================
// Sheet Repository
// =============================================================================

/// [`RecordRepository`] over one xlsx workbook.
pub struct SheetRepository<R> {
    file: SheetFile,
    _record: PhantomData<fn() -> R>,
}

impl<R: SheetRecord> SheetRepository<R> {
    /// Repository over `<data_dir>/<R::FILE_NAME>`.
    pub fn new(data_dir: &Path) -> Self {
        SheetRepository {
            file: SheetFile::new(data_dir.join(R::FILE_NAME), R::SHEET_NAME, R::HEADERS),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Creates the header-only workbook when missing.
    pub fn init(&self) -> StoreResult<bool> {
        self.file.ensure_exists()
    }

    fn save_all(&self, records: &[R]) -> StoreResult<()> {
        let rows: Vec<Vec<CellValue>> = records.iter().map(SheetRecord::to_row).collect();
        self.file.write_rows(&rows)
    }
}

impl<R> Clone for SheetRepository<R> {
    fn clone(&self) -> Self {
        SheetRepository {
            file: self.file.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: SheetRecord> fmt::Debug for SheetRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetRepository")
            .field("entity", &R::ENTITY)
            .field("path", &self.file.path())
            .finish()
    }
}

impl<R: SheetRecord> RecordRepository for SheetRepository<R> {
    type Record = R;
    type Draft = R::Draft;

    fn list_all(&self) -> StoreResult<Vec<R>> {
        let mut records = Vec::new();
        for (idx, cells) in self.file.read_rows()?.iter().enumerate() {
            let raw_id = cell(cells, 0);
            match parse_id(&raw_id) {
                Some(id) => records.push(R::from_row(id, cells)),
                None if raw_id.is_empty() => {}
                None => warn!(
                    entity = R::ENTITY,
                    row = idx + 2,
                    id = %raw_id,
                    "Skipping row with unreadable id"
                ),
            }
        }
        Ok(records)
    }

    fn find_by_id(&self, id: RecordId) -> StoreResult<R> {
        debug!(entity = R::ENTITY, id, "Looking up record");
        self.list_all()?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| StoreError::not_found(R::ENTITY, id))
    }

    fn append(&self, draft: R::Draft) -> StoreResult<R> {
        let mut records = self.list_all()?;
        let max_id = records.iter().map(SheetRecord::id).max().unwrap_or(0);
        let next_id = max_id.checked_add(1).ok_or_else(|| {
            StoreError::write(self.file.path(), format!("no {} id left after {}", R::ENTITY, max_id))
        })?;

        let record = R::from_draft(draft, next_id)?;
        records.push(record.clone());
        self.save_all(&records)?;

        info!(entity = R::ENTITY, id = next_id, "Record added");
        Ok(record)
    }

    fn delete_by_id(&self, id: RecordId) -> StoreResult<()> {
        let mut records = self.list_all()?;
        let before = records.len();
        records.retain(|record| record.id() != id);

        if records.len() == before {
            return Err(StoreError::not_found(R::ENTITY, id));
        }

        self.save_all(&records)?;
        info!(entity = R::ENTITY, id, "Record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("3"), Some(3));
        assert_eq!(parse_id(" 12 "), Some(12));
        assert_eq!(parse_id("4.0"), Some(4));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("4.5"), None);
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("abc"), None);
    }

    #[test]
    fn test_cell_tolerates_short_rows() {
        let cells = vec!["1".to_string(), " Nom ".to_string()];
        assert_eq!(cell(&cells, 1), "Nom");
        assert_eq!(cell(&cells, 5), "");
    }
}
