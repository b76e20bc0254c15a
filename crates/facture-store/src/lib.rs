//! # facture-store: Record Store for Facture
//!
//! Clients and catalogue items live in two spreadsheets so that the
//! office can still open and edit them by hand.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Facture Data Flow                                │
//! │                                                                         │
//! │  App command (generate_document, add_item, ...)                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  facture-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Store      │    │  Repositories │    │  SheetFile   │  │   │
//! │  │   │  (store.rs)   │    │ (client.rs,   │    │  (sheet.rs)  │  │   │
//! │  │   │               │    │  item.rs)     │    │              │  │   │
//! │  │   │ data_dir      │───►│ SheetRepo<C>  │───►│ calamine     │  │   │
//! │  │   │ init files    │    │ SheetRepo<I>  │    │ xlsxwriter   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  data/clients.xlsx   data/items.xlsx                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - Data directory and repository handles
//! - [`repository`] - Repository trait and the xlsx implementations
//! - [`sheet`] - Whole-sheet reads and atomic rewrites
//! - [`error`] - Store error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod sheet;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::{
    ClientRepository, ItemRepository, RecordRepository, SheetRecord, SheetRepository,
};
pub use store::Store;
