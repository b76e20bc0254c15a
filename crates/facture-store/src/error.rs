//! # Store Error Types
//!
//! Error types for record store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  calamine::Error / XlsxError / io::Error                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds file path and entity context          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (facture-app) ← NOT_FOUND / STORAGE_ERROR / VALIDATION_ERROR │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use facture_core::ValidationError;
use std::path::Path;
use thiserror::Error;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found.
    ///
    /// ## When This Occurs
    /// - A document references a client or item id that is not in the sheet
    /// - Deleting an id that was already removed
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The workbook could not be opened or parsed.
    #[error("Cannot read {path}: {message}")]
    Read { path: String, message: String },

    /// The workbook could not be written.
    #[error("Cannot write {path}: {message}")]
    Write { path: String, message: String },

    /// A draft record failed validation.
    #[error("Invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// File system error (directory creation, rename).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub(crate) fn read(path: &Path, message: impl ToString) -> Self {
        StoreError::Read {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }

    pub(crate) fn write(path: &Path, message: impl ToString) -> Self {
        StoreError::Write {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
