//! # Render Error Types

use facture_core::ValidationError;
use thiserror::Error;

/// Document assembly or output failure.
///
/// Any of these aborts the generation; no file is left behind.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A client field printed on every document is blank.
    #[error("Client field '{field}' is required to render a document")]
    MissingClientField { field: String },

    /// The request has no line items.
    #[error("Cannot render a document without line items")]
    NoLineItems,

    /// A line amount cannot be computed (quantity × price overflows).
    #[error("Cannot compute line amount: {0}")]
    Amount(#[from] ValidationError),

    /// The PDF backend failed.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// Writing the output file failed.
    #[error("Cannot write document: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    pub fn missing_client_field(field: impl Into<String>) -> Self {
        RenderError::MissingClientField {
            field: field.into(),
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
