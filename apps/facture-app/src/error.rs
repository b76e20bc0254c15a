//! # API Error Type
//!
//! Unified error type for every command.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Facture                                │
//! │                                                                         │
//! │  CLI                         Commands                                   │
//! │  ───                         ────────                                   │
//! │                                                                         │
//! │  facture generate ...                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  Store Error? ─── StoreError::NotFound { .. } ─────┐            │  │
//! │  │         │                                          │            │  │
//! │  │  Validation Error? ── CoreError::Validation ───────┤            │  │
//! │  │         │                                          ▼            │  │
//! │  │  Render Error? ─── RenderError::Pdf(..) ──────── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: "[NotFound] Client not found: 42"   exit code 1                │
//! │  --json: { "code": "NOT_FOUND", "message": "Client not found: 42" }     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use facture_core::{CoreError, ValidationError};
use facture_render::RenderError;
use facture_store::StoreError;
use serde::Serialize;

/// Error returned from every command.
///
/// ## Serialization
/// What `--json` prints when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: 7"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Client or item id absent from the store
    NotFound,

    /// Bad user input: unknown kind, unparseable number, empty document
    ValidationError,

    /// Workbook could not be read or written
    StorageError,

    /// Document could not be laid out or written
    RenderError,

    /// Configuration or unexpected failure
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyDocument => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            StoreError::Validation(e) => e.into(),
            StoreError::Read { .. } | StoreError::Write { .. } | StoreError::Io(_) => {
                tracing::error!("Record store failure: {}", err);
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
        }
    }
}

impl From<RenderError> for ApiError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::MissingClientField { .. } | RenderError::NoLineItems => {
                ApiError::validation(err.to_string())
            }
            RenderError::Amount(e) => e.into(),
            RenderError::Pdf(_) | RenderError::Io(_) => {
                tracing::error!("Document rendering failed: {}", err);
                ApiError::new(ErrorCode::RenderError, err.to_string())
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_maps_to_not_found() {
        let err: ApiError = StoreError::not_found("Client", 42).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Client not found: 42");
    }

    #[test]
    fn test_empty_document_is_validation() {
        let err: ApiError = CoreError::EmptyDocument.into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_render_io_is_render_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ApiError = RenderError::Io(io).into();
        assert_eq!(err.code, ErrorCode::RenderError);
    }

    #[test]
    fn test_render_amount_is_validation() {
        let err: ApiError = RenderError::Amount(ValidationError::too_large("line total")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Item", "7");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Item not found: 7");
        assert_eq!(err.to_string(), "[NotFound] Item not found: 7");
    }
}
