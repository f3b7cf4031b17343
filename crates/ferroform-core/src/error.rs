//! Error types for the form engine.

use thiserror::Error;

/// Errors surfaced by rendering and submission handling.
#[derive(Debug, Error)]
pub enum FormError {
    /// The form-management service is unavailable or the form id is
    /// unknown. Fatal to the render; never retried.
    #[error("form schema unavailable: {0}")]
    SchemaUnavailable(String),

    /// A required field cleaned to empty. The whole submission is
    /// rejected; no partial record is produced.
    #[error("required field {field} is missing or empty")]
    Validation {
        /// Id of the offending field.
        field: String,
    },

    /// The form requires an authenticated caller and none is present.
    #[error("authentication required")]
    Unauthorized,

    /// The external store rejected the record. Not retried.
    #[error("failed to persist submission: {0}")]
    Persistence(String),
}

/// Result type alias for form engine operations.
pub type Result<T> = std::result::Result<T, FormError>;
