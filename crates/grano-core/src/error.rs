//! Error types for grano-core.
//!
//! All domain errors are defined here using `thiserror`. These types carry
//! enough context to render a useful message at the edge (UI, logs) without
//! the caller having to re-derive what went wrong.

use thiserror::Error;

// ============================================================================
// Validation Errors
// ============================================================================

/// Errors produced while validating user-supplied input before it reaches
/// the ledger or the catalog.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field was empty or missing.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A text field exceeded its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// A numeric field was negative where only zero or positive is allowed.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// A numeric field must be strictly positive (e.g. line quantity).
    #[error("{field} must be at least 1")]
    MustBePositive { field: &'static str },

    /// A field did not match the expected format.
    #[error("{field} is invalid: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// A sale draft was submitted with no line items.
    #[error("cannot record a sale with an empty cart")]
    EmptyCart,
}

/// Result alias for validation routines.
pub type ValidationResult<T> = Result<T, ValidationError>;

// ============================================================================
// Snapshot Errors
// ============================================================================

/// Errors produced while parsing a backup snapshot document.
///
/// A snapshot is only accepted when all three collections are present and
/// well-formed; a rejected document never partially replaces live data.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is missing one of the three required collections.
    #[error("snapshot is missing the '{name}' collection")]
    MissingCollection { name: &'static str },

    /// A required collection is present but is not a JSON array.
    #[error("snapshot collection '{name}' must be an array")]
    NotAnArray { name: &'static str },

    /// The document failed to deserialize into the snapshot schema.
    #[error("snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
