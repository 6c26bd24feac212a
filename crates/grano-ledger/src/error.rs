//! # Service Error Types
//!
//! Everything the service layer can reject or fail with. Validation and
//! snapshot errors bubble up from `grano-core`, storage errors from
//! `grano-store`; the stock errors are minted here because only the ledger
//! holds both the cart and the current stock levels.
//!
//! The `Display` text of a `LedgerError` is the rejection reason shown to
//! the operator, so every variant spells out a complete sentence fragment
//! with the offending values inlined.

use grano_core::{SnapshotError, ValidationError};
use grano_store::StoreError;
use thiserror::Error;

/// Errors produced by the service layer.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Input failed a domain validation rule before any write happened.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Cart asks for more units than the catalog currently holds.
    #[error("insufficient stock for {product_name}: requested {requested}, available {available}")]
    InsufficientStock {
        product_name: String,
        requested: i64,
        available: i64,
    },

    /// Cart references a product id the catalog does not know.
    #[error("product not found: {id}")]
    ProductNotFound { id: String },

    /// Backup document failed structural validation; nothing was imported.
    #[error("invalid backup document: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Storage backend failure.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience alias for service results.
pub type LedgerResult<T> = Result<T, LedgerError>;
