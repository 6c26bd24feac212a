//! # Backup Service
//!
//! Whole-shop export and import as a single JSON document. Import is
//! all-or-nothing: the document is structurally validated up front, and a
//! bad document leaves the current state exactly as it was.

use std::sync::Arc;

use tracing::info;

use grano_core::Snapshot;
use grano_store::StorageBackend;

use crate::error::LedgerResult;

/// The snapshot export / import service.
pub struct Backup {
    store: Arc<dyn StorageBackend>,
}

impl Backup {
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Backup { store }
    }

    /// Export everything as one JSON document.
    pub async fn export_snapshot(&self) -> LedgerResult<serde_json::Value> {
        let snapshot = self.store.snapshot().await?;
        info!(
            products = snapshot.products.len(),
            customers = snapshot.customers.len(),
            sales = snapshot.sales.len(),
            "Snapshot exported"
        );
        Ok(snapshot.to_value()?)
    }

    /// Replace the whole shop state with the given document.
    ///
    /// Validation happens before any write; a malformed document is
    /// rejected wholesale and existing data stays untouched.
    pub async fn import_snapshot(&self, document: serde_json::Value) -> LedgerResult<()> {
        let snapshot = Snapshot::parse(document)?;
        self.store.replace_all(&snapshot).await?;
        info!(
            products = snapshot.products.len(),
            customers = snapshot.customers.len(),
            sales = snapshot.sales.len(),
            "Snapshot imported"
        );
        Ok(())
    }
}
