//! # The Storage Contract
//!
//! One trait, two implementations:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       StorageBackend (trait)                            │
//! │                                                                         │
//! │              ┌──────────────────┴──────────────────┐                    │
//! │              ▼                                     ▼                    │
//! │     ┌─────────────────┐                  ┌──────────────────┐          │
//! │     │  SqliteBackend  │                  │  MemoryBackend   │          │
//! │     │  durable file,  │                  │  ephemeral maps, │          │
//! │     │  transactions   │                  │  demo/fallback   │          │
//! │     └─────────────────┘                  └──────────────────┘          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger and catalog services hold an `Arc<dyn StorageBackend>` and
//! never branch on which implementation is behind it; the choice happens
//! exactly once, when the application opens its storage.

use async_trait::async_trait;
use grano_core::{Customer, Product, Sale, Snapshot};

use crate::error::StoreResult;

/// Persistence capability consumed by the service layer.
///
/// Both backends must present identical semantics: same sort orders, same
/// error taxonomy, same guarded-decrement behavior. Tests in grano-ledger
/// run the full commit flow against each implementation.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Short tag identifying the active backend, for logs only. Business
    /// logic must never branch on it.
    fn backend_tag(&self) -> &'static str;

    // ========================================================================
    // Catalog
    // ========================================================================

    /// All products, active and inactive, sorted by name.
    async fn list_products(&self) -> StoreResult<Vec<Product>>;

    /// Fetch one product by ID.
    async fn get_product(&self, id: &str) -> StoreResult<Option<Product>>;

    /// Insert a fully-formed product. Fails on duplicate ID or SKU.
    async fn insert_product(&self, product: &Product) -> StoreResult<()>;

    /// Overwrite all mutable fields of an existing product.
    async fn update_product(&self, product: &Product) -> StoreResult<()>;

    /// Flip the soft-disable flag. Historical sales keep referencing the
    /// product either way.
    async fn set_product_active(&self, id: &str, active: bool) -> StoreResult<()>;

    /// Decrement stock by `quantity`, guarded so stock never goes negative.
    ///
    /// Fails with [`StoreError::StockConflict`](crate::StoreError::StockConflict)
    /// when the product is missing or has fewer than `quantity` units left.
    /// Not idempotent: callers must not blindly retry an ambiguous failure.
    async fn decrement_stock(&self, product_id: &str, quantity: i64) -> StoreResult<()>;

    // ========================================================================
    // Customers
    // ========================================================================

    /// All customers, sorted by name.
    async fn list_customers(&self) -> StoreResult<Vec<Customer>>;

    /// Insert a fully-formed customer.
    async fn insert_customer(&self, customer: &Customer) -> StoreResult<()>;

    // ========================================================================
    // Sales Ledger
    // ========================================================================

    /// All sales, most recent first, each with its full line list.
    async fn list_sales(&self) -> StoreResult<Vec<Sale>>;

    /// Persist a sale header together with its lines as one unit: either
    /// everything lands or nothing does. Stock is NOT touched here; the
    /// ledger issues decrements separately and reports their outcome.
    async fn insert_sale(&self, sale: &Sale) -> StoreResult<()>;

    /// Remove a sale and its lines. Stock is deliberately left unchanged.
    async fn delete_sale(&self, id: &str) -> StoreResult<()>;

    // ========================================================================
    // Backup
    // ========================================================================

    /// Read the full state as one snapshot document.
    async fn snapshot(&self) -> StoreResult<Snapshot>;

    /// Replace the full state with the snapshot's contents, all or nothing.
    async fn replace_all(&self, snapshot: &Snapshot) -> StoreResult<()>;
}
