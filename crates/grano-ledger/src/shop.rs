//! # Shop Composition Root
//!
//! One `Shop` owns the storage handle and the bundle pricing config, and
//! hands out the individual services. The embedding surface keeps a single
//! `Shop` for the life of the process.
//!
//! ```text
//! ┌──────────────────────────── Shop ─────────────────────────────┐
//! │                                                               │
//! │   ledger()      catalog()     customers()   reports()         │
//! │      │             │              │            │   backup()   │
//! │      └─────────────┴──────┬───────┴────────────┴──────┘       │
//! │                           ▼                                   │
//! │                Arc<dyn StorageBackend>                        │
//! │                 (sqlite  or  memory)                          │
//! └───────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use grano_core::BundleConfig;
use grano_store::{MemoryBackend, SqliteBackend, StorageBackend, StoreConfig};

use crate::backup::Backup;
use crate::catalog::Catalog;
use crate::customers::Customers;
use crate::error::LedgerResult;
use crate::ledger::SalesLedger;
use crate::reports::Reports;

/// The shop: storage plus pricing config, source of all services.
#[derive(Clone)]
pub struct Shop {
    store: Arc<dyn StorageBackend>,
    bundle: BundleConfig,
}

impl Shop {
    /// Open a shop backed by SQLite, running migrations per the config.
    pub async fn open(config: StoreConfig) -> LedgerResult<Self> {
        let backend = SqliteBackend::connect(config).await?;
        Ok(Shop::with_backend(Arc::new(backend)))
    }

    /// Open a shop backed by in-process memory. State lives as long as the
    /// `Shop` and its clones.
    ///
    /// ## Example
    ///
    /// ```
    /// use grano_ledger::Shop;
    ///
    /// let shop = Shop::ephemeral();
    /// assert_eq!(shop.backend_tag(), "memory");
    /// ```
    pub fn ephemeral() -> Self {
        Shop::with_backend(Arc::new(MemoryBackend::new()))
    }

    /// Open a shop over any storage backend.
    pub fn with_backend(store: Arc<dyn StorageBackend>) -> Self {
        info!(backend = store.backend_tag(), "Opening shop");
        Shop {
            store,
            bundle: BundleConfig::default(),
        }
    }

    /// Replace the bundle pricing config.
    pub fn with_bundle_config(mut self, bundle: BundleConfig) -> Self {
        self.bundle = bundle;
        self
    }

    /// Which backend family this shop runs on.
    pub fn backend_tag(&self) -> &'static str {
        self.store.backend_tag()
    }

    /// The sale commit / history service.
    pub fn ledger(&self) -> SalesLedger {
        SalesLedger::new(self.store.clone(), self.bundle.clone())
    }

    /// The product catalog service.
    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.store.clone())
    }

    /// The customer book service.
    pub fn customers(&self) -> Customers {
        Customers::new(self.store.clone())
    }

    /// The reporting service.
    pub fn reports(&self) -> Reports {
        Reports::new(self.store.clone())
    }

    /// The snapshot export / import service.
    pub fn backup(&self) -> Backup {
        Backup::new(self.store.clone())
    }
}
