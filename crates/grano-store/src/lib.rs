//! # grano-store: Storage Layer for Grano POS
//!
//! This crate provides persistence for the Grano POS system: a durable
//! SQLite backend and an ephemeral in-memory backend behind one trait.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grano POS Data Flow                              │
//! │                                                                         │
//! │  grano-ledger (SalesLedger::commit_sale, Catalog, Backup)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    grano-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │ StorageBackend │   │ SqliteBackend  │   │ Migrations   │  │   │
//! │  │   │  (backend.rs)  │◄──│  (sqlite.rs)   │   │  (embedded)  │  │   │
//! │  │   │                │   ├────────────────┤   │              │  │   │
//! │  │   │  one contract  │◄──│ MemoryBackend  │   │ 001_init.sql │  │   │
//! │  │   │  two backends  │   │  (memory.rs)   │   │              │  │   │
//! │  │   └────────────────┘   └────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (grano.db, WAL)      or      process memory (ephemeral)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`backend`] - The `StorageBackend` trait both backends implement
//! - [`sqlite`] - Durable SQLite backend and pool configuration
//! - [`memory`] - Ephemeral in-memory backend
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grano_store::{SqliteBackend, StoreConfig};
//!
//! let config = StoreConfig::new("path/to/grano.db");
//! let store = SqliteBackend::connect(config).await?;
//!
//! let products = store.list_products().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod backend;
pub mod error;
pub mod memory;
pub mod migrations;
pub mod sqlite;

// =============================================================================
// Re-exports
// =============================================================================

pub use backend::StorageBackend;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryBackend;
pub use sqlite::{SqliteBackend, StoreConfig};
