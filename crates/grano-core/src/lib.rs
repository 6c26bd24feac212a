//! # grano-core: Pure Business Logic for Grano POS
//!
//! This crate is the **heart** of Grano POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grano POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Operator Surface (UI / exports)                 │   │
//! │  │     Sale screen ──► Catalog ──► Reports ──► Backup             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 grano-ledger (Service Layer)                    │   │
//! │  │     SalesLedger, Catalog, Customers, Reports, Backup           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grano-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   promo   │  │  totals   │  │   │
//! │  │   │  Product  │  │ rounding  │  │  bundle   │  │ discount  │  │   │
//! │  │   │   Sale    │  │  helpers  │  │  pairing  │  │  stacking │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                 │   │
//! │  │   │  report   │  │  export   │  │ validation│                 │   │
//! │  │   │  rollups  │  │ snapshot  │  │   rules   │                 │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                 │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 grano-store (Storage Layer)                     │   │
//! │  │        SQLite backend, in-memory backend, migrations            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Sale, Totals)
//! - [`money`] - Whole-unit rounding and percentage helpers
//! - [`promo`] - Bundle promotion evaluator (1 kg + 425 g pairing)
//! - [`totals`] - Sale totals calculator with ordered discount stacking
//! - [`report`] - KPI, top-product and channel rollups
//! - [`export`] - Spreadsheet rows and backup snapshots
//! - [`validation`] - Input shape checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same cart in, same totals out
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All amounts are whole currency units (i64); fractions
//!    exist only inside a calculation step and are rounded on the way out
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use grano_core::promo::BundleConfig;
//! use grano_core::totals;
//! use grano_core::types::SaleLine;
//!
//! let lines = vec![
//!     SaleLine {
//!         product_id: "p-1".into(),
//!         product_name: "Café Honduras".into(),
//!         size: "1 kg".into(),
//!         quantity: 1,
//!         unit_price: 9_800,
//!         unit_cost: 6_100,
//!     },
//!     SaleLine {
//!         product_id: "p-2".into(),
//!         product_name: "Café Honduras".into(),
//!         size: "425 g".into(),
//!         quantity: 1,
//!         unit_price: 5_200,
//!         unit_cost: 3_100,
//!     },
//! ];
//!
//! // One 1 kg + 425 g pair sells at the 12_500 bundle price.
//! let totals = totals::compute(&lines, 0.0, true, false, &BundleConfig::default());
//! assert_eq!(totals.gross, 15_000);
//! assert_eq!(totals.discount, 2_500);
//! assert_eq!(totals.net, 12_500);
//! assert_eq!(totals.margin, 3_300);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod export;
pub mod money;
pub mod promo;
pub mod report;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use grano_core::Sale` instead of
// `use grano_core::types::Sale`

pub use error::{SnapshotError, ValidationError};
pub use export::{SaleExportRow, Snapshot};
pub use promo::{BundleConfig, BundleOutcome};
pub use report::{ChannelSlice, PeriodKpis, ProductRanking};
pub use types::*;
