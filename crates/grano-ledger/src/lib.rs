//! # grano-ledger: Service Layer for Grano POS
//!
//! Sits between the operator surface and storage. Pricing and aggregation
//! rules live in `grano-core`; persistence lives behind the
//! `StorageBackend` trait in `grano-store`; this crate owns the flows that
//! tie them together.
//!
//! ## Services
//!
//! ```text
//! ┌────────────────────────────── Shop ──────────────────────────────┐
//! │                                                                  │
//! │  SalesLedger   commit_sale / list_sales / delete_sale            │
//! │  Catalog       add / update / (de)activate / list products       │
//! │  Customers     add / list customers                              │
//! │  Reports       period KPIs / top products / channels / export    │
//! │  Backup        snapshot export / import                          │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use grano_core::{SaleChannel, SaleDraft, SaleLine};
//! use grano_ledger::{ProductInput, Shop};
//!
//! # async fn demo() -> Result<(), grano_ledger::LedgerError> {
//! let shop = Shop::ephemeral();
//!
//! let beans = shop
//!     .catalog()
//!     .add_product(ProductInput {
//!         sku: "CH-1KG".into(),
//!         name: "Café Honduras".into(),
//!         size: "1 kg".into(),
//!         unit_price: 10_000,
//!         unit_cost: 6_700,
//!         stock_qty: 24,
//!     })
//!     .await?;
//!
//! let receipt = shop
//!     .ledger()
//!     .commit_sale(SaleDraft {
//!         channel: SaleChannel::Cafe,
//!         lines: vec![SaleLine::from_product(&beans, 2)],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! assert_eq!(receipt.sale.totals.net, 20_000);
//! assert!(receipt.stock.is_applied());
//! # Ok(())
//! # }
//! ```

pub mod backup;
pub mod catalog;
pub mod customers;
pub mod error;
pub mod ledger;
pub mod reports;
pub mod shop;

pub use backup::Backup;
pub use catalog::{Catalog, ProductInput};
pub use customers::{CustomerInput, Customers};
pub use error::{LedgerError, LedgerResult};
pub use ledger::{CommitReceipt, PendingAdjustment, SalesLedger, StockAdjustment};
pub use reports::{ReportPeriod, Reports};
pub use shop::Shop;
