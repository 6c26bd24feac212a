//! # Sales Ledger
//!
//! Orchestrates the commit flow: a `SaleDraft` comes in from the operator
//! surface, and either a persisted `Sale` plus a stock adjustment report
//! comes out, or the draft is rejected with a reason and nothing is written.
//!
//! ## Commit Flow
//!
//! ```text
//! ┌───────────┐  validate   ┌─────────────┐  price    ┌───────────┐
//! │ SaleDraft │ ──────────▶ │ stock check │ ────────▶ │  Totals   │
//! └───────────┘             └─────────────┘           └───────────┘
//!                                 │ reject                  │
//!                                 ▼                         ▼
//!                           LedgerError              ┌───────────┐
//!                                                    │ insert    │
//!                                                    │ sale      │
//!                                                    └───────────┘
//!                                                          │
//!                                                          ▼
//!                                               decrement stock per product
//!                                                          │
//!                                          ┌───────────────┴──────────────┐
//!                                          ▼                              ▼
//!                                       Applied               Incomplete { pending }
//! ```
//!
//! The three phases are deliberately ordered so that a rejection in phase
//! one or two leaves storage untouched, and a decrement failure in phase
//! three never erases the financial record: the sale stays committed and
//! the receipt carries the adjustments still owed.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use grano_core::{totals, validation, BundleConfig, Sale, SaleDraft, SaleLine};
use grano_store::StorageBackend;

use crate::error::{LedgerError, LedgerResult};

// ============================================================================
// Receipt Types
// ============================================================================

/// Outcome of the stock phase of a commit.
///
/// `Applied` means every decrement landed. `Incomplete` means the sale is
/// committed but one or more decrements did not apply; each entry names the
/// product, the quantity still owed, and the reason the decrement failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum StockAdjustment {
    /// All stock decrements applied.
    Applied,
    /// Sale committed, but these decrements are still owed.
    Incomplete { pending: Vec<PendingAdjustment> },
}

impl StockAdjustment {
    /// `true` when every decrement landed.
    pub fn is_applied(&self) -> bool {
        matches!(self, StockAdjustment::Applied)
    }
}

/// One stock decrement that did not apply during commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingAdjustment {
    pub product_id: String,
    pub quantity: i64,
    pub reason: String,
}

/// Result of a successful commit: the persisted sale and the stock outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitReceipt {
    pub sale: Sale,
    pub stock: StockAdjustment,
}

// ============================================================================
// Sales Ledger
// ============================================================================

/// The sale commit / history service.
pub struct SalesLedger {
    store: Arc<dyn StorageBackend>,
    bundle: BundleConfig,
}

impl SalesLedger {
    pub fn new(store: Arc<dyn StorageBackend>, bundle: BundleConfig) -> Self {
        SalesLedger { store, bundle }
    }

    /// Commit a draft sale.
    ///
    /// Validates the draft, checks stock against the current catalog,
    /// computes totals, persists the sale as one unit, then decrements
    /// stock per product. Rejections happen before any write; decrement
    /// failures after the write are reported in the receipt, never hidden.
    ///
    /// ## Example
    ///
    /// ```no_run
    /// # use grano_ledger::Shop;
    /// # use grano_core::{SaleDraft, SaleLine, SaleChannel};
    /// # async fn demo(shop: Shop, line: SaleLine) -> Result<(), Box<dyn std::error::Error>> {
    /// let draft = SaleDraft {
    ///     channel: SaleChannel::Cafe,
    ///     lines: vec![line],
    ///     ..Default::default()
    /// };
    /// let receipt = shop.ledger().commit_sale(draft).await?;
    /// assert!(receipt.stock.is_applied());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn commit_sale(&self, draft: SaleDraft) -> LedgerResult<CommitReceipt> {
        debug!(lines = draft.lines.len(), "Committing sale draft");

        validation::validate_draft(&draft)?;

        // Quantities are merged per product before the check and the
        // decrement, so two cart lines for the same product cannot each
        // pass against the same units.
        let wanted = requested_quantities(&draft.lines);
        for (product_id, quantity) in &wanted {
            let product = self
                .store
                .get_product(product_id)
                .await?
                .ok_or_else(|| LedgerError::ProductNotFound {
                    id: product_id.clone(),
                })?;
            if product.stock_qty < *quantity {
                return Err(LedgerError::InsufficientStock {
                    product_name: product.name,
                    requested: *quantity,
                    available: product.stock_qty,
                });
            }
        }

        let totals = totals::for_draft(&draft, &self.bundle);

        let sale = Sale {
            id: Uuid::new_v4().to_string(),
            sold_at: chrono::Utc::now(),
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            channel: draft.channel,
            is_affiliate: draft.is_affiliate,
            apply_bundle: draft.apply_bundle,
            discount_pct: draft.discount_pct,
            lines: draft.lines,
            totals,
            notes: draft.notes,
        };

        self.store.insert_sale(&sale).await?;

        let mut pending = Vec::new();
        for (product_id, quantity) in wanted {
            if let Err(err) = self.store.decrement_stock(&product_id, quantity).await {
                warn!(
                    product_id = %product_id,
                    quantity,
                    error = %err,
                    "Stock decrement did not apply"
                );
                pending.push(PendingAdjustment {
                    product_id,
                    quantity,
                    reason: err.to_string(),
                });
            }
        }

        let stock = if pending.is_empty() {
            StockAdjustment::Applied
        } else {
            StockAdjustment::Incomplete { pending }
        };

        info!(
            sale_id = %sale.id,
            net = sale.totals.net,
            margin = sale.totals.margin,
            stock_applied = stock.is_applied(),
            "Sale committed"
        );

        Ok(CommitReceipt { sale, stock })
    }

    /// All sales, newest first.
    pub async fn list_sales(&self) -> LedgerResult<Vec<Sale>> {
        Ok(self.store.list_sales().await?)
    }

    /// Delete a sale record. Stock is left unchanged: units already handed
    /// over do not come back because the record was removed.
    pub async fn delete_sale(&self, id: &str) -> LedgerResult<()> {
        self.store.delete_sale(id).await?;
        info!(sale_id = %id, "Sale deleted, stock unchanged");
        Ok(())
    }
}

/// Merge cart lines into one requested quantity per product, first-seen order.
fn requested_quantities(lines: &[SaleLine]) -> Vec<(String, i64)> {
    let mut wanted: Vec<(String, i64)> = Vec::new();
    for line in lines {
        match wanted.iter_mut().find(|(id, _)| id == &line.product_id) {
            Some((_, qty)) => *qty += line.quantity,
            None => wanted.push((line.product_id.clone(), line.quantity)),
        }
    }
    wanted
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, quantity: i64) -> SaleLine {
        SaleLine {
            product_id: product_id.into(),
            product_name: format!("Product {product_id}"),
            size: "1 kg".into(),
            quantity,
            unit_price: 10_000,
            unit_cost: 6_000,
        }
    }

    #[test]
    fn quantities_merge_per_product() {
        let lines = vec![line("a", 2), line("b", 1), line("a", 3)];
        let wanted = requested_quantities(&lines);
        assert_eq!(wanted, vec![("a".to_string(), 5), ("b".to_string(), 1)]);
    }

    #[test]
    fn quantities_keep_first_seen_order() {
        let lines = vec![line("z", 1), line("a", 1), line("m", 1)];
        let wanted = requested_quantities(&lines);
        let ids: Vec<&str> = wanted.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["z", "a", "m"]);
    }

    #[test]
    fn stock_adjustment_serializes_with_status_tag() {
        let applied = serde_json::to_value(StockAdjustment::Applied).unwrap();
        assert_eq!(applied["status"], "applied");

        let incomplete = StockAdjustment::Incomplete {
            pending: vec![PendingAdjustment {
                product_id: "p1".into(),
                quantity: 2,
                reason: "stock conflict".into(),
            }],
        };
        let value = serde_json::to_value(&incomplete).unwrap();
        assert_eq!(value["status"], "incomplete");
        assert_eq!(value["pending"][0]["productId"], "p1");
        assert_eq!(value["pending"][0]["quantity"], 2);
    }
}
