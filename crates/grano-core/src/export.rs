//! Export shapes: spreadsheet rows and backup snapshots.
//!
//! The core only supplies the data; writing CSV bytes or files is the
//! caller's business. [`SaleExportRow`] flattens one sale into the columns
//! the shop's spreadsheet expects, and [`Snapshot`] is the full-state
//! document used for backup and restore.

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::types::{Customer, Product, Sale};

// ============================================================================
// Tabular Export
// ============================================================================

/// One spreadsheet row per sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleExportRow {
    /// Sale date, `YYYY-MM-DD`.
    pub date: String,
    /// Customer name, empty for anonymous walk-ins.
    pub customer: String,
    /// Human-readable channel label.
    pub channel: String,
    /// Item summary, e.g. `"2x Café Honduras 1 kg; 1x Café Honduras 425 g"`.
    pub items: String,
    pub gross: i64,
    pub discount: i64,
    pub net: i64,
    pub cost: i64,
    pub margin: i64,
    pub margin_pct: f64,
    pub notes: String,
}

impl SaleExportRow {
    pub fn from_sale(sale: &Sale) -> Self {
        let items = sale
            .lines
            .iter()
            .map(|l| format!("{}x {} {}", l.quantity, l.product_name, l.size))
            .collect::<Vec<_>>()
            .join("; ");

        Self {
            date: sale.sold_at.format("%Y-%m-%d").to_string(),
            customer: sale.customer_name.clone().unwrap_or_default(),
            channel: sale.channel.label().to_string(),
            items,
            gross: sale.totals.gross,
            discount: sale.totals.discount,
            net: sale.totals.net,
            cost: sale.totals.cost,
            margin: sale.totals.margin,
            margin_pct: sale.totals.margin_pct,
            notes: sale.notes.clone().unwrap_or_default(),
        }
    }
}

/// Flatten a sale list into export rows, preserving order.
pub fn export_rows(sales: &[Sale]) -> Vec<SaleExportRow> {
    sales.iter().map(SaleExportRow::from_sale).collect()
}

// ============================================================================
// Snapshot (backup / restore)
// ============================================================================

/// Full application state as one structured document.
///
/// Restoring replaces everything, so [`Snapshot::parse`] is strict: a
/// document missing any of the three collections is rejected wholesale and
/// never partially imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub sales: Vec<Sale>,
}

impl Snapshot {
    /// Validate and deserialize a backup document.
    ///
    /// The three collections must all be present and be arrays; that shape
    /// check runs first so the caller gets "missing 'sales'" instead of a
    /// generic deserialization error.
    pub fn parse(value: serde_json::Value) -> Result<Self, SnapshotError> {
        for name in ["products", "customers", "sales"] {
            match value.get(name) {
                None => return Err(SnapshotError::MissingCollection { name }),
                Some(v) if !v.is_array() => return Err(SnapshotError::NotAnArray { name }),
                Some(_) => {}
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize for writing to a backup file.
    pub fn to_value(&self) -> Result<serde_json::Value, SnapshotError> {
        Ok(serde_json::to_value(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerKind, SaleChannel, SaleLine, Totals};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn sample_sale() -> Sale {
        Sale {
            id: "s-1".into(),
            sold_at: Utc.with_ymd_and_hms(2025, 3, 14, 15, 30, 0).unwrap(),
            customer_id: None,
            customer_name: Some("Lucía".into()),
            channel: SaleChannel::SocialDm,
            is_affiliate: false,
            apply_bundle: true,
            discount_pct: 0.0,
            lines: vec![
                SaleLine {
                    product_id: "p-1".into(),
                    product_name: "Café Honduras".into(),
                    size: "1 kg".into(),
                    quantity: 2,
                    unit_price: 9_800,
                    unit_cost: 6_100,
                },
                SaleLine {
                    product_id: "p-2".into(),
                    product_name: "Café Honduras".into(),
                    size: "425 g".into(),
                    quantity: 1,
                    unit_price: 5_200,
                    unit_cost: 3_100,
                },
            ],
            totals: Totals {
                gross: 24_800,
                discount: 2_500,
                net: 22_300,
                cost: 15_300,
                margin: 7_000,
                margin_pct: 31.4,
            },
            notes: Some("pickup saturday".into()),
        }
    }

    #[test]
    fn export_row_flattens_a_sale() {
        let row = SaleExportRow::from_sale(&sample_sale());
        assert_eq!(row.date, "2025-03-14");
        assert_eq!(row.customer, "Lucía");
        assert_eq!(row.channel, "Social DM");
        assert_eq!(row.items, "2x Café Honduras 1 kg; 1x Café Honduras 425 g");
        assert_eq!(row.gross, 24_800);
        assert_eq!(row.net, 22_300);
        assert_eq!(row.notes, "pickup saturday");
    }

    #[test]
    fn export_row_blanks_missing_customer_and_notes() {
        let mut sale = sample_sale();
        sale.customer_name = None;
        sale.notes = None;
        let row = SaleExportRow::from_sale(&sale);
        assert_eq!(row.customer, "");
        assert_eq!(row.notes, "");
    }

    #[test]
    fn snapshot_round_trip_preserves_everything() {
        let snapshot = Snapshot {
            products: vec![Product {
                id: "p-1".into(),
                sku: "HON-1KG".into(),
                name: "Café Honduras".into(),
                size: "1 kg".into(),
                unit_price: 9_800,
                unit_cost: 6_100,
                stock_qty: 10,
                is_active: true,
                created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                updated_at: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            }],
            customers: vec![Customer {
                id: "c-1".into(),
                name: "Gimnasio Norte".into(),
                kind: CustomerKind::Partner,
                contact: Some("@gimnorte".into()),
                created_at: Utc.with_ymd_and_hms(2025, 1, 5, 0, 0, 0).unwrap(),
            }],
            sales: vec![sample_sale()],
        };

        let value = snapshot.to_value().unwrap();
        let restored = Snapshot::parse(value).unwrap();
        assert_eq!(restored, snapshot);
    }

    #[test]
    fn snapshot_rejects_missing_collection() {
        let doc = json!({ "products": [], "customers": [] });
        let err = Snapshot::parse(doc).unwrap_err();
        assert!(matches!(err, SnapshotError::MissingCollection { name: "sales" }));
    }

    #[test]
    fn snapshot_rejects_non_array_collection() {
        let doc = json!({ "products": {}, "customers": [], "sales": [] });
        let err = Snapshot::parse(doc).unwrap_err();
        assert!(matches!(err, SnapshotError::NotAnArray { name: "products" }));
    }

    #[test]
    fn snapshot_rejects_malformed_entries() {
        let doc = json!({
            "products": [{ "id": 42 }],
            "customers": [],
            "sales": [],
        });
        assert!(matches!(
            Snapshot::parse(doc),
            Err(SnapshotError::Malformed(_))
        ));
    }
}
