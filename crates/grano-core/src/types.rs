//! Core domain types for Grano POS.
//!
//! These types model the shop's world: the product catalog, the customer
//! list, and the sales ledger. They are plain data with small helper
//! methods; everything that *computes* lives in [`crate::totals`],
//! [`crate::promo`] and [`crate::report`].
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────────────┐
//! │   Product    │     │   Customer   │     │          Sale            │
//! │  (catalog)   │     │  (directory) │     │  header + Vec<SaleLine>  │
//! └──────┬───────┘     └──────┬───────┘     │        + Totals          │
//!        │                    │             └────────────┬─────────────┘
//!        │ snapshot prices    │ optional link            │
//!        └────────────────────┴──────────────────────────┘
//!           a SaleLine freezes name/size/price/cost at sale time
//! ```
//!
//! All serialized forms use camelCase field names; enums serialize to
//! kebab-case tokens (`"social-dm"`, `"gym-partner"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Products
// ============================================================================

/// A coffee product in the catalog.
///
/// Prices and costs are whole currency units (see [`crate::money`]). The
/// `size` label is free text (`"1 kg"`, `"425 g"`, `"250 g drip"`); the
/// bundle promotion matches on it by substring, so labels should contain
/// the canonical size tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4, assigned at creation).
    pub id: String,
    /// Stock-keeping unit, unique across the catalog.
    pub sku: String,
    /// Display name, e.g. `"Café Honduras"`.
    pub name: String,
    /// Size label, e.g. `"1 kg"` or `"425 g"`.
    pub size: String,
    /// Selling price per unit.
    pub unit_price: i64,
    /// Acquisition cost per unit.
    pub unit_cost: i64,
    /// Units currently on hand. Never negative.
    pub stock_qty: i64,
    /// Inactive products are hidden from the sale screen but keep their
    /// history.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether at least `qty` units are on hand.
    pub fn has_stock(&self, qty: i64) -> bool {
        self.stock_qty >= qty
    }

    /// Per-unit margin at list price.
    pub fn unit_margin(&self) -> i64 {
        self.unit_price - self.unit_cost
    }
}

// ============================================================================
// Customers
// ============================================================================

/// Distinguishes retail buyers from affiliate partners (gyms, cafés).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
pub enum CustomerKind {
    /// A regular retail buyer.
    Consumer,
    /// An affiliate partner; their sales get the automatic 10% discount.
    Partner,
}

impl CustomerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerKind::Consumer => "consumer",
            CustomerKind::Partner => "partner",
        }
    }
}

/// A registered customer. Sales may also reference walk-in buyers by free
/// text, so registration is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub kind: CustomerKind,
    /// Phone, Instagram handle, or whatever the shop uses to reach them.
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Sale Channels
// ============================================================================

/// Where a sale originated. Used for the channel breakdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "kebab-case"))]
pub enum SaleChannel {
    /// Direct message on social media.
    SocialDm,
    /// Messaging app order (WhatsApp and similar).
    Messaging,
    /// Sold through a gym partner location.
    GymPartner,
    /// Sold at the café counter.
    Cafe,
    /// Weekend market or fair stand.
    MarketFair,
    #[default]
    Other,
}

impl SaleChannel {
    /// Storage/serialization token, e.g. `"social-dm"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SaleChannel::SocialDm => "social-dm",
            SaleChannel::Messaging => "messaging",
            SaleChannel::GymPartner => "gym-partner",
            SaleChannel::Cafe => "cafe",
            SaleChannel::MarketFair => "market-fair",
            SaleChannel::Other => "other",
        }
    }

    /// Human-readable label for exports and reports.
    pub fn label(&self) -> &'static str {
        match self {
            SaleChannel::SocialDm => "Social DM",
            SaleChannel::Messaging => "Messaging app",
            SaleChannel::GymPartner => "Gym partner",
            SaleChannel::Cafe => "Café",
            SaleChannel::MarketFair => "Market fair",
            SaleChannel::Other => "Other",
        }
    }
}

// ============================================================================
// Sale Lines
// ============================================================================

/// One product position on a sale.
///
/// Name, size, price and cost are **snapshots** taken from the product when
/// the line was added. Later catalog edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: String,
    pub product_name: String,
    pub size: String,
    pub quantity: i64,
    pub unit_price: i64,
    pub unit_cost: i64,
}

impl SaleLine {
    /// Build a line from a catalog product, freezing its current name,
    /// size, price and cost.
    pub fn from_product(product: &Product, quantity: i64) -> Self {
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            size: product.size.clone(),
            quantity,
            unit_price: product.unit_price,
            unit_cost: product.unit_cost,
        }
    }

    /// Revenue contribution of this line before any discounts.
    pub fn line_total(&self) -> i64 {
        self.unit_price * self.quantity
    }

    /// Cost contribution of this line.
    pub fn line_cost(&self) -> i64 {
        self.unit_cost * self.quantity
    }
}

// ============================================================================
// Totals
// ============================================================================

/// Derived money figures for one sale.
///
/// Produced by [`crate::totals::compute`] and stored verbatim on the sale;
/// re-running the calculator over the sale's own lines and flags must
/// reproduce these numbers exactly.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Sum of line totals before any discount.
    pub gross: i64,
    /// Bundle + affiliate + manual discount combined.
    pub discount: i64,
    /// What the customer actually pays. Never negative.
    pub net: i64,
    /// Sum of line costs.
    pub cost: i64,
    /// `net - cost`, floored at zero.
    pub margin: i64,
    /// Margin as a percentage of net, one decimal place.
    pub margin_pct: f64,
}

// ============================================================================
// Sales
// ============================================================================

/// Input for recording a sale: the cart plus its pricing flags.
///
/// The ledger computes totals from this draft at commit time; callers never
/// supply totals themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDraft {
    /// Registered customer, if any.
    pub customer_id: Option<String>,
    /// Free-text buyer name for walk-ins (or a copy of the registered name).
    pub customer_name: Option<String>,
    pub channel: SaleChannel,
    /// Grants the automatic 10% affiliate discount.
    pub is_affiliate: bool,
    /// Whether the 1 kg + 425 g bundle promotion is considered.
    pub apply_bundle: bool,
    /// Manual discount in percent, clamped to `0..=100` by the calculator.
    pub discount_pct: f64,
    pub lines: Vec<SaleLine>,
    pub notes: Option<String>,
}

/// A committed sale: immutable header, line snapshots and derived totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub sold_at: DateTime<Utc>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub channel: SaleChannel,
    pub is_affiliate: bool,
    pub apply_bundle: bool,
    pub discount_pct: f64,
    pub lines: Vec<SaleLine>,
    pub totals: Totals,
    pub notes: Option<String>,
}

impl Sale {
    /// Total units across all lines.
    pub fn unit_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}
