//! Reporting rollups over the sales ledger.
//!
//! Everything here is recomputed on demand from the full sale list; there
//! is no incremental maintenance and no caching. The ledger stays the
//! single source of truth.

use serde::{Deserialize, Serialize};

use crate::money;
use crate::types::{Sale, SaleChannel};

/// How many entries the product ranking keeps.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

// ============================================================================
// Period KPIs
// ============================================================================

/// Headline figures across a set of sales.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodKpis {
    pub gross: i64,
    pub net: i64,
    pub cost: i64,
    pub margin: i64,
    /// Margin percentage recomputed from the summed figures, not averaged
    /// from the per-sale percentages.
    pub margin_pct: f64,
    /// Number of sales in the period.
    pub tickets: i64,
    /// `round(net / tickets)`, or 0 with no sales.
    pub avg_ticket: i64,
}

/// Sum the stored totals of every sale and derive the period figures.
pub fn period_kpis(sales: &[Sale]) -> PeriodKpis {
    let mut kpis = PeriodKpis::default();
    for sale in sales {
        kpis.gross += sale.totals.gross;
        kpis.net += sale.totals.net;
        kpis.cost += sale.totals.cost;
        kpis.margin += sale.totals.margin;
    }
    kpis.tickets = sales.len() as i64;
    kpis.margin_pct = money::margin_pct(kpis.margin, kpis.net);
    kpis.avg_ticket = if kpis.tickets > 0 {
        money::round_units(kpis.net as f64 / kpis.tickets as f64)
    } else {
        0
    };
    kpis
}

// ============================================================================
// Top Products
// ============================================================================

/// One row of the product ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRanking {
    pub name: String,
    pub size: String,
    pub quantity: i64,
    /// Gross revenue attributed to this product (price × qty, pre-discount).
    pub revenue: i64,
}

/// Rank products by gross revenue across all sales.
///
/// Lines are grouped by (name, size) snapshot, so a renamed product starts
/// a new group going forward while its history keeps the old label. The
/// sort is stable: revenue ties keep their first-seen order.
pub fn top_products(sales: &[Sale], limit: usize) -> Vec<ProductRanking> {
    let mut groups: Vec<ProductRanking> = Vec::new();

    for sale in sales {
        for line in &sale.lines {
            match groups
                .iter_mut()
                .find(|g| g.name == line.product_name && g.size == line.size)
            {
                Some(group) => {
                    group.quantity += line.quantity;
                    group.revenue += line.line_total();
                }
                None => groups.push(ProductRanking {
                    name: line.product_name.clone(),
                    size: line.size.clone(),
                    quantity: line.quantity,
                    revenue: line.line_total(),
                }),
            }
        }
    }

    groups.sort_by(|a, b| b.revenue.cmp(&a.revenue));
    groups.truncate(limit);
    groups
}

// ============================================================================
// Channel Breakdown
// ============================================================================

/// Net revenue attributed to one sales channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSlice {
    pub channel: SaleChannel,
    pub net: i64,
}

/// Net revenue per channel, best first. Channels with no sales are simply
/// absent.
pub fn channel_breakdown(sales: &[Sale]) -> Vec<ChannelSlice> {
    let mut slices: Vec<ChannelSlice> = Vec::new();

    for sale in sales {
        match slices.iter_mut().find(|s| s.channel == sale.channel) {
            Some(slice) => slice.net += sale.totals.net,
            None => slices.push(ChannelSlice {
                channel: sale.channel,
                net: sale.totals.net,
            }),
        }
    }

    slices.sort_by(|a, b| b.net.cmp(&a.net));
    slices
}
