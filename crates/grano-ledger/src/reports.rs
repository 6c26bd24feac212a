//! # Reporting Service
//!
//! Reads the sale history and hands it to the pure aggregation functions
//! in `grano-core`. All reports accept a [`ReportPeriod`]; an empty period
//! means the whole history.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use grano_core::export;
use grano_core::report::{self, TOP_PRODUCTS_LIMIT};
use grano_core::{ChannelSlice, PeriodKpis, ProductRanking, Sale, SaleExportRow};
use grano_store::StorageBackend;

use crate::error::LedgerResult;

/// Inclusive time window for reports. `None` on either side leaves that
/// side open.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ReportPeriod {
    /// The whole sale history.
    pub fn all() -> Self {
        ReportPeriod::default()
    }

    /// Both ends bounded, inclusive.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        ReportPeriod {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Does `at` fall inside this period?
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| at >= from) && self.to.map_or(true, |to| at <= to)
    }
}

/// The reporting service.
pub struct Reports {
    store: Arc<dyn StorageBackend>,
}

impl Reports {
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Reports { store }
    }

    async fn sales_in(&self, period: ReportPeriod) -> LedgerResult<Vec<Sale>> {
        let sales = self.store.list_sales().await?;
        Ok(sales
            .into_iter()
            .filter(|sale| period.contains(sale.sold_at))
            .collect())
    }

    /// Headline figures for the period.
    pub async fn period_kpis(&self, period: ReportPeriod) -> LedgerResult<PeriodKpis> {
        let sales = self.sales_in(period).await?;
        Ok(report::period_kpis(&sales))
    }

    /// Best sellers by revenue, at most five entries.
    pub async fn top_products(&self, period: ReportPeriod) -> LedgerResult<Vec<ProductRanking>> {
        let sales = self.sales_in(period).await?;
        Ok(report::top_products(&sales, TOP_PRODUCTS_LIMIT))
    }

    /// Net revenue per sale channel, highest first.
    pub async fn channel_breakdown(&self, period: ReportPeriod) -> LedgerResult<Vec<ChannelSlice>> {
        let sales = self.sales_in(period).await?;
        Ok(report::channel_breakdown(&sales))
    }

    /// Spreadsheet-style rows for the period, one per sale.
    pub async fn export_rows(&self, period: ReportPeriod) -> LedgerResult<Vec<SaleExportRow>> {
        let sales = self.sales_in(period).await?;
        Ok(export::export_rows(&sales))
    }
}

// ============================================================================
// Tests
// ============================================================================
