//! Shared helpers for the service-layer integration tests.
//!
//! Every scenario runs against both storage backends through [`all_shops`],
//! so a behavior difference between SQLite and memory shows up as a plain
//! test failure.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Once;

use grano_core::{Product, SaleChannel, SaleDraft, SaleLine};
use grano_ledger::{ProductInput, Shop};
use grano_store::StoreConfig;

static INIT: Once = Once::new();

/// Initializes test logging once per binary. Safe to call from every test.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,grano_ledger=debug,grano_store=debug,sqlx=warn")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

/// One shop per backend family, each starting empty.
pub async fn all_shops() -> Vec<Shop> {
    init_tracing();
    let sqlite = Shop::open(StoreConfig::in_memory())
        .await
        .expect("in-memory sqlite shop");
    vec![Shop::ephemeral(), sqlite]
}

pub fn coffee_input(sku: &str, size: &str, price: i64, cost: i64, stock: i64) -> ProductInput {
    ProductInput {
        sku: sku.to_string(),
        name: "Café Honduras".to_string(),
        size: size.to_string(),
        unit_price: price,
        unit_cost: cost,
        stock_qty: stock,
    }
}

pub async fn seed_product(shop: &Shop, input: ProductInput) -> Product {
    shop.catalog()
        .add_product(input)
        .await
        .expect("seed product")
}

/// A café-channel draft with no discounts and no customer.
pub fn draft(lines: Vec<SaleLine>) -> SaleDraft {
    SaleDraft {
        channel: SaleChannel::Cafe,
        lines,
        ..Default::default()
    }
}
