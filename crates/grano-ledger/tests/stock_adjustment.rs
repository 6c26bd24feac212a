//! Commit behavior when stock decrements fail after the sale is persisted:
//! the financial record must survive, and the receipt must name every
//! adjustment still owed.

mod common;

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use common::{coffee_input, draft, init_tracing, seed_product};
use grano_core::{Customer, Product, Sale, SaleLine, Snapshot};
use grano_ledger::{Shop, StockAdjustment};
use grano_store::{MemoryBackend, StorageBackend, StoreError, StoreResult};

/// Memory backend whose stock decrements can be made to fail per product.
struct JammedStock {
    inner: MemoryBackend,
    jammed: Mutex<HashSet<String>>,
}

impl JammedStock {
    fn new() -> Self {
        JammedStock {
            inner: MemoryBackend::new(),
            jammed: Mutex::new(HashSet::new()),
        }
    }

    fn jam(&self, product_id: &str) {
        self.jammed.lock().unwrap().insert(product_id.to_string());
    }
}

#[async_trait]
impl StorageBackend for JammedStock {
    fn backend_tag(&self) -> &'static str {
        "jammed-memory"
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        self.inner.list_products().await
    }

    async fn get_product(&self, id: &str) -> StoreResult<Option<Product>> {
        self.inner.get_product(id).await
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        self.inner.insert_product(product).await
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        self.inner.update_product(product).await
    }

    async fn set_product_active(&self, id: &str, active: bool) -> StoreResult<()> {
        self.inner.set_product_active(id, active).await
    }

    async fn decrement_stock(&self, product_id: &str, quantity: i64) -> StoreResult<()> {
        if self.jammed.lock().unwrap().contains(product_id) {
            return Err(StoreError::StockConflict {
                product_id: product_id.to_string(),
            });
        }
        self.inner.decrement_stock(product_id, quantity).await
    }

    async fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        self.inner.list_customers().await
    }

    async fn insert_customer(&self, customer: &Customer) -> StoreResult<()> {
        self.inner.insert_customer(customer).await
    }

    async fn list_sales(&self) -> StoreResult<Vec<Sale>> {
        self.inner.list_sales().await
    }

    async fn insert_sale(&self, sale: &Sale) -> StoreResult<()> {
        self.inner.insert_sale(sale).await
    }

    async fn delete_sale(&self, id: &str) -> StoreResult<()> {
        self.inner.delete_sale(id).await
    }

    async fn snapshot(&self) -> StoreResult<Snapshot> {
        self.inner.snapshot().await
    }

    async fn replace_all(&self, snapshot: &Snapshot) -> StoreResult<()> {
        self.inner.replace_all(snapshot).await
    }
}

#[tokio::test]
async fn failed_decrement_keeps_sale_and_reports_pending() {
    init_tracing();
    let backend = Arc::new(JammedStock::new());
    let shop = Shop::with_backend(backend.clone());

    let beans = seed_product(&shop, coffee_input("HON-1KG", "1 kg", 10_000, 6_000, 10)).await;
    let bags = seed_product(&shop, coffee_input("HON-425", "425 g", 5_200, 3_100, 10)).await;
    backend.jam(&beans.id);

    let receipt = shop
        .ledger()
        .commit_sale(draft(vec![
            SaleLine::from_product(&beans, 1),
            SaleLine::from_product(&bags, 2),
        ]))
        .await
        .unwrap();

    assert!(!receipt.stock.is_applied());
    match &receipt.stock {
        StockAdjustment::Incomplete { pending } => {
            assert_eq!(pending.len(), 1);
            assert_eq!(pending[0].product_id, beans.id);
            assert_eq!(pending[0].quantity, 1);
            assert!(pending[0].reason.contains(&beans.id));
        }
        StockAdjustment::Applied => panic!("expected pending adjustments"),
    }

    // The sale itself is committed even though a decrement did not land.
    let sales = shop.ledger().list_sales().await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id, receipt.sale.id);

    // The healthy product was decremented, the jammed one untouched.
    let beans_now = shop.catalog().get_product(&beans.id).await.unwrap().unwrap();
    let bags_now = shop.catalog().get_product(&bags.id).await.unwrap().unwrap();
    assert_eq!(beans_now.stock_qty, 10);
    assert_eq!(bags_now.stock_qty, 8);
}

#[tokio::test]
async fn every_failed_decrement_is_listed() {
    init_tracing();
    let backend = Arc::new(JammedStock::new());
    let shop = Shop::with_backend(backend.clone());

    let beans = seed_product(&shop, coffee_input("HON-1KG", "1 kg", 10_000, 6_000, 5)).await;
    let bags = seed_product(&shop, coffee_input("HON-425", "425 g", 5_200, 3_100, 5)).await;
    backend.jam(&beans.id);
    backend.jam(&bags.id);

    let receipt = shop
        .ledger()
        .commit_sale(draft(vec![
            SaleLine::from_product(&beans, 2),
            SaleLine::from_product(&bags, 3),
        ]))
        .await
        .unwrap();

    match &receipt.stock {
        StockAdjustment::Incomplete { pending } => {
            assert_eq!(pending.len(), 2);
            let owed: Vec<(&str, i64)> = pending
                .iter()
                .map(|p| (p.product_id.as_str(), p.quantity))
                .collect();
            assert!(owed.contains(&(beans.id.as_str(), 2)));
            assert!(owed.contains(&(bags.id.as_str(), 3)));
        }
        StockAdjustment::Applied => panic!("expected pending adjustments"),
    }
}
