//! # In-Memory Backend
//!
//! The ephemeral [`StorageBackend`]: plain vectors behind async mutexes.
//! Used when the shop runs without a database file (demo mode, or as the
//! fallback when the durable store can't be opened) and heavily in tests.
//!
//! Semantics mirror the SQLite backend exactly: same sort orders, same
//! error taxonomy, same guarded decrement. Nothing survives a restart.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use grano_core::{Customer, Product, Sale, Snapshot};

use crate::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};

/// Ephemeral storage over `tokio::sync::Mutex`-guarded vectors.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    products: Mutex<Vec<Product>>,
    customers: Mutex<Vec<Customer>>,
    sales: Mutex<Vec<Sale>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    // ------------------------------------------------------------------ catalog

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let mut products = self.products.lock().await.clone();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(products)
    }

    async fn get_product(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        let mut products = self.products.lock().await;
        // Same constraint fields the SQLite schema enforces.
        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::duplicate("products.id"));
        }
        if products.iter().any(|p| p.sku == product.sku) {
            return Err(StoreError::duplicate("products.sku"));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        let mut products = self.products.lock().await;
        let existing = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| StoreError::not_found("product", &product.id))?;

        // created_at is immutable, everything else follows the caller.
        existing.sku = product.sku.clone();
        existing.name = product.name.clone();
        existing.size = product.size.clone();
        existing.unit_price = product.unit_price;
        existing.unit_cost = product.unit_cost;
        existing.stock_qty = product.stock_qty;
        existing.is_active = product.is_active;
        existing.updated_at = product.updated_at;
        Ok(())
    }

    async fn set_product_active(&self, id: &str, active: bool) -> StoreResult<()> {
        let mut products = self.products.lock().await;
        let existing = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found("product", id))?;
        existing.is_active = active;
        existing.updated_at = Utc::now();
        Ok(())
    }

    async fn decrement_stock(&self, product_id: &str, quantity: i64) -> StoreResult<()> {
        debug!(product_id = %product_id, quantity, "Decrementing stock (memory)");

        let mut products = self.products.lock().await;
        // Missing product and insufficient stock collapse into the same
        // conflict, exactly like the guarded UPDATE matching no row.
        match products
            .iter_mut()
            .find(|p| p.id == product_id && p.stock_qty >= quantity)
        {
            Some(product) => {
                product.stock_qty -= quantity;
                product.updated_at = Utc::now();
                Ok(())
            }
            None => Err(StoreError::StockConflict {
                product_id: product_id.to_string(),
            }),
        }
    }

    // ---------------------------------------------------------------- customers

    async fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        let mut customers = self.customers.lock().await.clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn insert_customer(&self, customer: &Customer) -> StoreResult<()> {
        let mut customers = self.customers.lock().await;
        if customers.iter().any(|c| c.id == customer.id) {
            return Err(StoreError::duplicate("customers.id"));
        }
        customers.push(customer.clone());
        Ok(())
    }

    // -------------------------------------------------------------------- sales

    async fn list_sales(&self) -> StoreResult<Vec<Sale>> {
        let mut sales = self.sales.lock().await.clone();
        sales.sort_by(|a, b| b.sold_at.cmp(&a.sold_at));
        Ok(sales)
    }

    async fn insert_sale(&self, sale: &Sale) -> StoreResult<()> {
        let mut sales = self.sales.lock().await;
        if sales.iter().any(|s| s.id == sale.id) {
            return Err(StoreError::duplicate("sales.id"));
        }
        sales.push(sale.clone());
        Ok(())
    }

    async fn delete_sale(&self, id: &str) -> StoreResult<()> {
        let mut sales = self.sales.lock().await;
        match sales.iter().position(|s| s.id == id) {
            Some(index) => {
                sales.remove(index);
                Ok(())
            }
            None => Err(StoreError::not_found("sale", id)),
        }
    }

    // ------------------------------------------------------------------- backup

    async fn snapshot(&self) -> StoreResult<Snapshot> {
        Ok(Snapshot {
            products: self.list_products().await?,
            customers: self.list_customers().await?,
            sales: self.list_sales().await?,
        })
    }

    async fn replace_all(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let mut products = self.products.lock().await;
        let mut customers = self.customers.lock().await;
        let mut sales = self.sales.lock().await;

        *products = snapshot.products.clone();
        *customers = snapshot.customers.clone();
        *sales = snapshot.sales.clone();
        Ok(())
    }
}
