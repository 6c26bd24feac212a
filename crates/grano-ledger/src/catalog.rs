//! # Catalog Service
//!
//! Product lifecycle: create, edit, activate / deactivate, list. Products
//! are never deleted; deactivation hides them from the sale surface while
//! past sales keep their captured name, size, and prices.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use grano_core::{validation, Product};
use grano_store::StorageBackend;

use crate::error::{LedgerError, LedgerResult};

/// Operator input for creating or editing a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub sku: String,
    pub name: String,
    pub size: String,
    pub unit_price: i64,
    pub unit_cost: i64,
    pub stock_qty: i64,
}

impl ProductInput {
    fn validate(&self) -> LedgerResult<()> {
        validation::validate_sku(&self.sku)?;
        validation::validate_product_name(&self.name)?;
        validation::validate_size_label(&self.size)?;
        validation::validate_amount(self.unit_price, "unitPrice")?;
        validation::validate_amount(self.unit_cost, "unitCost")?;
        validation::validate_stock_qty(self.stock_qty)?;
        Ok(())
    }
}

/// The product catalog service.
pub struct Catalog {
    store: Arc<dyn StorageBackend>,
}

impl Catalog {
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Catalog { store }
    }

    /// Create a product. New products are active.
    pub async fn add_product(&self, input: ProductInput) -> LedgerResult<Product> {
        input.validate()?;
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            sku: input.sku,
            name: input.name,
            size: input.size,
            unit_price: input.unit_price,
            unit_cost: input.unit_cost,
            stock_qty: input.stock_qty,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_product(&product).await?;
        info!(product_id = %product.id, sku = %product.sku, "Product added");
        Ok(product)
    }

    /// Edit an existing product. The id and creation time never change.
    pub async fn update_product(&self, id: &str, input: ProductInput) -> LedgerResult<Product> {
        input.validate()?;
        let mut product = self
            .store
            .get_product(id)
            .await?
            .ok_or_else(|| LedgerError::ProductNotFound { id: id.to_string() })?;
        product.sku = input.sku;
        product.name = input.name;
        product.size = input.size;
        product.unit_price = input.unit_price;
        product.unit_cost = input.unit_cost;
        product.stock_qty = input.stock_qty;
        product.updated_at = Utc::now();
        self.store.update_product(&product).await?;
        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// All products, active and inactive, sorted by name.
    pub async fn list_products(&self) -> LedgerResult<Vec<Product>> {
        Ok(self.store.list_products().await?)
    }

    /// Only the products the sale surface should offer.
    pub async fn active_products(&self) -> LedgerResult<Vec<Product>> {
        let products = self.store.list_products().await?;
        Ok(products.into_iter().filter(|p| p.is_active).collect())
    }

    /// Look up one product by id.
    pub async fn get_product(&self, id: &str) -> LedgerResult<Option<Product>> {
        Ok(self.store.get_product(id).await?)
    }

    /// Hide a product from the sale surface. History keeps its lines.
    pub async fn deactivate(&self, id: &str) -> LedgerResult<()> {
        self.store.set_product_active(id, false).await?;
        info!(product_id = %id, "Product deactivated");
        Ok(())
    }

    /// Bring a product back onto the sale surface.
    pub async fn reactivate(&self, id: &str) -> LedgerResult<()> {
        self.store.set_product_active(id, true).await?;
        info!(product_id = %id, "Product reactivated");
        Ok(())
    }
}
