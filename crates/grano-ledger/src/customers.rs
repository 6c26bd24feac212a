//! # Customer Service
//!
//! A lightweight contact book. Customers are optional on sales; attaching
//! one copies the name onto the sale, so the record here can change later
//! without rewriting history.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use grano_core::{validation, Customer, CustomerKind};
use grano_store::StorageBackend;

use crate::error::LedgerResult;

/// Operator input for creating a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    pub name: String,
    pub kind: CustomerKind,
    pub contact: Option<String>,
}

/// The customer book service.
pub struct Customers {
    store: Arc<dyn StorageBackend>,
}

impl Customers {
    pub fn new(store: Arc<dyn StorageBackend>) -> Self {
        Customers { store }
    }

    /// Create a customer.
    pub async fn add_customer(&self, input: CustomerInput) -> LedgerResult<Customer> {
        validation::validate_customer_name(&input.name)?;
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: input.name,
            kind: input.kind,
            contact: input.contact,
            created_at: Utc::now(),
        };
        self.store.insert_customer(&customer).await?;
        info!(customer_id = %customer.id, kind = customer.kind.as_str(), "Customer added");
        Ok(customer)
    }

    /// All customers, sorted by name.
    pub async fn list_customers(&self) -> LedgerResult<Vec<Customer>> {
        Ok(self.store.list_customers().await?)
    }
}
