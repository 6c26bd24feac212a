//! # SQLite Backend
//!
//! The durable storage backend: one SQLite file, WAL mode, a small pool.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Backend                                     │
//! │                                                                         │
//! │  App Startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← Configure pool settings                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteBackend::connect(config).await ← Create pool + run migrations    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                            │
//! │  │            SqlitePool                   │                            │
//! │  │  ┌─────┐ ┌─────┐ ┌─────┐ ┌─────┐        │  (max_connections)         │
//! │  │  │Conn1│ │Conn2│ │Conn3│ │Conn4│ ...    │                            │
//! │  │  └─────┘ └─────┘ └─────┘ └─────┘        │                            │
//! │  └─────────────────────────────────────────┘                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageBackend trait methods (queries, transactions)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled for:
//! - Better concurrent read performance
//! - Readers don't block writers
//! - Better crash recovery

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use grano_core::{Customer, Product, Sale, SaleChannel, SaleLine, Snapshot, Totals};

use crate::backend::StorageBackend;
use crate::error::{StoreError, StoreResult};
use crate::migrations;

// =============================================================================
// Configuration
// =============================================================================

/// SQLite backend configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = StoreConfig::new("/path/to/grano.db")
///     .max_connections(5)
///     .min_connections(1);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5 (plenty for a single-operator shop)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a new configuration with the given database path. The file
    /// is created on connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// In-memory database configuration, used by tests.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            // In-memory databases are per-connection; more than one
            // connection would see different data.
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Backend
// =============================================================================

/// Durable [`StorageBackend`] over a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Opens the database and prepares it for use.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite for a local POS workload:
    ///    - WAL mode for concurrent reads
    ///    - NORMAL synchronous (balance of safety/speed)
    ///    - Foreign keys enabled
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing SQLite storage"
        );

        // sqlite://path with mode=rwc creates the file if missing
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            // SQLite ships with foreign keys off for backwards compatibility
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "SQLite pool created"
        );

        let backend = SqliteBackend { pool };

        if config.run_migrations {
            migrations::run_migrations(&backend.pool).await?;
        }

        Ok(backend)
    }

    /// Returns a reference to the connection pool, for diagnostics and
    /// queries not covered by the trait.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Closes the connection pool. All operations fail afterwards.
    pub async fn close(&self) {
        info!("Closing SQLite pool");
        self.pool.close().await;
    }

    /// Checks whether the database can execute queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Row Types
// =============================================================================

/// Sale header row with the totals block flattened into columns.
#[derive(Debug, sqlx::FromRow)]
struct SaleRow {
    id: String,
    sold_at: DateTime<Utc>,
    customer_id: Option<String>,
    customer_name: Option<String>,
    channel: SaleChannel,
    is_affiliate: bool,
    apply_bundle: bool,
    discount_pct: f64,
    gross: i64,
    discount: i64,
    net: i64,
    cost: i64,
    margin: i64,
    margin_pct: f64,
    notes: Option<String>,
}

impl SaleRow {
    fn into_sale(self, lines: Vec<SaleLine>) -> Sale {
        Sale {
            id: self.id,
            sold_at: self.sold_at,
            customer_id: self.customer_id,
            customer_name: self.customer_name,
            channel: self.channel,
            is_affiliate: self.is_affiliate,
            apply_bundle: self.apply_bundle,
            discount_pct: self.discount_pct,
            lines,
            totals: Totals {
                gross: self.gross,
                discount: self.discount,
                net: self.net,
                cost: self.cost,
                margin: self.margin,
                margin_pct: self.margin_pct,
            },
            notes: self.notes,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SaleLineRow {
    sale_id: String,
    product_id: String,
    product_name: String,
    size: String,
    quantity: i64,
    unit_price: i64,
    unit_cost: i64,
}

impl From<SaleLineRow> for SaleLine {
    fn from(row: SaleLineRow) -> Self {
        SaleLine {
            product_id: row.product_id,
            product_name: row.product_name,
            size: row.size,
            quantity: row.quantity,
            unit_price: row.unit_price,
            unit_cost: row.unit_cost,
        }
    }
}

// =============================================================================
// SQL Fragments
// =============================================================================
// Shared between the pool methods and replace_all's transaction.

const INSERT_PRODUCT_SQL: &str = "INSERT INTO products \
     (id, sku, name, size, unit_price, unit_cost, stock_qty, is_active, created_at, updated_at) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const INSERT_CUSTOMER_SQL: &str = "INSERT INTO customers (id, name, kind, contact, created_at) \
     VALUES (?, ?, ?, ?, ?)";

const INSERT_SALE_SQL: &str = "INSERT INTO sales \
     (id, sold_at, customer_id, customer_name, channel, is_affiliate, apply_bundle, \
      discount_pct, gross, discount, net, cost, margin, margin_pct, notes) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const INSERT_SALE_LINE_SQL: &str = "INSERT INTO sale_lines \
     (sale_id, product_id, product_name, size, quantity, unit_price, unit_cost) \
     VALUES (?, ?, ?, ?, ?, ?, ?)";

fn bind_product<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    product: &'q Product,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.size)
        .bind(product.unit_price)
        .bind(product.unit_cost)
        .bind(product.stock_qty)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
}

fn bind_sale_header<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    sale: &'q Sale,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(&sale.id)
        .bind(sale.sold_at)
        .bind(&sale.customer_id)
        .bind(&sale.customer_name)
        .bind(sale.channel.as_str())
        .bind(sale.is_affiliate)
        .bind(sale.apply_bundle)
        .bind(sale.discount_pct)
        .bind(sale.totals.gross)
        .bind(sale.totals.discount)
        .bind(sale.totals.net)
        .bind(sale.totals.cost)
        .bind(sale.totals.margin)
        .bind(sale.totals.margin_pct)
        .bind(&sale.notes)
}

fn bind_sale_line<'q>(
    query: sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>>,
    sale_id: &'q str,
    line: &'q SaleLine,
) -> sqlx::query::Query<'q, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'q>> {
    query
        .bind(sale_id)
        .bind(&line.product_id)
        .bind(&line.product_name)
        .bind(&line.size)
        .bind(line.quantity)
        .bind(line.unit_price)
        .bind(line.unit_cost)
}

// =============================================================================
// StorageBackend Implementation
// =============================================================================

#[async_trait]
impl StorageBackend for SqliteBackend {
    fn backend_tag(&self) -> &'static str {
        "sqlite"
    }

    // ------------------------------------------------------------------ catalog

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, sku, name, size, unit_price, unit_cost, stock_qty, is_active, \
                    created_at, updated_at \
             FROM products ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    async fn get_product(&self, id: &str) -> StoreResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, sku, name, size, unit_price, unit_cost, stock_qty, is_active, \
                    created_at, updated_at \
             FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    async fn insert_product(&self, product: &Product) -> StoreResult<()> {
        debug!(product_id = %product.id, sku = %product.sku, "Inserting product");

        bind_product(sqlx::query(INSERT_PRODUCT_SQL), product)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> StoreResult<()> {
        debug!(product_id = %product.id, "Updating product");

        let result = sqlx::query(
            "UPDATE products \
             SET sku = ?, name = ?, size = ?, unit_price = ?, unit_cost = ?, \
                 stock_qty = ?, is_active = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.size)
        .bind(product.unit_price)
        .bind(product.unit_cost)
        .bind(product.stock_qty)
        .bind(product.is_active)
        .bind(product.updated_at)
        .bind(&product.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("product", &product.id));
        }
        Ok(())
    }

    async fn set_product_active(&self, id: &str, active: bool) -> StoreResult<()> {
        debug!(product_id = %id, active, "Setting product active flag");

        let result = sqlx::query("UPDATE products SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("product", id));
        }
        Ok(())
    }

    async fn decrement_stock(&self, product_id: &str, quantity: i64) -> StoreResult<()> {
        debug!(product_id = %product_id, quantity, "Decrementing stock");

        // The WHERE clause is the guard: if stock already dropped below the
        // requested quantity (or the product vanished), no row matches and
        // stock is left untouched.
        let result = sqlx::query(
            "UPDATE products \
             SET stock_qty = stock_qty - ?, updated_at = ? \
             WHERE id = ? AND stock_qty >= ?",
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::StockConflict {
                product_id: product_id.to_string(),
            });
        }
        Ok(())
    }

    // ---------------------------------------------------------------- customers

    async fn list_customers(&self) -> StoreResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, kind, contact, created_at FROM customers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    async fn insert_customer(&self, customer: &Customer) -> StoreResult<()> {
        debug!(customer_id = %customer.id, "Inserting customer");

        sqlx::query(INSERT_CUSTOMER_SQL)
            .bind(&customer.id)
            .bind(&customer.name)
            .bind(customer.kind.as_str())
            .bind(&customer.contact)
            .bind(customer.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    // -------------------------------------------------------------------- sales

    async fn list_sales(&self) -> StoreResult<Vec<Sale>> {
        let rows = sqlx::query_as::<_, SaleRow>(
            "SELECT id, sold_at, customer_id, customer_name, channel, is_affiliate, \
                    apply_bundle, discount_pct, gross, discount, net, cost, margin, \
                    margin_pct, notes \
             FROM sales ORDER BY sold_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        // One pass over all lines; autoincrement id preserves per-sale
        // insertion order.
        let line_rows = sqlx::query_as::<_, SaleLineRow>(
            "SELECT sale_id, product_id, product_name, size, quantity, unit_price, unit_cost \
             FROM sale_lines ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut lines_by_sale: HashMap<String, Vec<SaleLine>> = HashMap::new();
        for row in line_rows {
            lines_by_sale
                .entry(row.sale_id.clone())
                .or_default()
                .push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let lines = lines_by_sale.remove(&row.id).unwrap_or_default();
                row.into_sale(lines)
            })
            .collect())
    }

    async fn insert_sale(&self, sale: &Sale) -> StoreResult<()> {
        debug!(sale_id = %sale.id, lines = sale.lines.len(), "Persisting sale");

        // Header and lines land in one transaction; a failure on any line
        // rolls the header back too.
        let mut tx = self.pool.begin().await?;

        bind_sale_header(sqlx::query(INSERT_SALE_SQL), sale)
            .execute(&mut *tx)
            .await?;

        for line in &sale.lines {
            bind_sale_line(sqlx::query(INSERT_SALE_LINE_SQL), &sale.id, line)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete_sale(&self, id: &str) -> StoreResult<()> {
        debug!(sale_id = %id, "Deleting sale");

        // ON DELETE CASCADE removes the lines; stock stays as it is.
        let result = sqlx::query("DELETE FROM sales WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("sale", id));
        }
        Ok(())
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
        info!(
            products = snapshot.products.len(),
            customers = snapshot.customers.len(),
            sales = snapshot.sales.len(),
            "Restoring snapshot"
        );

        let mut tx = self.pool.begin().await?;

        // Children before parents, then rebuild in dependency order.
        sqlx::query("DELETE FROM sale_lines").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM sales").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM customers").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM products").execute(&mut *tx).await?;

        for product in &snapshot.products {
            bind_product(sqlx::query(INSERT_PRODUCT_SQL), product)
                .execute(&mut *tx)
                .await?;
        }

        for customer in &snapshot.customers {
            sqlx::query(INSERT_CUSTOMER_SQL)
                .bind(&customer.id)
                .bind(&customer.name)
                .bind(customer.kind.as_str())
                .bind(&customer.contact)
                .bind(customer.created_at)
                .execute(&mut *tx)
                .await?;
        }

        for sale in &snapshot.sales {
            bind_sale_header(sqlx::query(INSERT_SALE_SQL), sale)
                .execute(&mut *tx)
                .await?;
            for line in &sale.lines {
                bind_sale_line(sqlx::query(INSERT_SALE_LINE_SQL), &sale.id, line)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
