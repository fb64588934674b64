use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::storage::StoreError;

/// Store name used when the caller does not supply one
pub const DEFAULT_STORE_NAME: &str = "costsdb";

/// Schema version used when the caller does not supply one
pub const DEFAULT_STORE_VERSION: i64 = 1;

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (or create) the named, versioned store.
    ///
    /// The first-ever open for a name creates the `costs` collection, its
    /// three lookup indexes and the store metadata row; subsequent opens
    /// simply connect. Requesting a version lower than the one on disk is
    /// refused.
    pub async fn open(name: &str, version: i64) -> Result<Self, StoreError> {
        let url = format!("sqlite:{name}.db");
        Self::connect(&url, name, version).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self, StoreError> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::connect(&url, DEFAULT_STORE_NAME, DEFAULT_STORE_VERSION).await
    }

    async fn connect(url: &str, name: &str, version: i64) -> Result<Self, StoreError> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url)
                .await
                .map_err(|e| StoreError::Initialization(e.to_string()))?;
        }

        // Connect to the database
        let pool = SqlitePool::connect(url)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        // Setup database schema
        Self::setup_schema(&pool)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        Self::register_store(&pool, name, version).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
        // Create costs table. AUTOINCREMENT keeps ids strictly increasing and
        // never reused, even after deletes.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS costs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                month_year TEXT NOT NULL,
                timestamp INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Index on date. No read path uses it; kept for schema compatibility.
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_costs_date
            ON costs(date);
            "#,
        )
        .execute(pool)
        .await?;

        // Index for category grouping
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_costs_category
            ON costs(category);
            "#,
        )
        .execute(pool)
        .await?;

        // Index for month-keyed lookups
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_costs_month_year
            ON costs(month_year);
            "#,
        )
        .execute(pool)
        .await?;

        // Store metadata (single row to record the store's name and version)
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS store_meta (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                name TEXT NOT NULL,
                version INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Record the store's name and version on first creation; on reopen,
    /// refuse a version older than the stored one.
    async fn register_store(
        pool: &SqlitePool,
        name: &str,
        version: i64,
    ) -> Result<(), StoreError> {
        let row = sqlx::query("SELECT version FROM store_meta WHERE id = 1")
            .fetch_optional(pool)
            .await
            .map_err(|e| StoreError::Initialization(e.to_string()))?;

        match row {
            None => {
                sqlx::query("INSERT INTO store_meta (id, name, version) VALUES (1, ?, ?)")
                    .bind(name)
                    .bind(version)
                    .execute(pool)
                    .await
                    .map_err(|e| StoreError::Initialization(e.to_string()))?;
            }
            Some(row) => {
                let stored: i64 = row.get("version");
                if version < stored {
                    return Err(StoreError::Initialization(format!(
                        "requested version {version} is older than stored version {stored}"
                    )));
                }
                // A higher version is recorded as-is: only one schema exists,
                // so there is no migration to run.
                if version > stored {
                    sqlx::query("UPDATE store_meta SET version = ? WHERE id = 1")
                        .bind(version)
                        .execute(pool)
                        .await
                        .map_err(|e| StoreError::Initialization(e.to_string()))?;
                }
            }
        }

        Ok(())
    }
}
