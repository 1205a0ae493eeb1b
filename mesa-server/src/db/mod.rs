//! Database Module
//!
//! Embedded SurrealDB: RocksDB-backed in production, in-memory in
//! tests. Both produce the same `Surreal<Db>` handle, so repositories
//! and services are engine-agnostic.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "mesa";
const DATABASE: &str = "mesa";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at the given path
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        let service = Self { db };
        service.setup().await?;
        tracing::info!("Database ready at {}", db_path);
        Ok(service)
    }

    /// In-memory database for tests
    pub async fn memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        let service = Self { db };
        service.setup().await?;
        Ok(service)
    }

    /// Select namespace/database and apply the schema.
    ///
    /// The unique index on `tableNumber` backs the registry's duplicate
    /// check at the storage level as well.
    async fn setup(&self) -> Result<(), AppError> {
        self.db
            .use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        self.db
            .query(
                "
                DEFINE TABLE IF NOT EXISTS restaurant_table SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS idx_table_number ON restaurant_table FIELDS tableNumber UNIQUE;
                DEFINE TABLE IF NOT EXISTS reservation SCHEMALESS;
                DEFINE INDEX IF NOT EXISTS idx_reservation_date ON reservation FIELDS date;
                ",
            )
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        Ok(())
    }
}
