//! Restaurant Table Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{RestaurantTable, TableCreate, TableUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "restaurant_table";

#[derive(Clone)]
pub struct TableRepository {
    base: BaseRepository,
}

impl TableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all tables, stable order by table number
    pub async fn find_all(&self) -> RepoResult<Vec<RestaurantTable>> {
        let tables: Vec<RestaurantTable> = self
            .base
            .db()
            .query("SELECT * FROM restaurant_table ORDER BY tableNumber")
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find tables whose administrative in-service flag is set
    pub async fn find_available(&self) -> RepoResult<Vec<RestaurantTable>> {
        let tables: Vec<RestaurantTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM restaurant_table WHERE isAvailable = true ORDER BY tableNumber",
            )
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Find table by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<RestaurantTable>> {
        let thing = self.base.parse_id(id)?;
        let table: Option<RestaurantTable> = self.base.db().select(thing).await?;
        Ok(table)
    }

    /// Find table by its human-facing number
    pub async fn find_by_number(&self, number: &str) -> RepoResult<Option<RestaurantTable>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM restaurant_table WHERE tableNumber = $number LIMIT 1")
            .bind(("number", number.to_string()))
            .await?;
        let tables: Vec<RestaurantTable> = result.take(0)?;
        Ok(tables.into_iter().next())
    }

    /// Create a new table
    pub async fn create(&self, data: TableCreate) -> RepoResult<RestaurantTable> {
        // Duplicate table numbers confuse both guests and staff
        if self.find_by_number(&data.table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                data.table_number
            )));
        }

        let table = RestaurantTable {
            id: None,
            table_number: data.table_number,
            capacity: data.capacity,
            location: data.location,
            features: data.features,
            is_available: data.is_available.unwrap_or(true),
            created_at: Utc::now(),
        };

        let created: Option<RestaurantTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create table".to_string()))
    }

    /// Partial update of a table
    pub async fn update(&self, id: &str, data: TableUpdate) -> RepoResult<RestaurantTable> {
        let thing = self.base.parse_id(id)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        // Check duplicate number if renaming
        if let Some(new_number) = &data.table_number
            && *new_number != existing.table_number
            && self.find_by_number(new_number).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Table '{}' already exists",
                new_number
            )));
        }

        let merged = RestaurantTable {
            id: None,
            table_number: data.table_number.unwrap_or(existing.table_number),
            capacity: data.capacity.unwrap_or(existing.capacity),
            location: data.location.unwrap_or(existing.location),
            features: data.features.unwrap_or(existing.features),
            is_available: data.is_available.unwrap_or(existing.is_available),
            created_at: existing.created_at,
        };

        let updated: Option<RestaurantTable> =
            self.base.db().update(thing).content(merged).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    /// Hard delete a table
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing = self.base.parse_id(id)?;
        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
