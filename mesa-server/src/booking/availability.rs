//! Availability Resolver
//!
//! Answers "which tables can seat this party at this slot". A slot is
//! one (date, time) pair; conflicts are slot-exact, so a 19:00 booking
//! never blocks 19:30 on the same table.

use crate::db::models::{Reservation, RestaurantTable};
use crate::db::repository::{ReservationRepository, TableRepository};
use crate::utils::{AppError, AppResult, time, validation};
use chrono::{NaiveDate, NaiveTime};
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct AvailabilityResolver {
    tables: TableRepository,
    reservations: ReservationRepository,
}

impl AvailabilityResolver {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            tables: TableRepository::new(db.clone()),
            reservations: ReservationRepository::new(db),
        }
    }

    /// Tables that can host `party_size` guests at the given slot.
    ///
    /// A table qualifies when its in-service flag is set, its capacity
    /// covers the party, and no non-cancelled reservation occupies the
    /// exact slot. An empty result is a valid answer, not an error.
    pub async fn find_available(
        &self,
        date: NaiveDate,
        time_slot: NaiveTime,
        party_size: i32,
    ) -> AppResult<Vec<RestaurantTable>> {
        validation::validate_seat_count(party_size, "partySize")?;
        time::validate_service_hours(time_slot)?;

        let candidates = self.tables.find_available().await?;
        let occupied = self.occupied_table_ids(date, time_slot, None).await?;

        let available = candidates
            .into_iter()
            .filter(|t| t.capacity >= party_size)
            .filter(|t| match &t.id {
                Some(id) => !occupied.contains(&id.to_string()),
                None => false,
            })
            .collect();

        Ok(available)
    }

    /// Whether a non-cancelled reservation already occupies the slot on
    /// this table. `exclude` names a reservation to ignore, used when
    /// an existing booking is being moved.
    pub async fn slot_conflict(
        &self,
        table: &RecordId,
        date: NaiveDate,
        time_slot: NaiveTime,
        exclude: Option<&RecordId>,
    ) -> AppResult<bool> {
        let occupied = self.occupied_table_ids(date, time_slot, exclude).await?;
        Ok(occupied.contains(&table.to_string()))
    }

    /// Confirm a table can host the party: it must exist, be in
    /// service and have sufficient capacity.
    pub async fn check_table_fit(
        &self,
        table_id: &RecordId,
        party_size: i32,
    ) -> AppResult<RestaurantTable> {
        let table = self
            .tables
            .find_by_id(&table_id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))?;

        if !table.is_available {
            return Err(AppError::conflict(format!(
                "Table {} is not in service",
                table.table_number
            )));
        }
        if table.capacity < party_size {
            return Err(AppError::conflict(format!(
                "Table {} seats at most {} guests",
                table.table_number, table.capacity
            )));
        }

        Ok(table)
    }

    async fn occupied_table_ids(
        &self,
        date: NaiveDate,
        time_slot: NaiveTime,
        exclude: Option<&RecordId>,
    ) -> AppResult<Vec<String>> {
        let active: Vec<Reservation> = self.reservations.find_active_by_date(date).await?;

        let ids = active
            .into_iter()
            .filter(|r| r.time == time_slot)
            .filter(|r| match (exclude, &r.id) {
                (Some(skip), Some(id)) => skip != id,
                _ => true,
            })
            .map(|r| r.table.to_string())
            .collect();

        Ok(ids)
    }
}
