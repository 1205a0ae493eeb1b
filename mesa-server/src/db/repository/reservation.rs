//! Reservation Repository
//!
//! Keyed persistence with lookups by id, customer email and date.
//! Slot-conflict enforcement lives in the booking services, not here.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Reservation;
use chrono::NaiveDate;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

pub const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All reservations ordered by date then time
    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY date, time")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Find reservation by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let thing = self.base.parse_id(id)?;
        let reservation: Option<Reservation> = self.base.db().select(thing).await?;
        Ok(reservation)
    }

    /// Reservations owned by a customer email (already lowercased)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE customerEmail = $email ORDER BY date, time")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// All reservations on a calendar date
    pub async fn find_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation WHERE date = $date ORDER BY time")
            .bind(("date", date))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Non-cancelled reservations on a date, the set that occupies slots
    pub async fn find_active_by_date(&self, date: NaiveDate) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE date = $date AND status != 'cancelled' ORDER BY time",
            )
            .bind(("date", date))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Non-terminal reservations referencing a table (blocks table deletion)
    pub async fn find_active_for_table(&self, table: &RecordId) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE tableId = $table AND status IN ['pending', 'confirmed']",
            )
            .bind(("table", table.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Persist a new reservation
    pub async fn create(&self, mut reservation: Reservation) -> RepoResult<Reservation> {
        reservation.id = None;
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    /// Replace a reservation record
    pub async fn update(&self, id: &str, mut reservation: Reservation) -> RepoResult<Reservation> {
        let thing = self.base.parse_id(id)?;
        reservation.id = None;
        let updated: Option<Reservation> =
            self.base.db().update(thing).content(reservation).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }

    /// Hard delete a reservation, freeing its slot
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
