//! Reservation Lifecycle Manager
//!
//! Owns every reservation state change: creation, role-scoped reads,
//! edits and deletion. Check-and-insert runs under the booking lock so
//! two racing requests for one slot can never both commit.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

use crate::auth::CurrentUser;
use crate::booking::AvailabilityResolver;
use crate::db::models::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate};
use crate::db::repository::ReservationRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text, validate_seat_count,
};
use crate::utils::{AppError, AppResult, time};

#[derive(Clone)]
pub struct ReservationService {
    reservations: ReservationRepository,
    availability: AvailabilityResolver,
    /// Serializes check-and-insert. All slot-occupancy checks that
    /// precede a write must hold this guard.
    booking_lock: Arc<Mutex<()>>,
}

impl ReservationService {
    pub fn new(db: Surreal<Db>, booking_lock: Arc<Mutex<()>>) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            availability: AvailabilityResolver::new(db),
            booking_lock,
        }
    }

    /// Book a slot.
    ///
    /// Customers get status `pending`; staff and admin bookings are
    /// `confirmed` on creation. The table's in-service flag is never
    /// touched by booking.
    pub async fn create(
        &self,
        data: ReservationCreate,
        actor: &CurrentUser,
    ) -> AppResult<Reservation> {
        validate_required_text(&data.customer_name, "customerName", MAX_NAME_LEN)?;
        validate_email(&data.customer_email, "customerEmail")?;
        validate_required_text(&data.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
        validate_seat_count(data.party_size, "partySize")?;
        time::validate_service_hours(data.time)?;
        validate_optional_text(&data.notes, "notes", MAX_NOTE_LEN)?;

        let status = if actor.is_staff() {
            ReservationStatus::Confirmed
        } else {
            ReservationStatus::Pending
        };

        let _guard = self.booking_lock.lock().await;

        let table = self
            .availability
            .check_table_fit(&data.table, data.party_size)
            .await?;

        if self
            .availability
            .slot_conflict(&data.table, data.date, data.time, None)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Table {} is already booked at {} on {}",
                table.table_number,
                time::format_hhmm(data.time),
                data.date
            )));
        }

        let now = Utc::now();
        let reservation = Reservation {
            id: None,
            customer_name: data.customer_name.trim().to_string(),
            customer_email: data.customer_email.trim().to_lowercase(),
            customer_phone: data.customer_phone.trim().to_string(),
            date: data.date,
            time: data.time,
            party_size: data.party_size,
            table: data.table,
            table_number: table.table_number,
            status,
            notes: data.notes.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        let created = self.reservations.create(reservation).await?;
        tracing::info!(
            "Reservation created: table {} on {} at {} ({})",
            created.table_number,
            created.date,
            time::format_hhmm(created.time),
            created.status.as_str()
        );
        Ok(created)
    }

    /// Fetch one reservation. Customers may only read their own.
    pub async fn get(&self, id: &str, actor: &CurrentUser) -> AppResult<Reservation> {
        let reservation = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

        if !actor.is_staff() && !reservation.is_owned_by(&actor.email) {
            return Err(AppError::forbidden(
                "You can only view your own reservations",
            ));
        }

        Ok(reservation)
    }

    /// List reservations, scoped by role: staff and admin see all,
    /// customers only the ones carrying their email.
    pub async fn list(&self, actor: &CurrentUser) -> AppResult<Vec<Reservation>> {
        if actor.is_staff() {
            Ok(self.reservations.find_all().await?)
        } else {
            let email = actor.email.trim().to_lowercase();
            Ok(self.reservations.find_by_email(&email).await?)
        }
    }

    /// Non-cancelled reservations on a date, role-scoped as in `list`.
    pub async fn list_by_date(
        &self,
        date: NaiveDate,
        actor: &CurrentUser,
    ) -> AppResult<Vec<Reservation>> {
        let reservations = self.reservations.find_active_by_date(date).await?;

        if actor.is_staff() {
            Ok(reservations)
        } else {
            Ok(reservations
                .into_iter()
                .filter(|r| r.is_owned_by(&actor.email))
                .collect())
        }
    }

    /// Edit a reservation.
    ///
    /// Customers may only edit their own reservations while still
    /// `pending`; a `status` field in a customer patch is dropped
    /// without error. Staff and admin may edit anything, with status
    /// changes validated against the state machine. A change to the
    /// effective (table, date, time) slot re-runs the availability
    /// check under the booking lock.
    pub async fn update(
        &self,
        id: &str,
        mut patch: ReservationUpdate,
        actor: &CurrentUser,
    ) -> AppResult<Reservation> {
        let existing = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

        if !actor.is_staff() {
            if !existing.is_owned_by(&actor.email) {
                return Err(AppError::forbidden(
                    "You can only modify your own reservations",
                ));
            }
            if existing.status != ReservationStatus::Pending {
                return Err(AppError::forbidden(format!(
                    "A {} reservation can no longer be modified",
                    existing.status.as_str()
                )));
            }
            // Customers cannot drive the state machine
            patch.status = None;
        }

        if let Some(name) = &patch.customer_name {
            validate_required_text(name, "customerName", MAX_NAME_LEN)?;
        }
        if let Some(email) = &patch.customer_email {
            validate_email(email, "customerEmail")?;
        }
        if let Some(phone) = &patch.customer_phone {
            validate_required_text(phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
        }
        if let Some(party) = patch.party_size {
            validate_seat_count(party, "partySize")?;
        }
        if let Some(t) = patch.time {
            time::validate_service_hours(t)?;
        }
        validate_optional_text(&patch.notes, "notes", MAX_NOTE_LEN)?;

        let status = match patch.status {
            Some(next) => {
                if !existing.status.can_transition_to(next) {
                    return Err(AppError::validation(format!(
                        "Cannot change status from {} to {}",
                        existing.status.as_str(),
                        next.as_str()
                    )));
                }
                next
            }
            None => existing.status,
        };

        let table = patch.table.clone().unwrap_or_else(|| existing.table.clone());
        let date = patch.date.unwrap_or(existing.date);
        let time_slot = patch.time.unwrap_or(existing.time);
        let party_size = patch.party_size.unwrap_or(existing.party_size);

        let slot_changed =
            table != existing.table || date != existing.date || time_slot != existing.time;
        let fit_changed = slot_changed || party_size != existing.party_size;

        let _guard = self.booking_lock.lock().await;

        let table_number = if fit_changed {
            let fitted = self.availability.check_table_fit(&table, party_size).await?;
            fitted.table_number
        } else {
            existing.table_number.clone()
        };

        if slot_changed
            && status != ReservationStatus::Cancelled
            && self
                .availability
                .slot_conflict(&table, date, time_slot, existing.id.as_ref())
                .await?
        {
            return Err(AppError::conflict(format!(
                "Table {} is already booked at {} on {}",
                table_number,
                time::format_hhmm(time_slot),
                date
            )));
        }

        let merged = Reservation {
            id: None,
            customer_name: patch
                .customer_name
                .map(|s| s.trim().to_string())
                .unwrap_or(existing.customer_name),
            customer_email: patch
                .customer_email
                .map(|s| s.trim().to_lowercase())
                .unwrap_or(existing.customer_email),
            customer_phone: patch
                .customer_phone
                .map(|s| s.trim().to_string())
                .unwrap_or(existing.customer_phone),
            date,
            time: time_slot,
            party_size,
            table,
            table_number,
            status,
            notes: patch.notes.unwrap_or(existing.notes),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        Ok(self.reservations.update(id, merged).await?)
    }

    /// Remove a reservation outright, freeing its slot. Customers may
    /// only delete their own.
    pub async fn delete(&self, id: &str, actor: &CurrentUser) -> AppResult<()> {
        let existing = self
            .reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

        if !actor.is_staff() && !existing.is_owned_by(&actor.email) {
            return Err(AppError::forbidden(
                "You can only delete your own reservations",
            ));
        }

        self.reservations.delete(id).await?;
        tracing::info!(
            "Reservation deleted: table {} on {} at {}",
            existing.table_number,
            existing.date,
            time::format_hhmm(existing.time)
        );
        Ok(())
    }
}
