//! Reservation Model
//!
//! A reservation occupies a slot: one (date, time) pair on one table.
//! Slots are exact: two reservations conflict only when date, time
//! and table all match.

use super::serde_helpers;
use crate::utils::time::{hhmm, hhmm_option};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Reservation lifecycle status
///
/// `pending → confirmed → completed`, with `cancelled` reachable from
/// `pending` and `confirmed`. `completed` and `cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Completed => "completed",
            ReservationStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses permit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Completed | ReservationStatus::Cancelled
        )
    }

    /// Whether the state machine allows moving from `self` to `next`.
    /// Writing the current status back is always an idempotent no-op.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        if *self == next {
            return true;
        }
        match self {
            ReservationStatus::Pending => matches!(
                next,
                ReservationStatus::Confirmed | ReservationStatus::Cancelled
            ),
            ReservationStatus::Confirmed => matches!(
                next,
                ReservationStatus::Completed | ReservationStatus::Cancelled
            ),
            ReservationStatus::Completed | ReservationStatus::Cancelled => false,
        }
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub customer_name: String,
    /// Stored lowercased; ownership is matched against this field
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub party_size: i32,
    #[serde(rename = "tableId", with = "serde_helpers::record_id")]
    pub table: RecordId,
    /// Denormalized for display; refreshed when the reservation moves
    /// to another table. A later admin rename of the table itself does
    /// not rewrite existing reservations.
    pub table_number: String,
    pub status: ReservationStatus,
    #[serde(default)]
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    /// Ownership check: customers own reservations carrying their email.
    pub fn is_owned_by(&self, email: &str) -> bool {
        self.customer_email.eq_ignore_ascii_case(email.trim())
    }
}

/// Booking submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub party_size: i32,
    #[serde(rename = "tableId", with = "serde_helpers::record_id")]
    pub table: RecordId,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, with = "hhmm_option", skip_serializing_if = "Option::is_none")]
    pub time: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party_size: Option<i32>,
    #[serde(
        default,
        rename = "tableId",
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub table: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_machine_allows_forward_path() {
        use ReservationStatus::*;
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Confirmed.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(Cancelled));
    }

    #[test]
    fn status_machine_rejects_leaving_terminal_states() {
        use ReservationStatus::*;
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Confirmed));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Confirmed));
        // Skipping confirmation is not allowed either
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn same_status_write_is_a_noop_transition() {
        use ReservationStatus::*;
        for s in [Pending, Confirmed, Completed, Cancelled] {
            assert!(s.can_transition_to(s));
        }
    }

    #[test]
    fn ownership_matches_email_case_insensitively() {
        let r = Reservation {
            id: None,
            customer_name: "Ana".into(),
            customer_email: "ana@example.com".into(),
            customer_phone: "555-0100".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            party_size: 2,
            table: "restaurant_table:w1".parse().unwrap(),
            table_number: "W1".into(),
            status: ReservationStatus::Pending,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(r.is_owned_by("Ana@Example.COM"));
        assert!(!r.is_owned_by("other@example.com"));
    }
}
