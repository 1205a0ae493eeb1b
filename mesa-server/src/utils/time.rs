//! Time helpers for reservation slots
//!
//! Reservations are slot-exact: a slot is a calendar date plus an
//! `HH:MM` time. Times serialize as `HH:MM` strings on the wire and in
//! the database.

use chrono::NaiveTime;

use crate::utils::AppError;

/// First bookable seating of the evening
pub const OPENING_TIME: &str = "17:00";

/// Last bookable seating
pub const LAST_SEATING: &str = "23:00";

/// Parse an `HH:MM` string into a [`NaiveTime`].
pub fn parse_hhmm(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::validation(format!("time '{value}' must use HH:MM format")))
}

/// Format a [`NaiveTime`] as `HH:MM`.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Check that a time falls within service hours (17:00 to 23:00 inclusive).
pub fn validate_service_hours(time: NaiveTime) -> Result<(), AppError> {
    let opening = NaiveTime::parse_from_str(OPENING_TIME, "%H:%M").expect("static time");
    let last = NaiveTime::parse_from_str(LAST_SEATING, "%H:%M").expect("static time");
    if time < opening || time > last {
        return Err(AppError::validation(format!(
            "time must be between {OPENING_TIME} and {LAST_SEATING}"
        )));
    }
    Ok(())
}

/// Serde adapter for `NaiveTime` as an `HH:MM` string.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&super::format_hhmm(*time))
    }

    pub fn deserialize<'de, D>(d: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(d)?;
        NaiveTime::parse_from_str(&value, "%H:%M")
            .map_err(|_| de::Error::custom(format!("invalid HH:MM time: {value}")))
    }
}

/// Serde adapter for `Option<NaiveTime>` as an optional `HH:MM` string.
pub mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => s.serialize_some(&super::format_hhmm(*t)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(d)? {
            Some(value) => NaiveTime::parse_from_str(&value, "%H:%M")
                .map(Some)
                .map_err(|_| de::Error::custom(format!("invalid HH:MM time: {value}"))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_hhmm() {
        let t = parse_hhmm("19:30").unwrap();
        assert_eq!(format_hhmm(t), "19:30");
        assert!(parse_hhmm("7pm").is_err());
        assert!(parse_hhmm("25:00").is_err());
    }

    #[test]
    fn service_hours_are_inclusive() {
        assert!(validate_service_hours(parse_hhmm("17:00").unwrap()).is_ok());
        assert!(validate_service_hours(parse_hhmm("23:00").unwrap()).is_ok());
        assert!(validate_service_hours(parse_hhmm("16:59").unwrap()).is_err());
        assert!(validate_service_hours(parse_hhmm("23:30").unwrap()).is_err());
    }
}
