//! Input validation helpers
//!
//! Centralized limits and validation functions shared by the CRUD
//! handlers and the reservation lifecycle.

use crate::utils::AppError;

// ========== Text length limits ==========

/// Entity names: customer name, table number, location labels
pub const MAX_NAME_LEN: usize = 200;

/// Reservation notes
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, feature tags
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

// ========== Seating limits ==========

/// Smallest bookable party / table capacity
pub const MIN_SEATS: i32 = 1;

/// Largest bookable party / table capacity
pub const MAX_SEATS: i32 = 20;

// ========== Validation helpers ==========

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a party size or table capacity (1..=20 covers every
/// seating configuration in the dining room).
pub fn validate_seat_count(value: i32, field: &str) -> Result<(), AppError> {
    if !(MIN_SEATS..=MAX_SEATS).contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between {MIN_SEATS} and {MAX_SEATS}"
        )));
    }
    Ok(())
}

/// Minimal email sanity check; full verification is the auth
/// provider's problem.
pub fn validate_email(value: &str, field: &str) -> Result<(), AppError> {
    validate_required_text(value, field, MAX_EMAIL_LEN)?;
    let trimmed = value.trim();
    if !trimmed.contains('@') || trimmed.starts_with('@') || trimmed.ends_with('@') {
        return Err(AppError::validation(format!(
            "{field} must be a valid email address"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(MAX_NAME_LEN + 1), "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Ana", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn optional_text_rejects_only_oversized_values() {
        assert!(validate_optional_text(&None, "notes", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some(String::new()), "notes", MAX_NOTE_LEN).is_ok());
        assert!(
            validate_optional_text(&Some("x".repeat(MAX_NOTE_LEN)), "notes", MAX_NOTE_LEN).is_ok()
        );
        assert!(
            validate_optional_text(&Some("x".repeat(MAX_NOTE_LEN + 1)), "notes", MAX_NOTE_LEN)
                .is_err()
        );
    }

    #[test]
    fn seat_count_bounds() {
        assert!(validate_seat_count(0, "partySize").is_err());
        assert!(validate_seat_count(21, "partySize").is_err());
        assert!(validate_seat_count(1, "partySize").is_ok());
        assert!(validate_seat_count(20, "partySize").is_ok());
    }

    #[test]
    fn email_needs_a_host_part() {
        assert!(validate_email("ana@example.com", "customerEmail").is_ok());
        assert!(validate_email("ana", "customerEmail").is_err());
        assert!(validate_email("@example.com", "customerEmail").is_err());
    }
}
