//! Booking module
//!
//! The two domain services above the repositories:
//! - [`AvailabilityResolver`] - slot-exact table availability
//! - [`ReservationService`] - reservation lifecycle and access rules

pub mod availability;
pub mod lifecycle;

pub use availability::AvailabilityResolver;
pub use lifecycle::ReservationService;
