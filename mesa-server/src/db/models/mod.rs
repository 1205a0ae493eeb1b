//! Database models
//!
//! Entity structs plus their Create/Update payloads, serialized with
//! camelCase wire names for compatibility with the web client.

pub mod reservation;
pub mod serde_helpers;
pub mod table;

pub use reservation::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate};
pub use table::{RestaurantTable, TableCreate, TableLocation, TableUpdate};
