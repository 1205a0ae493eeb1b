//! Mesa Server - restaurant table reservation service
//!
//! # Overview
//!
//! A small HTTP service that manages a restaurant's physical tables
//! and the reservations booked against them:
//!
//! - **Table registry** (`api/tables`, `db`): CRUD over tables with
//!   capacity, location and an administrative in-service flag
//! - **Availability** (`booking/availability`): slot-exact answers to
//!   "which tables fit this party at this date and time"
//! - **Reservation lifecycle** (`booking/lifecycle`): role-scoped
//!   booking, editing and cancellation with a four-state machine
//! - **Auth** (`auth`): bearer JWT validation, customer/staff/admin
//!   roles
//!
//! # Module structure
//!
//! ```text
//! mesa-server/src/
//! ├── core/          # config, state, server wiring
//! ├── auth/          # JWT validation, roles, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── booking/       # availability + lifecycle services
//! ├── db/            # embedded SurrealDB layer
//! └── utils/         # errors, logging, validation, time
//! ```

pub mod api;
pub mod auth;
pub mod booking;
pub mod core;
pub mod db;
pub mod utils;

pub use auth::{CurrentUser, JwtService, Role};
pub use booking::{AvailabilityResolver, ReservationService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   __  ___
  /  |/  /__  _________ _
 / /|_/ / _ \/ ___/ __ `/
/ /  / /  __(__  ) /_/ /
/_/  /_/\___/____/\__,_/
    "#
    );
}

/// Load `.env`, then initialize logging from `RUST_LOG`/`LOG_DIR`
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("RUST_LOG").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
