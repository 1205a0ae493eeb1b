//! Reservation API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reservations", routes())
}

fn routes() -> Router<ServerState> {
    // All reservation routes require auth; role scoping happens in the
    // lifecycle service.
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/date/{date}", get(handler::list_by_date))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
