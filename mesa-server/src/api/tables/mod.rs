//! Restaurant Table API module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Role, require_role};
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    // Reads are public; require_auth skips GET /api/tables/*
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/available", get(handler::available))
        .route("/availability", get(handler::availability))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/", axum::routing::post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .layer(middleware::from_fn(require_role(Role::Admin)));

    read_routes.merge(manage_routes)
}
