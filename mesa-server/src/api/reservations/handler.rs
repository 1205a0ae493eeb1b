//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveDate;

use crate::api::AppJson;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate, ReservationUpdate};
use crate::utils::AppResult;

/// GET /api/reservations - list reservations (role-scoped)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service().list(&user).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/date/:date - non-cancelled reservations on a
/// date (role-scoped)
pub async fn list_by_date(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_service().list_by_date(date, &user).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id - one reservation (owner or staff)
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_service().get(&id, &user).await?;
    Ok(Json(reservation))
}

/// POST /api/reservations - book a slot
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    AppJson(payload): AppJson<ReservationCreate>,
) -> AppResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.reservation_service().create(payload, &user).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// PUT /api/reservations/:id - edit a reservation
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .reservation_service()
        .update(&id, payload, &user)
        .await?;
    Ok(Json(reservation))
}

/// DELETE /api/reservations/:id - remove a reservation, freeing its
/// slot
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    state.reservation_service().delete(&id, &user).await?;
    Ok(Json(true))
}
