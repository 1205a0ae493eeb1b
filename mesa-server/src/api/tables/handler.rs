//! Restaurant Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::api::AppJson;
use crate::core::ServerState;
use crate::db::models::{RestaurantTable, TableCreate, TableUpdate};
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_required_text, validate_seat_count};
use crate::utils::{AppError, AppResult, time};

/// GET /api/tables - all tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<RestaurantTable>>> {
    let tables = state.table_repository().find_all().await?;
    Ok(Json(tables))
}

/// GET /api/tables/available - in-service tables (coarse filter, not
/// slot-aware)
pub async fn available(State(state): State<ServerState>) -> AppResult<Json<Vec<RestaurantTable>>> {
    let tables = state.table_repository().find_available().await?;
    Ok(Json(tables))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    /// HH:MM within service hours
    pub time: String,
    pub party_size: i32,
}

/// GET /api/tables/availability?date&time&partySize - tables free at a
/// slot
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<RestaurantTable>>> {
    let time_slot = time::parse_hhmm(&query.time)?;
    let tables = state
        .availability_resolver()
        .find_available(query.date, time_slot, query.party_size)
        .await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - one table
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<RestaurantTable>> {
    let table = state
        .table_repository()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

/// POST /api/tables - create a table (admin)
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<TableCreate>,
) -> AppResult<(StatusCode, Json<RestaurantTable>)> {
    validate_required_text(&payload.table_number, "tableNumber", MAX_SHORT_TEXT_LEN)?;
    validate_seat_count(payload.capacity, "capacity")?;

    let table = state.table_repository().create(payload).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// PUT /api/tables/:id - update a table (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TableUpdate>,
) -> AppResult<Json<RestaurantTable>> {
    if let Some(number) = &payload.table_number {
        validate_required_text(number, "tableNumber", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(capacity) = payload.capacity {
        validate_seat_count(capacity, "capacity")?;
    }

    let table = state.table_repository().update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - delete a table (admin)
///
/// Rejected while any pending or confirmed reservation still
/// references the table.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = state.table_repository();

    // Hold the booking lock so an in-flight create cannot slip a new
    // reservation onto the table between the check and the delete
    let _guard = state.booking_lock.lock().await;

    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;

    if let Some(table_id) = &table.id {
        let active = state
            .reservation_repository()
            .find_active_for_table(table_id)
            .await?;
        if !active.is_empty() {
            return Err(AppError::conflict(format!(
                "Table {} has {} active reservation(s)",
                table.table_number,
                active.len()
            )));
        }
    }

    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
