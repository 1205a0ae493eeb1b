//! Restaurant Table Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Where a table sits in the dining room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableLocation {
    #[serde(rename = "window")]
    Window,
    #[serde(rename = "main hall")]
    MainHall,
    #[serde(rename = "private room")]
    PrivateRoom,
    #[serde(rename = "terrace")]
    Terrace,
    #[serde(rename = "bar")]
    Bar,
}

impl TableLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableLocation::Window => "window",
            TableLocation::MainHall => "main hall",
            TableLocation::PrivateRoom => "private room",
            TableLocation::Terrace => "terrace",
            TableLocation::Bar => "bar",
        }
    }
}

/// Physical table entity
///
/// `is_available` is an administrative in-service flag (table is
/// physically usable). Per-slot occupancy is derived from reservation
/// records and never stored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantTable {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    /// Unique human-facing label, e.g. "W1"
    pub table_number: String,
    pub capacity: i32,
    pub location: TableLocation,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCreate {
    pub table_number: String,
    pub capacity: i32,
    pub location: TableLocation,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Update table payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<TableLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
