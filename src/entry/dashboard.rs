//! Dashboard listing endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::json;

use crate::{AppState, Error, entry::db::get_dashboard_entries};

/// Query parameters for the dashboard endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// Optional calendar year filter; empty values are ignored.
    pub year: Option<String>,
    /// Optional owner filter; blank values are ignored.
    pub entryname: Option<String>,
}

/// The state needed for the dashboard endpoint.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle listing active entries for the dashboard, newest date first.
pub async fn dashboard_data_endpoint(
    State(state): State<DashboardState>,
    Query(params): Query<DashboardParams>,
) -> Response {
    let year = params.year.as_deref().filter(|year| !year.is_empty());
    let entry_name = params
        .entryname
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_dashboard_entries(year, entry_name, &connection) {
        Ok(entries) => Json(entries).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while listing entries: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "database fetch failed"})),
            )
                .into_response()
        }
    }
}
