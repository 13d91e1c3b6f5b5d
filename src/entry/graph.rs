//! Per-month aggregation endpoint for the income/expenses/savings chart.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppState, Error, entry::db::get_monthly_totals};

/// Query parameters for the graph endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct GraphParams {
    /// The calendar year to aggregate. Required.
    pub year: Option<String>,
    /// Optional owner filter; blank values are ignored.
    pub entryname: Option<String>,
}

/// Twelve per-month sums for each aggregate, January first.
///
/// Months without matching rows stay 0.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Summed income per month.
    pub income: [f64; 12],
    /// Summed total expenditure per month.
    pub expenses: [f64; 12],
    /// Summed gross savings per month.
    pub savings: [f64; 12],
}

/// The state needed for the graph endpoint.
#[derive(Debug, Clone)]
pub struct GraphState {
    /// The database connection for reading entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for GraphState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the per-month aggregation query for a year.
///
/// Rejects the request before touching the store when no year is given.
pub async fn graph_data_endpoint(
    State(state): State<GraphState>,
    Query(params): Query<GraphParams>,
) -> Response {
    let year = match params.year {
        Some(year) if !year.is_empty() => year,
        _ => return Error::MissingYear.into_response(),
    };

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

    match get_monthly_totals(&year, entry_name, &connection) {
        Ok(totals) => {
            let mut data = GraphData::default();

            for total in totals {
                if !(1..=12).contains(&total.month) {
                    continue;
                }
                let index = (total.month - 1) as usize;
                data.income[index] = total.income;
                data.expenses[index] = total.expenses;
                data.savings[index] = total.savings;
            }

            Json(data).into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while aggregating entries: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "database query failed"})),
            )
                .into_response()
        }
    }
}
