//! Users of the household ledger and the entry-names listing endpoint.
//!
//! Users are read-only from this API's perspective: rows are provisioned
//! out-of-band and only active ones are listed, to populate the owner
//! selector in the front end.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{AppState, Error};

/// Database identifier for a user.
pub type UserId = i64;

/// A user that ledger entries can be recorded against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user's database identifier.
    pub id: UserId,
    /// The user's display name.
    pub name: String,
}

/// Initialize the user table.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            status INTEGER NOT NULL DEFAULT 1
        )",
        (),
    )?;

    Ok(())
}

/// Retrieve all users with active status, in store-default order.
pub fn get_active_users(connection: &Connection) -> Result<Vec<User>, Error> {
    connection
        .prepare("SELECT id, name FROM user WHERE status = 1")?
        .query_map([], map_row)?
        .map(|maybe_user| maybe_user.map_err(|error| error.into()))
        .collect()
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// The state needed for listing entry names.
#[derive(Debug, Clone)]
pub struct EntryNamesState {
    /// The database connection for reading users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EntryNamesState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle listing the names of active users.
pub async fn entry_names_endpoint(State(state): State<EntryNamesState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_active_users(&connection) {
        Ok(users) => Json(users).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while listing users: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "database query failed"})),
            )
                .into_response()
        }
    }
}
