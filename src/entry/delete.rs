//! Entry soft-deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    entry::{EntryId, db::soft_delete_entry},
};

/// The state needed for soft-deleting an entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryState {
    /// The database connection for writing entries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle marking an entry as deleted. The row is kept in the store.
pub async fn delete_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(state): State<DeleteEntryState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match soft_delete_entry(entry_id, &connection) {
        Ok(()) => Json(json!({"message": "entry marked as deleted"})).into_response(),
        Err(Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "entry not found or already deleted"})),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting entry {entry_id}: {error}"
            );
            error.into_response()
        }
    }
}
