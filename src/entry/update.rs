//! Entry update endpoint.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    entry::{EntryId, db::update_entry, form::parse_entry_form},
};

/// The state needed for updating an entry.
#[derive(Debug, Clone)]
pub struct UpdateEntryState {
    /// The database connection for writing entries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The directory uploaded bill images are written to.
    pub uploads_dir: PathBuf,
}

impl FromRef<AppState> for UpdateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            uploads_dir: state.uploads_dir.clone(),
        }
    }
}

/// Handle a full overwrite of an entry's scalar fields.
///
/// The stored bill image path is only replaced when the request carried a
/// new file; omitted scalar fields are written as 0, not preserved.
pub async fn update_entry_endpoint(
    Path(entry_id): Path<EntryId>,
    State(state): State<UpdateEntryState>,
    mut multipart: Multipart,
) -> Response {
    let form = match parse_entry_form(&mut multipart, &state.uploads_dir).await {
        Ok(form) => form,
        Err(error) => {
            tracing::error!("Failed to parse entry form: {error}");
            return error.into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_entry(entry_id, &form, &connection) {
        Ok(()) => Json(json!({
            "status": "success",
            "message": "entry updated successfully"
        }))
        .into_response(),
        Err(Error::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({"status": "error", "message": "no entry found with this id"})),
        )
            .into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating entry {entry_id}: {error}"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "failed to update entry"})),
            )
                .into_response()
        }
    }
}
