//! Entry creation endpoint.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    entry::{db::insert_entry, form::parse_entry_form},
};

/// The state needed for creating an entry.
#[derive(Debug, Clone)]
pub struct CreateEntryState {
    /// The database connection for writing entries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The directory uploaded bill images are written to.
    pub uploads_dir: PathBuf,
}

impl FromRef<AppState> for CreateEntryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            uploads_dir: state.uploads_dir.clone(),
        }
    }
}

/// Handle entry creation from a multipart form.
///
/// The bill image, when present, is written to disk while the form is read.
/// It is not removed again when the insert fails, so a failed insert can
/// leave an orphaned file in the uploads directory.
pub async fn create_entry_endpoint(
    State(state): State<CreateEntryState>,
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

    match insert_entry(&form, &connection) {
        Ok(entry_id) => {
            tracing::debug!("Created ledger entry {entry_id}");
            Json(json!({
                "status": "success",
                "message": "entry and file saved successfully"
            }))
            .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an entry: {error}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"status": "error", "message": "database insert failed"})),
            )
                .into_response()
        }
    }
}
