//! Implements a struct that holds the state of the REST server.

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The directory that uploaded bill images are written to.
    pub uploads_dir: PathBuf,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the ledger entries and users. Uploaded bill images are written to
    /// `uploads_dir`, which is created if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the uploads
    /// directory cannot be created.
    pub fn new(db_connection: Connection, uploads_dir: PathBuf) -> Result<Self, Error> {
        initialize(&db_connection)?;

        std::fs::create_dir_all(&uploads_dir)
            .map_err(|error| Error::FileSave(error.to_string()))?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            uploads_dir,
        })
    }
}
