//! Database initialization for the application's SQLite store.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{Error, entry::create_entry_table, user::create_user_table};

/// Create the application tables if they do not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_entry_table(&transaction)?;
    create_user_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
