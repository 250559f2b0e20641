//! Implements the expense and user stores on top of a single SQLite connection.

mod expense;
mod user;

pub(crate) use expense::create_expense_table;
pub(crate) use user::create_user_table;

use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::Connection;

use crate::{Error, db::initialize};

/// Stores expenses and users in a SQLite database.
///
/// Cloning the store is cheap and every clone shares the same connection.
#[derive(Debug, Clone)]
pub struct SQLiteStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteStore {
    /// Create a store that uses `connection`.
    ///
    /// This function will modify the database by adding the tables for the
    /// domain models if they do not exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        initialize(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Open, or create, the database file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or initialized.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let connection = Connection::open(path)?;

        Self::new(connection)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

#[cfg(test)]
pub(crate) fn get_test_store() -> SQLiteStore {
    let connection = Connection::open_in_memory().expect("could not open in-memory database");

    SQLiteStore::new(connection).expect("could not initialize database")
}
