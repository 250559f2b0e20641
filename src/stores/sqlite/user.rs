//! Implements [UserStore] for [SQLiteStore].

use rusqlite::{Connection, Row};

use crate::{
    Error,
    stores::{SQLiteStore, UserStore},
    timestamp,
    user::{User, UserId},
};

impl UserStore for SQLiteStore {
    fn list(&self) -> Result<Vec<User>, Error> {
        self.connection()?
            .prepare("SELECT user_id, name, created_at FROM \"user\" ORDER BY user_id")?
            .query_map([], map_user_row)?
            .map(|maybe_user| maybe_user.map_err(Error::from))
            .collect()
    }

    fn get(&self, user_id: UserId) -> Result<User, Error> {
        self.connection()?
            .prepare("SELECT user_id, name, created_at FROM \"user\" WHERE user_id = :user_id")?
            .query_row(&[(":user_id", &user_id.as_i64())], map_user_row)
            .map_err(Error::from)
    }

    fn create(&self, name: &str) -> Result<User, Error> {
        // The ID is computed in the same statement so that concurrent inserts
        // cannot be given the same ID.
        self.connection()?
            .prepare(
                "INSERT INTO \"user\" (user_id, name, created_at)
                 VALUES ((SELECT COALESCE(MAX(user_id), 0) + 1 FROM \"user\"), ?1, ?2)
                 RETURNING user_id, name, created_at",
            )?
            .query_row((name, timestamp::now()), map_user_row)
            .map_err(Error::from)
    }

    fn delete(&self, user_id: UserId) -> Result<(), Error> {
        let rows_affected = self.connection()?.execute(
            "DELETE FROM \"user\" WHERE user_id = :user_id",
            &[(":user_id", &user_id.as_i64())],
        )?;

        match rows_affected {
            0 => Err(Error::NotFound),
            _ => Ok(()),
        }
    }
}

/// Create the user table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub(crate) fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"user\" (
                user_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let user_id = row.get(0)?;
    let name = row.get(1)?;
    let created_at = row.get(2)?;

    Ok(User {
        user_id: UserId::new(user_id),
        name,
        created_at,
    })
}
