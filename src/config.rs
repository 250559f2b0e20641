//! Chooses and opens the storage backend.

use std::{path::Path, sync::Arc};

use crate::{AppState, Error, JsonFileStore, SQLiteStore};

/// The storage backend for expenses and users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum StoreKind {
    /// A SQLite database file.
    #[default]
    Sqlite,
    /// A single JSON file.
    Json,
}

/// Open the store at `path` and build the app state around it.
///
/// Both repositories share the one backing store so that deleting a user
/// also deletes their expenses.
///
/// # Errors
/// Returns an error if the file cannot be opened or initialised.
pub fn open_stores(kind: StoreKind, path: impl AsRef<Path>) -> Result<AppState, Error> {
    let path = path.as_ref();
    tracing::info!("opening {kind:?} store at {}", path.display());

    match kind {
        StoreKind::Sqlite => {
            let store = Arc::new(SQLiteStore::open(path)?);
            Ok(AppState::new(store.clone(), store))
        }
        StoreKind::Json => {
            let store = Arc::new(JsonFileStore::open(path)?);
            Ok(AppState::new(store.clone(), store))
        }
    }
}
