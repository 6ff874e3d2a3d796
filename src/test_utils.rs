//! Shared helpers for tests.

use rusqlite::Connection;

use crate::{AppState, PaginationConfig};

/// An [AppState] backed by a fresh in-memory database.
pub fn test_state() -> AppState {
    let connection = Connection::open_in_memory().expect("Could not open database in memory.");

    AppState::new(connection, PaginationConfig::default())
        .expect("Could not initialize database.")
}
