//! Shared application state for the HTTP API.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rusqlite::Connection;

/// Shared application state.
///
/// Holds the single SQLite connection behind a mutex; handlers take the
/// lock only for the duration of a statement batch.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Creates a new application state around an open connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    /// Locks the database connection.
    pub fn db(&self) -> MutexGuard<'_, Connection> {
        // A poisoned lock only means another handler panicked mid-request;
        // the connection itself is still usable.
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
