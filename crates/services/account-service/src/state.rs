//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::Database;
use crate::service::{AccountService, TodoService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountService>,
    pub todos: Arc<dyn TodoService>,
    pub database: Database,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        todos: Arc<dyn TodoService>,
        database: Database,
    ) -> Self {
        Self {
            accounts,
            todos,
            database,
        }
    }
}
