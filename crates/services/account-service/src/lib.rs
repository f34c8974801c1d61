//! Account Service Library
//!
//! Storefront sign-up, profile updates and login over HTTP, plus the todo
//! resource that backs the asynchronously submitted todo form.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod infra;
pub mod openapi;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;

use axum::Router;
use tracing::info;

use domain::{Argon2Hasher, CredentialHasher};

use crate::config::AccountServiceConfig;
use crate::infra::Database;
use crate::repository::{AccountStore, TodoStore};
use crate::service::{AccountManager, TodoManager};
use crate::state::AppState;

pub use crate::routes::create_router;

/// Wire repositories and services over an open database.
pub fn build_state(database: Database, hasher: Arc<dyn CredentialHasher>) -> AppState {
    let connection = database.get_connection();

    let account_repo = Arc::new(AccountStore::new(connection.clone()));
    let todo_repo = Arc::new(TodoStore::new(connection));

    AppState::new(
        Arc::new(AccountManager::new(account_repo, hasher)),
        Arc::new(TodoManager::new(todo_repo)),
        database,
    )
}

/// Build the full application router over an open database.
pub fn create_app(database: Database, hasher: Arc<dyn CredentialHasher>) -> Router {
    create_router(build_state(database, hasher))
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: AccountServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::connect(&config.database).await?;
    let app = create_app(database, Arc::new(Argon2Hasher::default()));

    let addr = config.service.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("{} listening on http://{}", config.service.service_name, addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = AccountServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
