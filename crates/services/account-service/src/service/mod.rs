//! Service layer - use cases over the repositories.

mod account_service;
mod todo_service;

pub use account_service::{AccountManager, AccountService};
pub use todo_service::{TodoManager, TodoService};
