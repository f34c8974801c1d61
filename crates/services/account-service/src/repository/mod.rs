//! Repository layer for data access.

mod account_repository;
pub mod entities;
mod todo_repository;

pub use account_repository::{map_write_error, AccountRepository, AccountStore};
pub use todo_repository::{TodoRepository, TodoStore};

#[cfg(any(test, feature = "test-utils"))]
pub use account_repository::MockAccountRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use todo_repository::MockTodoRepository;
