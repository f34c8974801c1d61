//! Todo service - backs the asynchronously submitted todo form.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use common::{AppResult, OptionExt};
use domain::Todo;

use crate::repository::TodoRepository;

#[async_trait]
pub trait TodoService: Send + Sync {
    async fn list_todos(&self) -> AppResult<Vec<Todo>>;

    async fn get_todo(&self, id: i32) -> AppResult<Todo>;

    async fn create_todo(&self, description: String, priority: i32) -> AppResult<Todo>;

    async fn update_todo(&self, id: i32, description: String, priority: i32) -> AppResult<Todo>;

    async fn delete_todo(&self, id: i32) -> AppResult<()>;
}

pub struct TodoManager {
    repo: Arc<dyn TodoRepository>,
}

impl TodoManager {
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TodoService for TodoManager {
    async fn list_todos(&self) -> AppResult<Vec<Todo>> {
        self.repo.list().await
    }

    async fn get_todo(&self, id: i32) -> AppResult<Todo> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn create_todo(&self, description: String, priority: i32) -> AppResult<Todo> {
        let todo = self.repo.create(description, priority).await?;
        debug!(todo_id = todo.id, "Todo created");
        Ok(todo)
    }

    async fn update_todo(&self, id: i32, description: String, priority: i32) -> AppResult<Todo> {
        let todo = self.repo.update(id, description, priority).await?;
        debug!(todo_id = todo.id, "Todo updated");
        Ok(todo)
    }

    async fn delete_todo(&self, id: i32) -> AppResult<()> {
        self.repo.delete(id).await
    }
}
