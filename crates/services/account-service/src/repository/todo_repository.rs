//! Todo repository backed by the `todos` table.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::entities::todo::{self, ActiveModel, Entity as TodoEntity};
use common::{AppError, AppResult};
use domain::Todo;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait TodoRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Todo>>;

    async fn create(&self, description: String, priority: i32) -> AppResult<Todo>;

    async fn update(&self, id: i32, description: String, priority: i32) -> AppResult<Todo>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// All todos, highest priority first
    async fn list(&self) -> AppResult<Vec<Todo>>;
}

pub struct TodoStore {
    db: DatabaseConnection,
}

impl TodoStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TodoRepository for TodoStore {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Todo>> {
        let result = TodoEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Todo::from))
    }

    async fn create(&self, description: String, priority: i32) -> AppResult<Todo> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            description: Set(description),
            priority: Set(priority),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Todo::from(model))
    }

    async fn update(&self, id: i32, description: String, priority: i32) -> AppResult<Todo> {
        let todo = TodoEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = todo.into();
        active.description = Set(description);
        active.priority = Set(priority);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Todo::from(model))
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = TodoEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Todo>> {
        let models = TodoEntity::find()
            .order_by_desc(todo::Column::Priority)
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Todo::from).collect())
    }
}
