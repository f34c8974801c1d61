//! Account repository backed by the `users` table.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::Account;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Map a failed write, surfacing unique index rejections as
/// [`AppError::UniqueConstraintViolation`] instead of a raw database error.
pub fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            AppError::UniqueConstraintViolation(detail)
        }
        _ => AppError::Database(err),
    }
}

/// Account repository trait for dependency injection.
///
/// Emails passed in are expected to be normalized already.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find account by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>>;

    /// Find account by (lowercase) email address
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    /// Insert a new account
    async fn create(
        &self,
        name: String,
        email: String,
        password_digest: String,
    ) -> AppResult<Account>;

    /// Overwrite name and email, and the digest when one is given
    async fn update(
        &self,
        id: Uuid,
        name: String,
        email: String,
        password_digest: Option<String>,
    ) -> AppResult<Account>;

    /// Permanently delete account
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// List all accounts, oldest first
    async fn list(&self) -> AppResult<Vec<Account>>;
}

/// SeaORM implementation of AccountRepository
pub struct AccountStore {
    db: DatabaseConnection,
}

impl AccountStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountRepository for AccountStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Account::from))
    }

    async fn create(
        &self,
        name: String,
        email: String,
        password_digest: String,
    ) -> AppResult<Account> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            email: Set(email),
            password_digest: Set(password_digest),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(map_write_error)?;
        Ok(Account::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        name: String,
        email: String,
        password_digest: Option<String>,
    ) -> AppResult<Account> {
        let account = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = account.into();
        active.name = Set(name);
        active.email = Set(email);
        if let Some(digest) = password_digest {
            active.password_digest = Set(digest);
        }
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(map_write_error)?;
        Ok(Account::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Account::from).collect())
    }
}
