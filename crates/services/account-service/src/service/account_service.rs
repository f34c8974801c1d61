//! Account service - signup, profile updates and credential checks.
//!
//! Every save runs the same pipeline: normalize the draft, look up email
//! ownership, run the ordered account rules, hash the password, then make a
//! single repository write. A unique index rejection from that write is
//! reported exactly like a failed uniqueness rule.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    normalize_email, validate_account, validation::is_blank, Account, AccountDraft,
    CreateAccount, CredentialHasher, Field, Reason, UpdateAccount, ValidationContext,
    ValidationErrors,
};

use crate::repository::AccountRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Validate and create a new account
    async fn register(&self, input: CreateAccount) -> AppResult<Account>;

    /// Validate and apply a partial update
    async fn update_account(&self, id: Uuid, changes: UpdateAccount) -> AppResult<Account>;

    /// Get account by ID
    async fn get_account(&self, id: Uuid) -> AppResult<Account>;

    /// List all accounts
    async fn list_accounts(&self) -> AppResult<Vec<Account>>;

    /// Permanently delete an account
    async fn delete_account(&self, id: Uuid) -> AppResult<()>;

    /// Check an email/password pair against the stored digest
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Account>;
}

/// Concrete implementation of AccountService using a repository and hasher.
pub struct AccountManager {
    repo: Arc<dyn AccountRepository>,
    hasher: Arc<dyn CredentialHasher>,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(repo: Arc<dyn AccountRepository>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { repo, hasher }
    }

    /// Whether an account other than `owner` already uses `email`.
    async fn email_taken(&self, email: &str, owner: Option<Uuid>) -> AppResult<bool> {
        if is_blank(email) {
            return Ok(false);
        }

        let existing = self.repo.find_by_email(email).await?;
        Ok(matches!(existing, Some(account) if Some(account.id) != owner))
    }

    /// Normalize and validate a draft; returns it ready for persistence.
    async fn check(&self, draft: AccountDraft, owner: Option<Uuid>) -> AppResult<AccountDraft> {
        let draft = draft.normalized();
        let context = ValidationContext {
            email_taken: self.email_taken(&draft.email, owner).await?,
        };

        if let Err(errors) = validate_account(&draft, &context) {
            info!(failures = errors.len(), "Account validation failed");
            return Err(AppError::Invalid(errors));
        }

        Ok(draft)
    }
}

/// Report a unique index rejection the same way as the uniqueness rule.
fn translate_unique_violation(err: AppError) -> AppError {
    match err {
        AppError::UniqueConstraintViolation(detail) => {
            warn!("Email uniqueness enforced by index: {}", detail);
            AppError::Invalid(ValidationErrors::single(Field::Email, Reason::NotUnique))
        }
        other => other,
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, input: CreateAccount) -> AppResult<Account> {
        let draft = self.check(AccountDraft::from(input), None).await?;
        let credentials = draft
            .credentials
            .ok_or_else(|| AppError::internal("Signup draft without credentials"))?;

        let digest = self.hasher.hash(&credentials.password)?;
        let account = self
            .repo
            .create(draft.name, draft.email, digest)
            .await
            .map_err(translate_unique_violation)?;

        info!(account_id = %account.id, "Account registered");
        Ok(account)
    }

    async fn update_account(&self, id: Uuid, changes: UpdateAccount) -> AppResult<Account> {
        let existing = self.get_account(id).await?;
        let draft = self.check(changes.apply_to(&existing), Some(id)).await?;

        let digest = match &draft.credentials {
            Some(credentials) => Some(self.hasher.hash(&credentials.password)?),
            None => None,
        };

        let account = self
            .repo
            .update(id, draft.name, draft.email, digest)
            .await
            .map_err(translate_unique_violation)?;

        info!(account_id = %account.id, "Account updated");
        Ok(account)
    }

    async fn get_account(&self, id: Uuid) -> AppResult<Account> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.repo.list().await
    }

    async fn delete_account(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(account_id = %id, "Account deleted");
        Ok(())
    }

    async fn authenticate(&self, email: &str, password: &str) -> AppResult<Account> {
        let account = self
            .repo
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.hasher.verify(password, &account.password_digest) {
            return Err(AppError::InvalidCredentials);
        }

        Ok(account)
    }
}
