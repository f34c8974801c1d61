//! Repository behaviour against the migrated schema.

mod support;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use account_service_lib::repository::{AccountRepository, AccountStore};
use account_service_lib::service::{AccountManager, AccountService};
use common::{AppError, AppResult};
use domain::{Account, CreateAccount, Field, Reason, UpdateAccount};

use support::{database, hasher};

#[tokio::test]
async fn test_unique_index_rejects_duplicate_email() {
    let db = database().await;
    let store = AccountStore::new(db.get_connection());

    store
        .create("First".into(), "dup@example.com".into(), "digest".into())
        .await
        .unwrap();

    let result = store
        .create("Second".into(), "dup@example.com".into(), "digest".into())
        .await;

    assert!(matches!(result, Err(AppError::UniqueConstraintViolation(_))));
}

#[tokio::test]
async fn test_find_by_email_matches_stored_lowercase() {
    let db = database().await;
    let store = AccountStore::new(db.get_connection());

    let created = store
        .create("Jane".into(), "jane@example.com".into(), "digest".into())
        .await
        .unwrap();

    let found = store.find_by_email("jane@example.com").await.unwrap();
    assert_eq!(found.map(|a| a.id), Some(created.id));
    assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_without_digest_keeps_password() {
    let db = database().await;
    let store = AccountStore::new(db.get_connection());

    let created = store
        .create("Jane".into(), "jane@example.com".into(), "stored-digest".into())
        .await
        .unwrap();

    let updated = store
        .update(created.id, "Jane Doe".into(), "jane@example.com".into(), None)
        .await
        .unwrap();

    assert_eq!(updated.name, "Jane Doe");
    assert_eq!(updated.password_digest, "stored-digest");
}

/// Store whose email lookup never sees existing rows, as when two signups
/// race past the uniqueness rule.
struct BlindLookup(AccountStore);

#[async_trait]
impl AccountRepository for BlindLookup {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Account>> {
        self.0.find_by_id(id).await
    }

    async fn find_by_email(&self, _email: &str) -> AppResult<Option<Account>> {
        Ok(None)
    }

    async fn create(
        &self,
        name: String,
        email: String,
        password_digest: String,
    ) -> AppResult<Account> {
        self.0.create(name, email, password_digest).await
    }

    async fn update(
        &self,
        id: Uuid,
        name: String,
        email: String,
        password_digest: Option<String>,
    ) -> AppResult<Account> {
        self.0.update(id, name, email, password_digest).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.0.delete(id).await
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        self.0.list().await
    }
}

#[tokio::test]
async fn test_service_reports_index_rejection_as_not_unique() {
    let db = database().await;
    let store = BlindLookup(AccountStore::new(db.get_connection()));
    store
        .create("First".into(), "taken@example.com".into(), "digest".into())
        .await
        .unwrap();
    let manager = AccountManager::new(Arc::new(store), hasher());

    let result = manager
        .register(CreateAccount {
            name: "Second".to_string(),
            email: "Taken@Example.com".to_string(),
            password: "secret1".to_string(),
            password_confirmation: "secret1".to_string(),
        })
        .await;

    match result {
        Err(AppError::Invalid(errors)) => {
            assert_eq!(errors.pairs(), vec![(Field::Email, Reason::NotUnique)]);
        }
        other => panic!("expected not_unique, got {:?}", other.map(|a| a.email)),
    }
}

#[tokio::test]
async fn test_update_to_other_owners_email_is_not_unique() {
    let db = database().await;
    let store = Arc::new(AccountStore::new(db.get_connection()));
    let manager = AccountManager::new(store.clone(), hasher());

    let first = store
        .create("First".into(), "first@example.com".into(), "digest".into())
        .await
        .unwrap();
    let second = store
        .create("Second".into(), "second@example.com".into(), "digest".into())
        .await
        .unwrap();

    let result = manager
        .update_account(
            second.id,
            UpdateAccount {
                email: Some(first.email.to_uppercase()),
                ..Default::default()
            },
        )
        .await;

    match result {
        Err(AppError::Invalid(errors)) => {
            assert_eq!(errors.pairs(), vec![(Field::Email, Reason::NotUnique)]);
        }
        other => panic!("expected not_unique, got {:?}", other.map(|a| a.email)),
    }
}

#[tokio::test]
async fn test_delete_missing_account_is_not_found() {
    let db = database().await;
    let store = AccountStore::new(db.get_connection());

    let result = store.delete(Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound)));
}
