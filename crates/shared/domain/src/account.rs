//! Account domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Always stored lowercase
    pub email: String,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account from already validated, normalized values
    pub fn new(id: Uuid, name: String, email: String, password_digest: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            email,
            password_digest,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Transient password fields. Never persisted.
#[derive(Clone, Default)]
pub struct Credentials {
    pub password: String,
    pub password_confirmation: String,
}

impl Credentials {
    pub fn new(password: impl Into<String>, confirmation: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            password_confirmation: confirmation.into(),
        }
    }
}

// Plaintext must not leak into logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("password", &"[REDACTED]")
            .field("password_confirmation", &"[REDACTED]")
            .finish()
    }
}

/// Candidate account record checked before every save.
///
/// `credentials` is `None` when the save does not touch the password, in
/// which case the password rules do not run.
#[derive(Debug, Clone)]
pub struct AccountDraft {
    pub name: String,
    pub email: String,
    pub credentials: Option<Credentials>,
}

impl AccountDraft {
    /// Draft for the signup flow, where credentials are always checked.
    pub fn signup(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            credentials: Some(Credentials::new(password, password_confirmation)),
        }
    }

    /// Apply storage normalization (lowercase email).
    pub fn normalized(mut self) -> Self {
        self.email = normalize_email(&self.email);
        self
    }
}

/// Lowercase an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.to_lowercase()
}

/// Signup payload
#[derive(Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAccount {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Email address, stored lowercase
    #[serde(default)]
    pub email: String,
    /// Password (minimum 6 characters)
    #[serde(default)]
    pub password: String,
    /// Must equal `password`
    #[serde(default)]
    pub password_confirmation: String,
}

impl From<CreateAccount> for AccountDraft {
    fn from(input: CreateAccount) -> Self {
        AccountDraft::signup(
            input.name,
            input.email,
            input.password,
            input.password_confirmation,
        )
    }
}

/// Partial account update. Omitted fields keep their stored value.
#[derive(Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateAccount {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Supplying either password field switches on the password rules
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}

impl UpdateAccount {
    /// Merge the changes over the stored account.
    pub fn apply_to(self, account: &Account) -> AccountDraft {
        let credentials = if self.password.is_some() || self.password_confirmation.is_some() {
            Some(Credentials::new(
                self.password.unwrap_or_default(),
                self.password_confirmation.unwrap_or_default(),
            ))
        } else {
            None
        };

        AccountDraft {
            name: self.name.unwrap_or_else(|| account.name.clone()),
            email: self.email.unwrap_or_else(|| account.email.clone()),
            credentials,
        }
    }
}

/// Login payload
#[derive(Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Account response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AccountResponse {
    /// Unique account identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Lowercase email address
    pub email: String,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            name: account.name,
            email: account.email,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> Account {
        Account::new(
            Uuid::new_v4(),
            "Jane".to_string(),
            "jane@example.com".to_string(),
            "digest".to_string(),
        )
    }

    #[test]
    fn test_normalized_lowercases_email() {
        let draft = AccountDraft::signup("Jane", "Jane.Doe@Example.COM", "secret1", "secret1");
        assert_eq!(draft.normalized().email, "jane.doe@example.com");
    }

    #[test]
    fn test_update_without_password_skips_credentials() {
        let changes = UpdateAccount {
            name: Some("Janet".to_string()),
            ..Default::default()
        };
        let draft = changes.apply_to(&stored());
        assert_eq!(draft.name, "Janet");
        assert_eq!(draft.email, "jane@example.com");
        assert!(draft.credentials.is_none());
    }

    #[test]
    fn test_update_with_password_only_carries_blank_confirmation() {
        let changes = UpdateAccount {
            password: Some("newsecret".to_string()),
            ..Default::default()
        };
        let credentials = changes.apply_to(&stored()).credentials.unwrap();
        assert_eq!(credentials.password, "newsecret");
        assert_eq!(credentials.password_confirmation, "");
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let output = format!("{:?}", Credentials::new("hunter22", "hunter22"));
        assert!(!output.contains("hunter22"));
    }

    #[test]
    fn test_response_omits_digest() {
        let response = AccountResponse::from(stored());
        assert_eq!(response.email, "jane@example.com");
    }
}
