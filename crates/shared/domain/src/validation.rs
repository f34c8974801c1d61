//! Field-tagged validation errors and the ordered account rules.
//!
//! Each rule is a pure function over an [`AccountDraft`] and a
//! [`ValidationContext`]. Rules never short-circuit each other: every rule
//! runs and the failures are reported together, in rule order.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::account::AccountDraft;
use crate::constants::{EMAIL_PATTERN, MAX_EMAIL_LENGTH, MIN_PASSWORD_LENGTH};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// Account fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Password,
    PasswordConfirmation,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::PasswordConfirmation => "password_confirmation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Required,
    TooLong,
    NotUnique,
    InvalidFormat,
    TooShort,
    Mismatch,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Required => "required",
            Reason::TooLong => "too_long",
            Reason::NotUnique => "not_unique",
            Reason::InvalidFormat => "invalid_format",
            Reason::TooShort => "too_short",
            Reason::Mismatch => "mismatch",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field-tagged rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FieldError {
    pub field: Field,
    pub reason: Reason,
    /// Human readable message
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, reason: Reason) -> Self {
        Self {
            field,
            reason,
            message: describe(field, reason),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn describe(field: Field, reason: Reason) -> String {
    let label = match field {
        Field::Name => "Name",
        Field::Email => "Email",
        Field::Password => "Password",
        Field::PasswordConfirmation => "Password confirmation",
    };
    match reason {
        Reason::Required => format!("{} can't be blank", label),
        Reason::TooLong => format!(
            "{} is too long (maximum is {} characters)",
            label, MAX_EMAIL_LENGTH
        ),
        Reason::NotUnique => format!("{} has already been taken", label),
        Reason::InvalidFormat => format!("{} is invalid", label),
        Reason::TooShort => format!(
            "{} is too short (minimum is {} characters)",
            label, MIN_PASSWORD_LENGTH
        ),
        Reason::Mismatch => format!("{} doesn't match Password", label),
    }
}

/// Ordered collection of every failure found for one save attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding exactly one failure.
    pub fn single(field: Field, reason: Reason) -> Self {
        Self(vec![FieldError::new(field, reason)])
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = FieldError>) {
        self.0.extend(errors);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// `(field, reason)` pairs in report order.
    pub fn pairs(&self) -> Vec<(Field, Reason)> {
        self.0.iter().map(|e| (e.field, e.reason)).collect()
    }

    /// `Ok(())` when nothing was collected, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join(", "))
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

// =============================================================================
// Rules
// =============================================================================

/// Facts about persisted state the rules need but cannot look up themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidationContext {
    /// Another account already owns the (normalized) email.
    pub email_taken: bool,
}

/// A pure validation rule.
pub type Rule = fn(&AccountDraft, &ValidationContext) -> Vec<FieldError>;

/// Account rules in report order.
pub const ACCOUNT_RULES: &[Rule] = &[
    validate_name,
    validate_email,
    validate_password,
    validate_password_confirmation,
];

/// Run every account rule and aggregate the failures.
pub fn validate_account(
    draft: &AccountDraft,
    context: &ValidationContext,
) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for rule in ACCOUNT_RULES {
        errors.extend(rule(draft, context));
    }
    errors.into_result()
}

/// Blank means empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check an email against the accepted address shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_name(draft: &AccountDraft, _context: &ValidationContext) -> Vec<FieldError> {
    if is_blank(&draft.name) {
        vec![FieldError::new(Field::Name, Reason::Required)]
    } else {
        Vec::new()
    }
}

pub fn validate_email(draft: &AccountDraft, context: &ValidationContext) -> Vec<FieldError> {
    let email = draft.email.as_str();
    let mut errors = Vec::new();
    if is_blank(email) {
        errors.push(FieldError::new(Field::Email, Reason::Required));
    }
    if email.chars().count() > MAX_EMAIL_LENGTH {
        errors.push(FieldError::new(Field::Email, Reason::TooLong));
    }
    if context.email_taken {
        errors.push(FieldError::new(Field::Email, Reason::NotUnique));
    }
    if !is_valid_email(email) {
        errors.push(FieldError::new(Field::Email, Reason::InvalidFormat));
    }
    errors
}

pub fn validate_password(draft: &AccountDraft, _context: &ValidationContext) -> Vec<FieldError> {
    let Some(credentials) = &draft.credentials else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    if is_blank(&credentials.password) {
        errors.push(FieldError::new(Field::Password, Reason::Required));
    }
    if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(Field::Password, Reason::TooShort));
    }
    errors
}

pub fn validate_password_confirmation(
    draft: &AccountDraft,
    _context: &ValidationContext,
) -> Vec<FieldError> {
    let Some(credentials) = &draft.credentials else {
        return Vec::new();
    };

    let mut errors = Vec::new();
    if is_blank(&credentials.password_confirmation) {
        errors.push(FieldError::new(Field::PasswordConfirmation, Reason::Required));
    }
    if credentials.password_confirmation != credentials.password {
        errors.push(FieldError::new(Field::PasswordConfirmation, Reason::Mismatch));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Credentials;

    fn draft(name: &str, email: &str, password: &str, confirmation: &str) -> AccountDraft {
        AccountDraft {
            name: name.to_string(),
            email: email.to_string(),
            credentials: Some(Credentials::new(password, confirmation)),
        }
        .normalized()
    }

    fn valid() -> AccountDraft {
        draft("Jane Doe", "jane@example.com", "secret1", "secret1")
    }

    fn check(draft: &AccountDraft) -> Vec<(Field, Reason)> {
        match validate_account(draft, &ValidationContext::default()) {
            Ok(()) => Vec::new(),
            Err(errors) => errors.pairs(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(check(&valid()).is_empty());
    }

    #[test]
    fn test_blank_name_is_required() {
        let d = draft("   ", "jane@example.com", "secret1", "secret1");
        assert_eq!(check(&d), vec![(Field::Name, Reason::Required)]);
    }

    #[test]
    fn test_blank_email_is_required_and_invalid_format() {
        let d = draft("Jane", "", "secret1", "secret1");
        assert_eq!(
            check(&d),
            vec![
                (Field::Email, Reason::Required),
                (Field::Email, Reason::InvalidFormat),
            ]
        );
    }

    #[test]
    fn test_email_longer_than_limit_is_too_long() {
        let email = format!("{}@example.com", "a".repeat(40));
        assert_eq!(email.len(), 52);
        let d = draft("Jane", &email, "secret1", "secret1");
        assert_eq!(check(&d), vec![(Field::Email, Reason::TooLong)]);
    }

    #[test]
    fn test_email_at_limit_is_accepted() {
        let email = format!("{}@example.com", "a".repeat(38));
        assert_eq!(email.len(), MAX_EMAIL_LENGTH);
        let d = draft("Jane", &email, "secret1", "secret1");
        assert!(check(&d).is_empty());
    }

    #[test]
    fn test_email_format() {
        assert!(!is_valid_email("foo@bar"));
        assert!(is_valid_email("foo@bar.com"));
        assert!(is_valid_email("first.last@mail.example.co.uk"));
        assert!(!is_valid_email("foo bar@baz.com"));
        assert!(!is_valid_email("foo@@bar.com"));
        assert!(!is_valid_email("foo@bar.com\n"));
        assert!(!is_valid_email("@bar.com"));
    }

    #[test]
    fn test_malformed_email_is_invalid_format() {
        let d = draft("Jane", "foo@bar", "secret1", "secret1");
        assert_eq!(check(&d), vec![(Field::Email, Reason::InvalidFormat)]);
    }

    #[test]
    fn test_taken_email_is_not_unique() {
        let context = ValidationContext { email_taken: true };
        let errors = validate_account(&valid(), &context).unwrap_err();
        assert_eq!(errors.pairs(), vec![(Field::Email, Reason::NotUnique)]);
    }

    #[test]
    fn test_email_checks_are_reported_together_in_order() {
        let email = format!("{}@nodot", "a".repeat(50));
        let d = draft("Jane", &email, "secret1", "secret1");
        let context = ValidationContext { email_taken: true };
        let errors = validate_account(&d, &context).unwrap_err();
        assert_eq!(
            errors.pairs(),
            vec![
                (Field::Email, Reason::TooLong),
                (Field::Email, Reason::NotUnique),
                (Field::Email, Reason::InvalidFormat),
            ]
        );
    }

    #[test]
    fn test_short_password_is_too_short() {
        let d = draft("Jane", "jane@example.com", "abc12", "abc12");
        assert_eq!(check(&d), vec![(Field::Password, Reason::TooShort)]);
    }

    #[test]
    fn test_blank_password_fields_are_required() {
        let d = draft("Jane", "jane@example.com", "", "");
        assert_eq!(
            check(&d),
            vec![
                (Field::Password, Reason::Required),
                (Field::Password, Reason::TooShort),
                (Field::PasswordConfirmation, Reason::Required),
            ]
        );
    }

    #[test]
    fn test_blank_password_with_confirmation_reports_every_failure() {
        let d = draft("Jane", "jane@example.com", "", "secret1");
        assert_eq!(
            check(&d),
            vec![
                (Field::Password, Reason::Required),
                (Field::Password, Reason::TooShort),
                (Field::PasswordConfirmation, Reason::Mismatch),
            ]
        );
    }

    #[test]
    fn test_blank_confirmation_is_required_and_mismatch() {
        let d = draft("Jane", "jane@example.com", "secret1", "");
        assert_eq!(
            check(&d),
            vec![
                (Field::PasswordConfirmation, Reason::Required),
                (Field::PasswordConfirmation, Reason::Mismatch),
            ]
        );
    }

    #[test]
    fn test_confirmation_mismatch() {
        let d = draft("Jane", "jane@example.com", "secret1", "secret2");
        assert_eq!(
            check(&d),
            vec![(Field::PasswordConfirmation, Reason::Mismatch)]
        );
    }

    #[test]
    fn test_missing_credentials_skip_password_rules() {
        let d = AccountDraft {
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            credentials: None,
        };
        assert!(check(&d).is_empty());
    }

    #[test]
    fn test_all_failures_reported_in_field_order() {
        let d = draft("", "not-an-email", "abc", "xyz");
        assert_eq!(
            check(&d),
            vec![
                (Field::Name, Reason::Required),
                (Field::Email, Reason::InvalidFormat),
                (Field::Password, Reason::TooShort),
                (Field::PasswordConfirmation, Reason::Mismatch),
            ]
        );
    }
}
