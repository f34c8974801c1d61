//! Domain layer - Core business entities, rules and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod account;
pub mod constants;
pub mod error;
pub mod password;
pub mod title;
pub mod todo;
pub mod validation;

pub use account::{
    normalize_email, Account, AccountDraft, AccountResponse, CreateAccount, Credentials,
    LoginRequest, UpdateAccount,
};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::{Argon2Hasher, CredentialHasher};
pub use title::full_title;
pub use todo::{
    build_request, intercept_submit, AsyncRequest, RequestTransport, SubmitEvent, Todo, TodoForm,
};
pub use validation::{
    validate_account, Field, FieldError, Reason, ValidationContext, ValidationErrors,
};
