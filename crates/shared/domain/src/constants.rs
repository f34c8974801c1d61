//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Account validation
// =============================================================================

/// Maximum email length (in characters)
pub const MAX_EMAIL_LENGTH: usize = 50;

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Address shape accepted for account emails: `local@label.tld`, one or more
/// dot-separated domain labels, no whitespace and a single `@`.
pub const EMAIL_PATTERN: &str = r"\A[^@\s]+@([^@\s]+\.)+[^@\s]+\z";

// =============================================================================
// Pages
// =============================================================================

/// Site name used as the base of every page title
pub const BASE_TITLE: &str = "E-Commerce Site";

/// Separator between a page title and the site name
pub const TITLE_SEPARATOR: &str = " | ";

// =============================================================================
// Todo form
// =============================================================================

/// HTTP verb used when a form carries no `method` attribute
pub const DEFAULT_FORM_METHOD: &str = "GET";

/// Content type of an intercepted form submission body
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
