//! Todo items and the asynchronous todo form submission.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FORM_METHOD, FORM_CONTENT_TYPE};
use crate::error::{DomainError, DomainResult};

/// Persisted todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Todo {
    pub id: i32,
    pub description: String,
    pub priority: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Form submission intercept
// =============================================================================

/// The todo form as the page renders it.
#[derive(Debug, Clone, Default)]
pub struct TodoForm {
    /// Target URL (`action` attribute)
    pub action: String,
    /// HTTP verb (`method` attribute); empty means the default verb
    pub method: String,
    /// Value of the `description` field
    pub description: String,
    /// Value of the `priority` field
    pub priority: String,
}

/// A pending form submission; tracks whether the default navigation was
/// cancelled.
#[derive(Debug, Default)]
pub struct SubmitEvent {
    default_prevented: bool,
}

impl SubmitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the full-page submission.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Request sent in place of the page submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncRequest {
    pub method: String,
    pub url: String,
    pub content_type: &'static str,
    /// Form-urlencoded `description` and `priority`; empty for `GET`/`HEAD`
    pub body: String,
}

/// Fire-and-forget transport for intercepted submissions.
///
/// The intercept ignores responses, so a transport has nothing to return.
pub trait RequestTransport {
    fn send(&self, request: AsyncRequest);
}

#[derive(Serialize)]
struct TodoPayload<'a> {
    description: &'a str,
    priority: &'a str,
}

/// Build the asynchronous request for a todo form.
///
/// `GET` and `HEAD` carry the fields as a query string on `action` and send
/// an empty body; every other verb sends them as the body.
pub fn build_request(form: &TodoForm) -> DomainResult<AsyncRequest> {
    let encoded = serde_urlencoded::to_string(TodoPayload {
        description: &form.description,
        priority: &form.priority,
    })
    .map_err(|e| DomainError::form(e.to_string()))?;

    let method = match form.method.trim() {
        "" => DEFAULT_FORM_METHOD.to_string(),
        verb => verb.to_ascii_uppercase(),
    };

    let (url, body) = if carries_query(&method) {
        let separator = if form.action.contains('?') { '&' } else { '?' };
        (format!("{}{}{}", form.action, separator, encoded), String::new())
    } else {
        (form.action.clone(), encoded)
    };

    Ok(AsyncRequest {
        method,
        url,
        content_type: FORM_CONTENT_TYPE,
        body,
    })
}

fn carries_query(method: &str) -> bool {
    matches!(method, "GET" | "HEAD")
}

/// Handle a todo form submission: cancel the page navigation and post the
/// form fields through `transport` instead.
///
/// Navigation is cancelled before the body is encoded, so a failed encode
/// still never reloads the page.
pub fn intercept_submit<T>(
    form: &TodoForm,
    event: &mut SubmitEvent,
    transport: &T,
) -> DomainResult<()>
where
    T: RequestTransport + ?Sized,
{
    event.prevent_default();
    let request = build_request(form)?;
    transport.send(request);
    Ok(())
}
