//! Account handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use common::AppResult;
use domain::{AccountResponse, CreateAccount, LoginRequest, UpdateAccount};

use crate::extractors::AppJson;
use crate::state::AppState;

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_accounts).post(register))
        .route(
            "/users/:id",
            get(get_account).patch(update_account).delete(delete_account),
        )
        .route("/login", post(login))
}

/// Sign up a new account
#[utoipa::path(
    post,
    path = "/users",
    tag = "Accounts",
    request_body = CreateAccount,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 422, description = "One or more fields were rejected")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateAccount>,
) -> AppResult<(StatusCode, Json<AccountResponse>)> {
    let account = state.accounts.register(payload).await?;
    Ok((StatusCode::CREATED, Json(AccountResponse::from(account))))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/users",
    tag = "Accounts",
    responses(
        (status = 200, description = "All accounts", body = Vec<AccountResponse>)
    )
)]
pub async fn list_accounts(State(state): State<AppState>) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = state.accounts.list_accounts().await?;
    Ok(Json(accounts.into_iter().map(AccountResponse::from).collect()))
}

/// Get account by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 200, description = "Account", body = AccountResponse),
        (status = 404, description = "Account not found")
    )
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.accounts.get_account(id).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Update profile or password
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    request_body = UpdateAccount,
    responses(
        (status = 200, description = "Account updated", body = AccountResponse),
        (status = 404, description = "Account not found"),
        (status = 422, description = "One or more fields were rejected")
    )
)]
pub async fn update_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateAccount>,
) -> AppResult<Json<AccountResponse>> {
    let account = state.accounts.update_account(id, payload).await?;
    Ok(Json(AccountResponse::from(account)))
}

/// Delete account
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "Account ID")
    ),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state.accounts.delete_account(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check credentials
#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AccountResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<AccountResponse>> {
    let account = state
        .accounts
        .authenticate(&payload.email, &payload.password)
        .await?;
    Ok(Json(AccountResponse::from(account)))
}
