//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use domain::{
    AccountResponse, CreateAccount, Field, FieldError, LoginRequest, Reason, Todo, UpdateAccount,
    ValidationErrors,
};

use crate::handlers::{account_handler, todo_handler};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Account Service",
        version = "0.1.0",
        description = "Storefront accounts and the todo list"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        account_handler::register,
        account_handler::list_accounts,
        account_handler::get_account,
        account_handler::update_account,
        account_handler::delete_account,
        account_handler::login,
        todo_handler::list_todos,
        todo_handler::create_todo,
        todo_handler::get_todo,
        todo_handler::update_todo,
        todo_handler::delete_todo,
    ),
    components(
        schemas(
            AccountResponse,
            CreateAccount,
            UpdateAccount,
            LoginRequest,
            Field,
            Reason,
            FieldError,
            ValidationErrors,
            Todo,
            todo_handler::TodoParams,
        )
    ),
    tags(
        (name = "Accounts", description = "Sign-up, profile updates and login"),
        (name = "Todos", description = "Todo items submitted from the todo form")
    )
)]
pub struct ApiDoc;
