//! HTTP handlers for operator accounts.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        account::{AccountDto, CreateAccountDto},
        api::ErrorDto,
    },
    server::{error::Error, model::app::AppState, service::account::AccountService},
};

/// OpenAPI tag for account routes.
pub static ACCOUNT_TAG: &str = "account";

/// Create an operator account
#[utoipa::path(
    post,
    path = "/api/accounts",
    tag = ACCOUNT_TAG,
    request_body = CreateAccountDto,
    responses(
        (status = 201, description = "Account created", body = AccountDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_account(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountDto>,
) -> Result<impl IntoResponse, Error> {
    let account = AccountService::new(&state.db)
        .create_account(&payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(AccountDto::from(account))))
}

/// Delete an account, its keys, and the ownership of every character those keys covered
#[utoipa::path(
    delete,
    path = "/api/accounts/{account_id}",
    tag = ACCOUNT_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 404, description = "Account not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Path(account_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    AccountService::new(&state.db)
        .delete_account(account_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List accounts flagged as duplicates of this account
#[utoipa::path(
    get,
    path = "/api/accounts/{account_id}/duplicates",
    tag = ACCOUNT_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Duplicate accounts", body = Vec<AccountDto>),
        (status = 404, description = "Account not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_duplicates(
    State(state): State<AppState>,
    Path(account_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let duplicates: Vec<AccountDto> = AccountService::new(&state.db)
        .get_duplicates(account_id)
        .await?
        .into_iter()
        .map(AccountDto::from)
        .collect();

    Ok((StatusCode::OK, Json(duplicates)))
}
