//! HTTP handlers for credentials.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        credential::{AddCredentialDto, CredentialDto, PullResultDto},
    },
    server::{error::Error, model::app::AppState, service::credential::CredentialService},
};

/// OpenAPI tag for credential routes.
pub static CREDENTIAL_TAG: &str = "credential";

fn credential_service(state: &AppState) -> CredentialService<'_> {
    CredentialService::new(
        &state.db,
        state.key_api.as_ref(),
        state.grant_sink.as_ref(),
        &state.policy,
    )
}

/// List the live API keys of an account
#[utoipa::path(
    get,
    path = "/api/accounts/{account_id}/credentials",
    tag = CREDENTIAL_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "Keys of the account", body = Vec<CredentialDto>),
        (status = 404, description = "Account not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_account_credentials(
    State(state): State<AppState>,
    Path(account_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let credentials: Vec<CredentialDto> = credential_service(&state)
        .get_account_credentials(account_id)
        .await?
        .into_iter()
        .map(|(credential, characters)| CredentialDto::new(credential, characters))
        .collect();

    Ok((StatusCode::OK, Json(credentials)))
}

/// Register an API key for an account and pull it
#[utoipa::path(
    post,
    path = "/api/accounts/{account_id}/credentials",
    tag = CREDENTIAL_TAG,
    params(("account_id" = i32, Path, description = "Account ID")),
    request_body = AddCredentialDto,
    responses(
        (status = 201, description = "Key registered and pulled", body = CredentialDto),
        (status = 400, description = "Key rejected by the EVE API", body = ErrorDto),
        (status = 404, description = "Account not found", body = ErrorDto),
        (status = 409, description = "Key already registered", body = ErrorDto),
        (status = 502, description = "EVE API unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_credential(
    State(state): State<AppState>,
    Path(account_id): Path<i32>,
    Json(payload): Json<AddCredentialDto>,
) -> Result<impl IntoResponse, Error> {
    let service = credential_service(&state);

    let credential = service
        .create_credential(account_id, payload.key, &payload.code)
        .await?;
    let characters = service.get_characters(&credential).await?;

    Ok((
        StatusCode::CREATED,
        Json(CredentialDto::new(credential, characters)),
    ))
}

/// Pull an API key against the EVE API now
#[utoipa::path(
    post,
    path = "/api/credentials/{key}/pull",
    tag = CREDENTIAL_TAG,
    params(("key" = i64, Path, description = "EVE API key ID")),
    responses(
        (status = 200, description = "Pull finished", body = PullResultDto),
        (status = 404, description = "Key not found", body = ErrorDto),
        (status = 502, description = "EVE API unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pull_credential(
    State(state): State<AppState>,
    Path(key): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let service = credential_service(&state);

    let credential = service.get_credential(key).await?;

    let result = match service.pull(credential).await? {
        Some(credential) => {
            let characters = service.get_characters(&credential).await?;

            PullResultDto {
                deleted: false,
                credential: Some(CredentialDto::new(credential, characters)),
            }
        }
        None => PullResultDto {
            deleted: true,
            credential: None,
        },
    };

    Ok((StatusCode::OK, Json(result)))
}

/// Delete an API key, detaching characters it no longer backs
#[utoipa::path(
    delete,
    path = "/api/credentials/{key}",
    tag = CREDENTIAL_TAG,
    params(("key" = i64, Path, description = "EVE API key ID")),
    responses(
        (status = 204, description = "Key deleted"),
        (status = 404, description = "Key not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_credential(
    State(state): State<AppState>,
    Path(key): Path<i64>,
) -> Result<impl IntoResponse, Error> {
    let service = credential_service(&state);

    let credential = service.get_credential(key).await?;
    service.delete_credential(&credential).await?;

    Ok(StatusCode::NO_CONTENT)
}
