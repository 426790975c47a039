//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its OpenAPI specification; Swagger UI
//! serves the generated document at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// # Registered Endpoints
/// - `POST /api/accounts` - Create an account
/// - `DELETE /api/accounts/{account_id}` - Delete an account and its keys
/// - `GET /api/accounts/{account_id}/duplicates` - Accounts flagged as duplicates
/// - `GET /api/accounts/{account_id}/credentials` - Live keys of an account
/// - `POST /api/accounts/{account_id}/credentials` - Register and pull a key
/// - `POST /api/credentials/{key}/pull` - Pull a key now
/// - `DELETE /api/credentials/{key}` - Delete a key
///
/// # Returns
/// An Axum `Router<AppState>` ready to be given its state.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Keyward", description = "Keyward API"), tags(
        (name = controller::account::ACCOUNT_TAG, description = "Operator account API routes"),
        (name = controller::credential::CREDENTIAL_TAG, description = "EVE API key API routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::account::create_account))
        .routes(routes!(controller::account::delete_account))
        .routes(routes!(controller::account::get_duplicates))
        .routes(routes!(
            controller::credential::get_account_credentials,
            controller::credential::add_credential
        ))
        .routes(routes!(controller::credential::pull_credential))
        .routes(routes!(controller::credential::delete_credential))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
