use axum::{body::Body, http::Request};
use keyward::server::router::routes;
use tower::ServiceExt;

use super::*;

/// Expected: account creation and key listing work through the router
#[tokio::test]
async fn routes_account_requests() -> Result<(), TestError> {
    let test = TestBuilder::new().with_credential_tables().build().await?;
    let app = routes().with_state(app_state(&test));

    let created = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/accounts")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"name":"alice"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let account_id = body_json(created).await["id"].as_i64().unwrap();

    let listed = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/accounts/{}/credentials", account_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(body_json(listed).await, serde_json::json!([]));

    Ok(())
}

/// Expected: the OpenAPI document is served
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().with_credential_tables().build().await?;

    let response = routes()
        .with_state(app_state(&test))
        .oneshot(
            Request::builder()
                .uri("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["paths"]["/api/credentials/{key}/pull"].is_object());

    Ok(())
}
