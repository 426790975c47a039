use keyward::{
    model::credential::AddCredentialDto,
    server::controller::credential::{
        add_credential, delete_credential, get_account_credentials, pull_credential,
    },
};
use keyward_test_utils::constant::TEST_FULL_MASK;

use super::*;

fn mock_verified_key(test: &mut TestContext, key: i64, expected_requests: usize) {
    test.key_api().create_key_info_endpoint(
        key,
        factory::key_info(
            TEST_FULL_MASK,
            "Character",
            vec![factory::key_character(90000001, 98000001, None)],
        ),
        expected_requests,
    );
    test.key_api().create_character_sheet_endpoint(
        key,
        90000001,
        factory::character_sheet(90000001, 98000001, None),
        expected_requests,
    );
}

/// Expected: 201 Created with the pulled key and its character
#[tokio::test]
async fn add_credential_returns_created() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    mock_verified_key(&mut test, 1001, 1);

    let response = add_credential(
        State(app_state(&test)),
        Path(1),
        Json(AddCredentialDto {
            key: 1001,
            code: "code".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["key"], 1001);
    assert_eq!(body["verified"], true);
    assert_eq!(body["characters"][0]["id"], 90000001);

    test.assert_mocks();

    Ok(())
}

/// Expected: 400 Bad Request when the EVE API rejects the key
#[tokio::test]
async fn add_rejected_credential_is_bad_request() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    test.key_api()
        .create_key_info_error_endpoint(1001, 403, 1);

    let response = add_credential(
        State(app_state(&test)),
        Path(1),
        Json(AddCredentialDto {
            key: 1001,
            code: "code".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    test.assert_mocks();

    Ok(())
}

/// Expected: 409 Conflict when the key is already registered
#[tokio::test]
async fn add_registered_credential_is_conflict() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    test.credential().insert_credential(1001, 1).await?;

    let response = add_credential(
        State(app_state(&test)),
        Path(1),
        Json(AddCredentialDto {
            key: 1001,
            code: "code".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    Ok(())
}

/// Expected: 502 Bad Gateway when the EVE API is failing
#[tokio::test]
async fn add_credential_during_outage_is_bad_gateway() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    test.key_api()
        .create_key_info_error_endpoint(1001, 500, 1);

    let response = add_credential(
        State(app_state(&test)),
        Path(1),
        Json(AddCredentialDto {
            key: 1001,
            code: "code".to_string(),
        }),
    )
    .await
    .into_response();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    test.assert_mocks();

    Ok(())
}

/// Expected: 200 OK listing live keys with their characters
#[tokio::test]
async fn get_account_credentials_lists_keys() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    let credential = test.credential().insert_verified_credential(1001, 1).await?;
    let character = test
        .eve()
        .insert_mock_character(90000001, 98000001, Some(1))
        .await?;
    test.credential()
        .link_character(character.id, credential.id)
        .await?;

    let response = get_account_credentials(State(app_state(&test)), Path(1))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["characters"][0]["name"], "Character 90000001");

    Ok(())
}

/// Expected: 200 OK with `deleted` set when the pulled key was revoked
#[tokio::test]
async fn pull_revoked_credential_reports_deletion() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    test.credential().insert_credential(1001, 1).await?;
    test.key_api()
        .create_key_info_error_endpoint(1001, 403, 1);

    let response = pull_credential(State(app_state(&test)), Path(1001))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], true);
    assert!(body["credential"].is_null());

    test.assert_mocks();

    Ok(())
}

/// Expected: 200 OK with the refreshed key
#[tokio::test]
async fn pull_credential_returns_refreshed_key() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    test.credential().insert_credential(1001, 1).await?;
    mock_verified_key(&mut test, 1001, 1);

    let response = pull_credential(State(app_state(&test)), Path(1001))
        .await
        .into_response();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], false);
    assert_eq!(body["credential"]["mask"], TEST_FULL_MASK);

    test.assert_mocks();

    Ok(())
}

/// Expected: 204 No Content, then 404 Not Found for the same key
#[tokio::test]
async fn delete_credential_then_not_found() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_credential_tables()
        .with_account("alice")
        .build()
        .await?;
    test.credential().insert_credential(1001, 1).await?;

    let first = delete_credential(State(app_state(&test)), Path(1001))
        .await
        .into_response();
    let second = delete_credential(State(app_state(&test)), Path(1001))
        .await
        .into_response();

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    Ok(())
}
