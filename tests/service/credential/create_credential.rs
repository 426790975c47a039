//! Tests for registering a key.

use super::*;

/// Expected: a new key is stored, pulled and returned verified
#[tokio::test]
async fn registers_and_pulls_key() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_FULL_MASK,
            "Character",
            vec![factory::key_character(CHARACTER_ID, CORPORATION_ID, None)],
        ),
        1,
    );
    test.key_api().create_character_sheet_endpoint(
        ALICE_KEY,
        CHARACTER_ID,
        factory::character_sheet(CHARACTER_ID, CORPORATION_ID, None),
        1,
    );

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.create_credential(alice.id, ALICE_KEY, "code").await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let credential = result.unwrap();
    assert_eq!(credential.owner_id, alice.id);
    assert_eq!(credential.code, "code");
    assert!(credential.verified);
    assert_eq!(service.get_characters(&credential).await.unwrap().len(), 1);

    test.assert_mocks();

    Ok(())
}

/// Expected: registering for an unknown account fails before calling the API
#[tokio::test]
async fn fails_for_unknown_account() -> Result<(), TestError> {
    let test = TestBuilder::new().with_credential_tables().build().await?;

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.create_credential(999, ALICE_KEY, "code").await;

    assert!(matches!(
        result,
        Err(Error::CredentialError(CredentialError::AccountNotFound(999)))
    ));

    Ok(())
}

/// Expected: a key already registered by anyone is refused
#[tokio::test]
async fn fails_for_registered_key() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let bob = test.account().insert_account("bob").await?;
    test.credential().insert_credential(ALICE_KEY, bob.id).await?;

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.create_credential(alice.id, ALICE_KEY, "code").await;

    assert!(matches!(
        result,
        Err(Error::CredentialError(CredentialError::KeyAlreadyRegistered(ALICE_KEY)))
    ));

    Ok(())
}

/// Expected: a key the API rejects is not kept
#[tokio::test]
async fn rejected_key_is_not_kept() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    test.key_api()
        .create_key_info_error_endpoint(ALICE_KEY, 403, 1);

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.create_credential(alice.id, ALICE_KEY, "code").await;

    assert!(matches!(
        result,
        Err(Error::CredentialError(CredentialError::KeyRejected(ALICE_KEY)))
    ));
    assert!(CredentialRepository::new(&test.db)
        .get_by_key(ALICE_KEY)
        .await?
        .is_none());

    test.assert_mocks();

    Ok(())
}

/// Expected: a transient API failure surfaces but the key stays registered for the sweep
#[tokio::test]
async fn transient_failure_keeps_registration() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    test.key_api()
        .create_key_info_error_endpoint(ALICE_KEY, 503, 1);

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.create_credential(alice.id, ALICE_KEY, "code").await;

    assert!(matches!(result, Err(Error::KeyApiError(_))));
    let stored = CredentialRepository::new(&test.db)
        .get_by_key(ALICE_KEY)
        .await?
        .expect("credential should stay registered");
    assert!(!stored.verified);

    test.assert_mocks();

    Ok(())
}
