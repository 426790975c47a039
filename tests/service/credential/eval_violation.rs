//! Tests for re-evaluating a key against the policy without pulling it.

use entity::eve_credential::CredentialViolation;

use super::*;

/// Expected: a key below the recommended mask gets a `Mask` violation, persisted
#[tokio::test]
async fn insufficient_mask_is_persisted() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let evaluated = service.eval_violation(credential).await.unwrap();

    assert_eq!(evaluated.violation, Some(CredentialViolation::Mask));
    let stored = CredentialRepository::new(&test.db)
        .get_by_key(ALICE_KEY)
        .await?
        .unwrap();
    assert_eq!(stored.violation, Some(CredentialViolation::Mask));

    Ok(())
}

/// Expected: a compliant key loses a stale `Mask` violation
#[tokio::test]
async fn compliant_key_is_cleared() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test
        .credential()
        .insert_verified_credential(ALICE_KEY, alice.id)
        .await?;
    let credential = CredentialRepository::new(&test.db)
        .update_violation(credential.id, Some(CredentialViolation::Mask))
        .await?;

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let evaluated = service.eval_violation(credential).await.unwrap();

    assert_eq!(evaluated.violation, None);

    Ok(())
}

/// Expected: a `Character` violation is left for the pull to clear
#[tokio::test]
async fn character_violation_is_kept() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    let credential = CredentialRepository::new(&test.db)
        .update_violation(credential.id, Some(CredentialViolation::Character))
        .await?;

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let evaluated = service.eval_violation(credential).await.unwrap();

    assert_eq!(evaluated.violation, Some(CredentialViolation::Character));

    Ok(())
}
