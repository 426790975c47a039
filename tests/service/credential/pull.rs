//! Tests for a single pull of a key.

use entity::eve_credential::CredentialViolation;
use serde_json::json;

use super::*;

/// Expected: key fields, the character, its corporation and alliance are stored and linked
#[tokio::test]
async fn verified_key_merges_character() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_FULL_MASK,
            "Character",
            vec![factory::key_character(CHARACTER_ID, CORPORATION_ID, Some(ALLIANCE_ID))],
        ),
        1,
    );
    test.key_api().create_character_sheet_endpoint(
        ALICE_KEY,
        CHARACTER_ID,
        factory::character_sheet(CHARACTER_ID, CORPORATION_ID, Some(ALLIANCE_ID)),
        1,
    );

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.pull(credential).await;

    assert!(result.is_ok(), "Error: {:?}", result);
    let saved = result.unwrap().expect("credential should survive the pull");
    assert_eq!(saved.kind.as_deref(), Some("Character"));
    assert_eq!(saved.mask, TEST_FULL_MASK);
    assert!(saved.verified);
    assert_eq!(saved.violation, None);
    assert!(saved.expires.is_some());

    let character = CharacterRepository::new(&test.db)
        .get_by_character_id(CHARACTER_ID)
        .await?
        .expect("character should be stored");
    assert_eq!(character.owner_id, Some(alice.id));
    assert_eq!(character.name, format!("Character {}", CHARACTER_ID));
    assert_eq!(character.race.as_deref(), Some("Caldari"));
    assert_eq!(character.titles, json!(["Director"]));
    assert_eq!(character.roles, json!(["roleDirector"]));

    let corporation = CorporationRepository::new(&test.db)
        .get_by_corporation_id(CORPORATION_ID)
        .await?
        .expect("corporation should be stored");
    let alliance = AllianceRepository::new(&test.db)
        .get_by_alliance_id(ALLIANCE_ID)
        .await?
        .expect("alliance should be stored");
    assert_eq!(character.corporation_id, Some(corporation.id));
    assert_eq!(character.alliance_id, Some(alliance.id));
    assert_eq!(corporation.alliance_id, Some(alliance.id));

    let linked = CharacterRepository::new(&test.db)
        .get_by_credential(saved.id)
        .await?;
    assert_eq!(linked.len(), 1);
    assert!(sink.revoked().is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expected: an `Account` key with a sufficient mask is accepted for a `Character` policy
#[tokio::test]
async fn account_key_is_verified() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_FULL_MASK,
            "Account",
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

    let saved = service.pull(credential).await.unwrap().unwrap();

    assert_eq!(saved.kind.as_deref(), Some("Account"));
    assert!(saved.verified);
    assert_eq!(saved.violation, None);

    let character = CharacterRepository::new(&test.db)
        .get_by_character_id(CHARACTER_ID)
        .await?
        .unwrap();
    assert_eq!(character.alliance_id, None);

    test.assert_mocks();

    Ok(())
}

/// Expected: a key missing policy bits reads public info, gets a `Mask` violation and its
/// character is reported to the grant sink
#[tokio::test]
async fn insufficient_mask_sets_mask_violation() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_INFO_MASK,
            "Character",
            vec![factory::key_character(CHARACTER_ID, CORPORATION_ID, Some(ALLIANCE_ID))],
        ),
        1,
    );
    test.key_api().create_character_info_endpoint(
        ALICE_KEY,
        CHARACTER_ID,
        factory::character_info(CHARACTER_ID, CORPORATION_ID, Some(ALLIANCE_ID)),
        1,
    );

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let saved = service.pull(credential).await.unwrap().unwrap();

    assert!(!saved.verified);
    assert_eq!(saved.violation, Some(CredentialViolation::Mask));
    assert_eq!(sink.revoked(), vec![CHARACTER_ID]);

    let character = CharacterRepository::new(&test.db)
        .get_by_character_id(CHARACTER_ID)
        .await?
        .unwrap();
    assert_eq!(character.security_status, Some(0.5));
    assert_eq!(character.owner_id, Some(alice.id));

    test.assert_mocks();

    Ok(())
}

/// Expected: a corporation key reported for a character policy gets a `Kind` violation and
/// its characters are merged from the key info rows alone
#[tokio::test]
async fn corporation_key_sets_kind_violation() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_FULL_MASK,
            "Corporation",
            vec![factory::key_character(CHARACTER_ID, CORPORATION_ID, None)],
        ),
        1,
    );

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let saved = service.pull(credential).await.unwrap().unwrap();

    assert_eq!(saved.kind.as_deref(), Some("Corporation"));
    assert!(!saved.verified);
    assert_eq!(saved.violation, Some(CredentialViolation::Kind));

    test.assert_mocks();

    Ok(())
}

/// Expected: a stored corporation key is returned untouched without calling the API
#[tokio::test]
async fn stored_corporation_key_is_skipped() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let mut credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    credential.kind = Some("Corporation".to_string());
    test.key_api().create_key_info_endpoint(ALICE_KEY, json!({}), 0);

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.pull(credential.clone()).await.unwrap();

    assert_eq!(result, Some(credential));

    test.assert_mocks();

    Ok(())
}

/// Expected: a 403 deletes the key and releases characters it alone backed, while a
/// character still covered by another live key of the owner stays owned
#[tokio::test]
async fn rejected_key_deletes_itself() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let rejected = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    let other = test.credential().insert_credential(BOB_KEY, alice.id).await?;
    let released = test
        .eve()
        .insert_mock_character(CHARACTER_ID, CORPORATION_ID, Some(alice.id))
        .await?;
    let shared = test
        .eve()
        .insert_mock_character(90000002, CORPORATION_ID, Some(alice.id))
        .await?;
    test.credential().link_character(released.id, rejected.id).await?;
    test.credential().link_character(shared.id, rejected.id).await?;
    test.credential().link_character(shared.id, other.id).await?;
    test.key_api()
        .create_key_info_error_endpoint(ALICE_KEY, 403, 1);

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.pull(rejected).await;

    assert!(matches!(result, Ok(None)), "Unexpected: {:?}", result);
    assert!(CredentialRepository::new(&test.db)
        .get_by_key(ALICE_KEY)
        .await?
        .is_none());

    let characters = CharacterRepository::new(&test.db);
    assert_eq!(characters.get_by_id(released.id).await?.unwrap().owner_id, None);
    assert_eq!(
        characters.get_by_id(shared.id).await?.unwrap().owner_id,
        Some(alice.id)
    );

    test.assert_mocks();

    Ok(())
}

/// Expected: a server error leaves the key exactly as stored and surfaces the error
#[tokio::test]
async fn transient_failure_keeps_key() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api()
        .create_key_info_error_endpoint(ALICE_KEY, 500, 1);

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.pull(credential.clone()).await;

    assert!(matches!(
        result,
        Err(Error::KeyApiError(KeyApiError::Status(500)))
    ));
    let stored = CredentialRepository::new(&test.db)
        .get_by_key(ALICE_KEY)
        .await?
        .unwrap();
    assert_eq!(stored, credential);

    test.assert_mocks();

    Ok(())
}

/// Expected: a key info payload without characters leaves the key unchanged
#[tokio::test]
async fn empty_character_list_changes_nothing() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(TEST_FULL_MASK, "Character", vec![]),
        1,
    );

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.pull(credential.clone()).await.unwrap();

    assert_eq!(result, Some(credential.clone()));
    let stored = CredentialRepository::new(&test.db)
        .get_by_key(ALICE_KEY)
        .await?
        .unwrap();
    assert_eq!(stored.mask, credential.mask);
    assert!(!stored.verified);

    test.assert_mocks();

    Ok(())
}

/// Expected: pulling unchanged data twice yields the same key, character and links
#[tokio::test]
async fn pull_is_idempotent() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_FULL_MASK,
            "Character",
            vec![factory::key_character(CHARACTER_ID, CORPORATION_ID, Some(ALLIANCE_ID))],
        ),
        2,
    );
    test.key_api().create_character_sheet_endpoint(
        ALICE_KEY,
        CHARACTER_ID,
        factory::character_sheet(CHARACTER_ID, CORPORATION_ID, Some(ALLIANCE_ID)),
        2,
    );

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let first = service.pull(credential).await.unwrap().unwrap();
    let first_character = CharacterRepository::new(&test.db)
        .get_by_character_id(CHARACTER_ID)
        .await?
        .unwrap();

    let second = service.pull(first.clone()).await.unwrap().unwrap();
    let second_character = CharacterRepository::new(&test.db)
        .get_by_character_id(CHARACTER_ID)
        .await?
        .unwrap();

    assert_eq!(
        (first.kind, first.mask, first.verified, first.violation, first.expires),
        (
            second.kind.clone(),
            second.mask,
            second.verified,
            second.violation,
            second.expires
        )
    );
    assert_eq!(first_character.id, second_character.id);
    assert_eq!(first_character.owner_id, second_character.owner_id);
    assert_eq!(first_character.corporation_id, second_character.corporation_id);
    assert_eq!(first_character.alliance_id, second_character.alliance_id);
    assert_eq!(first_character.titles, second_character.titles);
    assert_eq!(
        CharacterRepository::new(&test.db)
            .get_by_credential(second.id)
            .await?
            .len(),
        1
    );
    assert!(AccountRepository::new(&test.db)
        .get_duplicates(alice.id)
        .await?
        .is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expected: characters the key no longer reports are unlinked and lose their owner
#[tokio::test]
async fn dropped_character_is_detached() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test
        .credential()
        .insert_verified_credential(ALICE_KEY, alice.id)
        .await?;
    let dropped = test
        .eve()
        .insert_mock_character(90000002, CORPORATION_ID, Some(alice.id))
        .await?;
    test.credential().link_character(dropped.id, credential.id).await?;
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

    let saved = service.pull(credential).await.unwrap().unwrap();

    let characters = CharacterRepository::new(&test.db);
    let linked: Vec<i64> = characters
        .get_by_credential(saved.id)
        .await?
        .into_iter()
        .map(|character| character.character_id)
        .collect();
    assert_eq!(linked, vec![CHARACTER_ID]);
    assert_eq!(characters.get_by_id(dropped.id).await?.unwrap().owner_id, None);

    test.assert_mocks();

    Ok(())
}

/// Expected: the sink hears about each unverified character once, and not about characters
/// still backed by another verified key
#[tokio::test]
async fn revokes_once_per_unverified_character() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    let verified = test
        .credential()
        .insert_verified_credential(BOB_KEY, alice.id)
        .await?;
    let backed = test
        .eve()
        .insert_mock_character(90000002, CORPORATION_ID, Some(alice.id))
        .await?;
    test.credential().link_character(backed.id, verified.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_MINIMAL_MASK,
            "Character",
            vec![
                factory::key_character(CHARACTER_ID, CORPORATION_ID, None),
                factory::key_character(90000002, CORPORATION_ID, None),
            ],
        ),
        1,
    );

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let saved = service.pull(credential).await.unwrap().unwrap();

    assert!(!saved.verified);
    assert_eq!(sink.revoked(), vec![CHARACTER_ID]);

    test.assert_mocks();

    Ok(())
}

/// Expected: a character whose view cannot be fetched is removed again and the error
/// surfaces, leaving the stored key untouched
#[tokio::test]
async fn failed_character_fetch_rolls_back_new_character() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    let credential = test.credential().insert_credential(ALICE_KEY, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        ALICE_KEY,
        factory::key_info(
            TEST_FULL_MASK,
            "Character",
            vec![factory::key_character(CHARACTER_ID, CORPORATION_ID, None)],
        ),
        1,
    );
    test.key_api()
        .create_character_sheet_error_endpoint(ALICE_KEY, CHARACTER_ID, 500, 1);

    let key_api = test.key_api_client();
    let sink = RecordingSink::default();
    let policy = test_policy();
    let service = CredentialService::new(&test.db, &key_api, &sink, &policy);

    let result = service.pull(credential.clone()).await;

    assert!(result.is_err());
    assert!(CharacterRepository::new(&test.db)
        .get_by_character_id(CHARACTER_ID)
        .await?
        .is_none());
    assert_eq!(
        CredentialRepository::new(&test.db)
            .get_by_key(ALICE_KEY)
            .await?
            .unwrap(),
        credential
    );

    test.assert_mocks();

    Ok(())
}
