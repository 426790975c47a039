//! Tests for the periodic credential sweep.

use std::sync::Arc;

use keyward::server::{
    data::credential::CredentialRepository,
    scheduler::sweep::{CredentialSweep, SweepSummary},
};
use keyward_test_utils::{constant::TEST_FULL_MASK, prelude::*};

use crate::util::{RecordingSink, TestContextExt};

/// Expected: every live key is pulled once and counted by outcome, failures do not stop others
#[tokio::test]
async fn sweep_pulls_every_live_key() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    test.credential().insert_credential(1001, alice.id).await?;
    test.credential().insert_credential(1002, alice.id).await?;
    test.credential().insert_credential(1003, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        1001,
        factory::key_info(
            TEST_FULL_MASK,
            "Character",
            vec![factory::key_character(90000001, 98000001, None)],
        ),
        1,
    );
    test.key_api().create_character_sheet_endpoint(
        1001,
        90000001,
        factory::character_sheet(90000001, 98000001, None),
        1,
    );
    test.key_api()
        .create_key_info_error_endpoint(1002, 403, 1);
    test.key_api()
        .create_key_info_error_endpoint(1003, 500, 1);

    let sink = Arc::new(RecordingSink::default());
    let state = test.app_state(sink);

    let summary = CredentialSweep::new(state, 2).run().await.unwrap();

    assert_eq!(
        summary,
        SweepSummary {
            updated: 1,
            unchanged: 0,
            deleted: 1,
            failed: 1,
        }
    );
    let credentials = CredentialRepository::new(&test.db);
    assert!(credentials.get_by_key(1001).await?.unwrap().verified);
    assert!(credentials.get_by_key(1002).await?.is_none());
    assert!(credentials.get_by_key(1003).await?.is_some());

    test.assert_mocks();

    Ok(())
}

/// Expected: a second sweep over unchanged data reports nothing but unchanged keys
#[tokio::test]
async fn repeated_sweep_is_unchanged() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_credential_tables().build().await?;
    let alice = test.account().insert_account("alice").await?;
    test.credential().insert_credential(1001, alice.id).await?;
    test.key_api().create_key_info_endpoint(
        1001,
        factory::key_info(
            TEST_FULL_MASK,
            "Character",
            vec![factory::key_character(90000001, 98000001, None)],
        ),
        2,
    );
    test.key_api().create_character_sheet_endpoint(
        1001,
        90000001,
        factory::character_sheet(90000001, 98000001, None),
        2,
    );

    let sink = Arc::new(RecordingSink::default());
    let sweep = CredentialSweep::new(test.app_state(sink.clone()), 4);

    let first = sweep.run().await.unwrap();
    let second = sweep.run().await.unwrap();

    assert_eq!(first.updated, 1);
    assert_eq!(second.unchanged, 1);
    assert_eq!(second.total(), 1);
    assert!(sink.revoked().is_empty());

    test.assert_mocks();

    Ok(())
}

/// Expected: a sweep over an empty database does nothing
#[tokio::test]
async fn sweep_without_keys() -> Result<(), TestError> {
    let test = TestBuilder::new().with_credential_tables().build().await?;

    let summary = CredentialSweep::new(test.app_state(Arc::new(RecordingSink::default())), 1)
        .run()
        .await
        .unwrap();

    assert_eq!(summary, SweepSummary::default());

    Ok(())
}
