//! Tests for credential reconciliation.
//!
//! Every test runs the real HTTP key client against mock EVE API endpoints and an in-memory
//! database, with a [`RecordingSink`] standing in for downstream grant revocation.

mod create_credential;
mod eval_violation;
mod pull;

use keyward::server::{
    data::{
        account::AccountRepository, credential::CredentialRepository,
        eve::{
            alliance::AllianceRepository, character::CharacterRepository,
            corporation::CorporationRepository,
        },
    },
    error::{credential::CredentialError, key_api::KeyApiError, Error},
    service::credential::CredentialService,
};
use keyward_test_utils::{
    constant::{TEST_FULL_MASK, TEST_INFO_MASK, TEST_MINIMAL_MASK},
    prelude::*,
};

use crate::util::{test_policy, RecordingSink, TestContextExt};

const ALICE_KEY: i64 = 1001;
const BOB_KEY: i64 = 1002;
const CHARACTER_ID: i64 = 90000001;
const CORPORATION_ID: i64 = 98000001;
const ALLIANCE_ID: i64 = 99000001;
