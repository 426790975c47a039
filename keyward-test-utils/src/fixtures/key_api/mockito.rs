//! Mock EVE API key endpoints.
//!
//! Every endpoint matches on the `keyID` query parameter, and the character endpoints also
//! on `characterID`, so several keys and characters can be served by one mock server.
//! Created mocks are kept in the [`TestContext`](crate::TestContext) and checked by
//! `assert_mocks`.

use mockito::Matcher;
use serde_json::Value;

use crate::fixtures::key_api::KeyApiFixtures;

impl<'a> KeyApiFixtures<'a> {
    /// Mock `/account/APIKeyInfo` for `key`, returning `body`.
    pub fn create_key_info_endpoint(&mut self, key: i64, body: Value, expected_requests: usize) {
        let mock = self
            .test
            .server
            .mock("GET", "/account/APIKeyInfo")
            .match_query(Matcher::UrlEncoded("keyID".into(), key.to_string()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create();

        self.test.mocks.push(mock);
    }

    /// Mock `/account/APIKeyInfo` for `key`, failing with `status`.
    ///
    /// A `403` is how the API reports a deleted or expired key.
    pub fn create_key_info_error_endpoint(
        &mut self,
        key: i64,
        status: usize,
        expected_requests: usize,
    ) {
        let mock = self
            .test
            .server
            .mock("GET", "/account/APIKeyInfo")
            .match_query(Matcher::UrlEncoded("keyID".into(), key.to_string()))
            .with_status(status)
            .expect(expected_requests)
            .create();

        self.test.mocks.push(mock);
    }

    /// Mock `/char/CharacterSheet` for `character_id` read through `key`.
    pub fn create_character_sheet_endpoint(
        &mut self,
        key: i64,
        character_id: i64,
        body: Value,
        expected_requests: usize,
    ) {
        self.create_character_endpoint(
            "/char/CharacterSheet",
            key,
            character_id,
            200,
            Some(body),
            expected_requests,
        );
    }

    /// Mock `/eve/CharacterInfo` for `character_id` read through `key`.
    pub fn create_character_info_endpoint(
        &mut self,
        key: i64,
        character_id: i64,
        body: Value,
        expected_requests: usize,
    ) {
        self.create_character_endpoint(
            "/eve/CharacterInfo",
            key,
            character_id,
            200,
            Some(body),
            expected_requests,
        );
    }

    /// Mock `/char/CharacterSheet` for `character_id`, failing with `status`.
    pub fn create_character_sheet_error_endpoint(
        &mut self,
        key: i64,
        character_id: i64,
        status: usize,
        expected_requests: usize,
    ) {
        self.create_character_endpoint(
            "/char/CharacterSheet",
            key,
            character_id,
            status,
            None,
            expected_requests,
        );
    }

    fn create_character_endpoint(
        &mut self,
        path: &str,
        key: i64,
        character_id: i64,
        status: usize,
        body: Option<Value>,
        expected_requests: usize,
    ) {
        let mut mock = self
            .test
            .server
            .mock("GET", path)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("keyID".into(), key.to_string()),
                Matcher::UrlEncoded("characterID".into(), character_id.to_string()),
            ]))
            .with_status(status)
            .expect(expected_requests);

        if let Some(body) = body {
            mock = mock
                .with_header("content-type", "application/json")
                .with_body(body.to_string());
        }

        self.test.mocks.push(mock.create());
    }
}
