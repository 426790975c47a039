/// User agent used by test EVE API clients
pub static TEST_USER_AGENT: &str = "keyward-tests (test@example.com)";

/// Default verification code for test keys
pub static TEST_KEY_CODE: &str = "test-verification-code";

/// Access mask granting the character sheet and public character info
pub const TEST_FULL_MASK: i64 = 8 | 8_388_608;

/// Access mask granting only public character info
pub const TEST_INFO_MASK: i64 = 8_388_608;

/// Access mask granting neither character view
pub const TEST_MINIMAL_MASK: i64 = 33_554_432;
