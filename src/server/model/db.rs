//! Database model type aliases.
//!
//! Short names for the sea-orm entity models used throughout the server so signatures don't
//! need to spell out `entity::<table>::Model`.

/// Local operator account owning credentials and claiming characters.
pub type AccountModel = entity::account::Model;

/// Normalised pair of accounts flagged as duplicates for operator review.
///
/// # Fields (from `entity::account_duplicate::Model`)
/// - `account_id` - Lower account ID of the pair
/// - `duplicate_account_id` - Higher account ID of the pair
/// - `created_at` - When the pair was first flagged
pub type AccountDuplicateModel = entity::account_duplicate::Model;

/// EVE Online API key registered by an account.
///
/// # Fields (from `entity::eve_credential::Model`)
/// - `id` - Primary key
/// - `key` - EVE API key ID (unique)
/// - `code` - Verification code paired with the key
/// - `kind` - Key type as reported by the API, `None` before the first pull
/// - `mask` - Access mask as reported by the API
/// - `verified` - Whether the key satisfies the configured key policy
/// - `violation` - Compliance problem, if any
/// - `expires` - When the key stops working, if ever
/// - `owner_id` - Owning account
/// - `created_at` - When the key was registered
/// - `modified` - Last time a pull saved the key
pub type CredentialModel = entity::eve_credential::Model;

/// EVE Online character seen through at least one credential.
///
/// # Fields (from `entity::eve_character::Model`)
/// - `id` - Primary key
/// - `character_id` - EVE Online character ID (unique)
/// - `name`, `race`, `bloodline`, `ancestry`, `gender`, `security_status` - Descriptive
///   attributes overwritten on every successful pull
/// - `titles`, `roles` - JSON string arrays replaced on every pull
/// - `corporation_id`, `alliance_id` - Current affiliation (nullable)
/// - `owner_id` - Account currently claiming the character (nullable when detached)
/// - `created_at`, `updated_at` - Record timestamps
pub type EveCharacterModel = entity::eve_character::Model;

/// EVE Online corporation.
pub type EveCorporationModel = entity::eve_corporation::Model;

/// EVE Online alliance.
pub type EveAllianceModel = entity::eve_alliance::Model;

/// Downstream permission grant held by a character.
pub type ApplicationGrantModel = entity::application_grant::Model;
