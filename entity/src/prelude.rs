pub use super::account::Entity as Account;
pub use super::account_duplicate::Entity as AccountDuplicate;
pub use super::application_grant::Entity as ApplicationGrant;
pub use super::eve_alliance::Entity as EveAlliance;
pub use super::eve_character::Entity as EveCharacter;
pub use super::eve_character_credential::Entity as EveCharacterCredential;
pub use super::eve_corporation::Entity as EveCorporation;
pub use super::eve_credential::Entity as EveCredential;
