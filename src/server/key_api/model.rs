//! Payloads returned by the EVE API key endpoints.
//!
//! The raw wire structs mirror the JSON bodies. They are normalised into [`KeyInfo`] and
//! [`CharacterView`] so the rest of the server never deals with the API's inconsistent field
//! names across endpoints.

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::server::{error::key_api::KeyApiError, util::time::parse_expires};

/// Normalised `APIKeyInfo` result.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyInfo {
    /// Raw access mask bits.
    pub mask: i64,
    /// Key type: `Account`, `Character` or `Corporation`.
    pub kind: String,
    /// `None` for keys that never expire.
    pub expires: Option<NaiveDateTime>,
    /// Characters the key grants access to.
    pub characters: Vec<KeyCharacter>,
}

/// Character row of an `APIKeyInfo` result.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyCharacter {
    /// EVE Online character ID.
    pub character_id: i64,
    /// Character name.
    pub name: String,
    /// EVE Online corporation ID.
    pub corporation_id: i64,
    /// `None` when the API omitted the corporation name; such rows are skipped by the pull
    pub corporation_name: Option<String>,
    /// `None` when the character is in no alliance.
    pub alliance_id: Option<i64>,
    /// Alliance name, when the character is in an alliance.
    pub alliance_name: Option<String>,
}

/// Character attributes from whichever view the key's mask allows.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterView {
    /// EVE Online character ID.
    pub character_id: i64,
    /// Character name.
    pub name: String,
    /// Descriptive attributes below are `None` when the view was built from key info alone.
    pub race: Option<String>,
    /// Read from `bloodLine` or `bloodline`.
    pub bloodline: Option<String>,
    /// Character ancestry.
    pub ancestry: Option<String>,
    /// Character gender.
    pub gender: Option<String>,
    /// Security status.
    pub security_status: Option<f64>,
    /// EVE Online corporation ID.
    pub corporation_id: i64,
    /// Falls back to the key info row when the view omits it.
    pub corporation_name: Option<String>,
    /// `None` when the character is in no alliance.
    pub alliance_id: Option<i64>,
    /// Read from `allianceName` or its `alliance` synonym.
    pub alliance_name: Option<String>,
    /// Corporation titles, possibly carrying markup.
    pub titles: Vec<String>,
    /// Corporation role names.
    pub roles: Vec<String>,
}

impl From<&KeyCharacter> for CharacterView {
    /// Minimal view used when the key grants neither the sheet nor public info.
    fn from(row: &KeyCharacter) -> Self {
        Self {
            character_id: row.character_id,
            name: row.name.clone(),
            race: None,
            bloodline: None,
            ancestry: None,
            gender: None,
            security_status: None,
            corporation_id: row.corporation_id,
            corporation_name: row.corporation_name.clone(),
            alliance_id: row.alliance_id,
            alliance_name: row.alliance_name.clone(),
            titles: Vec::new(),
            roles: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawKeyInfo {
    access_mask: i64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    expires: Option<String>,
    #[serde(default)]
    characters: Vec<RawKeyCharacter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawKeyCharacter {
    #[serde(rename = "characterID")]
    character_id: i64,
    character_name: String,
    #[serde(rename = "corporationID", default)]
    corporation_id: i64,
    #[serde(default)]
    corporation_name: Option<String>,
    #[serde(rename = "allianceID", default)]
    alliance_id: Option<i64>,
    #[serde(default)]
    alliance_name: Option<String>,
}

/// Shared shape of `CharacterSheet` and `CharacterInfo`, which disagree on field names.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCharacterView {
    #[serde(rename = "characterID")]
    character_id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    character_name: Option<String>,
    #[serde(default)]
    race: Option<String>,
    #[serde(default)]
    blood_line: Option<String>,
    #[serde(default, rename = "bloodline")]
    bloodline_lower: Option<String>,
    #[serde(default)]
    ancestry: Option<String>,
    #[serde(default)]
    gender: Option<String>,
    #[serde(default)]
    security_status: Option<f64>,
    #[serde(rename = "corporationID", default)]
    corporation_id: i64,
    #[serde(default)]
    corporation: Option<String>,
    #[serde(default)]
    corporation_name: Option<String>,
    #[serde(rename = "allianceID", default)]
    alliance_id: Option<i64>,
    #[serde(default)]
    alliance: Option<String>,
    #[serde(default)]
    alliance_name: Option<String>,
    #[serde(default)]
    corporation_titles: Vec<RawTitle>,
    #[serde(default)]
    corporation_roles: Vec<RawRole>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTitle {
    title_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRole {
    role_name: String,
}

/// Alliance ID `0` is the API's way of saying "no alliance".
fn alliance_id(raw: Option<i64>) -> Option<i64> {
    raw.filter(|id| *id != 0)
}

impl From<RawKeyInfo> for KeyInfo {
    fn from(raw: RawKeyInfo) -> Self {
        Self {
            mask: raw.access_mask,
            kind: raw.kind,
            expires: parse_expires(raw.expires.as_deref()),
            characters: raw
                .characters
                .into_iter()
                .map(|row| KeyCharacter {
                    character_id: row.character_id,
                    name: row.character_name,
                    corporation_id: row.corporation_id,
                    corporation_name: row.corporation_name,
                    alliance_id: alliance_id(row.alliance_id),
                    alliance_name: row.alliance_name,
                })
                .collect(),
        }
    }
}

impl TryFrom<RawCharacterView> for CharacterView {
    type Error = KeyApiError;

    fn try_from(raw: RawCharacterView) -> Result<Self, Self::Error> {
        let name = raw.name.or(raw.character_name).ok_or_else(|| {
            KeyApiError::Decode(format!(
                "character {} payload has neither name nor characterName",
                raw.character_id
            ))
        })?;

        Ok(Self {
            character_id: raw.character_id,
            name,
            race: raw.race,
            bloodline: raw.blood_line.or(raw.bloodline_lower),
            ancestry: raw.ancestry,
            gender: raw.gender,
            security_status: raw.security_status,
            corporation_id: raw.corporation_id,
            corporation_name: raw.corporation.or(raw.corporation_name),
            alliance_id: alliance_id(raw.alliance_id),
            alliance_name: raw.alliance.or(raw.alliance_name),
            titles: raw
                .corporation_titles
                .into_iter()
                .map(|title| title.title_name)
                .collect(),
            roles: raw
                .corporation_roles
                .into_iter()
                .map(|role| role.role_name)
                .collect(),
        })
    }
}
