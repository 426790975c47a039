//! JSON payloads in the shape the EVE API returns them.
//!
//! Names follow the database fixtures: `Character {id}`, `Corporation {id}`, `Alliance {id}`.

use serde_json::{json, Value};

/// `APIKeyInfo` payload for a key that expires in 2099.
pub fn key_info(mask: i64, kind: &str, characters: Vec<Value>) -> Value {
    json!({
        "accessMask": mask,
        "type": kind,
        "expires": "2099-12-31 23:59:59",
        "characters": characters,
    })
}

/// One `characters` row of an `APIKeyInfo` payload.
pub fn key_character(character_id: i64, corporation_id: i64, alliance_id: Option<i64>) -> Value {
    json!({
        "characterID": character_id,
        "characterName": format!("Character {}", character_id),
        "corporationID": corporation_id,
        "corporationName": format!("Corporation {}", corporation_id),
        "allianceID": alliance_id.unwrap_or(0),
        "allianceName": alliance_id.map(|id| format!("Alliance {}", id)).unwrap_or_default(),
    })
}

/// `CharacterSheet` payload with one title and one role.
pub fn character_sheet(character_id: i64, corporation_id: i64, alliance_id: Option<i64>) -> Value {
    json!({
        "characterID": character_id,
        "name": format!("Character {}", character_id),
        "race": "Caldari",
        "bloodLine": "Deteis",
        "ancestry": "Tube Child",
        "gender": "Female",
        "corporationID": corporation_id,
        "corporationName": format!("Corporation {}", corporation_id),
        "allianceID": alliance_id.unwrap_or(0),
        "allianceName": alliance_id.map(|id| format!("Alliance {}", id)).unwrap_or_default(),
        "corporationTitles": [{"titleID": 1, "titleName": "<b>Director</b>"}],
        "corporationRoles": [{"roleID": 1, "roleName": "roleDirector"}],
    })
}

/// Public `CharacterInfo` payload, which uses `characterName`, `corporation` and `alliance`.
pub fn character_info(character_id: i64, corporation_id: i64, alliance_id: Option<i64>) -> Value {
    let mut info = json!({
        "characterID": character_id,
        "characterName": format!("Character {}", character_id),
        "race": "Caldari",
        "bloodline": "Deteis",
        "securityStatus": 0.5,
        "corporationID": corporation_id,
        "corporation": format!("Corporation {}", corporation_id),
    });

    if let Some(alliance_id) = alliance_id {
        info["allianceID"] = json!(alliance_id);
        info["alliance"] = json!(format!("Alliance {}", alliance_id));
    }

    info
}
