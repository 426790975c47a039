use sea_orm::entity::prelude::*;

/// Compliance problem recorded on a credential.
///
/// `Character` is set by the pull when the key grants access to a character claimed by another
/// account and is only cleared by a pull in which every character merged cleanly. `Kind` and
/// `Mask` are recomputed from the key policy on every pull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum CredentialViolation {
    #[sea_orm(string_value = "Character")]
    Character,
    #[sea_orm(string_value = "Kind")]
    Kind,
    #[sea_orm(string_value = "Mask")]
    Mask,
}

/// EVE Online API key registered by an account.
///
/// `kind` holds the key type exactly as reported by the API (`Account`, `Character` or
/// `Corporation`) and is `None` until the first successful pull.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "eve_credential")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub key: i64,
    pub code: String,
    pub kind: Option<String>,
    pub mask: i64,
    pub verified: bool,
    pub violation: Option<CredentialViolation>,
    pub expires: Option<DateTime>,
    pub owner_id: i32,
    pub created_at: DateTime,
    pub modified: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::OwnerId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
    #[sea_orm(has_many = "super::eve_character_credential::Entity")]
    EveCharacterCredential,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::eve_character_credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCharacterCredential.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
