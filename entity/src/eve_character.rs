use sea_orm::entity::prelude::*;

/// EVE Online character tracked through one or more API credentials.
///
/// `owner_id` is the account currently claiming the character; it is cleared when the
/// character is detached. `titles` and `roles` are JSON string arrays replaced on every pull.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "eve_character")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub character_id: i64,
    pub name: String,
    pub race: Option<String>,
    pub bloodline: Option<String>,
    pub ancestry: Option<String>,
    pub gender: Option<String>,
    pub security_status: Option<f64>,
    #[sea_orm(column_type = "JsonBinary")]
    pub titles: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub roles: Json,
    pub corporation_id: Option<i32>,
    pub alliance_id: Option<i32>,
    pub owner_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::eve_corporation::Entity",
        from = "Column::CorporationId",
        to = "super::eve_corporation::Column::Id",
        on_delete = "SetNull"
    )]
    EveCorporation,
    #[sea_orm(
        belongs_to = "super::eve_alliance::Entity",
        from = "Column::AllianceId",
        to = "super::eve_alliance::Column::Id",
        on_delete = "SetNull"
    )]
    EveAlliance,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::OwnerId",
        to = "super::account::Column::Id",
        on_delete = "SetNull"
    )]
    Account,
    #[sea_orm(has_many = "super::eve_character_credential::Entity")]
    EveCharacterCredential,
    #[sea_orm(has_many = "super::application_grant::Entity")]
    ApplicationGrant,
}

impl Related<super::eve_corporation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCorporation.def()
    }
}

impl Related<super::eve_character_credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCharacterCredential.def()
    }
}

impl Related<super::application_grant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApplicationGrant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
