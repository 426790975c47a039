use sea_orm::entity::prelude::*;

/// Credential currently granting access to a character.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "eve_character_credential")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub character_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub credential_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::eve_character::Entity",
        from = "Column::CharacterId",
        to = "super::eve_character::Column::Id",
        on_delete = "Cascade"
    )]
    EveCharacter,
    #[sea_orm(
        belongs_to = "super::eve_credential::Entity",
        from = "Column::CredentialId",
        to = "super::eve_credential::Column::Id",
        on_delete = "Cascade"
    )]
    EveCredential,
}

impl Related<super::eve_character::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCharacter.def()
    }
}

impl Related<super::eve_credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCredential.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
