use sea_orm::entity::prelude::*;

/// Local account owning API credentials and, through them, EVE characters.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::eve_credential::Entity")]
    EveCredential,
}

impl Related<super::eve_credential::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EveCredential.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
