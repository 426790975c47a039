use sea_orm::entity::prelude::*;

/// Pair of accounts flagged as controlled by the same person.
///
/// Stored normalised with `account_id < duplicate_account_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "account_duplicate")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub duplicate_account_id: i32,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::DuplicateAccountId",
        to = "super::account::Column::Id",
        on_delete = "Cascade"
    )]
    DuplicateAccount,
}

impl ActiveModelBehavior for ActiveModel {}
