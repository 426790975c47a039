use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_eve_character::EveCharacter;

static IDX_APPLICATION_GRANT_CHARACTER_ID: &str = "idx-application_grant-character_id";
static FK_APPLICATION_GRANT_CHARACTER_ID: &str = "fk-application_grant-character_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ApplicationGrant::Table)
                    .if_not_exists()
                    .col(pk_auto(ApplicationGrant::Id))
                    .col(integer(ApplicationGrant::CharacterId))
                    .col(string(ApplicationGrant::Application))
                    .col(timestamp(ApplicationGrant::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_APPLICATION_GRANT_CHARACTER_ID)
                    .table(ApplicationGrant::Table)
                    .col(ApplicationGrant::CharacterId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_APPLICATION_GRANT_CHARACTER_ID)
                    .from_tbl(ApplicationGrant::Table)
                    .from_col(ApplicationGrant::CharacterId)
                    .to_tbl(EveCharacter::Table)
                    .to_col(EveCharacter::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_APPLICATION_GRANT_CHARACTER_ID)
                    .table(ApplicationGrant::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_APPLICATION_GRANT_CHARACTER_ID)
                    .table(ApplicationGrant::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ApplicationGrant::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ApplicationGrant {
    Table,
    Id,
    CharacterId,
    Application,
    CreatedAt,
}
