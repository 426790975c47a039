use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_account::Account, m20251101_000002_eve_alliance::EveAlliance,
    m20251101_000003_eve_corporation::EveCorporation,
};

static IDX_EVE_CHARACTER_CORPORATION_ID: &str = "idx-eve_character-corporation_id";
static IDX_EVE_CHARACTER_ALLIANCE_ID: &str = "idx-eve_character-alliance_id";
static IDX_EVE_CHARACTER_OWNER_ID: &str = "idx-eve_character-owner_id";
static FK_EVE_CHARACTER_CORPORATION_ID: &str = "fk-eve_character-corporation_id";
static FK_EVE_CHARACTER_ALLIANCE_ID: &str = "fk-eve_character-alliance_id";
static FK_EVE_CHARACTER_OWNER_ID: &str = "fk-eve_character-owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCharacter::Table)
                    .if_not_exists()
                    .col(pk_auto(EveCharacter::Id))
                    .col(big_integer_uniq(EveCharacter::CharacterId))
                    .col(string(EveCharacter::Name))
                    .col(string_null(EveCharacter::Race))
                    .col(string_null(EveCharacter::Bloodline))
                    .col(string_null(EveCharacter::Ancestry))
                    .col(string_null(EveCharacter::Gender))
                    .col(double_null(EveCharacter::SecurityStatus))
                    .col(json_binary(EveCharacter::Titles))
                    .col(json_binary(EveCharacter::Roles))
                    .col(integer_null(EveCharacter::CorporationId))
                    .col(integer_null(EveCharacter::AllianceId))
                    .col(integer_null(EveCharacter::OwnerId))
                    .col(timestamp(EveCharacter::CreatedAt))
                    .col(timestamp(EveCharacter::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (IDX_EVE_CHARACTER_CORPORATION_ID, EveCharacter::CorporationId),
            (IDX_EVE_CHARACTER_ALLIANCE_ID, EveCharacter::AllianceId),
            (IDX_EVE_CHARACTER_OWNER_ID, EveCharacter::OwnerId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(EveCharacter::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EVE_CHARACTER_CORPORATION_ID)
                    .from_tbl(EveCharacter::Table)
                    .from_col(EveCharacter::CorporationId)
                    .to_tbl(EveCorporation::Table)
                    .to_col(EveCorporation::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EVE_CHARACTER_ALLIANCE_ID)
                    .from_tbl(EveCharacter::Table)
                    .from_col(EveCharacter::AllianceId)
                    .to_tbl(EveAlliance::Table)
                    .to_col(EveAlliance::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EVE_CHARACTER_OWNER_ID)
                    .from_tbl(EveCharacter::Table)
                    .from_col(EveCharacter::OwnerId)
                    .to_tbl(Account::Table)
                    .to_col(Account::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            FK_EVE_CHARACTER_OWNER_ID,
            FK_EVE_CHARACTER_ALLIANCE_ID,
            FK_EVE_CHARACTER_CORPORATION_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(EveCharacter::Table)
                        .to_owned(),
                )
                .await?;
        }

        for name in [
            IDX_EVE_CHARACTER_OWNER_ID,
            IDX_EVE_CHARACTER_ALLIANCE_ID,
            IDX_EVE_CHARACTER_CORPORATION_ID,
        ] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(EveCharacter::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(EveCharacter::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCharacter {
    Table,
    Id,
    CharacterId,
    Name,
    Race,
    Bloodline,
    Ancestry,
    Gender,
    SecurityStatus,
    Titles,
    Roles,
    CorporationId,
    AllianceId,
    OwnerId,
    CreatedAt,
    UpdatedAt,
}
