use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000004_eve_character::EveCharacter, m20251101_000005_eve_credential::EveCredential,
};

static IDX_EVE_CHARACTER_CREDENTIAL_CREDENTIAL_ID: &str =
    "idx-eve_character_credential-credential_id";
static FK_EVE_CHARACTER_CREDENTIAL_CHARACTER_ID: &str =
    "fk-eve_character_credential-character_id";
static FK_EVE_CHARACTER_CREDENTIAL_CREDENTIAL_ID: &str =
    "fk-eve_character_credential-credential_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCharacterCredential::Table)
                    .if_not_exists()
                    .col(integer(EveCharacterCredential::CharacterId))
                    .col(integer(EveCharacterCredential::CredentialId))
                    .col(timestamp(EveCharacterCredential::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(EveCharacterCredential::CharacterId)
                            .col(EveCharacterCredential::CredentialId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVE_CHARACTER_CREDENTIAL_CREDENTIAL_ID)
                    .table(EveCharacterCredential::Table)
                    .col(EveCharacterCredential::CredentialId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EVE_CHARACTER_CREDENTIAL_CHARACTER_ID)
                    .from_tbl(EveCharacterCredential::Table)
                    .from_col(EveCharacterCredential::CharacterId)
                    .to_tbl(EveCharacter::Table)
                    .to_col(EveCharacter::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EVE_CHARACTER_CREDENTIAL_CREDENTIAL_ID)
                    .from_tbl(EveCharacterCredential::Table)
                    .from_col(EveCharacterCredential::CredentialId)
                    .to_tbl(EveCredential::Table)
                    .to_col(EveCredential::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            FK_EVE_CHARACTER_CREDENTIAL_CREDENTIAL_ID,
            FK_EVE_CHARACTER_CREDENTIAL_CHARACTER_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(EveCharacterCredential::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVE_CHARACTER_CREDENTIAL_CREDENTIAL_ID)
                    .table(EveCharacterCredential::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .table(EveCharacterCredential::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCharacterCredential {
    Table,
    CharacterId,
    CredentialId,
    CreatedAt,
}
