use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_account::Account;

static IDX_EVE_CREDENTIAL_OWNER_ID: &str = "idx-eve_credential-owner_id";
static IDX_EVE_CREDENTIAL_EXPIRES: &str = "idx-eve_credential-expires";
static FK_EVE_CREDENTIAL_OWNER_ID: &str = "fk-eve_credential-owner_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EveCredential::Table)
                    .if_not_exists()
                    .col(pk_auto(EveCredential::Id))
                    .col(big_integer_uniq(EveCredential::Key))
                    .col(string(EveCredential::Code))
                    .col(string_null(EveCredential::Kind))
                    .col(big_integer(EveCredential::Mask))
                    .col(boolean(EveCredential::Verified))
                    .col(string_len_null(EveCredential::Violation, 16))
                    .col(timestamp_null(EveCredential::Expires))
                    .col(integer(EveCredential::OwnerId))
                    .col(timestamp(EveCredential::CreatedAt))
                    .col(timestamp(EveCredential::Modified))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVE_CREDENTIAL_OWNER_ID)
                    .table(EveCredential::Table)
                    .col(EveCredential::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Backs the expiry purge and the live-credential filter
        manager
            .create_index(
                Index::create()
                    .name(IDX_EVE_CREDENTIAL_EXPIRES)
                    .table(EveCredential::Table)
                    .col(EveCredential::Expires)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EVE_CREDENTIAL_OWNER_ID)
                    .from_tbl(EveCredential::Table)
                    .from_col(EveCredential::OwnerId)
                    .to_tbl(Account::Table)
                    .to_col(Account::Id)
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
                    .name(FK_EVE_CREDENTIAL_OWNER_ID)
                    .table(EveCredential::Table)
                    .to_owned(),
            )
            .await?;

        for name in [IDX_EVE_CREDENTIAL_EXPIRES, IDX_EVE_CREDENTIAL_OWNER_ID] {
            manager
                .drop_index(
                    Index::drop()
                        .name(name)
                        .table(EveCredential::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(EveCredential::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EveCredential {
    Table,
    Id,
    Key,
    Code,
    Kind,
    Mask,
    Verified,
    Violation,
    Expires,
    OwnerId,
    CreatedAt,
    Modified,
}
