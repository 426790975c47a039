use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_account::Account;

static IDX_ACCOUNT_DUPLICATE_DUPLICATE_ACCOUNT_ID: &str =
    "idx-account_duplicate-duplicate_account_id";
static FK_ACCOUNT_DUPLICATE_ACCOUNT_ID: &str = "fk-account_duplicate-account_id";
static FK_ACCOUNT_DUPLICATE_DUPLICATE_ACCOUNT_ID: &str = "fk-account_duplicate-duplicate_account_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountDuplicate::Table)
                    .if_not_exists()
                    .col(integer(AccountDuplicate::AccountId))
                    .col(integer(AccountDuplicate::DuplicateAccountId))
                    .col(timestamp(AccountDuplicate::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(AccountDuplicate::AccountId)
                            .col(AccountDuplicate::DuplicateAccountId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ACCOUNT_DUPLICATE_DUPLICATE_ACCOUNT_ID)
                    .table(AccountDuplicate::Table)
                    .col(AccountDuplicate::DuplicateAccountId)
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (FK_ACCOUNT_DUPLICATE_ACCOUNT_ID, AccountDuplicate::AccountId),
            (
                FK_ACCOUNT_DUPLICATE_DUPLICATE_ACCOUNT_ID,
                AccountDuplicate::DuplicateAccountId,
            ),
        ] {
            manager
                .create_foreign_key(
                    ForeignKey::create()
                        .name(name)
                        .from_tbl(AccountDuplicate::Table)
                        .from_col(column)
                        .to_tbl(Account::Table)
                        .to_col(Account::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            FK_ACCOUNT_DUPLICATE_DUPLICATE_ACCOUNT_ID,
            FK_ACCOUNT_DUPLICATE_ACCOUNT_ID,
        ] {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name(name)
                        .table(AccountDuplicate::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ACCOUNT_DUPLICATE_DUPLICATE_ACCOUNT_ID)
                    .table(AccountDuplicate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AccountDuplicate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AccountDuplicate {
    Table,
    AccountId,
    DuplicateAccountId,
    CreatedAt,
}
