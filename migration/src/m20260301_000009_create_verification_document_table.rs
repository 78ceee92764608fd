use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VerificationDocument::Table)
                    .if_not_exists()
                    .col(pk_uuid(VerificationDocument::Id))
                    .col(uuid(VerificationDocument::UserId))
                    .col(string(VerificationDocument::DocumentType))
                    .col(string(VerificationDocument::DocumentUrl))
                    .col(
                        timestamp_with_time_zone(VerificationDocument::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_verification_document_user_id")
                            .from(VerificationDocument::Table, VerificationDocument::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VerificationDocument::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum VerificationDocument {
    Table,
    Id,
    UserId,
    DocumentType,
    DocumentUrl,
    CreatedAt,
}
