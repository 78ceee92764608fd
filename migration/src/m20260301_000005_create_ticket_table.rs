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
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(pk_uuid(Ticket::Id))
                    .col(uuid(Ticket::CreatedById))
                    .col(uuid_null(Ticket::ClaimedById))
                    .col(string(Ticket::Module))
                    .col(string(Ticket::Topic))
                    .col(text(Ticket::Description))
                    .col(string(Ticket::Status).default("OPEN"))
                    .col(json_binary(Ticket::PreferredTimes))
                    .col(json_binary(Ticket::Attachments))
                    .col(
                        timestamp_with_time_zone(Ticket::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Ticket::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_created_by_id")
                            .from(Ticket::Table, Ticket::CreatedById)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_claimed_by_id")
                            .from(Ticket::Table, Ticket::ClaimedById)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Ticket {
    Table,
    Id,
    CreatedById,
    ClaimedById,
    Module,
    Topic,
    Description,
    Status,
    PreferredTimes,
    Attachments,
    CreatedAt,
    UpdatedAt,
}
