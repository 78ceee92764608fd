use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260301_000001_create_user_table::User, m20260301_000005_create_ticket_table::Ticket,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TicketComment::Table)
                    .if_not_exists()
                    .col(pk_uuid(TicketComment::Id))
                    .col(uuid(TicketComment::TicketId))
                    .col(uuid(TicketComment::UserId))
                    .col(text(TicketComment::Message))
                    .col(
                        timestamp_with_time_zone(TicketComment::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_comment_ticket_id")
                            .from(TicketComment::Table, TicketComment::TicketId)
                            .to(Ticket::Table, Ticket::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_comment_user_id")
                            .from(TicketComment::Table, TicketComment::UserId)
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
            .drop_table(Table::drop().table(TicketComment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TicketComment {
    Table,
    Id,
    TicketId,
    UserId,
    Message,
    CreatedAt,
}
