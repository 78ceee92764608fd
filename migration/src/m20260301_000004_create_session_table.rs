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
                    .table(Session::Table)
                    .if_not_exists()
                    .col(pk_uuid(Session::Id))
                    .col(uuid(Session::BuddyId))
                    .col(uuid(Session::LearnerId))
                    .col(string(Session::Module))
                    .col(string(Session::Topic))
                    .col(timestamp_with_time_zone(Session::Date))
                    .col(string(Session::Status).default("PENDING"))
                    .col(string_null(Session::MeetingLink))
                    .col(text_null(Session::Feedback))
                    .col(
                        timestamp_with_time_zone(Session::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Session::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_buddy_id")
                            .from(Session::Table, Session::BuddyId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_learner_id")
                            .from(Session::Table, Session::LearnerId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_session_buddy_date")
                    .table(Session::Table)
                    .col(Session::BuddyId)
                    .col(Session::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_session_status_date")
                    .table(Session::Table)
                    .col(Session::Status)
                    .col(Session::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Session {
    Table,
    Id,
    BuddyId,
    LearnerId,
    Module,
    Topic,
    Date,
    Status,
    MeetingLink,
    Feedback,
    CreatedAt,
    UpdatedAt,
}
