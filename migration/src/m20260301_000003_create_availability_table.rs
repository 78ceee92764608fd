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
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(pk_uuid(Availability::Id))
                    .col(uuid(Availability::UserId))
                    .col(integer(Availability::DayOfWeek))
                    .col(string_len(Availability::StartTime, 5))
                    .col(string_len(Availability::EndTime, 5))
                    .col(
                        timestamp_with_time_zone(Availability::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Availability::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_user_id")
                            .from(Availability::Table, Availability::UserId)
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
                    .name("idx_availability_user_day")
                    .table(Availability::Table)
                    .col(Availability::UserId)
                    .col(Availability::DayOfWeek)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Availability {
    Table,
    Id,
    UserId,
    DayOfWeek,
    StartTime,
    EndTime,
    CreatedAt,
    UpdatedAt,
}
