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
                    .table(UserAddress::Table)
                    .if_not_exists()
                    .col(pk_uuid(UserAddress::Id))
                    .col(uuid_uniq(UserAddress::UserId))
                    .col(string(UserAddress::AddressLine1))
                    .col(string_null(UserAddress::AddressLine2))
                    .col(string(UserAddress::City))
                    .col(string(UserAddress::State))
                    .col(string(UserAddress::PostalCode))
                    .col(string(UserAddress::Country))
                    .col(
                        timestamp_with_time_zone(UserAddress::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(UserAddress::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_address_user_id")
                            .from(UserAddress::Table, UserAddress::UserId)
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
            .drop_table(Table::drop().table(UserAddress::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserAddress {
    Table,
    Id,
    UserId,
    AddressLine1,
    AddressLine2,
    City,
    State,
    PostalCode,
    Country,
    CreatedAt,
    UpdatedAt,
}
