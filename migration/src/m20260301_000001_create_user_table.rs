use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_uuid(User::Id))
                    .col(string_uniq(User::Email))
                    .col(string(User::PasswordHash))
                    .col(string(User::Name))
                    .col(string(User::Role).default("LEARNER"))
                    .col(string(User::Status).default("ACTIVE"))
                    .col(text_null(User::Bio))
                    .col(string_null(User::AvatarUrl))
                    .col(string_null(User::SchoolName))
                    .col(string_null(User::StudyYear))
                    .col(string_null(User::Major))
                    .col(boolean(User::EmailVerified).default(false))
                    .col(boolean(User::PhoneVerified).default(false))
                    .col(string_null(User::EmailVerificationToken))
                    .col(string_null(User::PasswordResetToken))
                    .col(timestamp_with_time_zone_null(User::PasswordResetExpires))
                    .col(text_null(User::RefreshToken))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(User::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    Email,
    PasswordHash,
    Name,
    Role,
    Status,
    Bio,
    AvatarUrl,
    SchoolName,
    StudyYear,
    Major,
    EmailVerified,
    PhoneVerified,
    EmailVerificationToken,
    PasswordResetToken,
    PasswordResetExpires,
    RefreshToken,
    CreatedAt,
    UpdatedAt,
}
