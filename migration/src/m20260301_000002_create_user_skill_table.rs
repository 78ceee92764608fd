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
                    .table(UserSkill::Table)
                    .if_not_exists()
                    .col(uuid(UserSkill::UserId))
                    .col(string(UserSkill::Skill))
                    .primary_key(
                        Index::create()
                            .col(UserSkill::UserId)
                            .col(UserSkill::Skill),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_skill_user_id")
                            .from(UserSkill::Table, UserSkill::UserId)
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
                    .name("idx_user_skill_skill")
                    .table(UserSkill::Table)
                    .col(UserSkill::Skill)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserSkill::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum UserSkill {
    Table,
    UserId,
    Skill,
}
