use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Gender enum is shared by every profile table
        manager
            .get_connection()
            .execute_unprepared("CREATE TYPE gender AS ENUM ('male', 'female', 'other')")
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::FirstName).string_len(255).null())
                    .col(ColumnDef::new(UserProfiles::LastName).string_len(255).null())
                    .col(ColumnDef::new(UserProfiles::Phone).string_len(15).null())
                    .col(ColumnDef::new(UserProfiles::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(UserProfiles::Gender)
                            .custom(Alias::new("gender"))
                            .not_null()
                            .default("male"),
                    )
                    .col(ColumnDef::new(UserProfiles::Address).string_len(255).null())
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profiles_user_id")
                            .from(UserProfiles::Table, UserProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS gender")
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum UserProfiles {
    Table,
    Id,
    UserId,
    FirstName,
    LastName,
    Phone,
    DateOfBirth,
    Gender,
    Address,
    CreatedAt,
    UpdatedAt,
}
