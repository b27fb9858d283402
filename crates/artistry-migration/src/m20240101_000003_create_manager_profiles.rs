use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ManagerProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ManagerProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::CompanyName)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::CompanyEmail)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::CompanyPhone)
                            .string_len(15)
                            .null(),
                    )
                    .col(ColumnDef::new(ManagerProfiles::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(ManagerProfiles::Gender)
                            .custom(Alias::new("gender"))
                            .not_null()
                            .default("male"),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::Address)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ManagerProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_manager_profiles_user_id")
                            .from(ManagerProfiles::Table, ManagerProfiles::UserId)
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
            .drop_table(Table::drop().table(ManagerProfiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ManagerProfiles {
    Table,
    Id,
    UserId,
    Name,
    CompanyName,
    CompanyEmail,
    CompanyPhone,
    DateOfBirth,
    Gender,
    Address,
    CreatedAt,
    UpdatedAt,
}
