use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000003_create_manager_profiles::ManagerProfiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ArtistProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArtistProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ArtistProfiles::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ArtistProfiles::ManagerId).uuid().null())
                    .col(
                        ColumnDef::new(ArtistProfiles::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ArtistProfiles::FirstReleaseYear)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ArtistProfiles::NoOfAlbumsReleased)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ArtistProfiles::DateOfBirth).date().null())
                    .col(
                        ColumnDef::new(ArtistProfiles::Gender)
                            .custom(Alias::new("gender"))
                            .not_null()
                            .default("male"),
                    )
                    .col(
                        ColumnDef::new(ArtistProfiles::Address)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ArtistProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ArtistProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_profiles_user_id")
                            .from(ArtistProfiles::Table, ArtistProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    // Cascade matches the upstream schema: deleting a manager
                    // removes the artist rows that reference it.
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_profiles_manager_id")
                            .from(ArtistProfiles::Table, ArtistProfiles::ManagerId)
                            .to(ManagerProfiles::Table, ManagerProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_artist_profiles_manager_id")
                    .table(ArtistProfiles::Table)
                    .col(ArtistProfiles::ManagerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ArtistProfiles::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ArtistProfiles {
    Table,
    Id,
    UserId,
    ManagerId,
    Name,
    FirstReleaseYear,
    NoOfAlbumsReleased,
    DateOfBirth,
    Gender,
    Address,
    CreatedAt,
    UpdatedAt,
}
