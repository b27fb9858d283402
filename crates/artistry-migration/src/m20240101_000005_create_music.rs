use sea_orm_migration::prelude::*;

use super::m20240101_000004_create_artist_profiles::ArtistProfiles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE music_genre AS ENUM ('rnb', 'country', 'classic', 'rock', \
                 'jazz', 'pop', 'indie_folk', 'pop_rock', 'alternative_rock', 'soul')",
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Music::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Music::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Music::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Music::AlbumName).string_len(255).null())
                    .col(
                        ColumnDef::new(Music::ReleaseDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Music::Genre)
                            .custom(Alias::new("music_genre"))
                            .not_null()
                            .default("rnb"),
                    )
                    .col(ColumnDef::new(Music::CreatedBy).uuid().null())
                    .col(ColumnDef::new(Music::ArtistId).uuid().null())
                    .col(
                        ColumnDef::new(Music::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Music::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_music_created_by")
                            .from(Music::Table, Music::CreatedBy)
                            .to(ArtistProfiles::Table, ArtistProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_music_artist_id")
                            .from(Music::Table, Music::ArtistId)
                            .to(ArtistProfiles::Table, ArtistProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_music_artist_id")
                    .table(Music::Table)
                    .col(Music::ArtistId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Music::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP TYPE IF EXISTS music_genre")
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Music {
    Table,
    Id,
    Title,
    AlbumName,
    ReleaseDate,
    Genre,
    CreatedBy,
    ArtistId,
    CreatedAt,
    UpdatedAt,
}
