use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "music_genre")]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    #[sea_orm(string_value = "rnb")]
    Rnb,
    #[sea_orm(string_value = "country")]
    Country,
    #[sea_orm(string_value = "classic")]
    Classic,
    #[sea_orm(string_value = "rock")]
    Rock,
    #[sea_orm(string_value = "jazz")]
    Jazz,
    #[sea_orm(string_value = "pop")]
    Pop,
    #[sea_orm(string_value = "indie_folk")]
    IndieFolk,
    #[sea_orm(string_value = "pop_rock")]
    PopRock,
    #[sea_orm(string_value = "alternative_rock")]
    AlternativeRock,
    #[sea_orm(string_value = "soul")]
    Soul,
}

impl Genre {
    pub fn as_str(&self) -> &str {
        match self {
            Genre::Rnb => "rnb",
            Genre::Country => "country",
            Genre::Classic => "classic",
            Genre::Rock => "rock",
            Genre::Jazz => "jazz",
            Genre::Pop => "pop",
            Genre::IndieFolk => "indie_folk",
            Genre::PopRock => "pop_rock",
            Genre::AlternativeRock => "alternative_rock",
            Genre::Soul => "soul",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rnb" => Some(Genre::Rnb),
            "country" => Some(Genre::Country),
            "classic" => Some(Genre::Classic),
            "rock" => Some(Genre::Rock),
            "jazz" => Some(Genre::Jazz),
            "pop" => Some(Genre::Pop),
            "indie_folk" => Some(Genre::IndieFolk),
            "pop_rock" => Some(Genre::PopRock),
            "alternative_rock" => Some(Genre::AlternativeRock),
            "soul" => Some(Genre::Soul),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "music")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub album_name: Option<String>,
    pub release_date: Option<DateTimeWithTimeZone>,
    pub genre: Genre,
    /// Artist profile that created the record. Nullable independently of
    /// `artist_id`: the creator and the attributed artist may diverge.
    pub created_by: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::artist_profile::Entity",
        from = "Column::CreatedBy",
        to = "super::artist_profile::Column::Id"
    )]
    Creator,
    #[sea_orm(
        belongs_to = "super::artist_profile::Entity",
        from = "Column::ArtistId",
        to = "super::artist_profile::Column::Id"
    )]
    Artist,
}

impl Related<super::artist_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
