use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    #[sea_orm(string_value = "artist")]
    Artist,
    #[sea_orm(string_value = "artist_manager")]
    ArtistManager,
    #[sea_orm(string_value = "super_admin")]
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &str {
        match self {
            UserRole::Artist => "artist",
            UserRole::ArtistManager => "artist_manager",
            UserRole::SuperAdmin => "super_admin",
        }
    }

    /// Parse the wire representation used in request payloads and JWT claims.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "artist" => Some(UserRole::Artist),
            "artist_manager" => Some(UserRole::ArtistManager),
            "super_admin" => Some(UserRole::SuperAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub is_superuser: bool,
    pub date_joined: DateTimeWithTimeZone,
    pub role: UserRole,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_profile::Entity")]
    UserProfile,
    #[sea_orm(has_one = "super::manager_profile::Entity")]
    ManagerProfile,
    #[sea_orm(has_one = "super::artist_profile::Entity")]
    ArtistProfile,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl Related<super::manager_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManagerProfile.def()
    }
}

impl Related<super::artist_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ArtistProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
