//! Artist-profile data-access. Detail rows carry the owning `user_id` so the
//! request layer can run its ownership check without a second query.

use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{unique_conflict, StoreError};
use crate::entities::{artist_profile, user_profile::Gender};

#[derive(Debug, Clone)]
pub struct NewArtistProfile {
    pub name: String,
    pub first_release_year: Option<i32>,
    pub no_of_albums_released: i32,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub address: Option<String>,
    pub manager_id: Option<Uuid>,
}

/// Partial update: only `Some` fields are applied.
#[derive(Debug, Clone, Default)]
pub struct ArtistProfilePatch {
    pub name: Option<String>,
    pub first_release_year: Option<Option<i32>>,
    pub no_of_albums_released: Option<i32>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub gender: Option<Gender>,
    pub address: Option<Option<String>>,
    pub manager_id: Option<Option<Uuid>>,
}

pub async fn list<C: ConnectionTrait>(db: &C) -> Result<Vec<artist_profile::Model>, StoreError> {
    let profiles = artist_profile::Entity::find()
        .order_by_asc(artist_profile::Column::Name)
        .all(db)
        .await?;
    Ok(profiles)
}

pub async fn detail<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<artist_profile::Model, StoreError> {
    let profile = artist_profile::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound)?;
    Ok(profile)
}

/// The requesting user's own artist profile, if any.
pub async fn find_by_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<Option<artist_profile::Model>, StoreError> {
    let found = artist_profile::Entity::find()
        .filter(artist_profile::Column::UserId.eq(user_id))
        .one(db)
        .await?;
    Ok(found)
}

/// Insert a profile for `user_id`. The unique constraint on `user_id` backs
/// the one-profile-per-user rule; a violation surfaces as `ProfileExists`.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
    new: NewArtistProfile,
) -> Result<artist_profile::Model, StoreError> {
    let now = chrono::Utc::now().fixed_offset();
    let created = artist_profile::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        manager_id: Set(new.manager_id),
        name: Set(new.name),
        first_release_year: Set(new.first_release_year),
        no_of_albums_released: Set(new.no_of_albums_released),
        date_of_birth: Set(new.date_of_birth),
        gender: Set(new.gender),
        address: Set(new.address),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .map_err(|e| unique_conflict(e, StoreError::ProfileExists))?;
    Ok(created)
}

pub async fn update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    patch: ArtistProfilePatch,
) -> Result<artist_profile::Model, StoreError> {
    let existing = artist_profile::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::NotFound)?;

    let mut active: artist_profile::ActiveModel = existing.into();
    if let Some(name) = patch.name {
        active.name = Set(name);
    }
    if let Some(year) = patch.first_release_year {
        active.first_release_year = Set(year);
    }
    if let Some(albums) = patch.no_of_albums_released {
        active.no_of_albums_released = Set(albums);
    }
    if let Some(dob) = patch.date_of_birth {
        active.date_of_birth = Set(dob);
    }
    if let Some(gender) = patch.gender {
        active.gender = Set(gender);
    }
    if let Some(address) = patch.address {
        active.address = Set(address);
    }
    if let Some(manager_id) = patch.manager_id {
        active.manager_id = Set(manager_id);
    }
    active.updated_at = Set(chrono::Utc::now().fixed_offset());

    let updated = active.update(db).await?;
    Ok(updated)
}

pub async fn delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<(), StoreError> {
    let result = artist_profile::Entity::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}
