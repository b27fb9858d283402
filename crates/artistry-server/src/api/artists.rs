//! Artist-profile endpoints plus the per-artist music sub-resource.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use super::{check_owner_or_elevated, map_store_error, ErrorResponse};
use crate::auth::middleware::AuthUser;
use crate::validate;
use artistry_db::entities::{artist_profile, music, music::Genre, user_profile::Gender};
use artistry_db::store::{artists, music as music_store};
use artistry_db::AppState;

// ─── Request/Response DTOs ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ArtistProfileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub manager_id: Option<Uuid>,
    pub name: String,
    pub first_release_year: Option<i32>,
    pub no_of_albums_released: i32,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,
    pub address: Option<String>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<artist_profile::Model> for ArtistProfileResponse {
    fn from(a: artist_profile::Model) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            manager_id: a.manager_id,
            name: a.name,
            first_release_year: a.first_release_year,
            no_of_albums_released: a.no_of_albums_released,
            date_of_birth: a.date_of_birth,
            gender: a.gender.as_str().to_string(),
            address: a.address,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateArtistProfileRequest {
    pub name: String,
    pub first_release_year: Option<i32>,
    #[serde(default)]
    pub no_of_albums_released: i32,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub manager_id: Option<Uuid>,
}

/// A field that is present in the payload deserializes to `Some`, even when
/// its value is `null`. Paired with `#[serde(default)]`, absent stays `None`.
fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(de).map(Some)
}

/// Partial update: absent fields are left untouched; an explicit `null`
/// clears the nullable ones (detaching a manager, dropping the address).
#[derive(Debug, Default, Deserialize)]
pub struct UpdateArtistProfileRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub first_release_year: Option<Option<i32>>,
    pub no_of_albums_released: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub manager_id: Option<Option<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct MusicResponse {
    pub id: Uuid,
    pub title: String,
    pub album_name: Option<String>,
    pub release_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub genre: String,
    pub created_by: Option<Uuid>,
    pub artist_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

impl From<music::Model> for MusicResponse {
    fn from(m: music::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            album_name: m.album_name,
            release_date: m.release_date,
            genre: m.genre.as_str().to_string(),
            created_by: m.created_by,
            artist_id: m.artist_id,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateMusicRequest {
    pub title: String,
    pub album_name: Option<String>,
    pub release_date: Option<chrono::DateTime<chrono::FixedOffset>>,
    pub genre: Option<String>,
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

fn parse_gender(value: Option<&str>) -> Result<Gender, (StatusCode, Json<ErrorResponse>)> {
    match value {
        None => Ok(Gender::Male),
        Some(raw) => Gender::parse(raw)
            .ok_or_else(|| bad_request(format!("\"{raw}\" is not a valid choice."))),
    }
}

// ─── Handlers ──────────────────────────────────────────────────────

/// GET /api/artists
pub async fn list_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArtistProfileResponse>>, (StatusCode, Json<ErrorResponse>)> {
    let profiles = artists::list(&state.db).await.map_err(map_store_error)?;
    Ok(Json(
        profiles.into_iter().map(ArtistProfileResponse::from).collect(),
    ))
}

/// POST /api/artists/create — create the requester's own artist profile
pub async fn create_artist(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateArtistProfileRequest>,
) -> Result<(StatusCode, Json<ArtistProfileResponse>), (StatusCode, Json<ErrorResponse>)> {
    if body.name.trim().is_empty() {
        return Err(bad_request("Name is required."));
    }
    if let Some(dob) = body.date_of_birth {
        if !validate::date_not_in_future(dob) {
            return Err(bad_request(validate::DATE_IN_FUTURE_MESSAGE));
        }
    }
    if body.no_of_albums_released < 0 {
        return Err(bad_request("Number of albums released cannot be negative."));
    }
    let gender = parse_gender(body.gender.as_deref())?;

    // One artist profile per user
    let existing = artists::find_by_user(&state.db, auth_user.0.sub)
        .await
        .map_err(map_store_error)?;
    if existing.is_some() {
        return Err(bad_request("Artist profile already exists for this user."));
    }

    let new = artists::NewArtistProfile {
        name: body.name,
        first_release_year: body.first_release_year,
        no_of_albums_released: body.no_of_albums_released,
        date_of_birth: body.date_of_birth,
        gender,
        address: body.address,
        manager_id: body.manager_id,
    };

    let created = artists::create(&state.db, auth_user.0.sub, new)
        .await
        .map_err(map_store_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ArtistProfileResponse::from(created)),
    ))
}

/// GET /api/artists/:id
pub async fn get_artist(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ArtistProfileResponse>, (StatusCode, Json<ErrorResponse>)> {
    let profile = artists::detail(&state.db, id).await.map_err(map_store_error)?;
    check_owner_or_elevated(&auth_user.0, profile.user_id, "view", "profile")?;
    Ok(Json(ArtistProfileResponse::from(profile)))
}

/// PUT /api/artists/:id
pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateArtistProfileRequest>,
) -> Result<Json<ArtistProfileResponse>, (StatusCode, Json<ErrorResponse>)> {
    // Fetch first: 404 for a missing profile, then the ownership check,
    // before any mutation.
    let existing = artists::detail(&state.db, id).await.map_err(map_store_error)?;
    check_owner_or_elevated(&auth_user.0, existing.user_id, "edit", "profile")?;

    if let Some(name) = &body.name {
        if name.trim().is_empty() {
            return Err(bad_request("Name is required."));
        }
    }
    if let Some(Some(dob)) = body.date_of_birth {
        if !validate::date_not_in_future(dob) {
            return Err(bad_request(validate::DATE_IN_FUTURE_MESSAGE));
        }
    }
    if matches!(body.no_of_albums_released, Some(n) if n < 0) {
        return Err(bad_request("Number of albums released cannot be negative."));
    }
    let gender = match body.gender.as_deref() {
        None => None,
        Some(raw) => Some(
            Gender::parse(raw)
                .ok_or_else(|| bad_request(format!("\"{raw}\" is not a valid choice.")))?,
        ),
    };

    let patch = artists::ArtistProfilePatch {
        name: body.name,
        first_release_year: body.first_release_year,
        no_of_albums_released: body.no_of_albums_released,
        date_of_birth: body.date_of_birth,
        gender,
        address: body.address,
        manager_id: body.manager_id,
    };

    let updated = artists::update(&state.db, id, patch)
        .await
        .map_err(map_store_error)?;
    Ok(Json(ArtistProfileResponse::from(updated)))
}

/// DELETE /api/artists/:id
pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let existing = artists::detail(&state.db, id).await.map_err(map_store_error)?;
    check_owner_or_elevated(&auth_user.0, existing.user_id, "delete", "profile")?;

    artists::delete(&state.db, id).await.map_err(map_store_error)?;
    tracing::info!(%id, "artist profile deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/artists/:id/music
pub async fn list_artist_music(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<MusicResponse>>, (StatusCode, Json<ErrorResponse>)> {
    // 404 for unknown artists rather than an empty list
    artists::detail(&state.db, id).await.map_err(map_store_error)?;

    let records = music_store::list_for_artist(&state.db, id)
        .await
        .map_err(map_store_error)?;
    Ok(Json(records.into_iter().map(MusicResponse::from).collect()))
}

/// POST /api/artists/:id/music
pub async fn create_artist_music(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<CreateMusicRequest>,
) -> Result<(StatusCode, Json<MusicResponse>), (StatusCode, Json<ErrorResponse>)> {
    let target = artists::detail(&state.db, id).await.map_err(map_store_error)?;
    check_owner_or_elevated(&auth_user.0, target.user_id, "edit", "profile")?;

    if body.title.trim().is_empty() {
        return Err(bad_request("Title is required."));
    }
    let genre = match body.genre.as_deref() {
        None => Genre::Rnb,
        Some(raw) => Genre::parse(raw)
            .ok_or_else(|| bad_request(format!("\"{raw}\" is not a valid choice.")))?,
    };

    // The creator is the requester's own artist profile; an elevated
    // requester without one leaves created_by unset.
    let created_by = artists::find_by_user(&state.db, auth_user.0.sub)
        .await
        .map_err(map_store_error)?
        .map(|p| p.id);

    let new = music_store::NewMusic {
        title: body.title,
        album_name: body.album_name,
        release_date: body.release_date,
        genre,
    };

    let created = music_store::create(&state.db, created_by, Some(id), new)
        .await
        .map_err(map_store_error)?;

    Ok((StatusCode::CREATED, Json(MusicResponse::from(created))))
}
