//! User management endpoints. Detail/update/delete follow the fetch →
//! ownership check → operate contract; the listing excludes super admins.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use super::{check_owner_or_elevated, map_store_error, ErrorResponse};
use crate::auth::middleware::AuthUser;
use crate::auth::password::hash_password;
use crate::auth::routes::{validate_registration, RegisterRequest, RegisterResponse};
use crate::validate;
use artistry_db::entities::user::UserRole;
use artistry_db::store::{users, StoreError};
use artistry_db::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub is_staff: bool,
    pub is_active: bool,
    pub role: String,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<users::UserRow>>, (StatusCode, Json<ErrorResponse>)> {
    let rows = users::list(&state.db).await.map_err(map_store_error)?;
    Ok(Json(rows))
}

/// POST /api/users/create (elevated only)
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, Json<serde_json::Value>)> {
    if !auth_user.0.is_elevated() {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "You do not have permission to create users." })),
        ));
    }

    let (gender, role) = validate_registration(&body).map_err(|errors| {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid data provided.", "details": errors })),
        )
    })?;

    let password_hash = hash_password(&body.password).map_err(|e| {
        tracing::error!("hash error: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        )
    })?;

    let new = users::NewUser {
        email: body.email.clone(),
        password_hash,
        role: role.clone(),
        first_name: body.first_name.clone(),
        last_name: body.last_name.clone(),
        phone: body.phone.clone(),
        date_of_birth: body.dob,
        gender: gender.clone(),
        address: body.address.clone(),
    };

    let user_id = users::register(&state.db, new).await.map_err(|e| match e {
        StoreError::EmailTaken => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "email": ["This email already exists."] })),
        ),
        other => {
            tracing::error!("create user error: {other}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
        }
    })?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            id: user_id,
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            phone: body.phone,
            dob: body.dob,
            gender: gender.as_str().to_string(),
            address: body.address,
            role: role.to_string(),
        }),
    ))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<users::UserRow>, (StatusCode, Json<ErrorResponse>)> {
    let row = users::detail(&state.db, id).await.map_err(map_store_error)?;
    check_owner_or_elevated(&auth_user.0, row.id, "view", "user")?;
    Ok(Json(row))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<users::UserRow>, (StatusCode, Json<ErrorResponse>)> {
    // Fetch first so a missing id is a 404 before any permission signal
    let existing = users::detail(&state.db, id).await.map_err(map_store_error)?;
    check_owner_or_elevated(&auth_user.0, existing.id, "edit", "user")?;

    if !validate::valid_email(&body.email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Enter a valid email address.")),
        ));
    }
    let role = UserRole::parse(&body.role).ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(format!(
                "\"{}\" is not a valid choice.",
                body.role
            ))),
        )
    })?;

    let changes = users::UserChanges {
        email: body.email,
        is_staff: body.is_staff,
        is_active: body.is_active,
        role,
    };

    let row = users::update(&state.db, id, changes)
        .await
        .map_err(map_store_error)?;
    Ok(Json(row))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    let existing = users::detail(&state.db, id).await.map_err(map_store_error)?;
    check_owner_or_elevated(&auth_user.0, existing.id, "delete", "user")?;

    users::delete(&state.db, id).await.map_err(map_store_error)?;
    tracing::info!(%id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_deserializes() {
        let body: UpdateUserRequest = serde_json::from_value(json!({
            "email": "new@example.com",
            "is_staff": true,
            "is_active": false,
            "role": "artist_manager",
        }))
        .unwrap();
        assert_eq!(body.email, "new@example.com");
        assert!(body.is_staff);
        assert!(!body.is_active);
        assert_eq!(UserRole::parse(&body.role), Some(UserRole::ArtistManager));
    }

    #[test]
    fn test_update_request_rejects_missing_fields() {
        // Updates assign the complete field set; partial bodies are a 422
        let result: Result<UpdateUserRequest, _> =
            serde_json::from_value(json!({ "email": "new@example.com" }));
        assert!(result.is_err());
    }
}
