use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

use super::jwt::generate_token_pair;
use super::middleware::AuthUser;
use super::password::{hash_password, verify_password};
use crate::api::ErrorResponse;
use crate::validate;
use artistry_db::entities::{user::UserRole, user_profile::Gender};
use artistry_db::store::{users, StoreError};
use artistry_db::AppState;

// ─── Request/Response DTOs ──────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub address: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub address: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Field-level validation of a registration payload. Returns the parsed
/// enums on success, or a serializer-style error map.
pub(crate) fn validate_registration(
    body: &RegisterRequest,
) -> Result<(Gender, UserRole), BTreeMap<&'static str, Vec<String>>> {
    let mut errors: BTreeMap<&'static str, Vec<String>> = BTreeMap::new();

    if !validate::valid_email(&body.email) {
        errors
            .entry("email")
            .or_default()
            .push("Enter a valid email address.".to_string());
    }
    if !validate::valid_password(&body.password) {
        errors
            .entry("password")
            .or_default()
            .push("Password must be at least 8 characters.".to_string());
    }
    if body.password != body.confirm_password {
        errors
            .entry("confirm_password")
            .or_default()
            .push("Passwords do not match.".to_string());
    }
    if !validate::valid_phone(&body.phone) {
        errors
            .entry("phone")
            .or_default()
            .push(validate::PHONE_FORMAT_MESSAGE.to_string());
    }
    if !validate::date_not_in_future(body.dob) {
        errors
            .entry("dob")
            .or_default()
            .push(validate::DATE_IN_FUTURE_MESSAGE.to_string());
    }

    let gender = Gender::parse(&body.gender);
    if gender.is_none() {
        errors
            .entry("gender")
            .or_default()
            .push(format!("\"{}\" is not a valid choice.", body.gender));
    }
    let role = UserRole::parse(&body.role);
    if role.is_none() {
        errors
            .entry("role")
            .or_default()
            .push(format!("\"{}\" is not a valid choice.", body.role));
    }

    if errors.is_empty() {
        // Both parses succeeded when the map is empty
        Ok((gender.unwrap(), role.unwrap()))
    } else {
        Err(errors)
    }
}

fn invalid_credentials() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse::new("Invalid credentials")),
    )
}

fn internal_error() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new("Internal server error")),
    )
}

// ─── Handlers ──────────────────────────────────────────────────────

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, (StatusCode, Json<ErrorResponse>)> {
    if !validate::valid_email(&body.email) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("Enter a valid email address.")),
        ));
    }

    let found = users::find_for_login(&state.db, &body.email)
        .await
        .map_err(|e| {
            tracing::error!("db error: {e}");
            internal_error()
        })?;

    // A missing account and a wrong password produce the same response so
    // callers cannot probe which emails are registered.
    let user = found.ok_or_else(invalid_credentials)?;

    let valid = verify_password(&body.password, &user.password_hash).map_err(|e| {
        tracing::error!("verify error: {e}");
        internal_error()
    })?;

    if !valid || !user.is_active {
        return Err(invalid_credentials());
    }

    let tokens = generate_token_pair(user.id, &user.email, user.role.as_str(), &state.jwt_secret)
        .map_err(|e| {
            tracing::error!("token error: {e}");
            internal_error()
        })?;

    let name = users::profile_for(&state.db, user.id)
        .await
        .map_err(|e| {
            tracing::error!("db error: {e}");
            internal_error()
        })?
        .and_then(|p| p.full_name())
        .unwrap_or_else(|| user.email.clone());

    Ok(Json(LoginResponse {
        access: tokens.access,
        refresh: tokens.refresh,
        user_id: user.id,
        email: user.email,
        role: user.role.to_string(),
        name,
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, Json<serde_json::Value>)> {
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
        StoreError::Db(e) => {
            tracing::error!("register error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "An error occurred during registration." })),
            )
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "An error occurred during registration." })),
        ),
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

/// POST /api/auth/logout (requires auth)
///
/// Tokens are stateless; there is nothing to revoke server-side. The
/// endpoint exists so clients have a uniform logout call.
pub async fn logout(
    axum::Extension(auth_user): axum::Extension<AuthUser>,
) -> Json<MessageResponse> {
    tracing::info!("User {} logged out", auth_user.0.sub);
    Json(MessageResponse {
        message: "Successfully logged out.".to_string(),
    })
}
