pub mod artists;
pub mod users;

use axum::{http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::jwt::Claims;
use artistry_db::store::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Ownership gate applied after the target record has been fetched: the
/// requester must be the record's owner or hold an elevated role. Runs before
/// any mutation.
pub fn check_owner_or_elevated(
    claims: &Claims,
    owner_id: Uuid,
    action: &str,
    resource: &str,
) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    if claims.is_elevated() || claims.sub == owner_id {
        return Ok(());
    }
    Err((
        StatusCode::FORBIDDEN,
        Json(ErrorResponse::new(format!(
            "You do not have permission to {action} this {resource}."
        ))),
    ))
}

/// Map store failures for detail/update/delete operations. Uniqueness
/// conflicts are handled by the callers that can produce them.
pub fn map_store_error(err: StoreError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        StoreError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new("Not found.")),
        ),
        StoreError::EmailTaken => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("This email already exists.")),
        ),
        StoreError::ProfileExists => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Artist profile already exists for this user.",
            )),
        ),
        StoreError::Db(e) => {
            tracing::error!("db error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::TokenType;
    use sea_orm::DbErr;

    fn claims(sub: Uuid, role: &str) -> Claims {
        Claims {
            sub,
            email: "someone@example.com".into(),
            role: role.into(),
            token_type: TokenType::Access,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[test]
    fn test_owner_passes() {
        let id = Uuid::new_v4();
        assert!(check_owner_or_elevated(&claims(id, "artist"), id, "view", "profile").is_ok());
    }

    #[test]
    fn test_non_owner_forbidden() {
        let result = check_owner_or_elevated(
            &claims(Uuid::new_v4(), "artist"),
            Uuid::new_v4(),
            "edit",
            "profile",
        );
        let (status, body) = result.unwrap_err();
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body.error,
            "You do not have permission to edit this profile."
        );
    }

    #[test]
    fn test_manager_role_is_not_elevated() {
        let result = check_owner_or_elevated(
            &claims(Uuid::new_v4(), "artist_manager"),
            Uuid::new_v4(),
            "delete",
            "profile",
        );
        assert_eq!(result.unwrap_err().0, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_super_admin_bypasses_ownership() {
        let result = check_owner_or_elevated(
            &claims(Uuid::new_v4(), "super_admin"),
            Uuid::new_v4(),
            "delete",
            "profile",
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let (status, _) = map_store_error(StoreError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_email_conflict_maps_to_400() {
        let (status, body) = map_store_error(StoreError::EmailTaken);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "This email already exists.");
    }

    #[test]
    fn test_duplicate_profile_maps_to_400() {
        let (status, body) = map_store_error(StoreError::ProfileExists);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Artist profile already exists for this user.");
    }

    #[test]
    fn test_db_error_maps_to_500_with_generic_message() {
        let (status, body) = map_store_error(StoreError::Db(DbErr::Custom("secret".into())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
    }
}
