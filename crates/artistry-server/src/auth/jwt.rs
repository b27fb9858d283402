use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,
    /// Login email
    pub email: String,
    /// Role (artist, artist_manager, super_admin)
    pub role: String,
    /// Token type (access, refresh)
    pub token_type: TokenType,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

impl Claims {
    /// Elevated requesters are exempt from ownership checks.
    pub fn is_elevated(&self) -> bool {
        self.role == "super_admin"
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Generate access + refresh token pair
pub fn generate_token_pair(
    user_id: Uuid,
    email: &str,
    role: &str,
    secret: &str,
) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let now = Utc::now();

    // Access token: 15 minutes
    let access_exp = now + Duration::minutes(15);
    let access_claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        token_type: TokenType::Access,
        iat: now.timestamp(),
        exp: access_exp.timestamp(),
    };
    let access = encode(
        &Header::default(),
        &access_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    // Refresh token: 7 days
    let refresh_exp = now + Duration::days(7);
    let refresh_claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        token_type: TokenType::Refresh,
        iat: now.timestamp(),
        exp: refresh_exp.timestamp(),
    };
    let refresh = encode(
        &Header::default(),
        &refresh_claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(TokenPair { access, refresh })
}

/// Validate a JWT token and return claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-for-jwt";

    #[test]
    fn test_token_generation_and_validation() {
        let user_id = Uuid::new_v4();

        let pair = generate_token_pair(user_id, "a@example.com", "artist", SECRET).unwrap();
        assert!(!pair.access.is_empty());
        assert!(!pair.refresh.is_empty());

        let claims = validate_token(&pair.access, SECRET).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.role, "artist");
        assert_eq!(claims.token_type, TokenType::Access);

        let refresh_claims = validate_token(&pair.refresh, SECRET).unwrap();
        assert_eq!(refresh_claims.token_type, TokenType::Refresh);
    }

    #[test]
    fn test_access_token_expires_in_fifteen_minutes() {
        let pair =
            generate_token_pair(Uuid::new_v4(), "a@example.com", "artist", SECRET).unwrap();
        let claims = validate_token(&pair.access, SECRET).unwrap();
        assert!(claims.exp > claims.iat);
        let diff = claims.exp - claims.iat;
        assert!((899..=901).contains(&diff));
    }

    #[test]
    fn test_refresh_token_expires_in_seven_days() {
        let pair =
            generate_token_pair(Uuid::new_v4(), "b@example.com", "artist", SECRET).unwrap();
        let claims = validate_token(&pair.refresh, SECRET).unwrap();
        assert_eq!(claims.token_type, TokenType::Refresh);
        let diff = claims.exp - claims.iat;
        assert!((604799..=604801).contains(&diff));
    }

    #[test]
    fn test_invalid_secret_rejects_token() {
        let pair =
            generate_token_pair(Uuid::new_v4(), "a@example.com", "artist", SECRET).unwrap();
        let result = validate_token(&pair.access, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(validate_token("not-a-valid-jwt", SECRET).is_err());
        assert!(validate_token("", SECRET).is_err());
    }

    #[test]
    fn test_access_and_refresh_tokens_are_different() {
        let pair =
            generate_token_pair(Uuid::new_v4(), "a@example.com", "artist", SECRET).unwrap();
        assert_ne!(pair.access, pair.refresh);
    }

    #[test]
    fn test_elevation_follows_role_claim() {
        let pair =
            generate_token_pair(Uuid::new_v4(), "root@example.com", "super_admin", SECRET)
                .unwrap();
        let claims = validate_token(&pair.access, SECRET).unwrap();
        assert!(claims.is_elevated());

        let pair =
            generate_token_pair(Uuid::new_v4(), "m@example.com", "artist_manager", SECRET)
                .unwrap();
        let claims = validate_token(&pair.access, SECRET).unwrap();
        assert!(!claims.is_elevated());
    }

    #[test]
    fn test_token_type_serialization() {
        let json = serde_json::to_string(&TokenType::Access).unwrap();
        assert_eq!(json, "\"access\"");
        let json = serde_json::to_string(&TokenType::Refresh).unwrap();
        assert_eq!(json, "\"refresh\"");
    }
}
