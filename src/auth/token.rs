//! Stateless bearer-token issuance/verification.
//!
//! Tokens are HS256 JWTs over a shared secret carrying the company id and
//! email. Verification is purely local; no state is kept per token.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::ApiError;

/// Claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Company row id.
    pub id: i32,
    /// Company email at issuance time.
    pub email: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
}

/// Issue a signed token bound to `{id, email}` with the configured expiry.
pub fn issue_token(id: i32, email: &str, settings: &Settings) -> Result<String, ApiError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        id,
        email: email.to_string(),
        iat: now,
        exp: now + settings.jwt_expiry_seconds as i64,
    };

    let key = EncodingKey::from_secret(settings.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| ApiError::Internal(format!("JWT encode: {}", e)))
}

/// Decode and verify a token.
///
/// Any failure — bad signature, malformed structure, expiry — collapses to
/// `InvalidToken`; callers must treat it as "unauthenticated" without
/// distinguishing further to the client.
pub fn verify_token(token: &str, settings: &Settings) -> Result<Claims, ApiError> {
    let key = DecodingKey::from_secret(settings.jwt_secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    jsonwebtoken::decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|_| ApiError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            database_url: "postgresql://localhost/unused".to_string(),
            server_port: 5000,
            cors_allow_origins: vec![],
            jwt_secret: "test-secret".to_string(),
            jwt_expiry_seconds: 604800,
            log_level: "ERROR".to_string(),
            log_format: "plain".to_string(),
            identity_api_url: "http://localhost:9099".to_string(),
            identity_api_key: None,
            phone_country_prefix: "+91".to_string(),
            image_store_url: "http://localhost:9199".to_string(),
            image_store_api_key: None,
            logo_folder: "company-logos".to_string(),
            max_logo_bytes: 5 * 1024 * 1024,
            upstream_timeout_seconds: 8.0,
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let settings = test_settings();
        let token = issue_token(42, "ops@acme.example", &settings).unwrap();
        let claims = verify_token(&token, &settings).unwrap();

        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "ops@acme.example");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut settings = test_settings();
        settings.jwt_expiry_seconds = 1;

        let now = Utc::now().timestamp();
        let claims = Claims {
            id: 1,
            email: "ops@acme.example".to_string(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let key = EncodingKey::from_secret(settings.jwt_secret.as_bytes());
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();

        assert!(matches!(
            verify_token(&token, &settings),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let settings = test_settings();
        let token = issue_token(42, "ops@acme.example", &settings).unwrap();

        let mut tampered = token.clone();
        tampered.pop();
        tampered.push('A');

        assert!(matches!(
            verify_token(&tampered, &settings),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let settings = test_settings();
        let token = issue_token(42, "ops@acme.example", &settings).unwrap();

        let mut other = test_settings();
        other.jwt_secret = "a-different-secret".to_string();

        assert!(matches!(
            verify_token(&token, &other),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let settings = test_settings();
        assert!(matches!(
            verify_token("not.a.jwt", &settings),
            Err(ApiError::InvalidToken)
        ));
    }
}
