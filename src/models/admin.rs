//! Admin session model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

pub const ADMIN_ROLE: &str = "admin";

/// JWT Claims for the authenticated admin operator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin email
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl AdminClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token (signature and expiry)
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == ADMIN_ROLE {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn claims(role: &str, exp_offset: i64) -> AdminClaims {
        let now = Utc::now().timestamp();
        AdminClaims {
            sub: "admin@example.com".to_string(),
            role: role.to_string(),
            exp: now + exp_offset,
            iat: now,
        }
    }

    #[test]
    fn token_round_trips_with_the_same_secret() {
        let token = claims(ADMIN_ROLE, 3600).create_token("secret").unwrap();
        let parsed = AdminClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.sub, "admin@example.com");
        assert!(parsed.require_admin().is_ok());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = claims(ADMIN_ROLE, 3600).create_token("secret").unwrap();
        assert!(AdminClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = claims(ADMIN_ROLE, -3600).create_token("secret").unwrap();
        assert!(AdminClaims::from_token(&token, "secret").is_err());
    }

    #[test]
    fn non_admin_role_is_forbidden() {
        assert!(claims("editor", 3600).require_admin().is_err());
    }
}
