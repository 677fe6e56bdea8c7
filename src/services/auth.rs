//! Admin authentication service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};

use crate::{
    config::{AdminConfig, AuthConfig},
    error::{AppError, AppResult},
    models::admin::{AdminClaims, LoginResponse, ADMIN_ROLE},
};

#[derive(Clone)]
pub struct AuthService {
    auth: AuthConfig,
    admin: AdminConfig,
}

impl AuthService {
    pub fn new(auth: AuthConfig, admin: AdminConfig) -> Self {
        Self { auth, admin }
    }

    /// Check the operator credentials and issue a session token
    pub fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        if self.admin.password_hash.is_empty() {
            tracing::warn!("Admin login attempted but no password hash is configured");
            return Err(invalid_credentials());
        }

        let email_matches = email.trim().eq_ignore_ascii_case(self.admin.email.trim());
        if !email_matches || !verify_password(&self.admin.password_hash, password)? {
            tracing::info!(email = %email.trim(), "Rejected admin login");
            return Err(invalid_credentials());
        }

        let expires_in = Duration::hours(self.auth.jwt_expiration_hours as i64);
        let now = Utc::now();
        let claims = AdminClaims {
            sub: self.admin.email.clone(),
            role: ADMIN_ROLE.to_string(),
            exp: (now + expires_in).timestamp(),
            iat: now.timestamp(),
        };

        let token = claims
            .create_token(&self.auth.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        tracing::info!(email = %claims.sub, "Admin logged in");
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: expires_in.num_seconds(),
        })
    }

    /// Decode a bearer token issued by `login`
    pub fn verify_token(&self, token: &str) -> AppResult<AdminClaims> {
        AdminClaims::from_token(token, &self.auth.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))
    }
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("Invalid credentials".to_string())
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|_| AppError::Internal("Invalid password hash".to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash a password using Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))?;
    Ok(hash.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(password_hash: String) -> AuthService {
        AuthService::new(
            AuthConfig {
                jwt_secret: "test-secret".to_string(),
                jwt_expiration_hours: 2,
            },
            AdminConfig {
                email: "ops@fleetsite.test".to_string(),
                password_hash,
            },
        )
    }

    #[test]
    fn correct_credentials_issue_an_admin_token() {
        let auth = service(hash_password("s3cret").unwrap());

        let session = auth.login("OPS@fleetsite.test", "s3cret").unwrap();
        assert_eq!(session.token_type, "Bearer");
        assert_eq!(session.expires_in, 7200);

        let claims = auth.verify_token(&session.token).unwrap();
        assert_eq!(claims.sub, "ops@fleetsite.test");
        assert!(claims.require_admin().is_ok());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let auth = service(hash_password("s3cret").unwrap());
        let err = auth.login("ops@fleetsite.test", "guess").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn wrong_email_is_rejected() {
        let auth = service(hash_password("s3cret").unwrap());
        assert!(auth.login("someone@fleetsite.test", "s3cret").is_err());
    }

    #[test]
    fn login_is_disabled_without_a_hash() {
        let auth = service(String::new());
        let err = auth.login("ops@fleetsite.test", "").unwrap_err();
        assert!(matches!(err, AppError::Authentication(_)));
    }

    #[test]
    fn garbage_token_is_rejected() {
        let auth = service(String::new());
        assert!(matches!(
            auth.verify_token("not.a.token"),
            Err(AppError::Authentication(_))
        ));
    }
}
