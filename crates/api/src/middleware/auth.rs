//! # Authentication Module
//!
//! Password hashing for accounts and the extractor that identifies the
//! calling user.
//!
//! Passwords are hashed with Argon2 and stored in PHC string format, so
//! the salt and parameters travel with the hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use spark_core::errors::{SparkError, SparkResult};

use super::error_handling::AppError;

/// Header carrying the id of the signed-in user.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Hashes a password using the Argon2 algorithm
///
/// A fresh random salt is generated for every call.
///
/// # Example
///
/// ```rust
/// use spark_api::middleware::auth::hash_password;
///
/// let hashed = hash_password("user_password").unwrap();
/// assert!(hashed.starts_with("$argon2"));
/// ```
pub fn hash_password(password: &str) -> SparkResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SparkError::Internal(format!("Error hashing password: {}", e).into()))?
        .to_string();

    Ok(password_hash)
}

/// Checks `password` against a stored PHC hash.
///
/// Returns `Ok(false)` on a mismatch and an error only when the stored
/// hash cannot be parsed.
pub fn verify_password(password: &str, hash: &str) -> SparkResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| SparkError::Internal(format!("Stored password hash is invalid: {}", e).into()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// The user a request is made on behalf of, taken from the `x-user-id`
/// header.
///
/// The header value is trusted as-is. The service must sit behind an
/// authenticating proxy that verifies the caller and sets `x-user-id`,
/// overwriting any value sent by the client. Exposed directly, any client
/// can act as any user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| {
                SparkError::Authentication(format!("Missing {} header", USER_ID_HEADER))
            })?;

        Ok(CurrentUser(user_id.to_string()))
    }
}
