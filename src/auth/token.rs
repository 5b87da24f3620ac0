use crate::error::AppError;
use crate::models::UserRole;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime in seconds. The service issues short-lived tokens only;
/// there is no refresh flow and no server-side revocation (logout is a
/// client-side discard).
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims encoded within an issued bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's id.
    pub sub: Uuid,
    pub email: String,
    pub role: UserRole,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Signs a bearer token for the given identity, expiring [`TOKEN_TTL_SECS`]
/// from now. The signing key comes from the `JWT_SECRET` environment
/// variable, which the binary requires at boot.
pub fn generate_token(user_id: Uuid, email: &str, role: UserRole) -> Result<String, AppError> {
    let expiration = chrono::Utc::now()
        .checked_add_signed(chrono::Duration::seconds(TOKEN_TTL_SECS))
        .expect("valid timestamp")
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        exp: expiration,
    };

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal("JWT_SECRET not set".into()))?;

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
}

/// Verifies a bearer token and decodes its claims. Tampered, malformed and
/// expired tokens are all rejected as `Unauthorized`.
pub fn verify_token(token: &str) -> Result<Claims, AppError> {
    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal("JWT_SECRET not set".into()))?;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(data.claims)
}
