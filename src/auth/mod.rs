pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use crate::models::{PublicUser, UserRole};

// Re-export necessary items
pub use extractors::{AdminUser, AuthenticatedUser};
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{generate_token, verify_token, Claims};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
///
/// The role is caller-supplied, as in the open-signup variant of the service;
/// the admin-gated variant (`POST /users/signup`) accepts the same shape.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub role: UserRole,
    #[validate(custom = "validate_password_strength")]
    pub password: String,
}

/// Response for a successful login: the bearer token plus the public profile
/// of the authenticated user.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: PublicUser,
}

/// Passwords must be at least 6 characters and mix lower case, upper case,
/// digits and at least one special character.
fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.len() >= 6;
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| !c.is_alphanumeric());

    if long_enough && has_lower && has_upper && has_digit && has_special {
        Ok(())
    } else {
        let mut error = ValidationError::new("password_strength");
        error.message = Some(Cow::from(
            "Password must be at least 6 characters long, contain at least one uppercase letter, one lowercase letter, one number, and one special character.",
        ));
        Err(error)
    }
}
