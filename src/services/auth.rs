use serde::{Deserialize, Serialize};

use crate::auth::{generate_token, verify_password, LoginResponse, SignupRequest};
use crate::error::AppError;
use crate::models::PublicUser;
use crate::services::UserService;

/// The one message both failed-login paths return, so callers cannot tell a
/// wrong password from an unknown email.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Orchestrates login (lookup + hash verify + token issue) and signup
/// (delegated to the user directory).
#[derive(Clone)]
pub struct AuthService {
    users: UserService,
}

impl AuthService {
    pub fn new(users: UserService) -> Self {
        Self { users }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                log::warn!("login failed: no user with email {}", email);
                return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
            }
        };

        if !verify_password(password, &user.password)? {
            log::warn!("login failed: invalid password for email {}", email);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        let access_token = generate_token(user.id, &user.email, user.role)?;

        Ok(LoginResponse {
            access_token,
            user: user.into(),
        })
    }

    pub async fn signup(&self, signup: SignupRequest) -> Result<PublicUser, AppError> {
        self.users.create_user(signup).await
    }

    /// Stateless logout: tokens are short-lived and invalidated only by
    /// client discard. There is no server-side revocation list.
    pub fn logout(&self) -> LogoutResponse {
        LogoutResponse {
            message: "Logout successful (token should be discarded on client)".to_string(),
        }
    }
}
