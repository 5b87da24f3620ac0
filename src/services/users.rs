use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::{hash_password, SignupRequest};
use crate::error::AppError;
use crate::models::{PublicUser, UpdateUserRequest, User};

/// Columns safe to return to callers. `password` is excluded at the query
/// level rather than fetched and stripped.
const PUBLIC_COLUMNS: &str =
    "id, email, first_name, last_name, role, is_active, created_at, updated_at";

/// User directory: creation, lookup and self-service profile updates.
#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a user from a signup payload. The password is hashed here,
    /// explicitly, before anything touches the database.
    pub async fn create_user(&self, signup: SignupRequest) -> Result<PublicUser, AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&signup.email)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_some() {
            return Err(AppError::Conflict("Email already exists".into()));
        }

        let hashed_password = hash_password(&signup.password)?;

        let sql = format!(
            "INSERT INTO users (email, first_name, last_name, role, password) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {}",
            PUBLIC_COLUMNS
        );
        let user = sqlx::query_as::<_, PublicUser>(&sql)
            .bind(&signup.email)
            .bind(&signup.first_name)
            .bind(&signup.last_name)
            .bind(signup.role)
            .bind(&hashed_password)
            .fetch_one(&self.pool)
            .await?;

        Ok(user)
    }

    /// Full record lookup for credential verification. The returned `User`
    /// carries the password hash and must not cross the service boundary.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, role, password, is_active, \
                    created_at, updated_at \
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<PublicUser>, AppError> {
        let sql = format!("SELECT {} FROM users ORDER BY created_at", PUBLIC_COLUMNS);
        let users = sqlx::query_as::<_, PublicUser>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<PublicUser, AppError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", PUBLIC_COLUMNS);
        let user = sqlx::query_as::<_, PublicUser>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        user.ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))
    }

    /// Self-only profile update: the caller may edit nobody's record but
    /// their own. Merges the patch fields and refreshes `updated_at`.
    pub async fn update_user(
        &self,
        id: Uuid,
        patch: UpdateUserRequest,
        caller_id: Uuid,
    ) -> Result<PublicUser, AppError> {
        if id != caller_id {
            return Err(AppError::Unauthorized(
                "You can only update your own profile".into(),
            ));
        }

        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, first_name, last_name, role, password, is_active, \
                    created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User with id {} not found", id)))?;

        let first_name = patch.first_name.unwrap_or(user.first_name);
        let last_name = patch.last_name.unwrap_or(user.last_name);
        let is_active = patch.is_active.unwrap_or(user.is_active);

        let sql = format!(
            "UPDATE users SET first_name = $1, last_name = $2, is_active = $3, updated_at = $4 \
             WHERE id = $5 \
             RETURNING {}",
            PUBLIC_COLUMNS
        );
        let updated = sqlx::query_as::<_, PublicUser>(&sql)
            .bind(&first_name)
            .bind(&last_name)
            .bind(is_active)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(updated)
    }
}
