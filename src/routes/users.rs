use crate::{
    auth::{AdminUser, AuthenticatedUser, SignupRequest},
    error::AppError,
    models::UpdateUserRequest,
    response::ApiResponse,
    services::UserService,
};
use actix_web::{get, post, put, web, Responder};
use uuid::Uuid;
use validator::Validate;

/// List all users (admin only). Password hashes are excluded at the query
/// level, not stripped after the fact.
#[get("")]
pub async fn list_users(
    service: web::Data<UserService>,
    _admin: AdminUser,
) -> Result<impl Responder, AppError> {
    let users = service.find_all().await?;

    Ok(ApiResponse::ok("Users retrieved successfully", users))
}

/// The authenticated caller's own public profile.
#[get("/profile")]
pub async fn profile(
    service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let profile = service.find_one(user.0.sub).await?;

    Ok(ApiResponse::ok("User profile retrieved successfully", profile))
}

/// Admin-privileged user creation; same payload and conflict semantics as the
/// open signup.
#[post("/signup")]
pub async fn admin_signup(
    service: web::Data<UserService>,
    payload: web::Json<SignupRequest>,
    _admin: AdminUser,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let user = service.create_user(payload.into_inner()).await?;

    Ok(ApiResponse::created("User created successfully", user))
}

/// Self-only profile update: 401 when editing someone else's record, 404 when
/// the target does not exist.
#[put("/{id}")]
pub async fn update_user(
    service: web::Data<UserService>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let updated = service
        .update_user(path.into_inner(), payload.into_inner(), user.0.sub)
        .await?;

    Ok(ApiResponse::ok("User updated successfully", updated))
}
