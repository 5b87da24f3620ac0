use crate::{
    auth::{AdminUser, AuthenticatedUser},
    error::AppError,
    models::{CreateTaskRequest, TaskFilter, UpdateTaskRequest},
    response::ApiResponse,
    services::TaskService,
};
use actix_web::{delete, get, patch, post, web, Responder};
use uuid::Uuid;
use validator::Validate;

/// Paginated, filtered task listing (admin only).
///
/// ## Query Parameters:
/// - `status` (optional): `TODO`, `IN_PROGRESS` or `COMPLETED`.
/// - `priority` (optional): `LOW`, `MEDIUM` or `HIGH`.
/// - `search` (optional): case-insensitive match against title/description.
/// - `page` (optional, default 1), `limit` (optional, default 10, capped).
#[get("")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    query: web::Query<TaskFilter>,
    _admin: AdminUser,
) -> Result<impl Responder, AppError> {
    let tasks = service.find_all(query.into_inner()).await?;

    Ok(ApiResponse::ok("Tasks retrieved successfully", tasks))
}

/// Create a task. The creator is the authenticated caller; the assignee must
/// reference an existing user (404 otherwise).
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    payload: web::Json<CreateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = service.create(payload.into_inner(), user.0.sub).await?;

    Ok(ApiResponse::created("Task created successfully", task))
}

/// Fetch a single task, visible only to its assignee. A task that exists but
/// belongs to someone else yields the same 404 as a missing one.
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    path: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = service.find_one(path.into_inner(), user.0.sub).await?;

    Ok(ApiResponse::ok("Task retrieved successfully", task))
}

/// Partial update, assignee-only: 404 when the task is absent, 401 when the
/// caller is not the current assignee.
#[patch("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    payload.validate()?;

    let task = service
        .update(path.into_inner(), payload.into_inner(), user.0.sub)
        .await?;

    Ok(ApiResponse::ok("Task updated successfully", task))
}

/// Delete a task. Any authenticated caller may delete any task; see
/// `TaskService::remove` for the update/delete asymmetry.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    path: web::Path<Uuid>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    service.remove(path.into_inner()).await?;

    Ok(ApiResponse::ok("Task deleted successfully", serde_json::Value::Null))
}
