use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Default page size for task listings.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Upper bound on caller-supplied page sizes, so a single request cannot pull
/// an unbounded result set.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Represents the status of a task.
/// Corresponds to the `task_status_enum` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status_enum", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

/// Represents the priority of a task.
/// Corresponds to the `task_priority_enum` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority_enum", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// Task entity as stored in the database. `assigned_to` and `created_by` are
/// plain user id references; joined shapes use [`TaskWithAssignee`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub assigned_to: Uuid,
    pub created_by: Uuid,
}

/// Minimal user projection embedded in task responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    pub id: Uuid,
    pub email: String,
}

/// Task with the assignee relation resolved to a `{id, email}` projection,
/// as returned by single-task reads and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskWithAssignee {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub assigned_to: UserRef,
    pub created_by: Uuid,
}

/// Payload for creating a task. The creator is always the authenticated
/// caller; `assigned_to` must reference an existing user.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub assigned_to: Uuid,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial task update. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Query parameters accepted by the task listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// Case-insensitive match against title and description.
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl TaskFilter {
    /// Requested page, defaulting to 1. May be zero or negative, in which
    /// case the listing returns an empty page with the correct total.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    /// Requested page size, defaulted and clamped to `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

/// One page of records plus total count and navigation cursors.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub prev_page: Option<i64>,
    pub next_page: Option<i64>,
}

/// Computes the row offset for a page, or `None` when the page lies before
/// the first or the arithmetic overflows `i64`. `page` comes straight from
/// the query string, so both extremes are reachable.
pub fn page_offset(page: i64, limit: i64) -> Option<i64> {
    page.checked_sub(1)
        .and_then(|p| p.checked_mul(limit))
        .filter(|offset| *offset >= 0)
}

/// Computes `(prev_page, next_page)` for an offset-paginated listing:
/// `prev_page` exists iff `page > 1`, `next_page` iff `page` is below the
/// last page (`ceil(total / limit)`).
pub fn page_links(page: i64, limit: i64, total: i64) -> (Option<i64>, Option<i64>) {
    let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
    let prev_page = if page > 1 { Some(page - 1) } else { None };
    let next_page = if page < total_pages { Some(page + 1) } else { None };
    (prev_page, next_page)
}
