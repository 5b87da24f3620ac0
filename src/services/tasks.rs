use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::task::{page_links, page_offset};
use crate::models::{
    CreateTaskRequest, Paginated, Task, TaskFilter, TaskPriority, TaskStatus, TaskWithAssignee,
    UpdateTaskRequest, UserRef,
};
use crate::services::UserService;

const TASK_COLUMNS: &str = "id, title, description, status, priority, due_date, completed_at, \
                            created_at, updated_at, assigned_to, created_by";

/// Flat row for assignee-joined reads; mapped into [`TaskWithAssignee`].
#[derive(FromRow)]
struct TaskAssigneeRow {
    id: Uuid,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Uuid,
    assignee_id: Uuid,
    assignee_email: String,
}

impl From<TaskAssigneeRow> for TaskWithAssignee {
    fn from(row: TaskAssigneeRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            due_date: row.due_date,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
            assigned_to: UserRef {
                id: row.assignee_id,
                email: row.assignee_email,
            },
            created_by: row.created_by,
        }
    }
}

/// Builds the conjunctive WHERE clause for a task listing. Returns the clause
/// (empty when no filters apply) and the next free parameter index, so the
/// caller can append LIMIT/OFFSET placeholders.
fn build_filter_clause(filter: &TaskFilter) -> (String, usize) {
    let mut conditions: Vec<String> = Vec::new();
    let mut param = 1;

    if filter.status.is_some() {
        conditions.push(format!("status = ${}", param));
        param += 1;
    }
    if filter.priority.is_some() {
        conditions.push(format!("priority = ${}", param));
        param += 1;
    }
    if filter.search.is_some() {
        conditions.push(format!(
            "(title ILIKE ${} OR description ILIKE ${})",
            param,
            param + 1
        ));
        param += 2;
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };
    (clause, param)
}

/// Task store access: creation, filtered/paginated listing, and
/// ownership-checked reads and updates.
#[derive(Clone)]
pub struct TaskService {
    pool: PgPool,
    users: UserService,
}

impl TaskService {
    pub fn new(pool: PgPool, users: UserService) -> Self {
        Self { pool, users }
    }

    /// Creates a task. The assignee reference is resolved through the user
    /// directory first; the creator is the authenticated caller.
    pub async fn create(
        &self,
        dto: CreateTaskRequest,
        created_by: Uuid,
    ) -> Result<Task, AppError> {
        match self.users.find_one(dto.assigned_to).await {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                return Err(AppError::NotFound(format!(
                    "User with ID {} not found",
                    dto.assigned_to
                )));
            }
            Err(other) => return Err(other),
        }

        let sql = format!(
            "INSERT INTO task (title, description, status, priority, due_date, assigned_to, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {}",
            TASK_COLUMNS
        );
        let task = sqlx::query_as::<_, Task>(&sql)
            .bind(&dto.title)
            .bind(&dto.description)
            .bind(dto.status.unwrap_or(TaskStatus::Todo))
            .bind(dto.priority.unwrap_or(TaskPriority::Medium))
            .bind(dto.due_date)
            .bind(dto.assigned_to)
            .bind(created_by)
            .fetch_one(&self.pool)
            .await?;

        Ok(task)
    }

    /// Offset-paginated listing with optional status, priority and search
    /// filters. A page below 1 (or past the end) yields an empty page with
    /// the correct total; navigation cursors follow from the total count.
    pub async fn find_all(&self, filter: TaskFilter) -> Result<Paginated<Task>, AppError> {
        let page = filter.page();
        let limit = filter.limit();
        let (where_clause, next_param) = build_filter_clause(&filter);
        let search_pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let count_sql = format!("SELECT COUNT(*) FROM task{}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(status) = filter.status {
            count_query = count_query.bind(status);
        }
        if let Some(priority) = filter.priority {
            count_query = count_query.bind(priority);
        }
        if let Some(pattern) = &search_pattern {
            count_query = count_query.bind(pattern.clone()).bind(pattern.clone());
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let data = if let Some(offset) = page_offset(page, limit) {
            let data_sql = format!(
                "SELECT {} FROM task{} ORDER BY created_at DESC LIMIT ${} OFFSET ${}",
                TASK_COLUMNS,
                where_clause,
                next_param,
                next_param + 1
            );
            let mut data_query = sqlx::query_as::<_, Task>(&data_sql);
            if let Some(status) = filter.status {
                data_query = data_query.bind(status);
            }
            if let Some(priority) = filter.priority {
                data_query = data_query.bind(priority);
            }
            if let Some(pattern) = &search_pattern {
                data_query = data_query.bind(pattern.clone()).bind(pattern.clone());
            }
            data_query
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
        } else {
            Vec::new()
        };

        let (prev_page, next_page) = page_links(page, limit, total);

        Ok(Paginated {
            data,
            total,
            page,
            limit,
            prev_page,
            next_page,
        })
    }

    /// Fetches a task with its assignee joined, filtered to the caller's own
    /// assignments. "Does not exist" and "exists but is not yours" are
    /// deliberately indistinguishable.
    pub async fn find_one(
        &self,
        id: Uuid,
        current_user_id: Uuid,
    ) -> Result<TaskWithAssignee, AppError> {
        let row = sqlx::query_as::<_, TaskAssigneeRow>(
            "SELECT t.id, t.title, t.description, t.status, t.priority, t.due_date, \
                    t.completed_at, t.created_at, t.updated_at, t.created_by, \
                    u.id AS assignee_id, u.email AS assignee_email \
             FROM task t \
             JOIN users u ON u.id = t.assigned_to \
             WHERE t.id = $1 AND t.assigned_to = $2",
        )
        .bind(id)
        .bind(current_user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TaskWithAssignee::from).ok_or_else(|| {
            AppError::NotFound(format!("Task with ID {} not found or access denied", id))
        })
    }

    /// Partial update, permitted only to the task's current assignee. Merges
    /// the patch onto the stored row, refreshes `updated_at`, and responds
    /// with a minimal `{id, email}` assignee projection.
    pub async fn update(
        &self,
        id: Uuid,
        patch: UpdateTaskRequest,
        current_user_id: Uuid,
    ) -> Result<TaskWithAssignee, AppError> {
        let row = sqlx::query_as::<_, TaskAssigneeRow>(
            "SELECT t.id, t.title, t.description, t.status, t.priority, t.due_date, \
                    t.completed_at, t.created_at, t.updated_at, t.created_by, \
                    u.id AS assignee_id, u.email AS assignee_email \
             FROM task t \
             JOIN users u ON u.id = t.assigned_to \
             WHERE t.id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Task with ID \"{}\" not found", id)))?;

        if row.assignee_id != current_user_id {
            return Err(AppError::Unauthorized(
                "You are not authorized to update this task".into(),
            ));
        }

        let title = patch.title.unwrap_or(row.title);
        let description = patch.description.unwrap_or(row.description);
        let status = patch.status.unwrap_or(row.status);
        let priority = patch.priority.unwrap_or(row.priority);
        let due_date = patch.due_date.or(row.due_date);
        let completed_at = patch.completed_at.or(row.completed_at);

        let sql = format!(
            "UPDATE task SET title = $1, description = $2, status = $3, priority = $4, \
                    due_date = $5, completed_at = $6, updated_at = $7 \
             WHERE id = $8 \
             RETURNING {}",
            TASK_COLUMNS
        );
        let updated = sqlx::query_as::<_, Task>(&sql)
            .bind(&title)
            .bind(&description)
            .bind(status)
            .bind(priority)
            .bind(due_date)
            .bind(completed_at)
            .bind(Utc::now())
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(TaskWithAssignee {
            id: updated.id,
            title: updated.title,
            description: updated.description,
            status: updated.status,
            priority: updated.priority,
            due_date: updated.due_date,
            completed_at: updated.completed_at,
            created_at: updated.created_at,
            updated_at: updated.updated_at,
            assigned_to: UserRef {
                id: row.assignee_id,
                email: row.assignee_email,
            },
            created_by: updated.created_by,
        })
    }

    /// Deletes a task by id. Unlike `update`, there is no ownership check:
    /// any authenticated caller may delete any task.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM task WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        if existing.is_none() {
            return Err(AppError::NotFound(format!("Task with ID {} not found", id)));
        }

        sqlx::query("DELETE FROM task WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_filter_clause_empty() {
        let (clause, next) = build_filter_clause(&TaskFilter::default());
        assert_eq!(clause, "");
        assert_eq!(next, 1);
    }

    #[test]
    fn test_filter_clause_single_predicate() {
        let filter = TaskFilter {
            status: Some(TaskStatus::Todo),
            ..TaskFilter::default()
        };
        let (clause, next) = build_filter_clause(&filter);
        assert_eq!(clause, " WHERE status = $1");
        assert_eq!(next, 2);
    }

    #[test]
    fn test_filter_clause_conjunction_with_search() {
        let filter = TaskFilter {
            status: Some(TaskStatus::InProgress),
            priority: Some(TaskPriority::High),
            search: Some("report".to_string()),
            ..TaskFilter::default()
        };
        let (clause, next) = build_filter_clause(&filter);
        assert_eq!(
            clause,
            " WHERE status = $1 AND priority = $2 AND (title ILIKE $3 OR description ILIKE $4)"
        );
        assert_eq!(next, 5);
    }
}
