use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Result};
use uuid::Uuid;

use crate::db::enums::{Role, TodoState};
use crate::db::models::User;

const USER_COLUMNS: &str =
    "id, full_name AS name, email, user_role AS role, created_on, updated_on";

const RECENT_TASKS_LIMIT: i64 = 5;

/// Retrieves a user by id. The auth middleware calls this per request so role
/// changes made out-of-band take effect immediately.
pub async fn get_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Per-state breakdown of a user's todos. Counts cover all their todos, not
/// just the recent sample.
#[derive(Debug, Clone, Serialize)]
pub struct TaskStats {
    pub draft: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub total: i64,
}

/// A recent task in the overview: just enough to render a dashboard row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: Uuid,
    pub name: String,
    pub state: TodoState,
    pub due_at: Option<DateTime<Utc>>,
    pub created_on: DateTime<Utc>,
}

/// A user with task statistics and their most recent tasks, for the
/// manager/admin team overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOverview {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_on: DateTime<Utc>,
    pub task_count: i64,
    pub task_stats: TaskStats,
    pub tasks: Vec<TaskSummary>,
}

#[derive(Debug, FromRow)]
struct UserStatsRow {
    id: String,
    name: Option<String>,
    email: String,
    role: Role,
    created_on: DateTime<Utc>,
    task_count: i64,
    draft_count: i64,
    in_progress_count: i64,
    completed_count: i64,
}

/// Retrieves all users, newest first, each with the number of todos they own,
/// a per-state breakdown, and their most recent tasks.
pub async fn list_user_overviews(pool: &PgPool) -> Result<Vec<UserOverview>> {
    let rows: Vec<UserStatsRow> = sqlx::query_as(
        "SELECT u.id, u.full_name AS name, u.email, u.user_role AS role, u.created_on, \
                COUNT(t.id) AS task_count, \
                COUNT(t.id) FILTER (WHERE t.state = 'draft') AS draft_count, \
                COUNT(t.id) FILTER (WHERE t.state = 'in_progress') AS in_progress_count, \
                COUNT(t.id) FILTER (WHERE t.state = 'completed') AS completed_count \
         FROM users u \
         LEFT JOIN todos t ON t.owner_id = u.id \
         GROUP BY u.id, u.full_name, u.email, u.user_role, u.created_on \
         ORDER BY u.created_on DESC",
    )
    .fetch_all(pool)
    .await?;

    let mut overviews = Vec::with_capacity(rows.len());
    for row in rows {
        let tasks = recent_tasks_for_owner(pool, &row.id).await?;
        overviews.push(UserOverview {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            created_on: row.created_on,
            task_count: row.task_count,
            task_stats: TaskStats {
                draft: row.draft_count,
                in_progress: row.in_progress_count,
                completed: row.completed_count,
                total: row.task_count,
            },
            tasks,
        });
    }
    Ok(overviews)
}

async fn recent_tasks_for_owner(pool: &PgPool, owner_id: &str) -> Result<Vec<TaskSummary>> {
    sqlx::query_as::<_, TaskSummary>(
        "SELECT id, name, state, due_at, created_on FROM todos \
         WHERE owner_id = $1 ORDER BY created_on DESC LIMIT $2",
    )
    .bind(owner_id)
    .bind(RECENT_TASKS_LIMIT)
    .fetch_all(pool)
    .await
}
