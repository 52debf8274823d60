use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Result};
use uuid::Uuid;

use crate::authz::TodoReadScope;
use crate::db::enums::TodoState;
use crate::db::models::{OwnerIdentity, Todo, TodoWithOwner};

const TODO_COLUMNS: &str =
    "id, owner_id, list_id, name, description, state, due_at, order_index, created_on, updated_on";

/// Fields for a new todo row. `owner_id` is always the acting user's id by the
/// time it reaches the store; the engine forces it upstream.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub owner_id: String,
    pub list_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub state: TodoState,
    pub due_at: Option<DateTime<Utc>>,
}

/// Whitelisted mutable fields for a partial update. Absent fields are left
/// untouched; `owner_id`, `list_id` and `id` are deliberately not here.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub name: Option<String>,
    /// `Some(None)` clears the description; outer `None` leaves it untouched.
    pub description: Option<Option<String>>,
    pub state: Option<TodoState>,
    pub due_at: Option<DateTime<Utc>>,
}

/// Row shape for the elevated read path: the todo plus aliased owner columns
/// from the joined `users` row.
#[derive(Debug, FromRow)]
struct TodoOwnerRow {
    #[sqlx(flatten)]
    todo: Todo,
    owner_name: Option<String>,
    owner_email: String,
}

/// Renders the read query for a scope. The scope is built once by the
/// authorization engine and applied here verbatim; both filters combine with
/// AND and ordering is always newest-first.
fn build_list_query(scope: &TodoReadScope) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(if scope.with_owner_identity {
        "SELECT t.*, u.full_name AS owner_name, u.email AS owner_email \
         FROM todos t INNER JOIN users u ON u.id = t.owner_id"
    } else {
        "SELECT t.* FROM todos t"
    });

    if let Some(owner_id) = &scope.owner_scope {
        qb.push(" WHERE t.owner_id = ").push_bind(owner_id.clone());
    }
    if let Some(list_id) = scope.list_scope {
        qb.push(if scope.owner_scope.is_some() {
            " AND t.list_id = "
        } else {
            " WHERE t.list_id = "
        })
        .push_bind(list_id);
    }
    qb.push(" ORDER BY t.created_on DESC");
    qb
}

/// Lists todos visible under the given read scope, owner identity attached
/// when the scope carries it.
pub async fn list_todos(pool: &PgPool, scope: &TodoReadScope) -> Result<Vec<TodoWithOwner>> {
    let mut qb = build_list_query(scope);
    if scope.with_owner_identity {
        let rows: Vec<TodoOwnerRow> = qb.build_query_as().fetch_all(pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let owner = OwnerIdentity {
                    id: row.todo.owner_id.clone(),
                    name: row.owner_name,
                    email: row.owner_email,
                };
                TodoWithOwner {
                    todo: row.todo,
                    owner: Some(owner),
                }
            })
            .collect())
    } else {
        let todos: Vec<Todo> = qb.build_query_as().fetch_all(pool).await?;
        Ok(todos
            .into_iter()
            .map(|todo| TodoWithOwner { todo, owner: None })
            .collect())
    }
}

/// Retrieves a single todo by id.
pub async fn get_todo_by_id(pool: &PgPool, todo_id: Uuid) -> Result<Option<Todo>> {
    sqlx::query_as::<_, Todo>(&format!(
        "SELECT {TODO_COLUMNS} FROM todos WHERE id = $1"
    ))
    .bind(todo_id)
    .fetch_optional(pool)
    .await
}

/// Inserts a new todo and returns the created row.
pub async fn create_todo(pool: &PgPool, new_todo: NewTodo) -> Result<Todo> {
    sqlx::query_as::<_, Todo>(&format!(
        "INSERT INTO todos (owner_id, list_id, name, description, state, due_at) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {TODO_COLUMNS}"
    ))
    .bind(new_todo.owner_id)
    .bind(new_todo.list_id)
    .bind(new_todo.name)
    .bind(new_todo.description)
    .bind(new_todo.state)
    .bind(new_todo.due_at)
    .fetch_one(pool)
    .await
}

/// Empty-string descriptions are stored as NULL.
fn normalize_description(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

/// Renders the partial UPDATE for a patch. Only provided fields appear in the
/// SET clause; `updated_on` is always refreshed.
fn build_update_query(
    todo_id: Uuid,
    patch: &TodoPatch,
    now: DateTime<Utc>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE todos SET updated_on = ");
    qb.push_bind(now);
    if let Some(name) = &patch.name {
        qb.push(", name = ").push_bind(name.clone());
    }
    if let Some(description) = &patch.description {
        qb.push(", description = ")
            .push_bind(description.as_deref().and_then(normalize_description));
    }
    if let Some(state) = patch.state {
        qb.push(", state = ").push_bind(state);
    }
    if let Some(due_at) = patch.due_at {
        qb.push(", due_at = ").push_bind(due_at);
    }
    qb.push(" WHERE id = ").push_bind(todo_id);
    qb.push(format!(" RETURNING {TODO_COLUMNS}"));
    qb
}

/// Applies a partial update to a todo and returns the updated row. An empty
/// patch still refreshes `updated_on` and nothing else.
pub async fn update_todo(pool: &PgPool, todo_id: Uuid, patch: &TodoPatch) -> Result<Todo> {
    let mut qb = build_update_query(todo_id, patch, Utc::now());
    qb.build_query_as().fetch_one(pool).await
}

/// Deletes a todo by id, returning the number of rows removed.
pub async fn delete_todo(pool: &PgPool, todo_id: Uuid) -> Result<u64> {
    let rows_affected = sqlx::query("DELETE FROM todos WHERE id = $1")
        .bind(todo_id)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows_affected)
}
