use sqlx::{PgPool, Result};

use crate::db::enums::ListTheme;
use crate::db::models::TodoList;

const LIST_COLUMNS: &str = "id, owner_id, title, theme_color, order_index, created_on, updated_on";

/// Retrieves all lists belonging to an owner, newest first.
pub async fn get_lists_by_owner(pool: &PgPool, owner_id: &str) -> Result<Vec<TodoList>> {
    sqlx::query_as::<_, TodoList>(&format!(
        "SELECT {LIST_COLUMNS} FROM todo_lists WHERE owner_id = $1 ORDER BY created_on DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await
}

/// Creates a new list for an owner and returns the created row.
pub async fn create_list(
    pool: &PgPool,
    owner_id: &str,
    title: &str,
    theme_color: ListTheme,
) -> Result<TodoList> {
    sqlx::query_as::<_, TodoList>(&format!(
        "INSERT INTO todo_lists (owner_id, title, theme_color) \
         VALUES ($1, $2, $3) \
         RETURNING {LIST_COLUMNS}"
    ))
    .bind(owner_id)
    .bind(title)
    .bind(theme_color)
    .fetch_one(pool)
    .await
}
