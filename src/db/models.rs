use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::enums::{ListTheme, Role, TodoState};

/// Represents a user account. Corresponds to the `users` table.
/// Role changes happen only out-of-band; there is no role-change endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Represents a todo list. Corresponds to the `todo_lists` table.
/// Lists are never transferred between owners; deletion happens only by
/// cascading from the owning user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: Uuid,
    pub owner_id: String,
    pub title: String,
    pub theme_color: ListTheme,
    pub order_index: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Represents a todo. Corresponds to the `todos` table.
/// Every todo has exactly one owner and one list at all times.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub owner_id: String,
    pub list_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub state: TodoState,
    pub due_at: Option<DateTime<Utc>>,
    pub order_index: i32,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
}

/// Public identity of a todo's owner, attached to read results for elevated
/// roles. A read-side augmentation, not a security boundary.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerIdentity {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
}

/// A todo record as returned by the list operation. `owner` is present only
/// when the requesting actor's read scope carries owner identity.
#[derive(Debug, Clone, Serialize)]
pub struct TodoWithOwner {
    #[serde(flatten)]
    pub todo: Todo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<OwnerIdentity>,
}
