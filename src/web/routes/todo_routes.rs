use axum::{
    Json, Router,
    body::Bytes,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::authz::{self, Actor};
use crate::db::models::{Todo, TodoWithOwner};
use crate::db::services::todo_service::{self, NewTodo, TodoPatch};
use crate::web::models::{CreateTodoRequest, ListTodosQuery, UpdateTodoRequest};
use crate::web::{AppState, error::AppError};

// --- Route Handlers ---

async fn list_todos_handler(
    Extension(actor): Extension<Actor>,
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ListTodosQuery>,
) -> Result<Json<Vec<TodoWithOwner>>, AppError> {
    let scope = authz::read_scope(&actor, params.list_id);
    let todos = todo_service::list_todos(&app_state.db_pool, &scope)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to fetch todos");
            AppError::DatabaseError("Failed to fetch todos".to_string())
        })?;
    Ok(Json(todos))
}

async fn create_todo_handler(
    Extension(actor): Extension<Actor>,
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    // The role is checked before the body is even parsed, so a denied actor
    // gets the denial rather than a payload error.
    authz::authorize_create(&actor)?;

    let payload: CreateTodoRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::InvalidInput(format!("Invalid todo payload: {e}")))?;

    let due_at = payload.due_at.as_deref().map(parse_due_at).transpose()?;

    // Ownership is forced to the actor; the payload carries no trusted owner.
    let todo = todo_service::create_todo(
        &app_state.db_pool,
        NewTodo {
            owner_id: actor.id.clone(),
            list_id: payload.list_id,
            name: payload.name,
            description: payload.description,
            state: payload.state.unwrap_or_default(),
            due_at,
        },
    )
    .await
    .map_err(|e| {
        error!(error = %e, "failed to create todo");
        AppError::DatabaseError("Failed to create todo".to_string())
    })?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn update_todo_handler(
    Extension(actor): Extension<Actor>,
    State(app_state): State<Arc<AppState>>,
    Path(todo_id): Path<Uuid>,
    Json(payload): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, AppError> {
    let existing = load_todo(&app_state, todo_id).await?;
    authz::authorize_update(&actor, &existing)?;

    let due_at = payload.due_at.as_deref().map(parse_due_at).transpose()?;
    let patch = TodoPatch {
        name: payload.name,
        description: payload.description,
        state: payload.state,
        due_at,
    };

    let updated = todo_service::update_todo(&app_state.db_pool, todo_id, &patch)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to update todo");
            AppError::DatabaseError("Failed to update todo".to_string())
        })?;
    Ok(Json(updated))
}

async fn delete_todo_handler(
    Extension(actor): Extension<Actor>,
    State(app_state): State<Arc<AppState>>,
    Path(todo_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let todo = load_todo(&app_state, todo_id).await?;
    authz::authorize_delete(&actor, &todo)?;

    todo_service::delete_todo(&app_state.db_pool, todo_id)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to delete todo");
            AppError::DatabaseError("Failed to delete todo".to_string())
        })?;
    Ok(Json(
        serde_json::json!({ "message": "Todo deleted successfully" }),
    ))
}

// --- Helpers ---

/// Loads the target todo before any decision is evaluated (404 if absent).
async fn load_todo(app_state: &AppState, todo_id: Uuid) -> Result<Todo, AppError> {
    todo_service::get_todo_by_id(&app_state.db_pool, todo_id)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to load todo");
            AppError::DatabaseError("Failed to fetch todos".to_string())
        })?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))
}

fn parse_due_at(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::InvalidInput(format!("Invalid dueAt timestamp: {raw}")))
}

// --- Router ---

pub fn create_todos_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_todos_handler).post(create_todo_handler))
        .route(
            "/{todo_id}",
            axum::routing::patch(update_todo_handler).delete(delete_todo_handler),
        )
}
