use axum::{
    Json, Router,
    extract::{Extension, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use tracing::error;

use crate::authz::Actor;
use crate::db::models::TodoList;
use crate::db::services::list_service;
use crate::web::models::CreateListRequest;
use crate::web::{AppState, error::AppError};

async fn get_lists_handler(
    Extension(actor): Extension<Actor>,
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<TodoList>>, AppError> {
    let lists = list_service::get_lists_by_owner(&app_state.db_pool, &actor.id)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to fetch lists");
            AppError::DatabaseError("Failed to fetch lists".to_string())
        })?;
    Ok(Json(lists))
}

async fn create_list_handler(
    Extension(actor): Extension<Actor>,
    State(app_state): State<Arc<AppState>>,
    Json(payload): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<TodoList>), AppError> {
    let list = list_service::create_list(
        &app_state.db_pool,
        &actor.id,
        &payload.title,
        payload.theme_color.unwrap_or_default(),
    )
    .await
    .map_err(|e| {
        error!(error = %e, "failed to create list");
        AppError::DatabaseError("Failed to create list".to_string())
    })?;
    Ok((StatusCode::CREATED, Json(list)))
}

pub fn create_lists_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_lists_handler).post(create_list_handler))
}
