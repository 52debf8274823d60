use axum::{
    Json, Router,
    extract::{Extension, State},
    routing::get,
};
use std::sync::Arc;
use tracing::error;

use crate::authz::Actor;
use crate::db::enums::Role;
use crate::db::services::user_service::{self, UserOverview};
use crate::web::{AppState, error::AppError};

/// Team overview for elevated roles: every user with their task statistics
/// and most recent tasks.
async fn list_users_handler(
    Extension(actor): Extension<Actor>,
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<UserOverview>>, AppError> {
    match actor.role {
        Role::Manager | Role::Admin => {}
        Role::User => return Err(AppError::Forbidden("Forbidden".to_string())),
    }

    let users = user_service::list_user_overviews(&app_state.db_pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to fetch users");
            AppError::DatabaseError("Failed to fetch users".to_string())
        })?;
    Ok(Json(users))
}

pub fn create_users_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(list_users_handler))
}
