use axum::{
    body::Body as AxumBody,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{DecodingKey, Validation, decode};
use std::sync::Arc;
use tracing::{error, warn};

use crate::authz::Actor;
use crate::db::services::user_service;
use crate::web::models::Claims;
use crate::web::{AppState, error::AppError};

/// Resolves the acting user for a request: token from the Authorization
/// header first, then the cookie, then a fresh `{id, role}` lookup against
/// the store. Anything short of a resolvable actor is rejected here, before
/// any business logic runs.
pub async fn auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut req: Request<AxumBody>,
    next: Next,
) -> Result<Response, AppError> {
    let jwt_secret = &state.config.jwt_secret;

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|s| s.to_string())
        .or_else(|| jar.get("token").map(|c| c.value().to_string()))
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let token_data = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!(error = ?e, "JWT decoding error during auth middleware.");
        AppError::Unauthorized("Unauthorized".to_string())
    })?;

    let user = user_service::get_user_by_id(&state.db_pool, &token_data.claims.sub)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to resolve actor");
            AppError::DatabaseError("Failed to resolve session".to_string())
        })?
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    let actor = Actor {
        id: user.id,
        role: user.role,
    };
    req.extensions_mut().insert(actor);
    Ok(next.run(req).await)
}
