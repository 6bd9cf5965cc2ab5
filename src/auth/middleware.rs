use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::gateway::{state::AppState, types::ApiError};

use super::service::Claims;

/// Validate the bearer token and inject [`Claims`] into request extensions.
pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::missing_auth("Missing Authorization header"))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Invalid token format"))?;

    match state.auth.verify_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(ApiError::unauthorized("Invalid or expired token")),
    }
}

/// Gate for the admin panel: managers and admins only. Must be layered
/// after [`jwt_auth_middleware`], which provides the claims.
pub async fn require_staff_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = request
        .extensions()
        .get::<Claims>()
        .ok_or_else(|| ApiError::missing_auth("Missing Authorization header"))?;

    if !claims.is_staff() {
        return Err(ApiError::forbidden("Staff role required"));
    }

    Ok(next.run(request).await)
}
