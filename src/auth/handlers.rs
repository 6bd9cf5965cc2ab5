use axum::{Extension, Json, extract::State};
use std::sync::Arc;
use validator::Validate;

use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult, created, ok};

use super::service::{
    AuthResponse, Claims, LoginRequest, Profile, RegisterRequest, UpdateProfileRequest,
};

/// Register a new customer account
///
/// POST /api/v1/auth/register
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<AuthResponse>),
        (status = 400, description = "Invalid email or password"),
        (status = 409, description = "Email already registered")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<AuthResponse> {
    if let Err(e) = req.validate() {
        return ApiError::bad_request(format!("Invalid registration data: {}", e)).into_err();
    }

    match state.auth.register(req).await {
        Ok(resp) => {
            tracing::info!(user_id = resp.user_id, "user registered");
            created(resp)
        }
        Err(e) => {
            tracing::warn!("registration failed: {}", e);
            Err(e.into())
        }
    }
}

/// Login with email and password
///
/// POST /api/v1/auth/login
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<AuthResponse> {
    match state.auth.login(req).await {
        Ok(resp) => ok(resp),
        Err(e) => {
            tracing::warn!("login failed: {}", e);
            Err(e.into())
        }
    }
}

/// Current user's profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Profile> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::unauthorized("Invalid user ID in token"))?;

    match state.auth.get_profile(user_id).await? {
        Some(profile) => ok(profile),
        None => ApiError::not_found("User not found").into_err(),
    }
}

/// Update the current user's name and phone
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<()> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::unauthorized("Invalid user ID in token"))?;

    if let Err(e) = req.validate() {
        return ApiError::bad_request(format!("Invalid profile data: {}", e)).into_err();
    }

    if state.auth.update_profile(user_id, req).await? {
        ok(())
    } else {
        ApiError::not_found("User not found").into_err()
    }
}
