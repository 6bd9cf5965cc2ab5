//! Customer order endpoints: checkout, own orders, order detail

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use std::sync::Arc;

use crate::auth::Claims;
use crate::checkout::{CheckoutRequest, CheckoutService, OrderReceipt};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult, created, ok};
use crate::orders::{OrderDetail, OrderRepository, OrderSummary};

/// Place an order (checkout)
///
/// POST /api/v1/orders
///
/// The request carries product ids and quantities only; unit prices and the
/// total are resolved server-side inside the transaction.
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order placed", body = ApiResponse<OrderReceipt>),
        (status = 400, description = "Empty cart, bad quantity, or unknown store"),
        (status = 409, description = "Insufficient stock"),
        (status = 500, description = "Storage failure; safe to retry the identical cart")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CheckoutRequest>,
) -> ApiResult<OrderReceipt> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::unauthorized("Invalid user ID in token"))?;

    match CheckoutService::place_order(state.pool(), user_id, req).await {
        Ok(receipt) => created(receipt),
        Err(e) => {
            tracing::warn!(user_id, "checkout declined: {}", e);
            Err(e.into())
        }
    }
}

/// Current user's orders, newest first
///
/// GET /api/v1/orders/my
#[utoipa::path(
    get,
    path = "/api/v1/orders/my",
    responses((status = 200, description = "Own orders", body = ApiResponse<Vec<OrderSummary>>)),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn get_my_orders(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Vec<OrderSummary>> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::unauthorized("Invalid user ID in token"))?;

    match OrderRepository::list_for_user(state.pool(), user_id).await {
        Ok(orders) => ok(orders),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

/// One order with its lines; owner or staff only
///
/// GET /api/v1/orders/{order_id}
#[utoipa::path(
    get,
    path = "/api/v1/orders/{order_id}",
    params(("order_id" = i64, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order detail", body = ApiResponse<OrderDetail>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Unknown order")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(order_id): Path<i64>,
) -> ApiResult<OrderDetail> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| ApiError::unauthorized("Invalid user ID in token"))?;

    let detail = OrderRepository::get_with_items(state.pool(), order_id)
        .await
        .map_err(|e| ApiError::db_error(format!("Query failed: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Order not found"))?;

    if detail.user_id != user_id && !claims.is_staff() {
        return ApiError::forbidden("Not your order").into_err();
    }

    ok(detail)
}
