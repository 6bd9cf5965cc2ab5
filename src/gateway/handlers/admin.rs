//! Staff endpoints: product CRUD, stock management, order management.
//!
//! All routes here sit behind `jwt_auth_middleware` + `require_staff_middleware`.
//! A manager's token carries a store affinity; stock writes are scoped to it.
//! Admins have no affinity and may touch everything.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::auth::Claims;
use crate::catalog::{Product, ProductInput, ProductRepository, StockRepository, StockRow};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResult, created, ok};
use crate::orders::{OrderRepository, OrderSummary};

// ============================================================================
// Products
// ============================================================================

pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Product>> {
    match ProductRepository::list_all(state.pool()).await {
        Ok(products) => ok(products),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(input): Json<ProductInput>,
) -> ApiResult<i64> {
    validate_product(&input)?;

    match ProductRepository::create(state.pool(), &input).await {
        Ok(id) => {
            tracing::info!(product_id = id, staff = %claims.sub, "product created");
            created(id)
        }
        Err(e) => ApiError::db_error(format!("Insert failed: {}", e)).into_err(),
    }
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<i64>,
    Json(input): Json<ProductInput>,
) -> ApiResult<()> {
    validate_product(&input)?;

    match ProductRepository::update(state.pool(), product_id, &input).await {
        Ok(true) => ok(()),
        Ok(false) => ApiError::not_found("Product not found").into_err(),
        Err(e) => ApiError::db_error(format!("Update failed: {}", e)).into_err(),
    }
}

/// Deleting products is destructive enough to be admin-only; managers get 403.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(product_id): Path<i64>,
) -> ApiResult<()> {
    if !claims.is_admin() {
        return ApiError::forbidden("Admin role required").into_err();
    }

    match ProductRepository::delete(state.pool(), product_id).await {
        Ok(true) => ok(()),
        Ok(false) => ApiError::not_found("Product not found").into_err(),
        // FK violation: the product appears in historical order lines
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            ApiError::conflict("Product has been ordered and cannot be deleted").into_err()
        }
        Err(e) => ApiError::db_error(format!("Delete failed: {}", e)).into_err(),
    }
}

fn validate_product(input: &ProductInput) -> Result<(), ApiError> {
    if input.name.trim().is_empty() {
        return Err(ApiError::bad_request("Product name must not be empty"));
    }
    if input.price.is_sign_negative() {
        return Err(ApiError::bad_request("Price must not be negative"));
    }
    Ok(())
}

// ============================================================================
// Stock
// ============================================================================

#[derive(Debug, Deserialize, IntoParams)]
pub struct StockListParams {
    pub store_id: Option<i64>,
}

pub async fn list_stock(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<StockListParams>,
) -> ApiResult<Vec<StockRow>> {
    // Managers default to their own store; admins see everything unless
    // they filter explicitly.
    let store_id = params.store_id.or(claims.store_id);

    match StockRepository::list(state.pool(), store_id).await {
        Ok(rows) => ok(rows),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StockUpdateRequest {
    pub store_id: i64,
    pub product_id: i64,
    #[schema(example = 25)]
    pub quantity: i32,
}

pub async fn update_stock(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<StockUpdateRequest>,
) -> ApiResult<()> {
    if req.quantity < 0 {
        return ApiError::bad_request("Quantity must not be negative").into_err();
    }
    if let Some(own_store) = claims.store_id
        && own_store != req.store_id
    {
        return ApiError::forbidden("Stock updates are limited to your own store").into_err();
    }

    match StockRepository::upsert(state.pool(), req.store_id, req.product_id, req.quantity).await {
        Ok(()) => {
            tracing::info!(
                store_id = req.store_id,
                product_id = req.product_id,
                quantity = req.quantity,
                staff = %claims.sub,
                "stock updated"
            );
            ok(())
        }
        // Unknown store or product id
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            ApiError::bad_request("Unknown store or product").into_err()
        }
        Err(e) => ApiError::db_error(format!("Update failed: {}", e)).into_err(),
    }
}

// ============================================================================
// Orders
// ============================================================================

pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderSummary>> {
    match OrderRepository::list_all(state.pool()).await {
        Ok(orders) => ok(orders),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    pub status_id: i32,
}

/// The only mutation an order supports after checkout
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(order_id): Path<i64>,
    Json(req): Json<StatusUpdateRequest>,
) -> ApiResult<()> {
    match OrderRepository::update_status(state.pool(), order_id, req.status_id).await {
        Ok(true) => {
            tracing::info!(
                order_id,
                status_id = req.status_id,
                staff = %claims.sub,
                "order status updated"
            );
            ok(())
        }
        Ok(false) => ApiError::not_found("Order not found").into_err(),
        // Unknown status id
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
            ApiError::bad_request("Unknown status id").into_err()
        }
        Err(e) => ApiError::db_error(format!("Update failed: {}", e)).into_err(),
    }
}
