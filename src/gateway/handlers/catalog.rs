//! Public catalog endpoints: stores, categories, products, order statuses

use axum::extract::{Query, State};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::catalog::{
    CatalogProduct, Category, CategoryRepository, ProductRepository, ProductSort, Store,
    StoreRepository,
};
use crate::gateway::state::AppState;
use crate::gateway::types::{ApiError, ApiResponse, ApiResult, ok};
use crate::orders::{OrderStatus, OrderStatusRepository};

/// All stores
///
/// GET /api/v1/catalog/stores
#[utoipa::path(
    get,
    path = "/api/v1/catalog/stores",
    responses((status = 200, description = "Store list", body = ApiResponse<Vec<Store>>)),
    tag = "Catalog"
)]
pub async fn get_stores(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Store>> {
    match StoreRepository::load_all(state.pool()).await {
        Ok(stores) => ok(stores),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

/// All categories
///
/// GET /api/v1/catalog/categories
#[utoipa::path(
    get,
    path = "/api/v1/catalog/categories",
    responses((status = 200, description = "Category list", body = ApiResponse<Vec<Category>>)),
    tag = "Catalog"
)]
pub async fn get_categories(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Category>> {
    match CategoryRepository::load_all(state.pool()).await {
        Ok(categories) => ok(categories),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

/// Order status reference list
///
/// GET /api/v1/catalog/order-statuses
#[utoipa::path(
    get,
    path = "/api/v1/catalog/order-statuses",
    responses((status = 200, description = "Status list", body = ApiResponse<Vec<OrderStatus>>)),
    tag = "Catalog"
)]
pub async fn get_order_statuses(State(state): State<Arc<AppState>>) -> ApiResult<Vec<OrderStatus>> {
    match OrderStatusRepository::load_all(state.pool()).await {
        Ok(statuses) => ok(statuses),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductListParams {
    /// Store whose stock to browse (required)
    pub store_id: Option<i64>,
    pub category_id: Option<i64>,
    /// `price` | `name`
    pub sort_by: Option<String>,
    /// `asc` | `desc`
    pub order: Option<String>,
}

/// In-stock products for one store
///
/// GET /api/v1/catalog/products?store_id=&category_id=&sort_by=&order=
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products",
    params(ProductListParams),
    responses(
        (status = 200, description = "Products in stock at the store", body = ApiResponse<Vec<CatalogProduct>>),
        (status = 400, description = "Missing store_id")
    ),
    tag = "Catalog"
)]
pub async fn get_products(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProductListParams>,
) -> ApiResult<Vec<CatalogProduct>> {
    let store_id = params
        .store_id
        .ok_or_else(|| ApiError::bad_request("store_id parameter is required"))?;

    // Unknown sort fields are ignored rather than rejected; the whitelist
    // lives in ProductSort.
    let sort = ProductSort::from_params(params.sort_by.as_deref(), params.order.as_deref());

    match ProductRepository::list_in_stock(state.pool(), store_id, params.category_id, sort).await {
        Ok(products) => ok(products),
        Err(e) => ApiError::db_error(format!("Query failed: {}", e)).into_err(),
    }
}
