//! Data models for persisted orders

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// Order lifecycle status reference row (`new`, `processing`, ...).
/// Transitions happen only through the admin status update.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct OrderStatus {
    pub id: i32,
    pub name: String,
}

/// One order as listed (customer profile or admin panel)
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct OrderSummary {
    pub id: i64,
    pub user_id: i64,
    pub store_id: i64,
    pub status: String,
    #[schema(value_type = String, example = "250.00")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    /// Customer email, present in the admin listing only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

/// One line of an order with the price captured at purchase time
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct OrderLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i32,
    #[schema(value_type = String, example = "100.00")]
    pub price_at_purchase: Decimal,
}

/// Full order view: header plus lines
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetail {
    pub id: i64,
    pub user_id: i64,
    pub store_id: i64,
    pub status: String,
    #[schema(value_type = String, example = "250.00")]
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderLine>,
}
