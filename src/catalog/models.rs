//! Data models for the catalog domain

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A physical retail location with its own stock levels
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Store {
    pub id: i64,
    pub address: String,
    pub city: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Full product row, as managed through the admin panel
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "199.90")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Product as listed in a store's catalog: joined with category name and
/// the quantity on hand at the requested store.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[schema(value_type = String, example = "199.90")]
    pub price: Decimal,
    pub image_url: Option<String>,
    pub category_name: Option<String>,
    pub quantity: i32,
}

/// One `(store, product)` stock row, joined with names for the admin view
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct StockRow {
    pub store_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub city: String,
    pub quantity: i32,
}

// ============================================================================
// Catalog sorting - whitelisted ORDER BY construction
// ============================================================================

/// Sortable catalog columns. The enum is the whitelist: anything the client
/// sends that does not parse here never reaches the SQL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Name,
}

impl SortField {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "price" => Some(SortField::Price),
            "name" => Some(SortField::Name),
            _ => None,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Validated sort specification for the product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl ProductSort {
    /// Build from raw query parameters. An unknown `sort_by` yields `None`
    /// (unsorted); an unknown `order` falls back to ascending, matching the
    /// permissive handling the storefront always relied on.
    pub fn from_params(sort_by: Option<&str>, order: Option<&str>) -> Option<Self> {
        let field = SortField::parse(sort_by?)?;
        let order = order.and_then(SortOrder::parse).unwrap_or_default();
        Some(ProductSort { field, order })
    }

    pub fn to_order_by(self) -> String {
        format!("ORDER BY p.{} {}", self.field.column(), self.order.keyword())
    }
}

/// Payload for creating or replacing a product
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[schema(value_type = String, example = "199.90")]
    pub price: Decimal,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_field_whitelist() {
        assert_eq!(SortField::parse("price"), Some(SortField::Price));
        assert_eq!(SortField::parse("name"), Some(SortField::Name));
        // Injection attempts never parse
        assert_eq!(SortField::parse("price; DROP TABLE products"), None);
        assert_eq!(SortField::parse("created_at"), None);
        assert_eq!(SortField::parse(""), None);
    }

    #[test]
    fn test_sort_order_case_insensitive() {
        assert_eq!(SortOrder::parse("DESC"), Some(SortOrder::Desc));
        assert_eq!(SortOrder::parse("asc"), Some(SortOrder::Asc));
        assert_eq!(SortOrder::parse("sideways"), None);
    }

    #[test]
    fn test_product_sort_from_params() {
        let sort = ProductSort::from_params(Some("price"), Some("desc")).unwrap();
        assert_eq!(sort.to_order_by(), "ORDER BY p.price DESC");

        // Bad order falls back to ASC rather than rejecting the request
        let sort = ProductSort::from_params(Some("name"), Some("bogus")).unwrap();
        assert_eq!(sort.to_order_by(), "ORDER BY p.name ASC");

        // No sort_by means no ordering at all
        assert!(ProductSort::from_params(None, Some("desc")).is_none());
        assert!(ProductSort::from_params(Some("evil"), None).is_none());
    }
}
