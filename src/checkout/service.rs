//! Order placement: the one transactional procedure in the system.
//!
//! Everything runs inside a single Postgres transaction. Stock rows are
//! locked with `SELECT ... FOR UPDATE` in ascending product id order, so
//! two concurrent checkouts over overlapping carts always acquire locks in
//! the same sequence. Every early return drops the transaction handle,
//! which rolls it back; the database is only mutated on the commit path.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use utoipa::ToSchema;

use super::error::CheckoutError;

/// One cart line as submitted by the client.
///
/// Deliberately carries no price field: unit prices are resolved from the
/// catalog inside the transaction and cannot be tampered with.
#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
pub struct CartLine {
    pub product_id: i64,
    #[schema(example = 2)]
    pub quantity: i32,
}

/// Checkout request body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub store_id: i64,
    pub items: Vec<CartLine>,
}

/// Result of a successful checkout
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderReceipt {
    pub order_id: i64,
    #[schema(value_type = String, example = "250.00")]
    pub total_price: Decimal,
}

pub struct CheckoutService;

impl CheckoutService {
    /// Place an order: verify stock, capture prices, persist the order and
    /// its lines, decrement stock. Atomic: either the full order exists and
    /// every stock row was decremented, or nothing changed.
    pub async fn place_order(
        pool: &PgPool,
        user_id: i64,
        req: CheckoutRequest,
    ) -> Result<OrderReceipt, CheckoutError> {
        // Reject malformed carts before opening a transaction.
        let lines = normalize_lines(&req.items)?;

        let mut tx = pool.begin().await?;

        let store = sqlx::query(r#"SELECT id FROM stores WHERE id = $1"#)
            .bind(req.store_id)
            .fetch_optional(&mut *tx)
            .await?;
        if store.is_none() {
            return Err(CheckoutError::UnknownStore(req.store_id));
        }

        // Lock stock rows in ascending product id order, verify coverage,
        // and capture the current catalog price per line.
        let mut priced = Vec::with_capacity(lines.len());
        for line in &lines {
            let stock = sqlx::query(
                r#"SELECT quantity FROM store_products
                   WHERE store_id = $1 AND product_id = $2
                   FOR UPDATE"#,
            )
            .bind(req.store_id)
            .bind(line.product_id)
            .fetch_optional(&mut *tx)
            .await?;

            // A product the store does not carry counts as zero available.
            let available = stock.map(|r| r.get::<i32, _>("quantity")).unwrap_or(0);
            if available < line.quantity {
                return Err(CheckoutError::InsufficientStock {
                    product_id: line.product_id,
                    available,
                });
            }

            let price: Decimal = sqlx::query(r#"SELECT price FROM products WHERE id = $1"#)
                .bind(line.product_id)
                .fetch_one(&mut *tx)
                .await?
                .get("price");

            priced.push(PricedLine {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: price,
            });
        }

        let total = compute_total(&priced);

        // Initial status is the lowest-id reference row (seeded "new").
        let status_id: i32 = sqlx::query(r#"SELECT id FROM order_statuses ORDER BY id LIMIT 1"#)
            .fetch_one(&mut *tx)
            .await?
            .get("id");

        let order_id: i64 = sqlx::query(
            r#"INSERT INTO orders (user_id, store_id, status_id, total_price)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(user_id)
        .bind(req.store_id)
        .bind(status_id)
        .bind(total)
        .fetch_one(&mut *tx)
        .await?
        .get("id");

        for line in &priced {
            sqlx::query(
                r#"INSERT INTO order_items (order_id, product_id, quantity, price_at_purchase)
                   VALUES ($1, $2, $3, $4)"#,
            )
            .bind(order_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.unit_price)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                r#"UPDATE store_products SET quantity = quantity - $1
                   WHERE store_id = $2 AND product_id = $3"#,
            )
            .bind(line.quantity)
            .bind(req.store_id)
            .bind(line.product_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            order_id,
            user_id,
            store_id = req.store_id,
            %total,
            lines = priced.len(),
            "order placed"
        );

        Ok(OrderReceipt {
            order_id,
            total_price: total,
        })
    }
}

/// A cart line with its catalog price captured inside the transaction
#[derive(Debug, Clone, Copy)]
struct PricedLine {
    product_id: i64,
    quantity: i32,
    unit_price: Decimal,
}

/// Validate the raw cart and collapse it into one line per product, sorted
/// by ascending product id (the lock acquisition order).
///
/// Repeated lines for the same product are summed: two lines of quantity 1
/// behave exactly like one line of quantity 2.
fn normalize_lines(items: &[CartLine]) -> Result<Vec<CartLine>, CheckoutError> {
    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let mut by_product: BTreeMap<i64, i64> = BTreeMap::new();
    for item in items {
        if item.quantity <= 0 {
            return Err(CheckoutError::InvalidQuantity {
                product_id: item.product_id,
            });
        }
        *by_product.entry(item.product_id).or_insert(0) += i64::from(item.quantity);
    }

    by_product
        .into_iter()
        .map(|(product_id, quantity)| {
            // Summing lines can overflow i32 even though each line fit.
            let quantity = i32::try_from(quantity)
                .map_err(|_| CheckoutError::InvalidQuantity { product_id })?;
            Ok(CartLine {
                product_id,
                quantity,
            })
        })
        .collect()
}

/// Server-side total: sum of unit price times quantity, rounded to the
/// currency's two minor-unit decimals.
fn compute_total(lines: &[PricedLine]) -> Decimal {
    lines
        .iter()
        .map(|l| l.unit_price * Decimal::from(l.quantity))
        .sum::<Decimal>()
        .round_dp(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i64, quantity: i32) -> CartLine {
        CartLine {
            product_id,
            quantity,
        }
    }

    fn priced(product_id: i64, quantity: i32, unit_price: &str) -> PricedLine {
        PricedLine {
            product_id,
            quantity,
            unit_price: unit_price.parse().unwrap(),
        }
    }

    #[test]
    fn test_normalize_rejects_empty_cart() {
        assert!(matches!(
            normalize_lines(&[]),
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[test]
    fn test_normalize_rejects_non_positive_quantity() {
        assert!(matches!(
            normalize_lines(&[line(7, 0)]),
            Err(CheckoutError::InvalidQuantity { product_id: 7 })
        ));
        assert!(matches!(
            normalize_lines(&[line(1, 2), line(7, -3)]),
            Err(CheckoutError::InvalidQuantity { product_id: 7 })
        ));
    }

    #[test]
    fn test_normalize_sorts_by_product_id() {
        let lines = normalize_lines(&[line(9, 1), line(3, 2), line(5, 1)]).unwrap();
        let ids: Vec<i64> = lines.iter().map(|l| l.product_id).collect();
        assert_eq!(ids, vec![3, 5, 9], "lock order is ascending product id");
    }

    #[test]
    fn test_normalize_coalesces_duplicate_products() {
        let lines = normalize_lines(&[line(4, 1), line(2, 5), line(4, 2)]).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, 2);
        assert_eq!(lines[0].quantity, 5);
        assert_eq!(lines[1].product_id, 4);
        assert_eq!(lines[1].quantity, 3, "1 + 2 collapses into one line");
    }

    #[test]
    fn test_normalize_overflow_on_summed_lines() {
        let result = normalize_lines(&[line(1, i32::MAX), line(1, 1)]);
        assert!(matches!(
            result,
            Err(CheckoutError::InvalidQuantity { product_id: 1 })
        ));
    }

    #[test]
    fn test_compute_total_scenario() {
        // Product A: 100 x 2, product B: 50 x 1 -> 250
        let total = compute_total(&[priced(1, 2, "100"), priced(2, 1, "50")]);
        assert_eq!(total, "250.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_compute_total_rounds_to_minor_units() {
        // 3 x 0.333 = 0.999 -> 1.00 at two decimal places (banker's rounding
        // on the midpoint digit does not apply here; 0.999 rounds up)
        let total = compute_total(&[priced(1, 3, "0.333")]);
        assert_eq!(total, "1.00".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_compute_total_empty_is_zero() {
        assert_eq!(compute_total(&[]), Decimal::ZERO);
    }
}
