use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Database error: {0}")]
    Storage(#[from] sqlx::Error),

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Invalid quantity for product {product_id}: must be a positive integer")]
    InvalidQuantity { product_id: i64 },

    #[error("Unknown store: {0}")]
    UnknownStore(i64),

    #[error("Insufficient stock for product {product_id}: {available} unit(s) available")]
    InsufficientStock { product_id: i64, available: i32 },
}

impl CheckoutError {
    /// Transient infrastructure faults are safe to retry with the identical
    /// cart: nothing was persisted. Caller errors and business declines are
    /// not, until the caller changes the request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CheckoutError::Storage(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(CheckoutError::Storage(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(!CheckoutError::EmptyCart.is_retryable());
        assert!(
            !CheckoutError::InsufficientStock {
                product_id: 1,
                available: 0
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_insufficient_stock_message_names_product_and_remainder() {
        let err = CheckoutError::InsufficientStock {
            product_id: 42,
            available: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("42"), "message should name the product: {msg}");
        assert!(msg.contains('2'), "message should name the remainder: {msg}");
    }
}
