//! Order domain: persisted orders, their line items, status reference data.

pub mod models;
pub mod repository;

pub use models::{OrderDetail, OrderLine, OrderStatus, OrderSummary};
pub use repository::{OrderRepository, OrderStatusRepository};
