//! storegate - multi-store retail ordering backend
//!
//! A catalog browser, transactional checkout, and role-based admin panels
//! over PostgreSQL, served through an axum HTTP gateway.
//!
//! # Modules
//!
//! - [`config`] - per-environment YAML configuration
//! - [`logging`] - tracing setup (rolling file + stdout)
//! - [`db`] - PostgreSQL connection pool
//! - [`auth`] - registration, login, JWT middleware, profiles
//! - [`catalog`] - stores, categories, products, per-store stock
//! - [`checkout`] - the order-placement transaction
//! - [`orders`] - persisted orders and their queries
//! - [`gateway`] - HTTP server, routes, response envelope

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod orders;

// Convenient re-exports at crate root
pub use checkout::{CheckoutError, CheckoutService};
pub use db::Database;
