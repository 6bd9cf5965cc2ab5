//! Catalog domain: stores, categories, products, per-store stock.

pub mod models;
pub mod repository;

pub use models::{
    CatalogProduct, Category, Product, ProductInput, ProductSort, SortField, SortOrder, StockRow,
    Store,
};
pub use repository::{CategoryRepository, ProductRepository, StockRepository, StoreRepository};
