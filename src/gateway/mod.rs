pub mod handlers;
pub mod openapi;
pub mod state;
pub mod types;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::middleware::{jwt_auth_middleware, require_staff_middleware};
use crate::auth::{AuthService, handlers as auth_handlers};
use crate::config::AppConfig;
use crate::db::Database;
use state::AppState;

/// Start the HTTP gateway server
pub async fn run_server(config: &AppConfig, db: Arc<Database>) {
    let auth = Arc::new(AuthService::new(
        db.pool().clone(),
        config.jwt_secret.clone(),
        config.token_ttl_hours,
    ));

    let state = Arc::new(AppState::new(db, auth));

    // ==========================================================================
    // Public routes (no auth required)
    // ==========================================================================
    let catalog_routes = Router::new()
        .route("/stores", get(handlers::catalog::get_stores))
        .route("/categories", get(handlers::catalog::get_categories))
        .route(
            "/order-statuses",
            get(handlers::catalog::get_order_statuses),
        )
        .route("/products", get(handlers::catalog::get_products));

    let auth_routes = Router::new()
        .route("/register", post(auth_handlers::register))
        .route("/login", post(auth_handlers::login));

    // ==========================================================================
    // Customer routes - protected by JWT
    // ==========================================================================
    let order_routes = Router::new()
        .route("/", post(handlers::orders::create_order))
        .route("/my", get(handlers::orders::get_my_orders))
        .route("/{order_id}", get(handlers::orders::get_order))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    let profile_routes = Router::new()
        .route(
            "/",
            get(auth_handlers::get_profile).put(auth_handlers::update_profile),
        )
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // ==========================================================================
    // Staff routes - JWT plus role gate
    // ==========================================================================
    let admin_routes = Router::new()
        .route("/products", get(handlers::admin::list_products))
        .route("/products", post(handlers::admin::create_product))
        .route(
            "/products/{product_id}",
            put(handlers::admin::update_product),
        )
        .route(
            "/products/{product_id}",
            axum::routing::delete(handlers::admin::delete_product),
        )
        .route("/stock", get(handlers::admin::list_stock))
        .route("/stock", put(handlers::admin::update_stock))
        .route("/orders", get(handlers::admin::list_orders))
        .route(
            "/orders/{order_id}/status",
            patch(handlers::admin::update_order_status),
        )
        .layer(axum::middleware::from_fn(require_staff_middleware))
        .layer(from_fn_with_state(state.clone(), jwt_auth_middleware));

    // Build complete router
    let app = Router::new()
        .route("/api/v1/health", get(handlers::health::health_check))
        .nest("/api/v1/catalog", catalog_routes)
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/orders", order_routes)
        .nest("/api/v1/profile", profile_routes)
        .nest("/api/v1/admin", admin_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", openapi::ApiDoc::openapi()));

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("FATAL: Failed to bind to {}: {}", addr, e);
            eprintln!(
                "  Hint: port {} may already be in use. Check with: lsof -i :{}",
                config.gateway.port, config.gateway.port
            );
            std::process::exit(1);
        }
    };

    tracing::info!("Gateway listening on http://{}", addr);
    tracing::info!("API docs: http://{}/docs", addr);

    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("FATAL: Server error: {}", e);
        std::process::exit(1);
    }
}
