//! OpenAPI / Swagger UI documentation
//!
//! - Swagger UI: `http://localhost:8080/docs`
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::catalog::{CatalogProduct, Category, Store};
use crate::checkout::{CartLine, CheckoutRequest, OrderReceipt};
use crate::gateway::handlers::HealthResponse;
use crate::orders::{OrderDetail, OrderLine, OrderStatus, OrderSummary};

/// Bearer JWT security scheme
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_jwt",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some(
                            "Bearer token from /api/v1/auth/login or /api/v1/auth/register"
                                .to_string(),
                        ))
                        .build(),
                ),
            );
        }
    }
}

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storegate API",
        version = "0.1.0",
        description = "Multi-store retail ordering backend: catalog, checkout, admin panels.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::catalog::get_stores,
        crate::gateway::handlers::catalog::get_categories,
        crate::gateway::handlers::catalog::get_order_statuses,
        crate::gateway::handlers::catalog::get_products,
        crate::auth::handlers::register,
        crate::auth::handlers::login,
        crate::gateway::handlers::orders::create_order,
        crate::gateway::handlers::orders::get_my_orders,
        crate::gateway::handlers::orders::get_order,
    ),
    components(
        schemas(
            HealthResponse,
            Store,
            Category,
            CatalogProduct,
            OrderStatus,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            CheckoutRequest,
            CartLine,
            OrderReceipt,
            OrderSummary,
            OrderDetail,
            OrderLine,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Catalog", description = "Public catalog browsing (no auth required)"),
        (name = "Auth", description = "Registration and login"),
        (name = "Orders", description = "Checkout and order history (auth required)"),
        (name = "Admin", description = "Staff panels: products, stock, orders (staff role required)"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Storegate API");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("Storegate API"));
    }

    #[test]
    fn test_core_endpoints_registered() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths;
        assert!(paths.paths.contains_key("/api/v1/health"));
        assert!(paths.paths.contains_key("/api/v1/catalog/products"));
        assert!(paths.paths.contains_key("/api/v1/orders"));
    }

    #[test]
    fn test_security_scheme_registered() {
        let spec = ApiDoc::openapi();
        let components = spec.components.expect("should have components");
        assert!(components.security_schemes.contains_key("bearer_jwt"));
    }
}
