//! User authentication and identity: password registration/login, HS256
//! bearer tokens, role-gated middleware, profile management.

pub mod handlers;
pub mod middleware;
pub mod service;

pub use service::{AuthError, AuthResponse, AuthService, Claims, LoginRequest, RegisterRequest};
