use std::sync::Arc;

use crate::auth::AuthService;
use crate::db::Database;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, auth: Arc<AuthService>) -> Self {
        Self { db, auth }
    }

    /// Shorthand for the underlying pool
    pub fn pool(&self) -> &sqlx::PgPool {
        self.db.pool()
    }
}
