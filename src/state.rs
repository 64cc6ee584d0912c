//! Shared application state for all routes.

use crate::sql::Tables;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Qualified table names, fixed at startup from `CRM_SCHEMA`.
    pub tables: Arc<Tables>,
}

impl AppState {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        AppState {
            pool,
            tables: Arc::new(Tables::new(schema)),
        }
    }
}
