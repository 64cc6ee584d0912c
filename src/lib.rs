//! CRM service: customers and their postal addresses over a REST API backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::Settings;
pub use error::{AppError, ConfigError, StartupError};
pub use routes::{api_routes, app, common_routes};
pub use service::{AddressService, CustomerService};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ensure_tables};
