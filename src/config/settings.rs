//! Process settings read from environment variables.

use crate::error::ConfigError;
use axum::http::HeaderValue;
use std::net::SocketAddr;

pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/crm";
pub const DEFAULT_SCHEMA: &str = "public";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_REQUEST_BODY_LIMIT: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    /// Schema holding the `customers` and `addresses` tables. From `CRM_SCHEMA`.
    pub schema: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    /// Empty (or containing `*`) means any origin.
    pub cors_allow_origins: Vec<HeaderValue>,
    pub request_body_limit: usize,
    /// Create the database named in `database_url` when it does not exist.
    pub create_database: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());

        let schema = get("CRM_SCHEMA").unwrap_or_else(|| DEFAULT_SCHEMA.into());
        if !is_identifier(&schema) {
            return Err(ConfigError::Invalid {
                key: "CRM_SCHEMA",
                reason: format!("'{}' is not a plain identifier", schema),
            });
        }

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(v) => match v.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(ConfigError::Invalid {
                        key: "DATABASE_MAX_CONNECTIONS",
                        reason: format!("expected a positive integer, got '{}'", v),
                    })
                }
            },
        };

        let cors_allow_origins = get("CORS_ALLOW_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(|o| {
                        HeaderValue::from_str(o).map_err(|e| ConfigError::Invalid {
                            key: "CORS_ALLOW_ORIGINS",
                            reason: format!("'{}': {}", o, e),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?
            .unwrap_or_default();

        let request_body_limit = match get("REQUEST_BODY_LIMIT") {
            None => DEFAULT_REQUEST_BODY_LIMIT,
            Some(v) => v.parse::<usize>().map_err(|e| ConfigError::Invalid {
                key: "REQUEST_BODY_LIMIT",
                reason: e.to_string(),
            })?,
        };

        let create_database = match get("CREATE_DATABASE").as_deref() {
            None => true,
            Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => true,
            Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => false,
            Some(v) => {
                return Err(ConfigError::Invalid {
                    key: "CREATE_DATABASE",
                    reason: format!("expected true or false, got '{}'", v),
                })
            }
        };

        Ok(Settings {
            database_url,
            schema,
            bind_addr,
            max_connections,
            cors_allow_origins,
            request_body_limit,
            create_database,
        })
    }
}

/// PostgreSQL unquoted identifier: letter or underscore, then letters, digits, underscores; at most 63 bytes.
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let first_ok = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    first_ok && s.len() <= 63 && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
