//! Connection lifecycle and table bootstrap. Tables live in the schema named by `CRM_SCHEMA` (default `public`).

use crate::config::Settings;
use crate::error::{AppError, ConfigError, StartupError};
use crate::sql::{quoted, Tables};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Open the shared pool described by `settings`, creating the database first when allowed.
pub async fn connect(settings: &Settings) -> Result<PgPool, StartupError> {
    if settings.create_database {
        ensure_database_exists(&settings.database_url).await?;
    }
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect(&settings.database_url)
        .await?;
    tracing::info!(max_connections = settings.max_connections, "database pool opened");
    Ok(pool)
}

/// Create the schema, both tables and the customer_id index when missing.
/// `addresses.customer_id` carries no foreign key: deleting a customer leaves its addresses in place.
pub async fn ensure_tables(pool: &PgPool, tables: &Tables) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", tables.schema))
        .execute(pool)
        .await?;

    let customers_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone_number TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        tables.customers
    );
    sqlx::query(&customers_ddl).execute(pool).await?;

    let addresses_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            customer_id BIGINT NOT NULL,
            address_details TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            pin_code TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        tables.addresses
    );
    sqlx::query(&addresses_ddl).execute(pool).await?;

    sqlx::query(&format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} (customer_id)",
        quoted("addresses_customer_id_idx"),
        tables.addresses
    ))
    .execute(pool)
    .await?;

    tracing::info!(customers = %tables.customers, addresses = %tables.addresses, "tables ready");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StartupError> {
    let (admin, db_name) = admin_options(database_url)?;
    let db_name = match db_name {
        Some(name) if name != "postgres" => name,
        _ => return Ok(()),
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "database created");
    }
    Ok(())
}

/// Options for the `postgres` maintenance database on the same server, plus the database
/// named in `url` (None when the URL names none and the server default applies).
fn admin_options(url: &str) -> Result<(PgConnectOptions, Option<String>), ConfigError> {
    let opts = PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        reason: e.to_string(),
    })?;
    let db_name = opts
        .get_database()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(String::from);
    Ok((opts.database("postgres"), db_name))
}

/// Liveness of the store, used by the readiness probe.
pub async fn ping(pool: &PgPool) -> bool {
    sqlx::query("SELECT 1").fetch_optional(pool).await.is_ok()
}
