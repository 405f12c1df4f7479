//! Database bootstrap and table DDL.

use crate::error::{AppError, ConfigError};
use crate::sql::{qualified_table, quoted, BLOG_TABLE, STATUS_TABLE};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Create the schema and both tables if they do not exist. Existing tables are left as they are.
pub async fn synchronize(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    let status_table = qualified_table(schema, STATUS_TABLE);
    let status_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "id" SERIAL PRIMARY KEY,
            "label" VARCHAR(255) NOT NULL,
            "order" INTEGER NOT NULL,
            "is_active" BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#,
        status_table
    );
    sqlx::query(&status_ddl).execute(pool).await?;

    let blog_ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            "id" SERIAL PRIMARY KEY,
            "title" VARCHAR(255) NOT NULL,
            "content" TEXT NOT NULL,
            "statusId" INTEGER NOT NULL REFERENCES {} ("id"),
            "createdDateTime" TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            "updatedDateTime" TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        qualified_table(schema, BLOG_TABLE),
        status_table
    );
    sqlx::query(&blog_ddl).execute(pool).await?;
    tracing::debug!(schema = %schema, "schema synchronized");
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

// The URL itself may carry a password, so only the reason is reported.
fn invalid_url(reason: String) -> AppError {
    ConfigError::InvalidValue {
        key: "DATABASE_URL",
        value: reason,
    }
    .into()
}

/// Split a connection URL into (admin URL on the `postgres` database, target database name).
fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| invalid_url("no database path".into()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let mut parts = path_and_query.splitn(2, '?');
    let db_name = parts.next().unwrap_or("").trim();
    let query = parts.next().map(|q| format!("?{}", q)).unwrap_or_default();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres{}", base, query);
    Ok((admin_url, db_name.to_string()))
}
