//! Connection pool setup and table DDL for projects, users and members.

use crate::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Tables in creation order: members references the other two.
const SCHEMA: &[(&str, &str)] = &[
    (
        "projects",
        r#"
        CREATE TABLE IF NOT EXISTS "projects" (
            "projectID" INTEGER PRIMARY KEY AUTOINCREMENT,
            "projectName" TEXT NOT NULL,
            "projectDescription" TEXT NOT NULL,
            "projectImage" TEXT,
            "projectDeadline" TEXT
        )
        "#,
    ),
    (
        "users",
        r#"
        CREATE TABLE IF NOT EXISTS "users" (
            "userID" INTEGER PRIMARY KEY AUTOINCREMENT,
            "firstName" TEXT NOT NULL,
            "lastName" TEXT NOT NULL
        )
        "#,
    ),
    (
        "members",
        r#"
        CREATE TABLE IF NOT EXISTS "members" (
            "memberID" INTEGER PRIMARY KEY AUTOINCREMENT,
            "userID" INTEGER NOT NULL REFERENCES "users" ("userID"),
            "projectID" INTEGER NOT NULL REFERENCES "projects" ("projectID")
        )
        "#,
    ),
];

const INDEXES: &[&str] = &[
    r#"CREATE INDEX IF NOT EXISTS "members_userID" ON "members" ("userID")"#,
    r#"CREATE INDEX IF NOT EXISTS "members_projectID" ON "members" ("projectID")"#,
];

/// Open a pool with foreign keys enforced. An in-memory database is pinned to a single
/// connection that is never recycled, otherwise each connection would see its own empty database.
pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .foreign_keys(true)
        .create_if_missing(true);
    let mut pool_options = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout);
    pool_options = if config.is_in_memory() {
        pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections.max(1))
    };
    let pool = pool_options.connect_with(options).await?;
    tracing::info!(url = %config.url, "database pool ready");
    Ok(pool)
}

/// Create tables and indexes if missing. Idempotent.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (table, ddl) in SCHEMA {
        sqlx::query(*ddl).execute(pool).await?;
        tracing::debug!(table, "table ensured");
    }
    for ddl in INDEXES {
        sqlx::query(*ddl).execute(pool).await?;
    }
    Ok(())
}
