//! Embedded database migrations for `SQLite`.
//!
//! Migrations are compiled into the binary and run programmatically, with a
//! tracking table recording which have been applied.
//!
//! # Example
//!
//! ```rust,ignore
//! use waypoint::sqlite::migrations;
//! use sqlx::SqlitePool;
//!
//! async fn setup_database(pool: &SqlitePool) -> Result<(), sqlx::Error> {
//!     migrations::run(pool).await?;
//!     Ok(())
//! }
//! ```

use sqlx::{Executor, SqlitePool};

/// Core migrations - always required.
const CORE_MIGRATIONS: &[(&str, &str)] = &[
    (
        "20260115000001_create_admins_table",
        include_str!("../../migrations_sqlite/core/20260115000001_create_admins_table.sql"),
    ),
    (
        "20260115000002_create_managers_table",
        include_str!("../../migrations_sqlite/core/20260115000002_create_managers_table.sql"),
    ),
    (
        "20260115000003_create_employees_table",
        include_str!("../../migrations_sqlite/core/20260115000003_create_employees_table.sql"),
    ),
    (
        "20260115000004_create_tickets_table",
        include_str!("../../migrations_sqlite/core/20260115000004_create_tickets_table.sql"),
    ),
    (
        "20260115000005_create_access_tokens_table",
        include_str!(
            "../../migrations_sqlite/core/20260115000005_create_access_tokens_table.sql"
        ),
    ),
];

/// Runs all pending migrations against the given pool.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"CREATE TABLE IF NOT EXISTS _waypoint_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )",
    )
    .await?;

    run_migrations(pool, CORE_MIGRATIONS).await
}

async fn run_migrations(
    pool: &SqlitePool,
    migrations: &[(&str, &str)],
) -> Result<(), sqlx::Error> {
    for (name, sql) in migrations {
        let applied: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM _waypoint_migrations WHERE name = ?)",
        )
        .bind(*name)
        .fetch_one(pool)
        .await?;

        if !applied {
            // SQLite doesn't support multiple statements in one execute,
            // so we split by semicolons and run each statement.
            //
            // NOTE: This naive splitting will fail if semicolons appear within
            // string literals. The bundled migrations avoid this.
            for statement in sql.split(';') {
                let trimmed = statement.trim();
                if !trimmed.is_empty() {
                    pool.execute(trimmed).await?;
                }
            }

            sqlx::query("INSERT INTO _waypoint_migrations (name) VALUES (?)")
                .bind(*name)
                .execute(pool)
                .await?;
        }
    }
    Ok(())
}
