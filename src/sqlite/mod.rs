//! `SQLite` database backend implementations.
//!
//! This module provides `SQLite`-backed implementations for all repository
//! traits. Enable the `sqlite` feature to use them.

mod directory;
pub mod migrations;
mod ticket;
mod token;

pub use directory::SqliteDirectoryRepository;
use sqlx::SqlitePool;
pub use ticket::SqliteTicketRepository;
pub use token::SqliteTokenRepository;

use crate::WaypointConfig;

/// Creates all `SQLite` repository instances from a connection pool,
/// configured per `config`.
pub fn create_repositories(
    pool: SqlitePool,
    config: &WaypointConfig,
) -> (
    SqliteDirectoryRepository,
    SqliteTicketRepository,
    SqliteTokenRepository,
) {
    (
        SqliteDirectoryRepository::new(pool.clone()),
        SqliteTicketRepository::new(pool.clone()),
        SqliteTokenRepository::new(pool).with_token_length(config.token_length),
    )
}
