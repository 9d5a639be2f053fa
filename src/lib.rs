//! # waypoint
//!
//! Role-based travel-request approval workflow.
//!
//! Employees submit travel tickets, managers and admins review them
//! (approve / reject / request edit), and the service emails a best-effort
//! notification on each transition. Storage and delivery sit behind traits
//! ([`repository`], [`notify`]) so the core lifecycle rules can be tested
//! against in-memory implementations.
//!
//! # Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `mocks` | In-memory repository and notifier implementations |
//! | `axum_api` | Axum HTTP layer (`api` module) |
//! | `sqlite` | `sqlx` SQLite repository implementations |
//! | `tracing` | Span instrumentation on actions and repositories |

pub mod actions;
pub mod config;
pub mod crypto;
pub mod notify;
pub mod repository;
pub mod role;
pub mod secret;
pub mod validators;

#[cfg(feature = "axum_api")]
pub mod api;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::WaypointConfig;
pub use notify::{EmailMessage, LogNotifier, Notifier};
pub use repository::{
    AccessToken, AccountStatus, AdminRecord, AdminTicketStatus, DirectoryRepository,
    EmployeeRecord, ManagerRecord, ManagerTicketStatus, NewTicket, SortKey, Ticket, TicketFilter,
    TicketPatch, TicketRepository, TicketScope, TokenRepository, TravelMode,
};
pub use role::{Principal, Role, RoleKind};
pub use secret::SecretString;

#[cfg(any(test, feature = "mocks"))]
pub use notify::MockNotifier;
#[cfg(any(test, feature = "mocks"))]
pub use repository::{MockDirectoryRepository, MockTicketRepository, MockTokenRepository};

use std::fmt;

/// Errors surfaced by waypoint actions and repositories.
#[derive(Debug, Clone, PartialEq)]
pub enum TravelError {
    /// Username/password pair did not match any account of the requested role.
    InvalidCredentials,
    /// The principal does not carry the role required by the operation.
    Forbidden,
    /// Bearer token missing, unknown, or revoked.
    TokenInvalid,
    /// Bearer token past its expiry.
    TokenExpired,
    /// Ticket or directory record does not exist (or is not visible to the caller).
    NotFound,
    /// Username already provisioned.
    UsernameTaken,
    /// Required field missing or malformed.
    Validation(String),
    /// The ticket is not in a state that permits the transition.
    PreconditionFailed(String),
    /// Password hashing or verification failed.
    PasswordHashError,
    /// Unexpected persistence failure.
    DatabaseError(String),
    /// Notification delivery failed. Always recovered locally, never
    /// surfaced from an action.
    NotificationFailed(String),
}

impl std::error::Error for TravelError {}

impl fmt::Display for TravelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelError::InvalidCredentials => write!(f, "Invalid credentials"),
            TravelError::Forbidden => write!(f, "Permission denied"),
            TravelError::TokenInvalid => write!(f, "Invalid token"),
            TravelError::TokenExpired => write!(f, "Token has expired"),
            TravelError::NotFound => write!(f, "Record not found"),
            TravelError::UsernameTaken => write!(f, "Username already exists"),
            TravelError::Validation(msg) => write!(f, "{msg}"),
            TravelError::PreconditionFailed(msg) => write!(f, "{msg}"),
            TravelError::PasswordHashError => write!(f, "Failed to hash password"),
            TravelError::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            TravelError::NotificationFailed(msg) => write!(f, "Notification failed: {msg}"),
        }
    }
}
