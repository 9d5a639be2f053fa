//! Axum HTTP layer, enabled by the `axum_api` feature.

mod error;
mod handlers;
mod middleware;
mod routes;
mod types;

pub use error::AppError;
pub use middleware::{extract_bearer_token, AuthenticatedPrincipal};
pub use routes::{
    admin_routes, app, employee_routes, manager_routes, shared_routes, AppState,
};
pub use types::*;
