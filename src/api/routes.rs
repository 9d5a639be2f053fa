use axum::routing::{get, patch, post, put};
use axum::Router;

use super::handlers::{admin, employee, manager, shared};
use crate::{DirectoryRepository, Notifier, TicketRepository, TokenRepository, WaypointConfig};

/// Shared handler state: the three repositories, the notifier, and the
/// service configuration.
#[derive(Clone)]
pub struct AppState<D, K, T, N> {
    pub directory: D,
    pub tickets: K,
    pub tokens: T,
    pub notifier: N,
    pub config: WaypointConfig,
}

/// The full application router: role namespaces nested side by side.
pub fn app<D, K, T, N>() -> Router<AppState<D, K, T, N>>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    Router::new()
        .nest("/admin", admin_routes())
        .nest("/manager", manager_routes())
        .nest("/employee", employee_routes())
        .nest("/travel_app", shared_routes())
}

pub fn admin_routes<D, K, T, N>() -> Router<AppState<D, K, T, N>>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(admin::login::<D, K, T, N>))
        .route("/dashboard", get(admin::dashboard::<D, K, T, N>))
        .route(
            "/manage-manager",
            get(admin::list_managers::<D, K, T, N>)
                .post(admin::create_manager::<D, K, T, N>),
        )
        .route(
            "/manage-employee",
            get(admin::list_employees::<D, K, T, N>)
                .post(admin::create_employee::<D, K, T, N>),
        )
        .route("/close-ticket", put(admin::close_ticket::<D, K, T, N>))
        .route("/approve-ticket", put(admin::approve_ticket::<D, K, T, N>))
}

pub fn manager_routes<D, K, T, N>() -> Router<AppState<D, K, T, N>>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(manager::login::<D, K, T, N>))
        .route("/dashboard", get(manager::dashboard::<D, K, T, N>))
        .route(
            "/approve-ticket/{id}",
            put(manager::approve_ticket::<D, K, T, N>),
        )
        .route(
            "/reject-ticket/{id}",
            put(manager::reject_ticket::<D, K, T, N>),
        )
        .route("/filter", get(manager::filter::<D, K, T, N>))
}

pub fn employee_routes<D, K, T, N>() -> Router<AppState<D, K, T, N>>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(employee::login::<D, K, T, N>))
        .route(
            "/tickets",
            get(employee::list_tickets::<D, K, T, N>)
                .post(employee::create_ticket::<D, K, T, N>),
        )
        .route(
            "/tickets/{id}",
            patch(employee::edit_ticket::<D, K, T, N>)
                .delete(employee::delete_ticket::<D, K, T, N>),
        )
        .route("/filter_dash", get(employee::filter_dash::<D, K, T, N>))
}

pub fn shared_routes<D, K, T, N>() -> Router<AppState<D, K, T, N>>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/logout", post(shared::logout::<D, K, T, N>))
        .route("/add_admin", post(shared::add_admin::<D, K, T, N>))
        .route("/request_edit", post(shared::request_edit::<D, K, T, N>))
        .route(
            "/search_records",
            get(shared::search_records::<D, K, T, N>),
        )
        .route("/sort_requests", get(shared::sort_requests::<D, K, T, N>))
        .route(
            "/search_by_person",
            get(shared::search_by_person::<D, K, T, N>),
        )
        .route(
            "/process_approved_request",
            post(shared::process_approved_request::<D, K, T, N>),
        )
}
