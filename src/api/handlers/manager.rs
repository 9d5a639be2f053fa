//! Handlers under `/manager`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::actions::{
    DashboardAction, FilterDashboardAction, LoginAction, ManagerApproveAction,
    ManagerRejectAction,
};
use crate::api::error::AppError;
use crate::api::middleware::AuthenticatedPrincipal;
use crate::api::routes::AppState;
use crate::api::{
    AuthResponse, FeedbackRequest, FilterQuery, LoginRequest, TicketListResponse, TicketResponse,
};
use crate::role::RoleKind;
use crate::{
    DirectoryRepository, Notifier, SecretString, TicketRepository, TicketScope, TokenRepository,
};

/// Authenticate a manager and return an access token.
///
/// POST /manager/login
pub async fn login<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let action =
        LoginAction::new(state.directory, state.tokens).with_expiry(state.config.token_expiry);
    let password = SecretString::new(&body.password);

    let token = action
        .execute(RoleKind::Manager, &body.username, &password)
        .await?;
    Ok((StatusCode::OK, Json(AuthResponse::from(token))))
}

/// Tickets assigned to the authenticated manager.
///
/// GET /manager/dashboard
pub async fn dashboard<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let manager_id = auth.principal().require_manager()?;

    let tickets = DashboardAction::new(state.tickets)
        .execute(TicketScope::Manager(manager_id))
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}

/// Approve a ticket on the manager review track.
///
/// PUT /manager/approve-ticket/{id}
pub async fn approve_ticket<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Path(ticket_id): Path<i64>,
    Json(body): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_manager()?;

    let action = ManagerApproveAction::new(state.tickets, state.directory, state.notifier);
    let ticket = action.execute(ticket_id, &body.feedback).await?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Reject a ticket on the manager review track.
///
/// PUT /manager/reject-ticket/{id}
pub async fn reject_ticket<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Path(ticket_id): Path<i64>,
    Json(body): Json<FeedbackRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_manager()?;

    let action = ManagerRejectAction::new(state.tickets, state.directory, state.notifier);
    let ticket = action.execute(ticket_id, &body.feedback).await?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Filtered view of the manager's dashboard.
///
/// GET /manager/filter
pub async fn filter<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let manager_id = auth.principal().require_manager()?;

    let tickets = FilterDashboardAction::new(state.tickets)
        .execute(TicketScope::Manager(manager_id), &query.into())
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}
