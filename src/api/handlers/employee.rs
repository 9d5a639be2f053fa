//! Handlers under `/employee`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::actions::{
    CreateTicketAction, DashboardAction, DeleteTicketAction, EditTicketAction,
    FilterDashboardAction, LoginAction,
};
use crate::api::error::AppError;
use crate::api::middleware::AuthenticatedPrincipal;
use crate::api::routes::AppState;
use crate::api::{
    AuthResponse, FilterQuery, LoginRequest, StatusMessage, TicketListResponse, TicketResponse,
};
use crate::role::RoleKind;
use crate::{
    DirectoryRepository, NewTicket, Notifier, SecretString, TicketPatch, TicketRepository,
    TicketScope, TokenRepository,
};

/// Authenticate an employee and return an access token.
///
/// POST /employee/login
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
        .execute(RoleKind::Employee, &body.username, &password)
        .await?;
    Ok((StatusCode::OK, Json(AuthResponse::from(token))))
}

/// The authenticated employee's own tickets.
///
/// GET /employee/tickets
pub async fn list_tickets<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let employee_id = auth.principal().require_employee()?;

    let tickets = DashboardAction::new(state.tickets)
        .execute(TicketScope::Employee(employee_id))
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}

/// Submit a new travel ticket.
///
/// POST /employee/tickets
pub async fn create_ticket<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Json(body): Json<NewTicket>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let employee_id = auth.principal().require_employee()?;

    let ticket = CreateTicketAction::new(state.directory, state.tickets)
        .execute(employee_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(TicketResponse::from(ticket))))
}

/// Re-edit trip fields on an owned ticket.
///
/// PATCH /employee/tickets/{id}
pub async fn edit_ticket<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Path(ticket_id): Path<i64>,
    Json(patch): Json<TicketPatch>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let employee_id = auth.principal().require_employee()?;

    let ticket = EditTicketAction::new(state.tickets)
        .execute(employee_id, ticket_id, patch)
        .await?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Delete an owned ticket, only while no reviewer has responded.
///
/// DELETE /employee/tickets/{id}
pub async fn delete_ticket<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Path(ticket_id): Path<i64>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let employee_id = auth.principal().require_employee()?;

    DeleteTicketAction::new(state.tickets)
        .execute(employee_id, ticket_id)
        .await?;
    Ok(Json(StatusMessage::success("Ticket deleted successfully")))
}

/// Filtered view of the employee's own tickets.
///
/// GET /employee/filter_dash
pub async fn filter_dash<D, K, T, N>(
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
    let employee_id = auth.principal().require_employee()?;

    let tickets = FilterDashboardAction::new(state.tickets)
        .execute(TicketScope::Employee(employee_id), &query.into())
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}
