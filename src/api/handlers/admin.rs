//! Handlers under `/admin`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::actions::{
    AdminApproveAction, CloseTicketAction, CreateEmployeeAction, CreateManagerAction,
    DashboardAction, LoginAction,
};
use crate::api::error::AppError;
use crate::api::middleware::AuthenticatedPrincipal;
use crate::api::routes::AppState;
use crate::api::{
    AuthResponse, CreateEmployeeRequest, CreateManagerRequest, EmployeeListResponse,
    LoginRequest, ManagerListResponse, ReviewRequest, StatusMessage, TicketIdRequest,
    TicketListResponse, TicketResponse,
};
use crate::role::RoleKind;
use crate::{
    DirectoryRepository, Notifier, SecretString, TicketRepository, TicketScope, TokenRepository,
};

/// Authenticate an admin and return an access token.
///
/// POST /admin/login
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
        .execute(RoleKind::Admin, &body.username, &password)
        .await?;
    Ok((StatusCode::OK, Json(AuthResponse::from(token))))
}

/// Every ticket in the system.
///
/// GET /admin/dashboard
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
    auth.principal().require_admin()?;

    let tickets = DashboardAction::new(state.tickets)
        .execute(TicketScope::All)
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}

/// GET /admin/manage-manager
pub async fn list_managers<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_admin()?;

    let managers = state.directory.list_managers().await?;
    Ok(Json(ManagerListResponse {
        status: "success",
        managers,
    }))
}

/// Provision a manager account.
///
/// POST /admin/manage-manager
pub async fn create_manager<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Json(body): Json<CreateManagerRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_admin()?;

    let action = CreateManagerAction::new(state.directory, state.notifier);
    let password = SecretString::new(&body.password);

    let manager = action
        .execute(&body.username, &password, &body.email)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StatusMessage::success(format!(
            "Manager '{}' created",
            manager.username
        ))),
    ))
}

/// GET /admin/manage-employee
pub async fn list_employees<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_admin()?;

    let employees = state.directory.list_employees().await?;
    Ok(Json(EmployeeListResponse {
        status: "success",
        employees,
    }))
}

/// Provision an employee account under an existing manager.
///
/// POST /admin/manage-employee
pub async fn create_employee<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Json(body): Json<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_admin()?;

    let action = CreateEmployeeAction::new(state.directory, state.notifier);
    let password = SecretString::new(&body.password);

    let employee = action
        .execute(&body.username, &password, &body.email, body.manager_id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(StatusMessage::success(format!(
            "Employee '{}' created",
            employee.username
        ))),
    ))
}

/// Close a ticket regardless of its review state.
///
/// PUT /admin/close-ticket
pub async fn close_ticket<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Json(body): Json<TicketIdRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_admin()?;

    let ticket = CloseTicketAction::new(state.tickets)
        .execute(body.ticket_id)
        .await?;
    Ok(Json(TicketResponse::from(ticket)))
}

/// Approve a ticket on behalf of the admin review track.
///
/// PUT /admin/approve-ticket
pub async fn approve_ticket<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Json(body): Json<ReviewRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_admin()?;

    let action = AdminApproveAction::new(state.tickets, state.directory, state.notifier);
    let ticket = action.execute(body.ticket_id, &body.feedback).await?;
    Ok(Json(TicketResponse::from(ticket)))
}
