//! Handlers under `/travel_app`, shared across roles.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::actions::{
    CreateAdminAction, LogoutAction, ProcessTicketAction, RequestEditAction, SearchByPersonAction,
    SearchRecordsAction, SortTicketsAction,
};
use crate::api::error::AppError;
use crate::api::middleware::{extract_bearer_token, AuthenticatedPrincipal};
use crate::api::routes::AppState;
use crate::api::{
    CreateAdminRequest, PersonQuery, ReviewRequest, SearchQuery, SortQuery, StatusMessage,
    TicketIdRequest, TicketListResponse, TicketResponse,
};
use crate::{
    DirectoryRepository, Notifier, SecretString, TicketRepository, TokenRepository, TravelError,
};

/// Revoke the current access token.
///
/// POST /travel_app/logout
pub async fn logout<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let token = extract_bearer_token(&headers).ok_or(AppError(TravelError::TokenInvalid))?;

    LogoutAction::new(state.tokens).execute(&token).await?;
    Ok(Json(StatusMessage::success("Successfully logged out")))
}

/// Provision an admin account.
///
/// POST /travel_app/add_admin
pub async fn add_admin<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    Json(body): Json<CreateAdminRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let action = CreateAdminAction::new(state.directory);
    let password = SecretString::new(&body.password);

    let admin = action.execute(&body.username, &password).await?;
    Ok((
        StatusCode::CREATED,
        Json(StatusMessage::success(format!(
            "Admin '{}' created",
            admin.username
        ))),
    ))
}

/// Send a ticket back to its employee for edits.
///
/// POST /travel_app/request_edit
pub async fn request_edit<D, K, T, N>(
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
    auth.principal().require_reviewer()?;

    let action = RequestEditAction::new(state.tickets, state.directory, state.notifier);
    action.execute(body.ticket_id, &body.feedback).await?;
    Ok(Json(StatusMessage::success("Ticket waiting for edit")))
}

/// Substring search across all tickets.
///
/// GET /travel_app/search_records
pub async fn search_records<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    auth: AuthenticatedPrincipal<D, T>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    auth.principal().require_reviewer()?;

    let tickets = SearchRecordsAction::new(state.tickets)
        .execute(&query.query)
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}

/// All tickets ordered by a whitelisted column.
///
/// GET /travel_app/sort_requests
pub async fn sort_requests<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    _auth: AuthenticatedPrincipal<D, T>,
    Query(query): Query<SortQuery>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let tickets = SortTicketsAction::new(state.tickets)
        .execute(&query.sort_by)
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}

/// Tickets whose requesting employee's username contains the fragment.
///
/// GET /travel_app/search_by_person
pub async fn search_by_person<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    _auth: AuthenticatedPrincipal<D, T>,
    Query(query): Query<PersonQuery>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let tickets = SearchByPersonAction::new(state.directory, state.tickets)
        .execute(&query.person_name)
        .await?;
    Ok(Json(TicketListResponse::from(tickets)))
}

/// Finalize a ticket both review tracks have approved.
///
/// POST /travel_app/process_approved_request
pub async fn process_approved_request<D, K, T, N>(
    State(state): State<AppState<D, K, T, N>>,
    _auth: AuthenticatedPrincipal<D, T>,
    Json(body): Json<TicketIdRequest>,
) -> Result<impl IntoResponse, AppError>
where
    D: DirectoryRepository + Clone + Send + Sync + 'static,
    K: TicketRepository + Clone + Send + Sync + 'static,
    T: TokenRepository + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let ticket = ProcessTicketAction::new(state.tickets)
        .execute(body.ticket_id)
        .await?;
    Ok(Json(TicketResponse::from(ticket)))
}
