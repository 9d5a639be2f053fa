use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::repository::{
    EmployeeRecord, ManagerRecord, ManagerTicketStatus, Ticket, TicketFilter,
};
use crate::role::Role;
use crate::{AccessToken, TravelError};

// Request DTOs

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateManagerRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub manager_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TicketIdRequest {
    pub ticket_id: i64,
}

/// Body for review operations addressed by ticket id.
#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub ticket_id: i64,
    #[serde(default)]
    pub feedback: String,
}

/// Body for review operations where the ticket id rides in the path.
#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: String,
}

/// Dashboard filter parameters. Key casing follows the original client.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<NaiveDate>,
    #[serde(rename = "endDate")]
    pub end_date: Option<NaiveDate>,
    pub place: Option<String>,
    pub status: Option<ManagerTicketStatus>,
}

impl From<FilterQuery> for TicketFilter {
    fn from(q: FilterQuery) -> Self {
        TicketFilter {
            start_date: q.start_date,
            end_date: q.end_date,
            place: q.place,
            status: q.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
}

fn default_sort_by() -> String {
    "date_of_request".to_owned()
}

#[derive(Debug, Deserialize)]
pub struct PersonQuery {
    #[serde(default)]
    pub person_name: String,
}

// Response DTOs

#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: &'static str,
    pub message: String,
}

impl StatusMessage {
    pub fn success(message: impl Into<String>) -> Self {
        StatusMessage {
            status: "success",
            message: message.into(),
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub status: &'static str,
    pub token: String,
    #[serde(flatten)]
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("status", &self.status)
            .field("token", &"[REDACTED]")
            .field("role", &self.role)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl From<AccessToken> for AuthResponse {
    fn from(token: AccessToken) -> Self {
        AuthResponse {
            status: "success",
            token: token.token,
            role: token.role,
            expires_at: token.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub status: &'static str,
    pub ticket: Ticket,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        TicketResponse {
            status: "success",
            ticket,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub status: &'static str,
    pub tickets: Vec<Ticket>,
}

impl From<Vec<Ticket>> for TicketListResponse {
    fn from(tickets: Vec<Ticket>) -> Self {
        TicketListResponse {
            status: "success",
            tickets,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ManagerListResponse {
    pub status: &'static str,
    pub managers: Vec<ManagerRecord>,
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub status: &'static str,
    pub employees: Vec<EmployeeRecord>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub message: String,
}

impl From<TravelError> for ErrorResponse {
    fn from(err: TravelError) -> Self {
        ErrorResponse {
            status: "failed",
            message: err.to_string(),
        }
    }
}
