use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::TravelError;

/// Preferred mode of travel for a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TravelMode {
    #[default]
    Bus,
    Train,
    Plane,
    Ship,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Bus => "Bus",
            TravelMode::Train => "Train",
            TravelMode::Plane => "Plane",
            TravelMode::Ship => "Ship",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Bus" => Some(TravelMode::Bus),
            "Train" => Some(TravelMode::Train),
            "Plane" => Some(TravelMode::Plane),
            "Ship" => Some(TravelMode::Ship),
            _ => None,
        }
    }
}

/// Manager-track review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManagerTicketStatus {
    #[default]
    #[serde(rename = "Not Responded")]
    NotResponded,
    Approved,
    Rejected,
    #[serde(rename = "Edit Required", alias = "Request Edit")]
    EditRequired,
}

impl ManagerTicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagerTicketStatus::NotResponded => "Not Responded",
            ManagerTicketStatus::Approved => "Approved",
            ManagerTicketStatus::Rejected => "Rejected",
            ManagerTicketStatus::EditRequired => "Edit Required",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Not Responded" => Some(ManagerTicketStatus::NotResponded),
            "Approved" => Some(ManagerTicketStatus::Approved),
            "Rejected" => Some(ManagerTicketStatus::Rejected),
            "Edit Required" | "Request Edit" => Some(ManagerTicketStatus::EditRequired),
            _ => None,
        }
    }
}

/// Admin-track review status.
///
/// `Approved` is a prerequisite state for [`Processed`](Self::Processed);
/// the shipped workflow has no operation that sets it (admin-approve writes
/// the manager status instead), which is kept as-is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdminTicketStatus {
    #[default]
    #[serde(rename = "Not Responded")]
    NotResponded,
    Approved,
    Close,
    Processed,
}

impl AdminTicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTicketStatus::NotResponded => "Not Responded",
            AdminTicketStatus::Approved => "Approved",
            AdminTicketStatus::Close => "Close",
            AdminTicketStatus::Processed => "Processed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Not Responded" => Some(AdminTicketStatus::NotResponded),
            "Approved" => Some(AdminTicketStatus::Approved),
            "Close" => Some(AdminTicketStatus::Close),
            "Processed" => Some(AdminTicketStatus::Processed),
            _ => None,
        }
    }
}

/// A travel request: one employee owner, one assigned reviewing manager,
/// and two independent review tracks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,
    pub employee_id: i64,
    /// Assigned reviewer. Derived from the employee's manager at creation,
    /// never client-supplied.
    pub manager_id: i64,
    pub date_of_request: NaiveDate,
    pub from_location: String,
    pub to_location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub manager_ticket_status: ManagerTicketStatus,
    pub admin_ticket_status: AdminTicketStatus,
    pub preferred_travel_mode: TravelMode,
    pub is_lodging_req: bool,
    pub purpose_of_travel: String,
    pub additional_note_employee: Option<String>,
    pub additional_request_admin: Option<String>,
    pub additional_request_manager: Option<String>,
    /// Starts at 1, incremented by exactly 1 on every employee edit.
    pub no_of_submission: u32,
}

impl Ticket {
    /// True while neither reviewer track has responded. Only in this window
    /// may the owning employee delete the ticket.
    pub fn is_unresponded(&self) -> bool {
        self.manager_ticket_status == ManagerTicketStatus::NotResponded
            && self.admin_ticket_status == AdminTicketStatus::NotResponded
    }

    /// Merges a patch over the current fields and bumps `no_of_submission`.
    ///
    /// Absent fields are left unchanged. The counter increments
    /// unconditionally, regardless of review status.
    pub fn apply_patch(&mut self, patch: TicketPatch) {
        if let Some(v) = patch.from_location {
            self.from_location = v;
        }
        if let Some(v) = patch.to_location {
            self.to_location = v;
        }
        if let Some(v) = patch.start_date {
            self.start_date = v;
        }
        if let Some(v) = patch.end_date {
            self.end_date = v;
        }
        if let Some(v) = patch.preferred_travel_mode {
            self.preferred_travel_mode = v;
        }
        if let Some(v) = patch.is_lodging_req {
            self.is_lodging_req = v;
        }
        if let Some(v) = patch.purpose_of_travel {
            self.purpose_of_travel = v;
        }
        if let Some(v) = patch.additional_note_employee {
            self.additional_note_employee = Some(v);
        }
        self.no_of_submission += 1;
    }

    /// Predicate used by dashboard filtering: request-date range, location
    /// substring, manager status.
    pub fn matches_filter(&self, filter: &TicketFilter) -> bool {
        if let Some(start) = filter.start_date {
            if self.date_of_request < start {
                return false;
            }
        }
        if let Some(end) = filter.end_date {
            if self.date_of_request > end {
                return false;
            }
        }
        if let Some(place) = &filter.place {
            let place = place.to_lowercase();
            if !self.from_location.to_lowercase().contains(&place)
                && !self.to_location.to_lowercase().contains(&place)
            {
                return false;
            }
        }
        if let Some(status) = filter.status {
            if self.manager_ticket_status != status {
                return false;
            }
        }
        true
    }

    /// Case-insensitive substring match over locations and the manager
    /// status text.
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.from_location.to_lowercase().contains(&query)
            || self.to_location.to_lowercase().contains(&query)
            || self
                .manager_ticket_status
                .as_str()
                .to_lowercase()
                .contains(&query)
    }
}

/// Trip fields supplied by the employee at creation time. Workflow fields
/// (statuses, counters, reviewer feedback) are never client-supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTicket {
    pub from_location: String,
    pub to_location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub preferred_travel_mode: TravelMode,
    #[serde(default)]
    pub is_lodging_req: bool,
    pub purpose_of_travel: String,
    #[serde(default)]
    pub additional_note_employee: Option<String>,
}

/// Partial update from the owning employee. Each field is either
/// present-with-value or absent-meaning-unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TicketPatch {
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub preferred_travel_mode: Option<TravelMode>,
    pub is_lodging_req: Option<bool>,
    pub purpose_of_travel: Option<String>,
    pub additional_note_employee: Option<String>,
}

/// Row visibility for listing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketScope {
    /// Every ticket (admin dashboard).
    All,
    /// Tickets assigned to a manager for review.
    Manager(i64),
    /// Tickets owned by an employee.
    Employee(i64),
}

/// Dashboard filter predicates. `place` and `status` map to the location
/// columns and the manager review status respectively.
#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub place: Option<String>,
    pub status: Option<ManagerTicketStatus>,
}

/// Sortable columns for the shared sorted-list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    DateOfRequest,
    StartDate,
    EndDate,
    FromLocation,
    ToLocation,
    NoOfSubmission,
}

impl SortKey {
    /// Column name as exposed in the `sort_by` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::DateOfRequest => "date_of_request",
            SortKey::StartDate => "start_date",
            SortKey::EndDate => "end_date",
            SortKey::FromLocation => "from_location",
            SortKey::ToLocation => "to_location",
            SortKey::NoOfSubmission => "no_of_submission",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = TravelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date_of_request" => Ok(SortKey::DateOfRequest),
            "start_date" => Ok(SortKey::StartDate),
            "end_date" => Ok(SortKey::EndDate),
            "from_location" => Ok(SortKey::FromLocation),
            "to_location" => Ok(SortKey::ToLocation),
            "no_of_submission" => Ok(SortKey::NoOfSubmission),
            other => Err(TravelError::Validation(format!(
                "Cannot sort by '{other}'"
            ))),
        }
    }
}

/// Storage abstraction for tickets.
///
/// Every mutation is a single write of the whole aggregate; actions re-read
/// current state before mutating.
#[async_trait]
pub trait TicketRepository {
    /// Inserts a new ticket with both statuses `Not Responded` and
    /// `no_of_submission = 1`.
    async fn create_ticket(
        &self,
        employee_id: i64,
        manager_id: i64,
        date_of_request: NaiveDate,
        fields: NewTicket,
    ) -> Result<Ticket, TravelError>;

    async fn find_ticket(&self, id: i64) -> Result<Option<Ticket>, TravelError>;

    /// Ownership-scoped lookup; `None` when the ticket exists but belongs to
    /// a different employee.
    async fn find_ticket_for_employee(
        &self,
        id: i64,
        employee_id: i64,
    ) -> Result<Option<Ticket>, TravelError>;

    /// Writes the whole aggregate back. `NotFound` if the id is gone.
    async fn update_ticket(&self, ticket: &Ticket) -> Result<(), TravelError>;

    async fn delete_ticket(&self, id: i64) -> Result<(), TravelError>;

    async fn list_tickets(&self, scope: TicketScope) -> Result<Vec<Ticket>, TravelError>;

    async fn filter_tickets(
        &self,
        scope: TicketScope,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, TravelError>;

    /// Substring search across all tickets (reviewer-facing).
    async fn search_tickets(&self, query: &str) -> Result<Vec<Ticket>, TravelError>;

    /// All tickets ordered ascending by the given column.
    async fn sort_tickets(&self, key: SortKey) -> Result<Vec<Ticket>, TravelError>;

    /// Tickets owned by any of the given employees.
    async fn list_for_employees(&self, employee_ids: &[i64]) -> Result<Vec<Ticket>, TravelError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket() -> Ticket {
        Ticket {
            id: 1,
            employee_id: 10,
            manager_id: 20,
            date_of_request: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            from_location: "Berlin".to_owned(),
            to_location: "Munich".to_owned(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
            manager_ticket_status: ManagerTicketStatus::NotResponded,
            admin_ticket_status: AdminTicketStatus::NotResponded,
            preferred_travel_mode: TravelMode::Train,
            is_lodging_req: false,
            purpose_of_travel: "Client onboarding".to_owned(),
            additional_note_employee: None,
            additional_request_admin: None,
            additional_request_manager: None,
            no_of_submission: 1,
        }
    }

    #[test]
    fn test_apply_patch_merges_and_counts() {
        let mut t = ticket();
        t.apply_patch(TicketPatch {
            to_location: Some("Hamburg".to_owned()),
            ..TicketPatch::default()
        });

        assert_eq!(t.to_location, "Hamburg");
        // untouched fields keep their values
        assert_eq!(t.from_location, "Berlin");
        assert_eq!(t.no_of_submission, 2);
    }

    #[test]
    fn test_apply_patch_increments_even_when_empty() {
        let mut t = ticket();
        for _ in 0..10 {
            t.apply_patch(TicketPatch::default());
        }
        assert_eq!(t.no_of_submission, 11);
    }

    #[test]
    fn test_is_unresponded() {
        let mut t = ticket();
        assert!(t.is_unresponded());
        t.manager_ticket_status = ManagerTicketStatus::Approved;
        assert!(!t.is_unresponded());
    }

    #[test]
    fn test_matches_filter() {
        let t = ticket();
        let mut filter = TicketFilter {
            place: Some("mun".to_owned()),
            ..TicketFilter::default()
        };
        assert!(t.matches_filter(&filter));

        filter.status = Some(ManagerTicketStatus::Approved);
        assert!(!t.matches_filter(&filter));

        let out_of_range = TicketFilter {
            end_date: NaiveDate::from_ymd_opt(2026, 2, 1),
            ..TicketFilter::default()
        };
        assert!(!t.matches_filter(&out_of_range));
    }

    #[test]
    fn test_matches_search() {
        let t = ticket();
        assert!(t.matches_search("berl"));
        assert!(t.matches_search("not responded"));
        assert!(!t.matches_search("paris"));
    }

    #[test]
    fn test_status_serde_strings() {
        assert_eq!(
            serde_json::to_string(&ManagerTicketStatus::EditRequired).unwrap(),
            "\"Edit Required\""
        );
        // legacy alias still accepted on input
        let parsed: ManagerTicketStatus = serde_json::from_str("\"Request Edit\"").unwrap();
        assert_eq!(parsed, ManagerTicketStatus::EditRequired);
        assert_eq!(
            serde_json::to_string(&AdminTicketStatus::NotResponded).unwrap(),
            "\"Not Responded\""
        );
    }

    #[test]
    fn test_sort_key_from_str() {
        assert_eq!(
            "date_of_request".parse::<SortKey>().unwrap(),
            SortKey::DateOfRequest
        );
        assert!(matches!(
            "password".parse::<SortKey>(),
            Err(TravelError::Validation(_))
        ));
    }
}
