use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, SqlitePool};

use crate::repository::{
    AdminTicketStatus, ManagerTicketStatus, NewTicket, SortKey, Ticket, TicketFilter, TicketScope,
    TravelMode,
};
use crate::{TicketRepository, TravelError};

#[derive(Clone)]
pub struct SqliteTicketRepository {
    pool: SqlitePool,
}

impl SqliteTicketRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn db_error(operation: &str, e: sqlx::Error) -> TravelError {
    log::error!(target: "waypoint", "msg=\"database error\", operation=\"{operation}\", error=\"{e}\"");
    TravelError::DatabaseError(e.to_string())
}

#[derive(FromRow)]
struct TicketRow {
    id: i64,
    employee_id: i64,
    manager_id: i64,
    date_of_request: NaiveDate,
    from_location: String,
    to_location: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    manager_ticket_status: String,
    admin_ticket_status: String,
    preferred_travel_mode: String,
    is_lodging_req: bool,
    purpose_of_travel: String,
    additional_note_employee: Option<String>,
    additional_request_admin: Option<String>,
    additional_request_manager: Option<String>,
    no_of_submission: i64,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = TravelError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let manager_ticket_status = ManagerTicketStatus::parse(&row.manager_ticket_status)
            .ok_or_else(|| {
                TravelError::DatabaseError(format!(
                    "unknown manager ticket status '{}'",
                    row.manager_ticket_status
                ))
            })?;
        let admin_ticket_status =
            AdminTicketStatus::parse(&row.admin_ticket_status).ok_or_else(|| {
                TravelError::DatabaseError(format!(
                    "unknown admin ticket status '{}'",
                    row.admin_ticket_status
                ))
            })?;
        let preferred_travel_mode =
            TravelMode::parse(&row.preferred_travel_mode).ok_or_else(|| {
                TravelError::DatabaseError(format!(
                    "unknown travel mode '{}'",
                    row.preferred_travel_mode
                ))
            })?;

        Ok(Ticket {
            id: row.id,
            employee_id: row.employee_id,
            manager_id: row.manager_id,
            date_of_request: row.date_of_request,
            from_location: row.from_location,
            to_location: row.to_location,
            start_date: row.start_date,
            end_date: row.end_date,
            manager_ticket_status,
            admin_ticket_status,
            preferred_travel_mode,
            is_lodging_req: row.is_lodging_req,
            purpose_of_travel: row.purpose_of_travel,
            additional_note_employee: row.additional_note_employee,
            additional_request_admin: row.additional_request_admin,
            additional_request_manager: row.additional_request_manager,
            no_of_submission: u32::try_from(row.no_of_submission).map_err(|_| {
                TravelError::DatabaseError(format!(
                    "invalid submission count '{}'",
                    row.no_of_submission
                ))
            })?,
        })
    }
}

const TICKET_COLUMNS: &str = "id, employee_id, manager_id, date_of_request, from_location, \
     to_location, start_date, end_date, manager_ticket_status, admin_ticket_status, \
     preferred_travel_mode, is_lodging_req, purpose_of_travel, additional_note_employee, \
     additional_request_admin, additional_request_manager, no_of_submission";

/// Scope translated to a WHERE fragment plus its optional bind value.
fn scope_clause(scope: TicketScope) -> (&'static str, Option<i64>) {
    match scope {
        TicketScope::All => ("1 = 1", None),
        TicketScope::Manager(id) => ("manager_id = ?", Some(id)),
        TicketScope::Employee(id) => ("employee_id = ?", Some(id)),
    }
}

fn rows_to_tickets(rows: Vec<TicketRow>) -> Result<Vec<Ticket>, TravelError> {
    rows.into_iter().map(TryInto::try_into).collect()
}

#[async_trait]
impl TicketRepository for SqliteTicketRepository {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, fields), err))]
    async fn create_ticket(
        &self,
        employee_id: i64,
        manager_id: i64,
        date_of_request: NaiveDate,
        fields: NewTicket,
    ) -> Result<Ticket, TravelError> {
        let row: TicketRow = sqlx::query_as(&format!(
            "INSERT INTO tickets (employee_id, manager_id, date_of_request, from_location, \
             to_location, start_date, end_date, preferred_travel_mode, is_lodging_req, \
             purpose_of_travel, additional_note_employee)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING {TICKET_COLUMNS}"
        ))
        .bind(employee_id)
        .bind(manager_id)
        .bind(date_of_request)
        .bind(&fields.from_location)
        .bind(&fields.to_location)
        .bind(fields.start_date)
        .bind(fields.end_date)
        .bind(fields.preferred_travel_mode.as_str())
        .bind(fields.is_lodging_req)
        .bind(&fields.purpose_of_travel)
        .bind(&fields.additional_note_employee)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("create_ticket", e))?;

        row.try_into()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_ticket(&self, id: i64) -> Result<Option<Ticket>, TravelError> {
        let row: Option<TicketRow> =
            sqlx::query_as(&format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("find_ticket", e))?;

        row.map(TryInto::try_into).transpose()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn find_ticket_for_employee(
        &self,
        id: i64,
        employee_id: i64,
    ) -> Result<Option<Ticket>, TravelError> {
        let row: Option<TicketRow> = sqlx::query_as(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ? AND employee_id = ?"
        ))
        .bind(id)
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find_ticket_for_employee", e))?;

        row.map(TryInto::try_into).transpose()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, ticket), err))]
    async fn update_ticket(&self, ticket: &Ticket) -> Result<(), TravelError> {
        let result = sqlx::query(
            "UPDATE tickets SET from_location = ?, to_location = ?, start_date = ?, \
             end_date = ?, manager_ticket_status = ?, admin_ticket_status = ?, \
             preferred_travel_mode = ?, is_lodging_req = ?, purpose_of_travel = ?, \
             additional_note_employee = ?, additional_request_admin = ?, \
             additional_request_manager = ?, no_of_submission = ? WHERE id = ?",
        )
        .bind(&ticket.from_location)
        .bind(&ticket.to_location)
        .bind(ticket.start_date)
        .bind(ticket.end_date)
        .bind(ticket.manager_ticket_status.as_str())
        .bind(ticket.admin_ticket_status.as_str())
        .bind(ticket.preferred_travel_mode.as_str())
        .bind(ticket.is_lodging_req)
        .bind(&ticket.purpose_of_travel)
        .bind(&ticket.additional_note_employee)
        .bind(&ticket.additional_request_admin)
        .bind(&ticket.additional_request_manager)
        .bind(i64::from(ticket.no_of_submission))
        .bind(ticket.id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("update_ticket", e))?;

        if result.rows_affected() == 0 {
            return Err(TravelError::NotFound);
        }
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn delete_ticket(&self, id: i64) -> Result<(), TravelError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete_ticket", e))?;

        if result.rows_affected() == 0 {
            return Err(TravelError::NotFound);
        }
        Ok(())
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn list_tickets(&self, scope: TicketScope) -> Result<Vec<Ticket>, TravelError> {
        let (clause, scope_id) = scope_clause(scope);
        let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE {clause} ORDER BY id");

        let mut query = sqlx::query_as::<_, TicketRow>(&sql);
        if let Some(id) = scope_id {
            query = query.bind(id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list_tickets", e))?;

        rows_to_tickets(rows)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, filter), err))]
    async fn filter_tickets(
        &self,
        scope: TicketScope,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, TravelError> {
        let (clause, scope_id) = scope_clause(scope);
        // Each optional predicate binds its value twice (or three times for
        // place): once for the NULL check, once per comparison.
        let sql = format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE {clause} \
             AND (? IS NULL OR date_of_request >= ?) \
             AND (? IS NULL OR date_of_request <= ?) \
             AND (? IS NULL OR instr(lower(from_location), ?) > 0 \
                  OR instr(lower(to_location), ?) > 0) \
             AND (? IS NULL OR manager_ticket_status = ?) \
             ORDER BY id"
        );

        let place = filter.place.as_ref().map(|p| p.to_lowercase());
        let status = filter.status.map(|s| s.as_str());

        let mut query = sqlx::query_as::<_, TicketRow>(&sql);
        if let Some(id) = scope_id {
            query = query.bind(id);
        }
        let rows = query
            .bind(filter.start_date)
            .bind(filter.start_date)
            .bind(filter.end_date)
            .bind(filter.end_date)
            .bind(&place)
            .bind(&place)
            .bind(&place)
            .bind(status)
            .bind(status)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("filter_tickets", e))?;

        rows_to_tickets(rows)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn search_tickets(&self, query: &str) -> Result<Vec<Ticket>, TravelError> {
        let needle = query.to_lowercase();
        let rows: Vec<TicketRow> = sqlx::query_as(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets \
             WHERE instr(lower(from_location), ?) > 0 \
                OR instr(lower(to_location), ?) > 0 \
                OR instr(lower(manager_ticket_status), ?) > 0 \
             ORDER BY id"
        ))
        .bind(&needle)
        .bind(&needle)
        .bind(&needle)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("search_tickets", e))?;

        rows_to_tickets(rows)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err))]
    async fn sort_tickets(&self, key: SortKey) -> Result<Vec<Ticket>, TravelError> {
        // SortKey::as_str is a closed set of column names, safe to splice.
        let rows: Vec<TicketRow> = sqlx::query_as(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets ORDER BY {} ASC, id ASC",
            key.as_str()
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("sort_tickets", e))?;

        rows_to_tickets(rows)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, employee_ids), err))]
    async fn list_for_employees(
        &self,
        employee_ids: &[i64],
    ) -> Result<Vec<Ticket>, TravelError> {
        if employee_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; employee_ids.len()].join(", ");
        let sql = format!(
            "SELECT {TICKET_COLUMNS} FROM tickets \
             WHERE employee_id IN ({placeholders}) ORDER BY id"
        );

        let mut query = sqlx::query_as::<_, TicketRow>(&sql);
        for id in employee_ids {
            query = query.bind(*id);
        }
        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list_for_employees", e))?;

        rows_to_tickets(rows)
    }
}
