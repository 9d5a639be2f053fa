use chrono::Utc;

use crate::repository::{DirectoryRepository, NewTicket, Ticket, TicketRepository};
use crate::validators::validate_new_ticket;
use crate::TravelError;

/// Submits a new travel ticket on behalf of an employee.
///
/// The assigned reviewer is always the employee's current manager; the
/// client has no say in it. Both review tracks start at `Not Responded`
/// and the submission counter at 1.
pub struct CreateTicketAction<D, K> {
    directory: D,
    tickets: K,
}

impl<D: DirectoryRepository, K: TicketRepository> CreateTicketAction<D, K> {
    pub fn new(directory: D, tickets: K) -> Self {
        CreateTicketAction { directory, tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "create_ticket", skip_all, err)
    )]
    pub async fn execute(
        &self,
        employee_id: i64,
        fields: NewTicket,
    ) -> Result<Ticket, TravelError> {
        validate_new_ticket(&fields)?;

        let employee = self
            .directory
            .find_employee_by_id(employee_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        let ticket = self
            .tickets
            .create_ticket(
                employee.id,
                employee.manager_id,
                Utc::now().date_naive(),
                fields,
            )
            .await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket created\", ticket_id={}, employee_id={}, manager_id={}",
            ticket.id,
            ticket.employee_id,
            ticket.manager_id
        );
        Ok(ticket)
    }
}
