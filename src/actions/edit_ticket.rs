use crate::repository::{Ticket, TicketPatch, TicketRepository};
use crate::TravelError;

/// Applies an employee's partial edit to their own ticket.
///
/// Fields absent from the patch stay unchanged. `no_of_submission` goes up
/// by exactly 1 on every successful call, regardless of review status.
/// A ticket owned by someone else is indistinguishable from a missing one.
pub struct EditTicketAction<K> {
    tickets: K,
}

impl<K: TicketRepository> EditTicketAction<K> {
    pub fn new(tickets: K) -> Self {
        EditTicketAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "edit_ticket", skip_all, err)
    )]
    pub async fn execute(
        &self,
        employee_id: i64,
        ticket_id: i64,
        patch: TicketPatch,
    ) -> Result<Ticket, TravelError> {
        let mut ticket = self
            .tickets
            .find_ticket_for_employee(ticket_id, employee_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        ticket.apply_patch(patch);
        self.tickets.update_ticket(&ticket).await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket edited\", ticket_id={ticket_id}, employee_id={employee_id}, no_of_submission={}",
            ticket.no_of_submission
        );
        Ok(ticket)
    }
}
