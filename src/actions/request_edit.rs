use crate::notify::{send_best_effort, EmailMessage, Notifier};
use crate::repository::{DirectoryRepository, ManagerTicketStatus, Ticket, TicketRepository};
use crate::TravelError;

/// Sends a ticket back to its owner for edits. Available to both reviewer
/// roles; the role check happens at the API boundary.
///
/// Sets the manager track to `Edit Required` and stores the feedback in
/// `additional_request_admin`. The employee may then re-edit and resubmit.
pub struct RequestEditAction<K, D, N> {
    tickets: K,
    directory: D,
    notifier: N,
}

impl<K, D, N> RequestEditAction<K, D, N>
where
    K: TicketRepository,
    D: DirectoryRepository,
    N: Notifier,
{
    pub fn new(tickets: K, directory: D, notifier: N) -> Self {
        RequestEditAction {
            tickets,
            directory,
            notifier,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "request_edit", skip_all, err)
    )]
    pub async fn execute(&self, ticket_id: i64, feedback: &str) -> Result<Ticket, TravelError> {
        let mut ticket = self
            .tickets
            .find_ticket(ticket_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        ticket.manager_ticket_status = ManagerTicketStatus::EditRequired;
        ticket.additional_request_admin = Some(feedback.to_owned());
        self.tickets.update_ticket(&ticket).await?;

        log::info!(
            target: "waypoint",
            "msg=\"edit requested\", ticket_id={ticket_id}"
        );

        if let Some(employee) = self.directory.find_employee_by_id(ticket.employee_id).await? {
            send_best_effort(
                &self.notifier,
                EmailMessage {
                    to: employee.email,
                    subject: "Ticket Edit Required".to_owned(),
                    body: format!("Your ticket with ID {ticket_id} requires edits."),
                },
            )
            .await;
        }

        Ok(ticket)
    }
}
