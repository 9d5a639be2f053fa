use crate::notify::{send_best_effort, EmailMessage, Notifier};
use crate::repository::{DirectoryRepository, ManagerTicketStatus, Ticket, TicketRepository};
use crate::TravelError;

/// Manager approval: sets the manager track to `Approved` and stores the
/// feedback in `additional_request_manager`.
///
/// Role membership is the only check; no comparison against the ticket's
/// assigned manager is performed (any manager may act on any ticket).
pub struct ManagerApproveAction<K, D, N> {
    tickets: K,
    directory: D,
    notifier: N,
}

impl<K, D, N> ManagerApproveAction<K, D, N>
where
    K: TicketRepository,
    D: DirectoryRepository,
    N: Notifier,
{
    pub fn new(tickets: K, directory: D, notifier: N) -> Self {
        ManagerApproveAction {
            tickets,
            directory,
            notifier,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "manager_approve", skip_all, err)
    )]
    pub async fn execute(&self, ticket_id: i64, feedback: &str) -> Result<Ticket, TravelError> {
        let mut ticket = self
            .tickets
            .find_ticket(ticket_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        ticket.manager_ticket_status = ManagerTicketStatus::Approved;
        ticket.additional_request_manager = Some(feedback.to_owned());
        self.tickets.update_ticket(&ticket).await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket approved by manager\", ticket_id={ticket_id}"
        );

        if let Some(employee) = self.directory.find_employee_by_id(ticket.employee_id).await? {
            send_best_effort(
                &self.notifier,
                EmailMessage {
                    to: employee.email,
                    subject: "Ticket Approved by Manager".to_owned(),
                    body: format!(
                        "Your ticket with ID {ticket_id} has been approved by the manager."
                    ),
                },
            )
            .await;
        }

        Ok(ticket)
    }
}
