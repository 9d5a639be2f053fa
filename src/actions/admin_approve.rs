use crate::notify::{send_best_effort, EmailMessage, Notifier};
use crate::repository::{DirectoryRepository, ManagerTicketStatus, Ticket, TicketRepository};
use crate::TravelError;

/// Admin approval.
///
/// Writes the **manager** status field, not the admin one, and stores the
/// feedback in `additional_request_admin`. Together with
/// [`ProcessTicketAction`](crate::actions::ProcessTicketAction) requiring
/// `admin_ticket_status == Approved`, this leaves the processed state
/// unreachable through the API; the workflow ships that way and it is kept.
pub struct AdminApproveAction<K, D, N> {
    tickets: K,
    directory: D,
    notifier: N,
}

impl<K, D, N> AdminApproveAction<K, D, N>
where
    K: TicketRepository,
    D: DirectoryRepository,
    N: Notifier,
{
    pub fn new(tickets: K, directory: D, notifier: N) -> Self {
        AdminApproveAction {
            tickets,
            directory,
            notifier,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "admin_approve", skip_all, err)
    )]
    pub async fn execute(&self, ticket_id: i64, feedback: &str) -> Result<Ticket, TravelError> {
        let mut ticket = self
            .tickets
            .find_ticket(ticket_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        ticket.manager_ticket_status = ManagerTicketStatus::Approved;
        ticket.additional_request_admin = Some(feedback.to_owned());
        self.tickets.update_ticket(&ticket).await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket approved by admin\", ticket_id={ticket_id}"
        );

        if let Some(employee) = self.directory.find_employee_by_id(ticket.employee_id).await? {
            send_best_effort(
                &self.notifier,
                EmailMessage {
                    to: employee.email,
                    subject: "Ticket Approved by Admin".to_owned(),
                    body: format!(
                        "Your ticket with ID {ticket_id} has been approved by the admin."
                    ),
                },
            )
            .await;
        }

        Ok(ticket)
    }
}
