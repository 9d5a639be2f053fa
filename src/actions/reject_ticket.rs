use crate::notify::{send_best_effort, EmailMessage, Notifier};
use crate::repository::{DirectoryRepository, ManagerTicketStatus, Ticket, TicketRepository};
use crate::TravelError;

/// Manager rejection: sets the manager track to `Rejected`.
///
/// The feedback lands in `additional_request_admin`, not the manager field;
/// that asymmetry with approval mirrors the shipped workflow. The rejection
/// email is best-effort, the transition stands regardless.
pub struct ManagerRejectAction<K, D, N> {
    tickets: K,
    directory: D,
    notifier: N,
}

impl<K, D, N> ManagerRejectAction<K, D, N>
where
    K: TicketRepository,
    D: DirectoryRepository,
    N: Notifier,
{
    pub fn new(tickets: K, directory: D, notifier: N) -> Self {
        ManagerRejectAction {
            tickets,
            directory,
            notifier,
        }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "manager_reject", skip_all, err)
    )]
    pub async fn execute(&self, ticket_id: i64, feedback: &str) -> Result<Ticket, TravelError> {
        let mut ticket = self
            .tickets
            .find_ticket(ticket_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        ticket.manager_ticket_status = ManagerTicketStatus::Rejected;
        ticket.additional_request_admin = Some(feedback.to_owned());
        self.tickets.update_ticket(&ticket).await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket rejected by manager\", ticket_id={ticket_id}"
        );

        if let Some(employee) = self.directory.find_employee_by_id(ticket.employee_id).await? {
            send_best_effort(
                &self.notifier,
                EmailMessage {
                    to: employee.email,
                    subject: "Ticket Rejected".to_owned(),
                    body: format!("Your ticket with ID {ticket_id} has been rejected."),
                },
            )
            .await;
        }

        Ok(ticket)
    }
}
