use crate::repository::{AdminTicketStatus, ManagerTicketStatus, Ticket, TicketRepository};
use crate::TravelError;

/// Finalizes an approved request: `admin_ticket_status` goes
/// `Approved -> Processed`, but only when the manager track is `Approved`
/// AND the admin track is `Approved` at read time. Any other combination
/// fails and leaves the ticket unchanged.
pub struct ProcessTicketAction<K> {
    tickets: K,
}

impl<K: TicketRepository> ProcessTicketAction<K> {
    pub fn new(tickets: K) -> Self {
        ProcessTicketAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "process_ticket", skip_all, err)
    )]
    pub async fn execute(&self, ticket_id: i64) -> Result<Ticket, TravelError> {
        let mut ticket = self
            .tickets
            .find_ticket(ticket_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        if ticket.manager_ticket_status != ManagerTicketStatus::Approved
            || ticket.admin_ticket_status != AdminTicketStatus::Approved
        {
            return Err(TravelError::PreconditionFailed(
                "Request not approved by both manager and admin".to_owned(),
            ));
        }

        ticket.admin_ticket_status = AdminTicketStatus::Processed;
        self.tickets.update_ticket(&ticket).await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket processed\", ticket_id={ticket_id}"
        );
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::repository::{NewTicket, Ticket, TravelMode};
    use crate::MockTicketRepository;

    async fn store_with_ticket() -> (MockTicketRepository, Ticket) {
        let tickets = MockTicketRepository::new();
        let ticket = tickets
            .create_ticket(
                10,
                20,
                NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                NewTicket {
                    from_location: "Berlin".to_owned(),
                    to_location: "Munich".to_owned(),
                    start_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
                    preferred_travel_mode: TravelMode::Bus,
                    is_lodging_req: false,
                    purpose_of_travel: "Client onboarding".to_owned(),
                    additional_note_employee: None,
                },
            )
            .await
            .unwrap();
        (tickets, ticket)
    }

    #[tokio::test]
    async fn test_process_requires_dual_approval() {
        let (tickets, mut ticket) = store_with_ticket().await;
        ticket.manager_ticket_status = ManagerTicketStatus::Approved;
        ticket.admin_ticket_status = AdminTicketStatus::Approved;
        tickets.update_ticket(&ticket).await.unwrap();

        let action = ProcessTicketAction::new(tickets);
        let processed = action.execute(ticket.id).await.unwrap();
        assert_eq!(processed.admin_ticket_status, AdminTicketStatus::Processed);
    }

    #[tokio::test]
    async fn test_process_fails_without_manager_approval() {
        let (tickets, mut ticket) = store_with_ticket().await;
        ticket.admin_ticket_status = AdminTicketStatus::Approved;
        tickets.update_ticket(&ticket).await.unwrap();

        let action = ProcessTicketAction::new(tickets.clone());
        let result = action.execute(ticket.id).await;

        assert!(matches!(result, Err(TravelError::PreconditionFailed(_))));
        // admin status left unchanged
        let stored = tickets.find_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.admin_ticket_status, AdminTicketStatus::Approved);
    }

    #[tokio::test]
    async fn test_process_fails_without_admin_approval() {
        let (tickets, mut ticket) = store_with_ticket().await;
        ticket.manager_ticket_status = ManagerTicketStatus::Approved;
        ticket.admin_ticket_status = AdminTicketStatus::Close;
        tickets.update_ticket(&ticket).await.unwrap();

        let action = ProcessTicketAction::new(tickets.clone());
        assert!(matches!(
            action.execute(ticket.id).await,
            Err(TravelError::PreconditionFailed(_))
        ));
        let stored = tickets.find_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(stored.admin_ticket_status, AdminTicketStatus::Close);
    }

    #[tokio::test]
    async fn test_process_missing_ticket() {
        let (tickets, _) = store_with_ticket().await;
        let action = ProcessTicketAction::new(tickets);
        assert_eq!(
            action.execute(999).await.unwrap_err(),
            TravelError::NotFound
        );
    }
}
