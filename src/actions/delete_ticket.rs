use crate::repository::TicketRepository;
use crate::TravelError;

/// Permanently removes an employee's own ticket, allowed only while both
/// review tracks are still `Not Responded`.
pub struct DeleteTicketAction<K> {
    tickets: K,
}

impl<K: TicketRepository> DeleteTicketAction<K> {
    pub fn new(tickets: K) -> Self {
        DeleteTicketAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "delete_ticket", skip_all, err)
    )]
    pub async fn execute(&self, employee_id: i64, ticket_id: i64) -> Result<(), TravelError> {
        let ticket = self
            .tickets
            .find_ticket_for_employee(ticket_id, employee_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        if !ticket.is_unresponded() {
            return Err(TravelError::PreconditionFailed(
                "Ticket cannot be deleted as it has been responded to".to_owned(),
            ));
        }

        self.tickets.delete_ticket(ticket_id).await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket deleted\", ticket_id={ticket_id}, employee_id={employee_id}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::repository::{
        AdminTicketStatus, ManagerTicketStatus, NewTicket, Ticket, TravelMode,
    };
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
    async fn test_delete_while_unresponded() {
        let (tickets, ticket) = store_with_ticket().await;
        let action = DeleteTicketAction::new(tickets.clone());

        action.execute(10, ticket.id).await.unwrap();
        assert!(tickets.find_ticket(ticket.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_blocked_after_manager_response() {
        let (tickets, mut ticket) = store_with_ticket().await;
        ticket.manager_ticket_status = ManagerTicketStatus::Approved;
        tickets.update_ticket(&ticket).await.unwrap();

        let action = DeleteTicketAction::new(tickets.clone());
        let result = action.execute(10, ticket.id).await;

        assert!(matches!(result, Err(TravelError::PreconditionFailed(_))));
        // ticket unchanged
        assert_eq!(
            tickets.find_ticket(ticket.id).await.unwrap().unwrap(),
            ticket
        );
    }

    #[tokio::test]
    async fn test_delete_blocked_after_admin_response() {
        let (tickets, mut ticket) = store_with_ticket().await;
        ticket.admin_ticket_status = AdminTicketStatus::Close;
        tickets.update_ticket(&ticket).await.unwrap();

        let action = DeleteTicketAction::new(tickets);
        let result = action.execute(10, ticket.id).await;
        assert!(matches!(result, Err(TravelError::PreconditionFailed(_))));
    }

    #[tokio::test]
    async fn test_delete_foreign_ticket_is_not_found() {
        let (tickets, ticket) = store_with_ticket().await;
        let action = DeleteTicketAction::new(tickets);

        let result = action.execute(99, ticket.id).await;
        assert_eq!(result.unwrap_err(), TravelError::NotFound);
    }
}
