use crate::repository::{AdminTicketStatus, Ticket, TicketRepository};
use crate::TravelError;

/// Admin close: sets the admin track to `Close` unconditionally, with no
/// precondition on the manager track. Closing an already-closed ticket is a
/// no-op success.
pub struct CloseTicketAction<K> {
    tickets: K,
}

impl<K: TicketRepository> CloseTicketAction<K> {
    pub fn new(tickets: K) -> Self {
        CloseTicketAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "close_ticket", skip_all, err)
    )]
    pub async fn execute(&self, ticket_id: i64) -> Result<Ticket, TravelError> {
        let mut ticket = self
            .tickets
            .find_ticket(ticket_id)
            .await?
            .ok_or(TravelError::NotFound)?;

        if ticket.admin_ticket_status == AdminTicketStatus::Close {
            return Ok(ticket);
        }

        ticket.admin_ticket_status = AdminTicketStatus::Close;
        self.tickets.update_ticket(&ticket).await?;

        log::info!(
            target: "waypoint",
            "msg=\"ticket closed\", ticket_id={ticket_id}"
        );
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::repository::{ManagerTicketStatus, NewTicket, TravelMode};
    use crate::MockTicketRepository;

    async fn store_with_ticket() -> (MockTicketRepository, i64) {
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
        (tickets, ticket.id)
    }

    #[tokio::test]
    async fn test_close_regardless_of_manager_status() {
        let (tickets, ticket_id) = store_with_ticket().await;
        let action = CloseTicketAction::new(tickets.clone());

        let ticket = action.execute(ticket_id).await.unwrap();

        assert_eq!(ticket.admin_ticket_status, AdminTicketStatus::Close);
        // manager track untouched
        assert_eq!(
            ticket.manager_ticket_status,
            ManagerTicketStatus::NotResponded
        );
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (tickets, ticket_id) = store_with_ticket().await;
        let action = CloseTicketAction::new(tickets);

        action.execute(ticket_id).await.unwrap();
        let second = action.execute(ticket_id).await.unwrap();
        assert_eq!(second.admin_ticket_status, AdminTicketStatus::Close);
    }

    #[tokio::test]
    async fn test_close_missing_ticket() {
        let (tickets, _) = store_with_ticket().await;
        let action = CloseTicketAction::new(tickets);
        assert_eq!(
            action.execute(999).await.unwrap_err(),
            TravelError::NotFound
        );
    }
}
