use crate::repository::{Ticket, TicketFilter, TicketRepository, TicketScope};
use crate::TravelError;

/// Role-scoped ticket listing: employees see their own tickets, managers
/// the tickets assigned to them, admins everything.
pub struct DashboardAction<K> {
    tickets: K,
}

impl<K: TicketRepository> DashboardAction<K> {
    pub fn new(tickets: K) -> Self {
        DashboardAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dashboard", skip_all, err)
    )]
    pub async fn execute(&self, scope: TicketScope) -> Result<Vec<Ticket>, TravelError> {
        self.tickets.list_tickets(scope).await
    }
}

/// Dashboard listing with optional predicates on request date range,
/// location substring, and manager review status.
pub struct FilterDashboardAction<K> {
    tickets: K,
}

impl<K: TicketRepository> FilterDashboardAction<K> {
    pub fn new(tickets: K) -> Self {
        FilterDashboardAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "filter_dashboard", skip_all, err)
    )]
    pub async fn execute(
        &self,
        scope: TicketScope,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, TravelError> {
        self.tickets.filter_tickets(scope, filter).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::repository::{ManagerTicketStatus, NewTicket, TravelMode};
    use crate::MockTicketRepository;

    fn trip(from: &str, to: &str) -> NewTicket {
        NewTicket {
            from_location: from.to_owned(),
            to_location: to.to_owned(),
            start_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
            preferred_travel_mode: TravelMode::Bus,
            is_lodging_req: false,
            purpose_of_travel: "Client onboarding".to_owned(),
            additional_note_employee: None,
        }
    }

    async fn seeded_store() -> MockTicketRepository {
        let tickets = MockTicketRepository::new();
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        tickets
            .create_ticket(1, 100, date, trip("Berlin", "Munich"))
            .await
            .unwrap();
        tickets
            .create_ticket(2, 100, date, trip("Paris", "Lyon"))
            .await
            .unwrap();
        tickets
            .create_ticket(3, 200, date, trip("Oslo", "Bergen"))
            .await
            .unwrap();
        tickets
    }

    #[tokio::test]
    async fn test_scopes() {
        let store = seeded_store().await;
        let action = DashboardAction::new(store);

        assert_eq!(action.execute(TicketScope::All).await.unwrap().len(), 3);
        assert_eq!(
            action.execute(TicketScope::Manager(100)).await.unwrap().len(),
            2
        );
        assert_eq!(
            action.execute(TicketScope::Employee(3)).await.unwrap().len(),
            1
        );
    }

    #[tokio::test]
    async fn test_filter_place_within_scope() {
        let store = seeded_store().await;
        let action = FilterDashboardAction::new(store);

        let filter = TicketFilter {
            place: Some("paris".to_owned()),
            ..TicketFilter::default()
        };
        let hits = action
            .execute(TicketScope::Manager(100), &filter)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].from_location, "Paris");

        // same filter under the wrong manager finds nothing
        let misses = action
            .execute(TicketScope::Manager(200), &filter)
            .await
            .unwrap();
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn test_filter_status() {
        let store = seeded_store().await;
        let action = FilterDashboardAction::new(store);

        let filter = TicketFilter {
            status: Some(ManagerTicketStatus::Approved),
            ..TicketFilter::default()
        };
        let hits = action.execute(TicketScope::All, &filter).await.unwrap();
        assert!(hits.is_empty());
    }
}
