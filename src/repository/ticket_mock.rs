#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::TravelError;

use super::ticket::{
    AdminTicketStatus, ManagerTicketStatus, NewTicket, SortKey, Ticket, TicketFilter,
    TicketRepository, TicketScope,
};

/// In-memory ticket store for tests.
#[derive(Clone, Default)]
pub struct MockTicketRepository {
    pub tickets: Arc<Mutex<Vec<Ticket>>>,
}

impl MockTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a ticket directly, bypassing creation rules. Test helper.
    pub fn seed(&self, ticket: Ticket) {
        self.tickets.lock().unwrap().push(ticket);
    }
}

fn in_scope(ticket: &Ticket, scope: TicketScope) -> bool {
    match scope {
        TicketScope::All => true,
        TicketScope::Manager(id) => ticket.manager_id == id,
        TicketScope::Employee(id) => ticket.employee_id == id,
    }
}

#[async_trait]
impl TicketRepository for MockTicketRepository {
    async fn create_ticket(
        &self,
        employee_id: i64,
        manager_id: i64,
        date_of_request: NaiveDate,
        fields: NewTicket,
    ) -> Result<Ticket, TravelError> {
        let mut tickets = self.tickets.lock().unwrap();
        let id = tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let ticket = Ticket {
            id,
            employee_id,
            manager_id,
            date_of_request,
            from_location: fields.from_location,
            to_location: fields.to_location,
            start_date: fields.start_date,
            end_date: fields.end_date,
            manager_ticket_status: ManagerTicketStatus::NotResponded,
            admin_ticket_status: AdminTicketStatus::NotResponded,
            preferred_travel_mode: fields.preferred_travel_mode,
            is_lodging_req: fields.is_lodging_req,
            purpose_of_travel: fields.purpose_of_travel,
            additional_note_employee: fields.additional_note_employee,
            additional_request_admin: None,
            additional_request_manager: None,
            no_of_submission: 1,
        };
        tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn find_ticket(&self, id: i64) -> Result<Option<Ticket>, TravelError> {
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn find_ticket_for_employee(
        &self,
        id: i64,
        employee_id: i64,
    ) -> Result<Option<Ticket>, TravelError> {
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets
            .iter()
            .find(|t| t.id == id && t.employee_id == employee_id)
            .cloned())
    }

    async fn update_ticket(&self, ticket: &Ticket) -> Result<(), TravelError> {
        let mut tickets = self.tickets.lock().unwrap();
        match tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(slot) => {
                *slot = ticket.clone();
                Ok(())
            }
            None => Err(TravelError::NotFound),
        }
    }

    async fn delete_ticket(&self, id: i64) -> Result<(), TravelError> {
        let mut tickets = self.tickets.lock().unwrap();
        let before = tickets.len();
        tickets.retain(|t| t.id != id);
        if tickets.len() < before {
            Ok(())
        } else {
            Err(TravelError::NotFound)
        }
    }

    async fn list_tickets(&self, scope: TicketScope) -> Result<Vec<Ticket>, TravelError> {
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets
            .iter()
            .filter(|t| in_scope(t, scope))
            .cloned()
            .collect())
    }

    async fn filter_tickets(
        &self,
        scope: TicketScope,
        filter: &TicketFilter,
    ) -> Result<Vec<Ticket>, TravelError> {
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets
            .iter()
            .filter(|t| in_scope(t, scope) && t.matches_filter(filter))
            .cloned()
            .collect())
    }

    async fn search_tickets(&self, query: &str) -> Result<Vec<Ticket>, TravelError> {
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets
            .iter()
            .filter(|t| t.matches_search(query))
            .cloned()
            .collect())
    }

    async fn sort_tickets(&self, key: SortKey) -> Result<Vec<Ticket>, TravelError> {
        let mut tickets = self.tickets.lock().unwrap().clone();
        match key {
            SortKey::DateOfRequest => tickets.sort_by_key(|t| t.date_of_request),
            SortKey::StartDate => tickets.sort_by_key(|t| t.start_date),
            SortKey::EndDate => tickets.sort_by_key(|t| t.end_date),
            SortKey::FromLocation => tickets.sort_by(|a, b| a.from_location.cmp(&b.from_location)),
            SortKey::ToLocation => tickets.sort_by(|a, b| a.to_location.cmp(&b.to_location)),
            SortKey::NoOfSubmission => tickets.sort_by_key(|t| t.no_of_submission),
        }
        Ok(tickets)
    }

    async fn list_for_employees(&self, employee_ids: &[i64]) -> Result<Vec<Ticket>, TravelError> {
        let tickets = self.tickets.lock().unwrap();
        Ok(tickets
            .iter()
            .filter(|t| employee_ids.contains(&t.employee_id))
            .cloned()
            .collect())
    }
}
