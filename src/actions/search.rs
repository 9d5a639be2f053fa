use crate::repository::{DirectoryRepository, SortKey, Ticket, TicketRepository};
use crate::TravelError;

/// Reviewer-facing substring search over locations and manager status text.
pub struct SearchRecordsAction<K> {
    tickets: K,
}

impl<K: TicketRepository> SearchRecordsAction<K> {
    pub fn new(tickets: K) -> Self {
        SearchRecordsAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "search_records", skip_all, err)
    )]
    pub async fn execute(&self, query: &str) -> Result<Vec<Ticket>, TravelError> {
        self.tickets.search_tickets(query).await
    }
}

/// All tickets ordered ascending by a whitelisted column.
pub struct SortTicketsAction<K> {
    tickets: K,
}

impl<K: TicketRepository> SortTicketsAction<K> {
    pub fn new(tickets: K) -> Self {
        SortTicketsAction { tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "sort_tickets", skip_all, err)
    )]
    pub async fn execute(&self, sort_by: &str) -> Result<Vec<Ticket>, TravelError> {
        let key: SortKey = sort_by.parse()?;
        self.tickets.sort_tickets(key).await
    }
}

/// Finds tickets by requester: every ticket owned by an employee whose
/// username contains the fragment.
pub struct SearchByPersonAction<D, K> {
    directory: D,
    tickets: K,
}

impl<D: DirectoryRepository, K: TicketRepository> SearchByPersonAction<D, K> {
    pub fn new(directory: D, tickets: K) -> Self {
        SearchByPersonAction { directory, tickets }
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "search_by_person", skip_all, err)
    )]
    pub async fn execute(&self, person_name: &str) -> Result<Vec<Ticket>, TravelError> {
        let employees = self.directory.search_employees(person_name).await?;
        if employees.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
        self.tickets.list_for_employees(&ids).await
    }
}
