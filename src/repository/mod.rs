//! Repository traits and entity types.
//!
//! Storage abstractions for the three account tables, the ticket aggregate,
//! and session tokens. Implement these traits to plug in a database backend;
//! the `sqlite` feature ships one, and the `mocks` feature ships in-memory
//! implementations for tests.
//!
//! | Trait | Description |
//! |-------|-------------|
//! | [`DirectoryRepository`] | Admin / Manager / Employee accounts |
//! | [`TicketRepository`] | Ticket aggregate CRUD, listing, search |
//! | [`TokenRepository`] | Session token issue / lookup / revoke |

mod directory;
mod ticket;
mod token;

#[cfg(any(test, feature = "mocks"))]
mod directory_mock;
#[cfg(any(test, feature = "mocks"))]
mod ticket_mock;
#[cfg(any(test, feature = "mocks"))]
mod token_mock;

pub use directory::AccountStatus;
pub use directory::AdminRecord;
pub use directory::DirectoryRepository;
pub use directory::EmployeeRecord;
pub use directory::ManagerRecord;
pub use ticket::AdminTicketStatus;
pub use ticket::ManagerTicketStatus;
pub use ticket::NewTicket;
pub use ticket::SortKey;
pub use ticket::Ticket;
pub use ticket::TicketFilter;
pub use ticket::TicketPatch;
pub use ticket::TicketRepository;
pub use ticket::TicketScope;
pub use ticket::TravelMode;
pub use token::AccessToken;
pub use token::TokenRepository;

#[cfg(any(test, feature = "mocks"))]
pub use directory_mock::MockDirectoryRepository;
#[cfg(any(test, feature = "mocks"))]
pub use ticket_mock::MockTicketRepository;
#[cfg(any(test, feature = "mocks"))]
pub use token_mock::MockTokenRepository;
