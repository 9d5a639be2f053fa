//! Business operations, one struct per operation.
//!
//! Each action is generic over the repository traits it touches and exposes
//! a single `execute` method. The ticket lifecycle rules live here: field
//! mutability, status preconditions, and which role may trigger which
//! transition. Handlers stay thin.

pub mod admin_approve;
pub mod approve_ticket;
pub mod close_ticket;
pub mod create_ticket;
pub mod dashboard;
pub mod delete_ticket;
pub mod edit_ticket;
pub mod login;
pub mod logout;
pub mod process_ticket;
pub mod provision;
pub mod reject_ticket;
pub mod request_edit;
pub mod search;

pub use admin_approve::AdminApproveAction;
pub use approve_ticket::ManagerApproveAction;
pub use close_ticket::CloseTicketAction;
pub use create_ticket::CreateTicketAction;
pub use dashboard::{DashboardAction, FilterDashboardAction};
pub use delete_ticket::DeleteTicketAction;
pub use edit_ticket::EditTicketAction;
pub use login::LoginAction;
pub use logout::LogoutAction;
pub use process_ticket::ProcessTicketAction;
pub use provision::{CreateAdminAction, CreateEmployeeAction, CreateManagerAction};
pub use reject_ticket::ManagerRejectAction;
pub use request_edit::RequestEditAction;
pub use search::{SearchByPersonAction, SearchRecordsAction, SortTicketsAction};
