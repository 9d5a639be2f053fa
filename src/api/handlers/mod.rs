//! HTTP handlers, one module per route namespace.
//!
//! Handlers stay thin: role guard via [`Principal`](crate::Principal), then
//! delegate to the matching action.

pub mod admin;
pub mod employee;
pub mod manager;
pub mod shared;
