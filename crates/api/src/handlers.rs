//! Request handlers. Each one extracts the caller and payload, delegates
//! to a service on [`crate::ApiState`] and maps the result to JSON.

pub mod confirmations;
pub mod friends;
pub mod reservations;
pub mod teams;
pub mod users;
