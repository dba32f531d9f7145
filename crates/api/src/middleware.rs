//! Cross-cutting request concerns: caller identity, password hashing and
//! error responses.

pub mod auth;
pub mod error_handling;
