//! Route tables, one per resource, merged by [`crate::app`].

pub mod confirmations;
pub mod friends;
pub mod health;
pub mod reservations;
pub mod teams;
pub mod users;
