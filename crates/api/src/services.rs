//! Service components. Each one is built from explicit repository handles
//! and holds no other state, so handlers and tests can construct them
//! against any store.

pub mod accounts;
pub mod directory;
pub mod matching;
pub mod reservations;
