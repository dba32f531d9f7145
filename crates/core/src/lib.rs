//! Domain types shared by every Spark crate: the documents the service
//! stores, the request/response shapes of the HTTP API, document keys and
//! the error taxonomy.

pub mod errors;
pub mod keys;
pub mod models;
