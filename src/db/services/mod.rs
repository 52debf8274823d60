//! The `services` module provides a high-level API for interacting with the
//! database. It encapsulates all the SQL logic and data access patterns,
//! allowing the HTTP handlers to work with domain models without knowing the
//! underlying schema or queries.
//!
//! One sub-module per entity; all public items are re-exported for convenient
//! access under `crate::db::services::`.

pub mod list_service;
pub mod todo_service;
pub mod user_service;

pub use list_service::*;
pub use todo_service::*;
pub use user_service::*;
