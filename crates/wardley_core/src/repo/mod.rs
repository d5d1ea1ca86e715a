//! Repository layer for the map version store.
//!
//! # Responsibility
//! - Define the persistence contract consumed by `service::map_service`.
//! - Isolate SQLite query details from application orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`MapNotFound`) in addition to DB
//!   transport errors.

pub mod map_repo;
