//! Application use-cases over the map store.
//!
//! # Responsibility
//! - Orchestrate repository calls and keep explicit application state.
//! - Keep hosts decoupled from storage details.

pub mod map_service;
