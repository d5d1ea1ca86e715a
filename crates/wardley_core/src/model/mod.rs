//! Canonical map data model.
//!
//! # Responsibility
//! - Define components, relationships and snapshots shared by every layer.
//! - Define canvas geometry used to interpret component positions.
//!
//! # Invariants
//! - Component ids are opaque text and compared as text.
//! - Relationships reference components by id only; they never own them.

pub mod canvas;
pub mod component;
pub mod snapshot;
