//! In-memory map graph and snapshot utilities.
//!
//! # Responsibility
//! - Own the mutable component/relationship sequences of the open map.
//! - Compare snapshots and build maps from indented outlines.
//!
//! # Invariants
//! - Every mutation goes through invariant-checked mutators on `MapModel`.
//! - Invalid mutations are silently refused, never reported as errors.

pub mod diff;
pub mod map_model;
pub mod nested_chain;
