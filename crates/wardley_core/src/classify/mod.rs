//! Position-to-classification mapping.
//!
//! # Responsibility
//! - Map a canvas position to an evolution stage and a visibility level.
//! - Provide the static strategic text keyed by those classifications.
//!
//! # Invariants
//! - Classification is pure and never clamps: positions dragged outside the
//!   plot area still receive a stage and a level.
//! - Stage bins are half-open on the low side (`0.25` is `Custom`).

pub mod guidance;
pub mod stage;

pub use guidance::{strategic_guidance, StrategicGuidance};
pub use stage::{
    classify, classify_component, Classification, EvolutionStage, VisibilityBand, VisibilityLevel,
};
