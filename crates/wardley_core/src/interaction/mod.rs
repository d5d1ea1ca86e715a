//! Pointer-gesture interpretation for the map canvas.
//!
//! # Responsibility
//! - Turn pointer events and the link-mode toggle into `MapModel` mutations.
//! - Report every observable change to the host as an `EditorAction`.
//!
//! # Invariants
//! - Gestures on missing targets are no-ops; there is no error state.
//! - The selected component is a display side channel, orthogonal to the
//!   drag/link state.

pub mod editor;
pub mod prompt;
pub mod state;

pub use editor::{ComponentDetails, MapEditor};
pub use prompt::{AcceptDefaults, Prompter};
pub use state::{EditorAction, InteractionState, Modifiers};
