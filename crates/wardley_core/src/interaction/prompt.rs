//! Host seam for free-text prompts raised by gestures.

use crate::model::component::Component;

/// Answers prompts raised while linking or renaming.
///
/// Returning `None` (or blank text) means "keep the default": the default
/// relationship kind, or the current name.
pub trait Prompter {
    fn relationship_kind(&mut self, source: &Component, target: &Component) -> Option<String>;
    fn component_name(&mut self, component: &Component) -> Option<String>;
}

/// Prompter that never asks and always accepts defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptDefaults;

impl Prompter for AcceptDefaults {
    fn relationship_kind(&mut self, _source: &Component, _target: &Component) -> Option<String> {
        None
    }

    fn component_name(&mut self, _component: &Component) -> Option<String> {
        None
    }
}
