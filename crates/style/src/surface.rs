use core_types::ElementId;
use std::time::Instant;

/// Horizontal position of an element as a computed style would report it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComputedPosition {
    pub left: String,
    pub transform: String,
}

/// The style operations the animation and form engines need from a page.
pub trait StyleSurface {
    /// First `<span>` below `element` (depth-first, document order).
    fn first_text_child(&self, element: ElementId) -> Option<ElementId>;

    /// Write the inline `animation` shorthand.
    ///
    /// Writing the value already in place does not restart anything, the same
    /// way re-assigning an identical style string is a no-op in a browser.
    fn set_animation(&mut self, element: ElementId, value: &str, now: Instant);

    fn animation(&self, element: ElementId) -> Option<&str>;

    fn set_custom_property(&mut self, element: ElementId, name: &str, value: &str);

    fn custom_property(&self, element: ElementId, name: &str) -> Option<&str>;

    /// Current `left`/`transform`, with any running animation applied.
    fn computed_position(&self, element: ElementId, now: Instant) -> Option<ComputedPosition>;
}
