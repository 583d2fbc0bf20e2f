use std::time::Instant;

use egui::Context;

/// What the platform host drives once per frame.
pub trait UiApp {
    fn ui(&mut self, ctx: &Context, now: Instant);

    /// Logical width of the window content, in points.
    fn on_resize(&mut self, _width_px: f32) {}

    /// The window is closing.
    fn shutdown(&mut self) {}
}
