//! Auto-growing message box.

/// A multi-line control whose height can be driven from its content.
pub trait GrowSurface {
    fn set_height(&mut self, height: &str);

    /// Natural content height in px, as laid out with the current height.
    fn scroll_height(&self) -> f32;
}

/// Resize the control to fit its content and return the new height string.
///
/// The zero write comes first so the surface recomputes its scroll height
/// instead of reporting the previous, larger box. The caller persists the
/// returned value into the draft.
pub fn auto_grow<S: GrowSurface + ?Sized>(surface: &mut S) -> String {
    surface.set_height("0px");
    let height = format_px(surface.scroll_height());
    surface.set_height(&height);
    height
}

/// Whole-pixel CSS length, the way scroll heights are reported.
pub fn format_px(px: f32) -> String {
    let px = if px.is_finite() { px.max(0.0) } else { 0.0 };
    format!("{}px", px.round() as u32)
}
