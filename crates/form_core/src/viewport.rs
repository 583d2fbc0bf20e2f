use std::cell::Cell;
use std::rc::Rc;

/// Current viewport width in logical pixels.
pub trait ViewportQuery {
    fn width(&self) -> f32;
}

/// A fixed width, mostly useful in tests and headless runs.
impl ViewportQuery for f32 {
    fn width(&self) -> f32 {
        *self
    }
}

/// Viewport width shared between the host (which updates it on resize) and the
/// stores that read it.
///
/// Single-threaded: every clone observes the same cell.
#[derive(Clone, Debug, Default)]
pub struct SharedViewport(Rc<Cell<f32>>);

impl SharedViewport {
    pub fn new(width: f32) -> Self {
        Self(Rc::new(Cell::new(width)))
    }

    pub fn set_width(&self, width: f32) {
        self.0.set(width.max(0.0));
    }
}

impl ViewportQuery for SharedViewport {
    fn width(&self) -> f32 {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_width() {
        let a = SharedViewport::new(1200.0);
        let b = a.clone();
        a.set_width(500.0);
        assert_eq!(b.width(), 500.0);
    }

    #[test]
    fn negative_widths_clamp_to_zero() {
        let v = SharedViewport::new(10.0);
        v.set_width(-3.0);
        assert_eq!(v.width(), 0.0);
    }
}
