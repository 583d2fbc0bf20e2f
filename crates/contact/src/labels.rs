use core_types::ElementId;
use style::StyleTree;

const HIGHLIGHT_BORDER: &str = "1px solid #3DCFB6";

/// Border highlight around the middle form label while it is hovered.
///
/// Holds the first three labels of the form. With fewer than three, both
/// operations do nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelTrio {
    labels: Option<[ElementId; 3]>,
}

impl LabelTrio {
    pub fn new(labels: &[ElementId]) -> Self {
        let labels = match labels {
            [a, b, c, ..] => Some([*a, *b, *c]),
            _ => None,
        };
        Self { labels }
    }

    pub fn set_hover(&self, tree: &mut StyleTree, hovering: bool) {
        let Some([above, middle, below]) = self.labels else {
            log::trace!("label highlight: fewer than three labels");
            return;
        };
        let (collapse, border) = if hovering {
            ("0", HIGHLIGHT_BORDER)
        } else {
            ("", "")
        };
        tree.set_property(above, "border-bottom", collapse);
        tree.set_property(middle, "border-top", border);
        tree.set_property(middle, "border-bottom", border);
        tree.set_property(below, "border-top", collapse);
    }
}
