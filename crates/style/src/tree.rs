use crate::marquee::{CURRENT_TRANSFORM_VAR, KeyframeInputs, sample_translate};
use crate::surface::{ComputedPosition, StyleSurface};
use crate::values::{format_matrix_x, parse_translate_x};
use core_types::ElementId;
use std::collections::HashMap;
use std::time::Instant;

const DEFAULT_TRAVEL_PX: f32 = 60.0;

#[derive(Clone, Debug)]
struct StyleElement {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: Option<String>,
    /// Inline declarations, lowercase property names, insertion order.
    declarations: Vec<(String, String)>,
    custom: Vec<(String, String)>,
    animation: String,
    animation_started: Option<Instant>,
    disabled: bool,
    travel_px: f32,
}

impl StyleElement {
    fn new(tag: &str, parent: Option<ElementId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            text: None,
            declarations: Vec::new(),
            custom: Vec::new(),
            animation: String::new(),
            animation_started: None,
            disabled: false,
            travel_px: DEFAULT_TRAVEL_PX,
        }
    }
}

/// In-memory element tree with inline styles.
///
/// Stands in for the page: the engine is handed explicit [`ElementId`]s into
/// this tree instead of querying a document.
#[derive(Clone, Debug, Default)]
pub struct StyleTree {
    elements: HashMap<ElementId, StyleElement>,
    next_id: u32,
}

impl StyleTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> ElementId {
        self.next_id = self.next_id.wrapping_add(1).max(1);
        ElementId(self.next_id)
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: &str) -> ElementId {
        let id = self.alloc();
        self.elements.insert(id, StyleElement::new(tag, None));
        id
    }

    /// Create an element as the last child of `parent`.
    ///
    /// An unknown parent leaves the new element detached.
    pub fn append_child(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = self.alloc();
        let linked = match self.elements.get_mut(&parent) {
            Some(p) => {
                p.children.push(id);
                Some(parent)
            }
            None => {
                log::warn!("append_child: unknown parent {parent:?}, creating detached");
                None
            }
        };
        self.elements.insert(id, StyleElement::new(tag, linked));
        id
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).map(|e| e.tag.as_str())
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(&id).and_then(|e| e.parent)
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(&id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.text = Some(text.to_string());
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|e| e.text.as_deref())
    }

    pub fn set_disabled(&mut self, id: ElementId, disabled: bool) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.disabled = disabled;
        }
    }

    pub fn is_disabled(&self, id: ElementId) -> bool {
        self.elements.get(&id).is_some_and(|e| e.disabled)
    }

    /// Horizontal distance from center to edge used by the marquee keyframes.
    pub fn set_travel(&mut self, id: ElementId, travel_px: f32) {
        if let Some(e) = self.elements.get_mut(&id) {
            e.travel_px = travel_px.max(0.0);
        }
    }

    pub fn property(&self, id: ElementId, name: &str) -> Option<&str> {
        let e = self.elements.get(&id)?;
        e.declarations
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline declaration. An empty value removes it, like assigning
    /// `''` through the style object.
    pub fn set_property(&mut self, id: ElementId, name: &str, value: &str) {
        let Some(e) = self.elements.get_mut(&id) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        e.declarations.retain(|(k, _)| *k != name);
        if !value.is_empty() {
            e.declarations.push((name, value.to_string()));
        }
    }

    /// Time since the current animation value was applied.
    pub fn animation_started(&self, id: ElementId) -> Option<Instant> {
        self.elements.get(&id).and_then(|e| e.animation_started)
    }
}

impl StyleSurface for StyleTree {
    fn first_text_child(&self, element: ElementId) -> Option<ElementId> {
        let root = self.elements.get(&element)?;
        let mut stack: Vec<ElementId> = root.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Some(e) = self.elements.get(&id) else {
                continue;
            };
            if e.tag == "span" {
                return Some(id);
            }
            stack.extend(e.children.iter().rev().copied());
        }
        None
    }

    fn set_animation(&mut self, element: ElementId, value: &str, now: Instant) {
        let Some(e) = self.elements.get_mut(&element) else {
            return;
        };
        if e.animation == value {
            return;
        }
        e.animation = value.to_string();
        let active = !(value.trim().is_empty() || value.trim().eq_ignore_ascii_case("none"));
        e.animation_started = active.then_some(now);
    }

    fn animation(&self, element: ElementId) -> Option<&str> {
        self.elements.get(&element).map(|e| e.animation.as_str())
    }

    fn set_custom_property(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(e) = self.elements.get_mut(&element) else {
            return;
        };
        match e.custom.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => e.custom.push((name.to_string(), value.to_string())),
        }
    }

    fn custom_property(&self, element: ElementId, name: &str) -> Option<&str> {
        let e = self.elements.get(&element)?;
        e.custom
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn computed_position(&self, element: ElementId, now: Instant) -> Option<ComputedPosition> {
        let e = self.elements.get(&element)?;
        let left = self.property(element, "left").unwrap_or("0px").to_string();

        let animated = e.animation_started.and_then(|started| {
            let inputs = KeyframeInputs {
                travel_px: e.travel_px,
                return_from_px: self
                    .custom_property(element, CURRENT_TRANSFORM_VAR)
                    .and_then(parse_translate_x)
                    .unwrap_or(0.0),
            };
            sample_translate(&e.animation, now.saturating_duration_since(started), inputs)
        });

        let transform = match animated {
            Some(x) => format_matrix_x(x),
            None => self.property(element, "transform").unwrap_or("none").to_string(),
        };
        Some(ComputedPosition { left, transform })
    }
}
