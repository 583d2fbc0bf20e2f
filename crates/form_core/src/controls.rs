//! Per-control state for the form surface.
//!
//! This plays the role of the form framework: it knows each control's raw
//! value, checked state, `required` attribute and pristine/touched flags, and
//! answers the framework-level required check the validator consumes.

use crate::surface::FieldSurface;
use crate::validate::FieldInput;
use core_types::ElementId;
use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
struct ControlState {
    value: String,
    /// Incremented on any value change.
    value_rev: u64,
    checked: bool,
    required: bool,
    placeholder: String,
    error_class: bool,
    /// The user has interacted with the control since the last reset.
    touched: bool,
    /// The value differs from what the last reset left behind.
    dirty: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ControlStore {
    controls: HashMap<ElementId, ControlState>,
}

impl ControlStore {
    pub fn new() -> Self {
        Self {
            controls: HashMap::new(),
        }
    }

    pub fn has(&self, id: ElementId) -> bool {
        self.controls.contains_key(&id)
    }

    /// Register a control. Existing entries keep their state.
    pub fn ensure_control(&mut self, id: ElementId, required: bool) {
        self.controls.entry(id).or_insert(ControlState {
            required,
            ..ControlState::default()
        });
    }

    pub fn value(&self, id: ElementId) -> Option<&str> {
        self.controls.get(&id).map(|c| c.value.as_str())
    }

    pub fn value_revision(&self, id: ElementId) -> u64 {
        self.controls.get(&id).map(|c| c.value_rev).unwrap_or(0)
    }

    /// User edit: overwrite the value and mark the control touched and dirty.
    pub fn set_value(&mut self, id: ElementId, value: String) {
        let st = self.controls.entry(id).or_default();
        if st.value != value {
            st.value = value;
            st.value_rev = st.value_rev.wrapping_add(1);
            st.dirty = true;
        }
        st.touched = true;
    }

    /// Programmatic write (restoring a saved draft); does not touch pristine flags.
    pub fn restore_value(&mut self, id: ElementId, value: String) {
        let st = self.controls.entry(id).or_default();
        if st.value != value {
            st.value = value;
            st.value_rev = st.value_rev.wrapping_add(1);
        }
    }

    pub fn is_checked(&self, id: ElementId) -> bool {
        self.controls.get(&id).is_some_and(|c| c.checked)
    }

    /// Returns `true` if the checked state changed.
    pub fn set_checked(&mut self, id: ElementId, checked: bool) -> bool {
        let st = self.controls.entry(id).or_default();
        let changed = st.checked != checked;
        st.checked = checked;
        st.touched = true;
        if changed {
            st.dirty = true;
        }
        changed
    }

    /// Returns `true` if the state changed (always, for a known control).
    pub fn toggle_checked(&mut self, id: ElementId) -> bool {
        let next = !self.is_checked(id);
        self.set_checked(id, next)
    }

    pub fn mark_touched(&mut self, id: ElementId) {
        if let Some(st) = self.controls.get_mut(&id) {
            st.touched = true;
        }
    }

    pub fn is_touched(&self, id: ElementId) -> bool {
        self.controls.get(&id).is_some_and(|c| c.touched)
    }

    pub fn is_dirty(&self, id: ElementId) -> bool {
        self.controls.get(&id).is_some_and(|c| c.dirty)
    }

    pub fn is_pristine(&self) -> bool {
        self.controls.values().all(|c| !c.dirty && !c.touched)
    }

    pub fn placeholder(&self, id: ElementId) -> Option<&str> {
        self.controls.get(&id).map(|c| c.placeholder.as_str())
    }

    pub fn has_error_class(&self, id: ElementId) -> bool {
        self.controls.get(&id).is_some_and(|c| c.error_class)
    }

    /// Framework-level `required` check: an unset requirement always passes,
    /// text needs a non-empty value, a checkbox needs to be checked.
    pub fn required_ok(&self, id: ElementId, is_checkbox: bool) -> bool {
        let Some(st) = self.controls.get(&id) else {
            return true;
        };
        if !st.required {
            return true;
        }
        if is_checkbox {
            st.checked
        } else {
            !st.value.is_empty()
        }
    }

    /// Everything the validator needs to know about one control.
    pub fn field_input(&self, id: ElementId, is_checkbox: bool) -> FieldInput<'_> {
        FieldInput {
            value: self.value(id).unwrap_or(""),
            checked: self.is_checked(id),
            required_ok: self.required_ok(id, is_checkbox),
        }
    }

    /// Back to an untouched form: empty values, unchecked boxes, no error styling.
    ///
    /// Placeholders are left as they are; the owner re-renders them.
    pub fn reset_pristine(&mut self) {
        for st in self.controls.values_mut() {
            if !st.value.is_empty() {
                st.value.clear();
                st.value_rev = st.value_rev.wrapping_add(1);
            }
            st.checked = false;
            st.error_class = false;
            st.touched = false;
            st.dirty = false;
        }
    }
}

impl FieldSurface for ControlStore {
    fn set_placeholder(&mut self, id: ElementId, text: &str) {
        let st = self.controls.entry(id).or_default();
        if st.placeholder != text {
            st.placeholder = text.to_string();
        }
    }

    fn set_error_class(&mut self, id: ElementId, on: bool) {
        self.controls.entry(id).or_default().error_class = on;
    }

    fn clear_value(&mut self, id: ElementId) {
        if let Some(st) = self.controls.get_mut(&id)
            && !st.value.is_empty()
        {
            st.value.clear();
            st.value_rev = st.value_rev.wrapping_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: ElementId = ElementId(1);
    const TERMS: ElementId = ElementId(2);

    #[test]
    fn required_text_needs_a_value() {
        let mut store = ControlStore::new();
        store.ensure_control(NAME, true);
        assert!(!store.required_ok(NAME, false));

        store.set_value(NAME, "Ada".into());
        assert!(store.required_ok(NAME, false));
    }

    #[test]
    fn optional_controls_always_pass() {
        let mut store = ControlStore::new();
        store.ensure_control(NAME, false);
        assert!(store.required_ok(NAME, false));
        assert!(store.required_ok(ElementId(99), false));
    }

    #[test]
    fn required_checkbox_needs_check() {
        let mut store = ControlStore::new();
        store.ensure_control(TERMS, true);
        assert!(!store.required_ok(TERMS, true));

        assert!(store.set_checked(TERMS, true));
        assert!(store.required_ok(TERMS, true));
        assert!(!store.set_checked(TERMS, true));
    }

    #[test]
    fn edits_bump_revision_and_dirty_flags() {
        let mut store = ControlStore::new();
        store.ensure_control(NAME, true);
        assert!(store.is_pristine());

        store.set_value(NAME, "a".into());
        assert_eq!(store.value_revision(NAME), 1);
        assert!(store.is_dirty(NAME));
        assert!(store.is_touched(NAME));

        // Same value again: touched but no new revision.
        store.set_value(NAME, "a".into());
        assert_eq!(store.value_revision(NAME), 1);
    }

    #[test]
    fn restore_value_keeps_control_pristine() {
        let mut store = ControlStore::new();
        store.ensure_control(NAME, true);
        store.restore_value(NAME, "saved".into());

        assert_eq!(store.value(NAME), Some("saved"));
        assert!(store.is_pristine());
    }

    #[test]
    fn reset_pristine_clears_everything_but_placeholders() {
        let mut store = ControlStore::new();
        store.ensure_control(NAME, true);
        store.ensure_control(TERMS, true);
        store.set_value(NAME, "Ada".into());
        store.set_checked(TERMS, true);
        store.set_placeholder(NAME, "Your name");
        store.set_error_class(NAME, true);

        store.reset_pristine();

        assert_eq!(store.value(NAME), Some(""));
        assert!(!store.is_checked(TERMS));
        assert!(!store.has_error_class(NAME));
        assert!(store.is_pristine());
        assert_eq!(store.placeholder(NAME), Some("Your name"));
    }

    #[test]
    fn toggle_flips_checked_state() {
        let mut store = ControlStore::new();
        store.ensure_control(TERMS, true);
        assert!(store.toggle_checked(TERMS));
        assert!(store.is_checked(TERMS));
        assert!(store.toggle_checked(TERMS));
        assert!(!store.is_checked(TERMS));
    }
}
