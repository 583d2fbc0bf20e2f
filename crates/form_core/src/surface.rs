//! Presentation seam for validation results.
//!
//! The validator never touches a control directly. Whatever renders the form
//! implements this trait and receives the placeholder, error-class and
//! value-clearing side effects through it.

use core_types::ElementId;

pub trait FieldSurface {
    /// Replace the placeholder text shown in an empty control.
    fn set_placeholder(&mut self, id: ElementId, text: &str);

    /// Toggle the error-state styling of a control.
    fn set_error_class(&mut self, id: ElementId, on: bool);

    /// Drop the control's current raw value.
    fn clear_value(&mut self, id: ElementId);
}
