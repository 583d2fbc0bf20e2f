//! Per-field validity for the contact form.
//!
//! Evaluation is pure: [`FieldValidator::evaluate`] only computes a
//! [`Validation`]. Side effects (placeholder swap, error class, clearing an
//! invalid email) happen in [`FieldValidator::apply`], against whatever
//! [`FieldSurface`] the caller hands in.

use crate::email::is_valid_email;
use crate::surface::FieldSurface;
use core_types::{ElementId, FieldKind};

/// Association between a logical field and its presentation strings.
///
/// Rebuilt, not mutated, whenever the localized strings change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub control_id: String,
    pub element: ElementId,
    pub default_placeholder: String,
    pub error_placeholder: String,
    pub kind: FieldKind,
}

/// Raw state of one control at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldInput<'a> {
    pub value: &'a str,
    pub checked: bool,
    /// Result of the form framework's own `required` check.
    pub required_ok: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validation {
    pub element: ElementId,
    pub invalid: bool,
    /// Placeholder to show: the error string when invalid, the default otherwise.
    pub placeholder: String,
    pub error_class: bool,
    /// Invalid email values are dropped so the user has to type them again.
    pub clear_value: bool,
    /// Checkbox fields only: whether this evaluation raises the agreement warning.
    pub agreement_error: Option<bool>,
}

pub struct FieldValidator;

impl FieldValidator {
    /// Decide whether a field should display as invalid.
    ///
    /// With `check_now == false` nothing is ever invalid; errors only surface
    /// when explicitly requested.
    pub fn evaluate(
        descriptor: &FieldDescriptor,
        input: FieldInput<'_>,
        check_now: bool,
    ) -> Validation {
        let invalid = check_now
            && match descriptor.kind {
                FieldKind::Text => !input.required_ok,
                FieldKind::Email => {
                    !input.required_ok
                        || (!input.value.is_empty() && !is_valid_email(input.value))
                }
                FieldKind::Checkbox => !input.required_ok || !input.checked,
            };

        let placeholder = if invalid {
            &descriptor.error_placeholder
        } else {
            &descriptor.default_placeholder
        };

        Validation {
            element: descriptor.element,
            invalid,
            placeholder: placeholder.clone(),
            error_class: invalid,
            clear_value: invalid && descriptor.kind == FieldKind::Email,
            agreement_error: (descriptor.kind == FieldKind::Checkbox).then_some(invalid),
        }
    }

    /// Push a validation's side effects onto the rendering surface.
    pub fn apply<S: FieldSurface + ?Sized>(validation: &Validation, surface: &mut S) {
        surface.set_placeholder(validation.element, &validation.placeholder);
        surface.set_error_class(validation.element, validation.error_class);
        if validation.clear_value {
            surface.clear_value(validation.element);
        }
    }
}
