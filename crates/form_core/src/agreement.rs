/// Persistent "please accept the terms" warning.
///
/// Raised by a failed checkbox validation and only cleared when the checkbox
/// itself becomes checked. Edits to other fields, or later evaluations that
/// happen to pass, leave it alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AgreementFlag {
    raised: bool,
}

impl AgreementFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_raised(self) -> bool {
        self.raised
    }

    /// Fold in the `agreement_error` output of a validation.
    pub fn absorb(&mut self, agreement_error: Option<bool>) {
        if agreement_error == Some(true) {
            self.raised = true;
        }
    }

    pub fn on_checkbox_changed(&mut self, checked: bool) {
        if checked {
            self.raised = false;
        }
    }

    pub fn clear(&mut self) {
        self.raised = false;
    }
}
