//! The contact form surface: controls, their localized descriptors, and the
//! session draft they mirror into.

use core_types::{FieldKey, FieldKind};
use form_core::{
    AgreementFlag, ContactDraft, ControlStore, DraftPatch, DraftStore, FieldDescriptor,
    FieldSurface, FieldValidator, GrowSurface, auto_grow,
};
use i18n::{Localizer, keys};
use net::MessagePayload;

use crate::page::FieldHandles;

/// Outcome of validating one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldReport {
    pub field: FieldKey,
    pub invalid: bool,
}

fn string_keys(key: FieldKey) -> (&'static str, &'static str) {
    match key {
        FieldKey::Name => (keys::NAME_PLACEHOLDER, keys::NAME_ERROR),
        FieldKey::Email => (keys::EMAIL_PLACEHOLDER, keys::EMAIL_ERROR),
        FieldKey::Message => (keys::MESSAGE_PLACEHOLDER, keys::MESSAGE_ERROR),
        FieldKey::Privacy => (keys::PRIVACY_TEXT, keys::PRIVACY_ERROR),
    }
}

fn descriptors(handles: &FieldHandles, localizer: &Localizer) -> Vec<(FieldKey, FieldDescriptor)> {
    FieldKey::ALL
        .into_iter()
        .map(|key| {
            let (default_key, error_key) = string_keys(key);
            let desc = FieldDescriptor {
                control_id: key.control_id().to_string(),
                element: handles.get(key),
                default_placeholder: localizer.translate(default_key).to_string(),
                error_placeholder: localizer.translate(error_key).to_string(),
                kind: key.kind(),
            };
            (key, desc)
        })
        .collect()
}

#[derive(Debug)]
pub struct ContactForm {
    draft: DraftStore,
    controls: ControlStore,
    handles: FieldHandles,
    fields: Vec<(FieldKey, FieldDescriptor)>,
    strings_rev: u64,
    agreement: AgreementFlag,
}

impl ContactForm {
    /// Register every control as required, render default placeholders, and
    /// restore whatever the draft already holds.
    pub fn new(draft: DraftStore, handles: FieldHandles, localizer: &Localizer) -> Self {
        let mut controls = ControlStore::new();
        for key in FieldKey::ALL {
            controls.ensure_control(handles.get(key), true);
        }
        let mut form = Self {
            draft,
            controls,
            handles,
            fields: descriptors(&handles, localizer),
            strings_rev: localizer.revision(),
            agreement: AgreementFlag::new(),
        };
        form.render_placeholders();
        form.restore_from_draft();
        form
    }

    /// Rebuild descriptors if the language changed since the last call.
    /// Returns `true` when it did.
    pub fn refresh_strings(&mut self, localizer: &Localizer) -> bool {
        if localizer.revision() == self.strings_rev {
            return false;
        }
        self.fields = descriptors(&self.handles, localizer);
        self.strings_rev = localizer.revision();
        self.render_placeholders();
        log::debug!("form strings rebuilt for {}", localizer.active());
        true
    }

    /// Show each field's error string if it is currently styled as invalid,
    /// its default string otherwise.
    fn render_placeholders(&mut self) {
        for (_, desc) in &self.fields {
            let text = if self.controls.has_error_class(desc.element) {
                &desc.error_placeholder
            } else {
                &desc.default_placeholder
            };
            self.controls.set_placeholder(desc.element, text);
        }
    }

    /// A keystroke in a text field. Mirrors the new value into the draft.
    pub fn on_input(&mut self, key: FieldKey, value: String) {
        let id = self.handles.get(key);
        let patch = match key {
            FieldKey::Name => DraftPatch::default().with_name(value.as_str()),
            FieldKey::Email => DraftPatch::default().with_email(value.as_str()),
            FieldKey::Message => DraftPatch::default().with_message(value.as_str()),
            FieldKey::Privacy => {
                log::trace!("text input on the privacy checkbox ignored");
                return;
            }
        };
        self.controls.set_value(id, value);
        self.draft.set_data(patch);
    }

    pub fn on_checkbox(&mut self, checked: bool) {
        self.controls.set_checked(self.handles.privacy, checked);
        self.agreement.on_checkbox_changed(checked);
    }

    /// Re-fit the message box to its content and remember the height.
    pub fn grow_message<S: GrowSurface + ?Sized>(&mut self, surface: &mut S) -> String {
        let height = auto_grow(surface);
        self.draft
            .set_data(DraftPatch::default().with_message_height(height.as_str()));
        height
    }

    /// Validate every field and push the results onto the controls.
    pub fn validate_all(&mut self, check_now: bool) -> Vec<FieldReport> {
        let mut reports = Vec::with_capacity(self.fields.len());
        for (key, desc) in &self.fields {
            let is_checkbox = desc.kind == FieldKind::Checkbox;
            let validation = FieldValidator::evaluate(
                desc,
                self.controls.field_input(desc.element, is_checkbox),
                check_now,
            );
            FieldValidator::apply(&validation, &mut self.controls);
            self.agreement.absorb(validation.agreement_error);
            if validation.clear_value && *key == FieldKey::Email {
                self.draft.set_data(DraftPatch::default().with_email(""));
            }
            reports.push(FieldReport {
                field: *key,
                invalid: validation.invalid,
            });
        }
        reports
    }

    /// Untouched controls, empty values, default placeholders.
    pub fn reset_pristine(&mut self) {
        self.controls.reset_pristine();
        self.render_placeholders();
    }

    /// Copy the draft's text back into the controls without dirtying them.
    pub fn restore_from_draft(&mut self) {
        let d = self.draft.get_data();
        self.controls.restore_value(self.handles.name, d.name);
        self.controls.restore_value(self.handles.email, d.email);
        self.controls.restore_value(self.handles.message, d.message);
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear_data();
    }

    pub fn payload(&self) -> MessagePayload {
        let d = self.draft.get_data();
        MessagePayload {
            name: d.name,
            email: d.email,
            message: d.message,
        }
    }

    pub fn draft(&self) -> ContactDraft {
        self.draft.get_data()
    }

    /// Follow a viewport change while the message height is still the default.
    pub fn refit_message_height(&mut self) -> bool {
        self.draft.refit_height()
    }

    pub fn controls(&self) -> &ControlStore {
        &self.controls
    }

    pub fn handles(&self) -> &FieldHandles {
        &self.handles
    }

    pub fn descriptor(&self, key: FieldKey) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|(k, _)| *k == key).map(|(_, d)| d)
    }

    pub fn value(&self, key: FieldKey) -> &str {
        self.controls.value(self.handles.get(key)).unwrap_or("")
    }

    pub fn placeholder(&self, key: FieldKey) -> &str {
        self.controls.placeholder(self.handles.get(key)).unwrap_or("")
    }

    pub fn has_error(&self, key: FieldKey) -> bool {
        self.controls.has_error_class(self.handles.get(key))
    }

    pub fn is_checked(&self) -> bool {
        self.controls.is_checked(self.handles.privacy)
    }

    pub fn agreement_warning(&self) -> bool {
        self.agreement.is_raised()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ContactPage;

    fn form(width: f32) -> (ContactForm, Localizer) {
        let l = Localizer::bundled().unwrap();
        let page = ContactPage::build(&l);
        (ContactForm::new(DraftStore::new(width), page.fields, &l), l)
    }

    struct Textarea {
        height: String,
        content_height: f32,
    }

    impl GrowSurface for Textarea {
        fn set_height(&mut self, height: &str) {
            self.height = height.to_string();
        }

        fn scroll_height(&self) -> f32 {
            self.content_height
        }
    }

    #[test]
    fn input_is_mirrored_into_the_draft() {
        let (mut f, _) = form(1024.0);
        f.on_input(FieldKey::Name, "Ada".into());
        f.on_input(FieldKey::Message, "hello".into());

        let d = f.draft();
        assert_eq!(d.name, "Ada");
        assert_eq!(d.email, "");
        assert_eq!(d.message, "hello");
        assert_eq!(f.value(FieldKey::Name), "Ada");
    }

    #[test]
    fn invalid_email_is_cleared_everywhere() {
        let (mut f, l) = form(1024.0);
        f.on_input(FieldKey::Email, "a@b".into());

        let reports = f.validate_all(true);
        assert!(reports.iter().any(|r| r.field == FieldKey::Email && r.invalid));
        assert_eq!(f.value(FieldKey::Email), "");
        assert_eq!(f.draft().email, "");
        assert!(f.has_error(FieldKey::Email));
        assert_eq!(f.placeholder(FieldKey::Email), l.translate(keys::EMAIL_ERROR));
    }

    #[test]
    fn check_now_false_clears_error_styling() {
        let (mut f, l) = form(1024.0);
        f.validate_all(true);
        assert!(f.has_error(FieldKey::Name));

        let reports = f.validate_all(false);
        assert!(reports.iter().all(|r| !r.invalid));
        assert!(!f.has_error(FieldKey::Name));
        assert_eq!(f.placeholder(FieldKey::Name), l.translate(keys::NAME_PLACEHOLDER));
    }

    #[test]
    fn agreement_warning_persists_until_checked() {
        let (mut f, _) = form(1024.0);
        f.validate_all(true);
        assert!(f.agreement_warning());

        f.on_input(FieldKey::Name, "Ada".into());
        f.validate_all(false);
        assert!(f.agreement_warning());

        f.on_checkbox(true);
        assert!(!f.agreement_warning());
    }

    #[test]
    fn language_change_rebuilds_placeholders() {
        let (mut f, mut l) = form(1024.0);
        f.validate_all(true);
        assert!(!f.refresh_strings(&l));

        l.use_lang("de").unwrap();
        assert!(f.refresh_strings(&l));
        assert_eq!(f.placeholder(FieldKey::Name), "Hoppla! Dein Name fehlt");
        assert_eq!(
            f.descriptor(FieldKey::Name).unwrap().default_placeholder,
            "Dein Name"
        );
    }

    #[test]
    fn message_height_is_persisted() {
        let (mut f, _) = form(1024.0);
        let mut ta = Textarea {
            height: String::new(),
            content_height: 88.0,
        };
        assert_eq!(f.grow_message(&mut ta), "88px");
        assert_eq!(ta.height, "88px");
        assert_eq!(f.draft().message_height, "88px");
    }

    #[test]
    fn reset_and_restore() {
        let (mut f, _) = form(500.0);
        f.on_input(FieldKey::Name, "Ada".into());
        f.on_checkbox(true);
        f.reset_pristine();
        assert_eq!(f.value(FieldKey::Name), "");
        assert!(!f.is_checked());
        assert!(f.controls().is_pristine());

        f.restore_from_draft();
        assert_eq!(f.value(FieldKey::Name), "Ada");
        assert!(f.controls().is_pristine());

        f.clear_draft();
        assert_eq!(f.draft().name, "");
        assert_eq!(f.draft().message_height, "22px");
    }
}
