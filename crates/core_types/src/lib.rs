pub type RequestId = u64;

/// Handle for an element on the page surface (form control, button, label, text span).
///
/// The value is only a key; it carries no meaning beyond identity within one
/// surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Email,
    Checkbox,
}

/// The logical fields of the contact form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Email,
    Message,
    Privacy,
}

impl FieldKey {
    pub const ALL: [FieldKey; 4] = [
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::Message,
        FieldKey::Privacy,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            FieldKey::Name | FieldKey::Message => FieldKind::Text,
            FieldKey::Email => FieldKind::Email,
            FieldKey::Privacy => FieldKind::Checkbox,
        }
    }

    /// Form control id, as used for the `name`/`id` attribute of the control.
    pub fn control_id(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Message => "message",
            FieldKey::Privacy => "privacy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_kinds_match_controls() {
        assert_eq!(FieldKey::Name.kind(), FieldKind::Text);
        assert_eq!(FieldKey::Message.kind(), FieldKind::Text);
        assert_eq!(FieldKey::Email.kind(), FieldKind::Email);
        assert_eq!(FieldKey::Privacy.kind(), FieldKind::Checkbox);
    }

    #[test]
    fn control_ids_are_unique() {
        use std::collections::HashSet;

        let ids: HashSet<_> = FieldKey::ALL.iter().map(|k| k.control_id()).collect();
        assert_eq!(ids.len(), FieldKey::ALL.len());
    }
}
