//! The elements the contact section is made of, built into a [`StyleTree`].
//!
//! Everything downstream receives these handles explicitly; nothing looks
//! elements up by selector.

use core_types::{ElementId, FieldKey};
use i18n::{Localizer, keys};
use style::{StyleSurface, StyleTree};

use crate::labels::LabelTrio;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldHandles {
    pub name: ElementId,
    pub email: ElementId,
    pub message: ElementId,
    pub privacy: ElementId,
}

impl FieldHandles {
    pub fn get(&self, key: FieldKey) -> ElementId {
        match key {
            FieldKey::Name => self.name,
            FieldKey::Email => self.email,
            FieldKey::Message => self.message,
            FieldKey::Privacy => self.privacy,
        }
    }

    pub fn key_of(&self, id: ElementId) -> Option<FieldKey> {
        FieldKey::ALL.into_iter().find(|k| self.get(*k) == id)
    }
}

/// Marquee buttons in the hero section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroButtons {
    pub check_work: ElementId,
    pub contact_me: ElementId,
}

#[derive(Debug)]
pub struct ContactPage {
    pub tree: StyleTree,
    pub form: ElementId,
    pub fields: FieldHandles,
    /// Labels wrapping name, email and message, top to bottom.
    pub labels: [ElementId; 3],
    pub submit: ElementId,
    pub hero: HeroButtons,
}

impl ContactPage {
    pub fn build(localizer: &Localizer) -> Self {
        let mut tree = StyleTree::new();

        let hero_root = tree.create("section");
        let check_work = tree.append_child(hero_root, "button");
        tree.append_child(check_work, "span");
        let contact_me = tree.append_child(hero_root, "button");
        tree.append_child(contact_me, "span");

        let form = tree.create("form");
        let name_label = tree.append_child(form, "label");
        let name = tree.append_child(name_label, "input");
        let email_label = tree.append_child(form, "label");
        let email = tree.append_child(email_label, "input");
        let message_label = tree.append_child(form, "label");
        let message = tree.append_child(message_label, "textarea");

        let privacy_row = tree.append_child(form, "div");
        let privacy = tree.append_child(privacy_row, "input");
        tree.append_child(privacy_row, "p");

        let submit = tree.append_child(form, "button");
        tree.append_child(submit, "span");

        let mut page = Self {
            tree,
            form,
            fields: FieldHandles {
                name,
                email,
                message,
                privacy,
            },
            labels: [name_label, email_label, message_label],
            submit,
            hero: HeroButtons {
                check_work,
                contact_me,
            },
        };
        page.apply_strings(localizer);
        page
    }

    /// Re-render button captions in the active language.
    pub fn apply_strings(&mut self, localizer: &Localizer) {
        for (button, key) in [
            (self.submit, keys::SEND),
            (self.hero.check_work, keys::CHECK_WORK),
            (self.hero.contact_me, keys::CONTACT_ME),
        ] {
            if let Some(span) = self.tree.first_text_child(button) {
                self.tree.set_text(span, localizer.translate(key));
            }
        }
    }

    /// Elements that run the marquee animation on hover.
    pub fn marquee_buttons(&self) -> [ElementId; 3] {
        [self.hero.check_work, self.hero.contact_me, self.submit]
    }

    pub fn caption(&self, button: ElementId) -> &str {
        self.tree
            .first_text_child(button)
            .and_then(|span| self.tree.text(span))
            .unwrap_or("")
    }

    pub fn label_trio(&self) -> LabelTrio {
        LabelTrio::new(&self.labels)
    }
}
