//! Session-scoped contact draft.
//!
//! The draft survives navigation between sections but not a full reload: it
//! lives exactly as long as the store that owns it.

use crate::viewport::ViewportQuery;
use std::fmt;

/// In-progress contents of the contact form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
    /// CSS length string for the message box, e.g. `"22px"`.
    pub message_height: String,
}

/// Partial update for [`DraftStore::set_data`]. `None` fields are left alone.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub message_height: Option<String>,
}

impl DraftPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_message_height(mut self, height: impl Into<String>) -> Self {
        self.message_height = Some(height.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.message.is_none()
            && self.message_height.is_none()
    }
}

/// Picks the default message-box height from the viewport width.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightRule {
    /// Widths at or below this are treated as narrow.
    pub breakpoint_px: f32,
    pub compact: String,
    pub standard: String,
}

impl Default for HeightRule {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            compact: "22px".to_string(),
            standard: "40px".to_string(),
        }
    }
}

impl HeightRule {
    pub fn height_for(&self, width: f32) -> &str {
        if width <= self.breakpoint_px {
            &self.compact
        } else {
            &self.standard
        }
    }
}

/// Owns the one live [`ContactDraft`] of a session.
///
/// Writes are last-write-wins; readers always get a copy.
pub struct DraftStore {
    viewport: Box<dyn ViewportQuery>,
    rule: HeightRule,
    data: ContactDraft,
    // Set once the height came from a patch rather than from the viewport.
    height_pinned: bool,
}

impl DraftStore {
    pub fn new(viewport: impl ViewportQuery + 'static) -> Self {
        Self::with_rule(viewport, HeightRule::default())
    }

    pub fn with_rule(viewport: impl ViewportQuery + 'static, rule: HeightRule) -> Self {
        let viewport: Box<dyn ViewportQuery> = Box::new(viewport);
        let data = fresh_draft(viewport.as_ref(), &rule);
        Self {
            viewport,
            rule,
            data,
            height_pinned: false,
        }
    }

    /// Merge the given fields into the draft.
    pub fn set_data(&mut self, patch: DraftPatch) {
        let DraftPatch {
            name,
            email,
            message,
            message_height,
        } = patch;

        if let Some(name) = name {
            self.data.name = name;
        }
        if let Some(email) = email {
            self.data.email = email;
        }
        if let Some(message) = message {
            self.data.message = message;
        }
        if let Some(height) = message_height {
            self.data.message_height = height;
            self.height_pinned = true;
        }
    }

    /// Snapshot of the current draft.
    pub fn get_data(&self) -> ContactDraft {
        self.data.clone()
    }

    /// Reset to defaults, recomputing the message height for the current viewport.
    pub fn clear_data(&mut self) {
        self.data = fresh_draft(self.viewport.as_ref(), &self.rule);
        self.height_pinned = false;
        log::debug!(
            "draft cleared (message height {})",
            self.data.message_height
        );
    }

    /// Re-derive the default message height from the current viewport width.
    ///
    /// A height written through [`DraftStore::set_data`] is kept. Returns
    /// `true` when the height changed.
    pub fn refit_height(&mut self) -> bool {
        if self.height_pinned {
            return false;
        }
        let height = self.rule.height_for(self.viewport.width());
        if height == self.data.message_height {
            return false;
        }
        self.data.message_height = height.to_string();
        log::debug!("default message height now {height}");
        true
    }

    pub fn height_rule(&self) -> &HeightRule {
        &self.rule
    }
}

impl fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftStore")
            .field("rule", &self.rule)
            .field("data", &self.data)
            .finish_non_exhaustive()
    }
}

fn fresh_draft(viewport: &dyn ViewportQuery, rule: &HeightRule) -> ContactDraft {
    ContactDraft {
        name: String::new(),
        email: String::new(),
        message: String::new(),
        message_height: rule.height_for(viewport.width()).to_string(),
    }
}
