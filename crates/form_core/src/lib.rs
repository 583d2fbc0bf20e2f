//! # form_core
//!
//! UI-agnostic state layer for the contact form.
//!
//! This crate provides the building blocks the form engine is made of:
//! - [`DraftStore`]: the session-scoped, in-progress contact draft
//! - [`ControlStore`]: per-control value/checked/pristine state (the "form framework")
//! - [`FieldValidator`]: pure per-field validity with an explicit `check_now` gate
//! - [`AgreementFlag`]: the persistent terms-agreement warning
//! - [`auto_grow`]: the two-write textarea height routine
//!
//! ## Design Principles
//!
//! Nothing here talks to a window, a DOM or the network. Integration layers
//! implement [`FieldSurface`], [`GrowSurface`] and [`ViewportQuery`] and pass
//! element handles in explicitly.
//!
//! ```
//! use form_core::{DraftPatch, DraftStore};
//!
//! let mut store = DraftStore::new(1024.0);
//! store.set_data(DraftPatch::default().with_name("Ada"));
//!
//! assert_eq!(store.get_data().name, "Ada");
//! assert_eq!(store.get_data().email, "");
//! ```

mod agreement;
mod controls;
mod draft;
mod email;
mod grow;
mod surface;
mod validate;
mod viewport;

pub use agreement::AgreementFlag;
pub use controls::ControlStore;
pub use draft::{ContactDraft, DraftPatch, DraftStore, HeightRule};
pub use email::{EMAIL_PATTERN, is_valid_email};
pub use grow::{GrowSurface, auto_grow, format_px};
pub use surface::FieldSurface;
pub use validate::{FieldDescriptor, FieldInput, FieldValidator, Validation};
pub use viewport::{SharedViewport, ViewportQuery};
