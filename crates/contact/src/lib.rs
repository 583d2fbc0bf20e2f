//! Contact section of the portfolio: form, submission sequence, marquee
//! buttons and language switching, wired together.
//!
//! [`ContactApp`] is headless and deterministic (every time-dependent call
//! takes an `Instant`); the egui rendering lives in `view` and is reached
//! through [`app_api::UiApp`].

pub mod app;
pub mod config;
pub mod form;
pub mod labels;
pub mod page;
pub mod sequencer;
pub mod timers;
mod view;

pub use app::{ContactApp, StartupError};
pub use config::{ConfigError, ContactConfig, TransportMode};
pub use form::{ContactForm, FieldReport};
pub use labels::LabelTrio;
pub use page::{ContactPage, FieldHandles, HeroButtons};
pub use sequencer::{Dispatch, SubmissionSequencer, SubmissionState, SubmitOutcome, Surfaces};
pub use timers::{Fired, TimerId, TimerQueue};
