//! Localized strings for the site, and the device-local language preference.
//!
//! Translations are flat `KEY.SUB_KEY -> text` catalogs, one per language.
//! [`Localizer`] tracks the active language and bumps a revision when it
//! changes so cached strings (form placeholders) can be rebuilt.

mod catalog;
mod error;
pub mod keys;
mod localizer;
mod prefs;

pub use catalog::Catalog;
pub use error::LocaleError;
pub use localizer::{DEFAULT_LANG, Localizer, SUPPORTED_LANGS};
pub use prefs::{FilePreferences, LANG_KEY, MemoryPreferences, PreferenceStore};
