use crate::catalog::Catalog;
use crate::error::LocaleError;
use crate::prefs::{LANG_KEY, PreferenceStore};
use std::collections::HashMap;
use std::fmt;

pub const DEFAULT_LANG: &str = "en";

/// Languages bundled with the binary, preloaded at startup.
pub const SUPPORTED_LANGS: [&str; 2] = ["en", "de"];

const BUNDLED_EN: &str = include_str!("../assets/en.json");
const BUNDLED_DE: &str = include_str!("../assets/de.json");

/// Active-language string lookup with a change revision.
pub struct Localizer {
    catalogs: HashMap<String, Catalog>,
    active: String,
    revision: u64,
}

impl Localizer {
    /// Empty localizer; `translate` echoes keys until catalogs are added.
    pub fn new(active: &str) -> Self {
        Self {
            catalogs: HashMap::new(),
            active: active.to_string(),
            revision: 0,
        }
    }

    /// Localizer with the bundled `en`/`de` catalogs, `en` active.
    pub fn bundled() -> Result<Self, LocaleError> {
        let mut l = Localizer::new(DEFAULT_LANG);
        l.add_catalog("en", Catalog::from_json_str("en", BUNDLED_EN)?);
        l.add_catalog("de", Catalog::from_json_str("de", BUNDLED_DE)?);
        Ok(l)
    }

    /// Bundled catalogs with the language saved under `"lang"` active.
    ///
    /// A missing preference falls back to `en`; a saved language we have no
    /// catalog for is logged and ignored.
    pub fn from_preferences(prefs: &dyn PreferenceStore) -> Result<Self, LocaleError> {
        let mut l = Localizer::bundled()?;
        let saved = prefs.get(LANG_KEY).unwrap_or_else(|| DEFAULT_LANG.to_string());
        if let Err(err) = l.use_lang(&saved) {
            log::warn!("{err}; falling back to {DEFAULT_LANG}");
        }
        Ok(l)
    }

    pub fn add_catalog(&mut self, lang: &str, catalog: Catalog) {
        match self.catalogs.get_mut(lang) {
            Some(existing) => existing.merge(catalog),
            None => {
                self.catalogs.insert(lang.to_string(), catalog);
            }
        }
        if lang == self.active {
            self.bump();
        }
    }

    pub fn active(&self) -> &str {
        &self.active
    }

    /// Switch the active language. Returns `true` if it changed.
    pub fn use_lang(&mut self, lang: &str) -> Result<bool, LocaleError> {
        if !self.catalogs.contains_key(lang) {
            return Err(LocaleError::UnknownLanguage(lang.to_string()));
        }
        if self.active == lang {
            return Ok(false);
        }
        log::info!("language {} -> {lang}", self.active);
        self.active = lang.to_string();
        self.bump();
        Ok(true)
    }

    /// Switch language and remember the choice on this device.
    pub fn set_language(
        &mut self,
        prefs: &mut dyn PreferenceStore,
        lang: &str,
    ) -> Result<bool, LocaleError> {
        let changed = self.use_lang(lang)?;
        prefs.set(LANG_KEY, lang)?;
        Ok(changed)
    }

    /// String for `key` in the active language, or the key itself when missing.
    pub fn translate<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalogs
            .get(&self.active)
            .and_then(|c| c.get(key))
            .unwrap_or(key)
    }

    /// Bumped whenever the strings `translate` returns may have changed.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("active", &self.active)
            .field("languages", &self.catalogs.keys().collect::<Vec<_>>())
            .field("revision", &self.revision)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use crate::prefs::MemoryPreferences;

    #[test]
    fn bundled_catalogs_cover_the_same_keys() {
        let en = Catalog::from_json_str("en", BUNDLED_EN).unwrap();
        let de = Catalog::from_json_str("de", BUNDLED_DE).unwrap();
        assert_eq!(en.len(), de.len());
        for key in [
            keys::NAME_PLACEHOLDER,
            keys::NAME_ERROR,
            keys::EMAIL_PLACEHOLDER,
            keys::EMAIL_ERROR,
            keys::MESSAGE_PLACEHOLDER,
            keys::MESSAGE_ERROR,
            keys::PRIVACY_TEXT,
            keys::PRIVACY_ERROR,
            keys::SEND,
            keys::SUCCESS,
            keys::RETRY,
            keys::CHECK_WORK,
            keys::CONTACT_ME,
        ] {
            assert!(en.get(key).is_some(), "en missing {key}");
            assert!(de.get(key).is_some(), "de missing {key}");
        }
    }

    #[test]
    fn missing_keys_echo_back() {
        let l = Localizer::bundled().unwrap();
        assert_eq!(l.translate("NOPE.NOT_HERE"), "NOPE.NOT_HERE");
    }

    #[test]
    fn switching_language_bumps_revision_once() {
        let mut l = Localizer::bundled().unwrap();
        let before = l.revision();
        assert!(l.use_lang("de").unwrap());
        assert!(!l.use_lang("de").unwrap());

        assert_eq!(l.revision(), before + 1);
        assert_eq!(l.translate(keys::NAME_PLACEHOLDER), "Dein Name");
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut l = Localizer::bundled().unwrap();
        assert!(matches!(
            l.use_lang("fr"),
            Err(LocaleError::UnknownLanguage(ref lang)) if lang == "fr"
        ));
        assert_eq!(l.active(), "en");
    }

    #[test]
    fn preference_defaults_to_english() {
        let prefs = MemoryPreferences::new();
        let l = Localizer::from_preferences(&prefs).unwrap();
        assert_eq!(l.active(), "en");
    }

    #[test]
    fn saved_preference_is_used_and_written_back() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(LANG_KEY, "de").unwrap();
        let mut l = Localizer::from_preferences(&prefs).unwrap();
        assert_eq!(l.active(), "de");

        l.set_language(&mut prefs, "en").unwrap();
        assert_eq!(prefs.get(LANG_KEY).as_deref(), Some("en"));
    }

    #[test]
    fn unsupported_saved_language_falls_back() {
        let mut prefs = MemoryPreferences::new();
        prefs.set(LANG_KEY, "xx").unwrap();
        let l = Localizer::from_preferences(&prefs).unwrap();
        assert_eq!(l.active(), "en");
    }
}
