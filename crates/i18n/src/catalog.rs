use crate::error::LocaleError;
use serde_json::Value;
use std::collections::HashMap;

/// Flat translation table for one language.
///
/// Built from nested JSON: `{"CONTACT": {"NAME": "Name"}}` yields the key
/// `CONTACT.NAME`. Non-string leaves (numbers, booleans) are stored in their
/// JSON text form; `null` and arrays are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(lang: &str, json: &str) -> Result<Self, LocaleError> {
        let value: Value = serde_json::from_str(json).map_err(|source| LocaleError::Parse {
            lang: lang.to_string(),
            source,
        })?;
        let mut catalog = Catalog::new();
        flatten("", &value, &mut catalog.entries);
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overlay `other` onto this catalog; its entries win.
    pub fn merge(&mut self, other: Catalog) {
        self.entries.extend(other.entries);
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        Value::String(s) => {
            out.insert(prefix.to_string(), s.clone());
        }
        Value::Number(_) | Value::Bool(_) => {
            out.insert(prefix.to_string(), value.to_string());
        }
        Value::Null | Value::Array(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_objects_become_dotted_keys() {
        let c = Catalog::from_json_str(
            "en",
            r#"{"CONTACT": {"NAME": "Name", "DEEP": {"X": "x"}}, "TOP": "t", "N": 3}"#,
        )
        .unwrap();

        assert_eq!(c.get("CONTACT.NAME"), Some("Name"));
        assert_eq!(c.get("CONTACT.DEEP.X"), Some("x"));
        assert_eq!(c.get("TOP"), Some("t"));
        assert_eq!(c.get("N"), Some("3"));
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn invalid_json_reports_language() {
        let err = Catalog::from_json_str("de", "{ nope").unwrap_err();
        assert!(matches!(err, LocaleError::Parse { ref lang, .. } if lang == "de"));
    }

    #[test]
    fn merge_overrides_existing_keys() {
        let mut base = Catalog::new();
        base.insert("A", "1");
        base.insert("B", "2");
        let mut over = Catalog::new();
        over.insert("B", "two");

        base.merge(over);
        assert_eq!(base.get("A"), Some("1"));
        assert_eq!(base.get("B"), Some("two"));
    }
}
