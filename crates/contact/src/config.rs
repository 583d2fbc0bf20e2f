//! `contact.toml`: how messages leave the process, success banner timing and
//! the compact-layout breakpoint.
//!
//! ```toml
//! [transport]
//! mode = "live"
//! endpoint = "https://mail.example.org/send"
//!
//! [timing]
//! success_visible_ms = 3000
//! success_fading_ms = 500
//!
//! [layout]
//! compact_breakpoint = 768
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid config: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("transport endpoint {endpoint:?} is not a URL: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("transport endpoint must be http or https, got {0:?}")]
    Scheme(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Live,
    /// No network: every submission succeeds immediately.
    #[default]
    Simulated,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub mode: TransportMode,
    pub endpoint: String,
    pub headers: BTreeMap<String, String>,
    pub timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            mode: TransportMode::Simulated,
            endpoint: String::new(),
            headers,
            timeout_ms: 10_000,
        }
    }
}

impl TransportConfig {
    pub fn header_list(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub success_visible_ms: u64,
    pub success_fading_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            success_visible_ms: 3000,
            success_fading_ms: 500,
        }
    }
}

impl TimingConfig {
    pub fn success_visible(&self) -> Duration {
        Duration::from_millis(self.success_visible_ms)
    }

    pub fn success_fading(&self) -> Duration {
        Duration::from_millis(self.success_fading_ms)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub compact_breakpoint: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            compact_breakpoint: 768.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Where the language choice is kept. `None` keeps it in memory only.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub transport: TransportConfig,
    pub timing: TimingConfig,
    pub layout: LayoutConfig,
    pub preferences: PreferencesConfig,
}

impl ContactConfig {
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, ConfigError> {
        let cfg: ContactConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read `path`; a missing file means defaults (simulated transport).
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(path, &text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Live mode needs an absolute http(s) endpoint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.mode != TransportMode::Live {
            return Ok(());
        }
        let endpoint = &self.transport.endpoint;
        let url = url::Url::parse(endpoint).map_err(|source| ConfigError::Endpoint {
            endpoint: endpoint.clone(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigError::Scheme(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_simulated_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = ContactConfig::load_or_default(&dir.path().join("contact.toml")).unwrap();
        assert_eq!(cfg.transport.mode, TransportMode::Simulated);
        assert_eq!(cfg.timing.success_visible(), Duration::from_millis(3000));
        assert_eq!(cfg.timing.success_fading(), Duration::from_millis(500));
        assert_eq!(cfg.layout.compact_breakpoint, 768.0);
        assert_eq!(
            cfg.transport.header_list(),
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contact.toml");
        fs::write(
            &path,
            "[transport]\nmode = \"live\"\nendpoint = \"https://mail.example.org/send\"\n\n[timing]\nsuccess_visible_ms = 1000\n",
        )
        .unwrap();

        let cfg = ContactConfig::load_or_default(&path).unwrap();
        assert_eq!(cfg.transport.mode, TransportMode::Live);
        assert_eq!(cfg.timing.success_visible_ms, 1000);
        assert_eq!(cfg.timing.success_fading_ms, 500);
        assert_eq!(cfg.transport.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn live_mode_rejects_bad_endpoints() {
        let p = Path::new("contact.toml");
        let err = ContactConfig::from_toml_str(p, "[transport]\nmode = \"live\"\nendpoint = \"nope\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Endpoint { .. }));

        let err = ContactConfig::from_toml_str(
            p,
            "[transport]\nmode = \"live\"\nendpoint = \"ftp://example.org/x\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Scheme(ref s) if s == "ftp"));
    }

    #[test]
    fn unknown_mode_is_a_parse_error() {
        let err = ContactConfig::from_toml_str(Path::new("c.toml"), "[transport]\nmode = \"carrier-pigeon\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
