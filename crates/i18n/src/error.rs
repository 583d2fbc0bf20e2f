use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("translation file for {lang:?} is not valid JSON: {source}")]
    Parse {
        lang: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no translations loaded for language {0:?}")]
    UnknownLanguage(String),

    #[error("could not access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preferences at {path} are malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}
