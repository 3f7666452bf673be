//! Engine configuration.
//!
//! # Responsibility
//! - Hold the read-only knobs that shape annotations (`words_per_dot`).
//! - Load them from the host's JSON settings document.
//!
//! # Invariants
//! - Settings are immutable for the lifetime of one engine.
//! - Non-positive `words_per_dot` is valid input; it disables solid dots.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default scaling used by the host calendar.
pub const DEFAULT_WORDS_PER_DOT: f64 = 250.0;

/// Settings read by the annotation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Words represented by one filled dot.
    pub words_per_dot: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            words_per_dot: DEFAULT_WORDS_PER_DOT,
        }
    }
}

/// Settings load errors.
#[derive(Debug)]
pub enum SettingsError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read settings `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid settings document: {err}"),
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl Settings {
    pub fn with_words_per_dot(words_per_dot: f64) -> Self {
        Self { words_per_dot }
    }

    /// Parses settings from JSON. Unknown keys are ignored so the host can
    /// keep its other options in the same document.
    pub fn from_json_str(value: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(value)?)
    }

    /// Reads and parses a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}
