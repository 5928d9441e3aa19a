//! Suite configuration.
//!
//! A flat string-keyed store loaded from a Java-style properties file
//! (`key = value` lines, `#`/`!` comments) with typed accessors for the
//! handful of keys the harness cares about. Absent values fall back to
//! caller-supplied defaults; the core never hard-fails on a missing key.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::result::{SondarError, SondarResult};

/// Key for the browser selection
pub const KEY_BROWSER: &str = "selenium.browser";
/// Key for the base URL under test
pub const KEY_URL: &str = "selenium.url";
/// Key for the data-driven spreadsheet file
pub const KEY_DATA_FILE: &str = "selenium.xls";
/// Key for the default poll timeout, in milliseconds
pub const KEY_TIMEOUT: &str = "selenium.timeout";
/// Key for the directory evidence files are written to
pub const KEY_EVIDENCE_DIR: &str = "selenium.evidence.dir";

/// String-keyed suite configuration
#[derive(Debug, Clone, Default)]
pub struct SuiteConfig {
    properties: HashMap<String, String>,
}

impl SuiteConfig {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            properties: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse properties text: one `key = value` per line, `#` or `!`
    /// starting a comment line, blank lines ignored.
    pub fn from_properties_str(text: &str) -> SondarResult<Self> {
        let mut properties = HashMap::new();
        for (number, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(SondarError::config(format!(
                    "line {}: expected key=value, got {line:?}",
                    number + 1
                )));
            };
            properties.insert(key.trim().to_string(), value.trim().to_string());
        }
        Ok(Self { properties })
    }

    /// Load a properties file from disk
    pub fn load(path: impl AsRef<Path>) -> SondarResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_properties_str(&text)
    }

    /// Set a property, replacing any existing value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    /// Raw string lookup
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Selected browser, if configured
    #[must_use]
    pub fn browser(&self) -> Option<&str> {
        self.get(KEY_BROWSER)
    }

    /// Base URL under test, if configured
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.get(KEY_URL)
    }

    /// Data-driven spreadsheet file, if configured
    #[must_use]
    pub fn data_file(&self) -> Option<&str> {
        self.get(KEY_DATA_FILE)
    }

    /// Default poll timeout in milliseconds; absence or a malformed value
    /// yields the caller-supplied default.
    #[must_use]
    pub fn timeout_ms(&self, default_ms: u64) -> u64 {
        self.get(KEY_TIMEOUT)
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(default_ms)
    }

    /// Directory evidence files are written to; defaults to the OS temp dir.
    #[must_use]
    pub fn evidence_dir(&self) -> PathBuf {
        self.get(KEY_EVIDENCE_DIR)
            .map_or_else(std::env::temp_dir, PathBuf::from)
    }
}
