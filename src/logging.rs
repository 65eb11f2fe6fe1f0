//! Opt-in debug logging to a file
//!
//! The terminal belongs to the UI, so nothing is logged unless `DEBUG` is set.
//! When it is, a `tracing-subscriber` fmt layer writes plain text to a file.

use crate::errors::{Error, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Enables logging when non-empty
pub const DEBUG_ENV: &str = "DEBUG";
/// Overrides the log file path
pub const LOG_FILE_ENV: &str = "DAZZLE_LOG_FILE";
/// Overrides the level filter
pub const LOG_FILTER_ENV: &str = "DAZZLE_LOG";

pub const DEFAULT_LOG_FILE: &str = "debug.log";
pub const DEFAULT_LOG_FILTER: &str = "debug";

/// Where and how much to log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub enabled: bool,
    pub path: PathBuf,
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from(DEFAULT_LOG_FILE),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LogSettings {
    /// Reads settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            enabled: non_empty(DEBUG_ENV).is_some(),
            path: non_empty(LOG_FILE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            filter: non_empty(LOG_FILTER_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }

    /// Installs the global subscriber if logging is enabled
    ///
    /// Returns `Ok(false)` when logging is disabled.
    pub fn init(&self) -> Result<bool> {
        if !self.enabled {
            return Ok(false);
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::logging(format!("{}: {e}", self.path.display())))?;

        let filter = EnvFilter::try_new(&self.filter)
            .map_err(|e| Error::logging(format!("invalid filter {:?}: {e}", self.filter)))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .try_init()
            .map_err(|e| Error::logging(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), "debug logging enabled");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_disabled_without_debug() {
        let settings = LogSettings::from_lookup(lookup(&[]));
        assert_eq!(settings, LogSettings::default());
        assert!(!settings.init().unwrap());
    }

    #[test]
    fn test_empty_debug_is_disabled() {
        let settings = LogSettings::from_lookup(lookup(&[(DEBUG_ENV, "")]));
        assert!(!settings.enabled);
    }

    #[test]
    fn test_overrides() {
        let settings = LogSettings::from_lookup(lookup(&[
            (DEBUG_ENV, "1"),
            (LOG_FILE_ENV, "/tmp/dazzle.log"),
            (LOG_FILTER_ENV, "dazzle=trace"),
        ]));
        assert!(settings.enabled);
        assert_eq!(settings.path, PathBuf::from("/tmp/dazzle.log"));
        assert_eq!(settings.filter, "dazzle=trace");
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let settings = LogSettings {
            enabled: true,
            path: PathBuf::from("/definitely/not/a/dir/debug.log"),
            ..Default::default()
        };
        assert!(matches!(settings.init().unwrap_err(), Error::Logging(_)));
    }
}
