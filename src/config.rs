//! Browser configuration

use crate::adapter::SCHEMA_MAX_DEPTH;
use crate::ui::theme::Theme;
use std::time::Duration;

/// Environment variable overriding [`BrowserConfig::schema_max_depth`]
pub const SCHEMA_DEPTH_ENV: &str = "DAZZLE_SCHEMA_DEPTH";

/// Columns and rows taken by a pane's border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneFrame {
    pub horizontal: u16,
    pub vertical: u16,
}

impl Default for PaneFrame {
    fn default() -> Self {
        Self {
            horizontal: 2,
            vertical: 2,
        }
    }
}

/// Browser configuration
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserConfig {
    /// Nested schema levels expanded by the adapter
    pub schema_max_depth: usize,
    /// The list pane gets `width / list_fraction_divisor` columns
    pub list_fraction_divisor: u16,
    /// Border allowance subtracted from each pane
    pub pane_frame: PaneFrame,
    /// Spinner tick interval
    pub tick_rate: Duration,
    /// Color palette
    pub theme: Theme,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            schema_max_depth: SCHEMA_MAX_DEPTH,
            list_fraction_divisor: 3,
            pane_frame: PaneFrame::default(),
            tick_rate: Duration::from_millis(100),
            theme: Theme::default(),
        }
    }
}

impl BrowserConfig {
    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Default configuration with overrides read through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(SCHEMA_DEPTH_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(depth) => config.schema_max_depth = depth,
                Err(_) => tracing::warn!(value = %raw, "ignoring invalid {SCHEMA_DEPTH_ENV}"),
            }
        }

        config
    }

    /// Width of the list pane for a total width
    pub fn list_width(&self, total_width: u16) -> u16 {
        total_width / self.list_fraction_divisor.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BrowserConfig::default();
        assert_eq!(config.schema_max_depth, 3);
        assert_eq!(config.list_fraction_divisor, 3);
        assert_eq!(config.pane_frame, PaneFrame { horizontal: 2, vertical: 2 });
        assert_eq!(config.tick_rate, Duration::from_millis(100));
    }

    #[test]
    fn test_schema_depth_override() {
        let config = BrowserConfig::from_lookup(|key| {
            (key == SCHEMA_DEPTH_ENV).then(|| " 5 ".to_string())
        });
        assert_eq!(config.schema_max_depth, 5);

        let config = BrowserConfig::from_lookup(|_| Some("deep".to_string()));
        assert_eq!(config.schema_max_depth, SCHEMA_MAX_DEPTH);
    }

    #[test]
    fn test_list_width() {
        let config = BrowserConfig::default();
        assert_eq!(config.list_width(120), 40);
        assert_eq!(config.list_width(2), 0);
    }
}
