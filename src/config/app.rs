//! Simulated feed reader configuration.

use std::time::Duration;

use serde::Deserialize;

use super::ConfigError;
use crate::app::{DEFAULT_ENTRIES_PER_FEED, DEFAULT_LOAD_LATENCY};
use crate::feeds::{FeedCatalog, FeedDescriptor};

/// Application configuration.
///
/// The catalog comes from `feeds_file` if set, else from inline `feeds`,
/// else the built-in default feeds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulated delay before a loaded feed is rendered.
    pub load_latency_ms: u64,
    /// Entries generated for every feed.
    pub entries_per_feed: usize,
    /// Inline feed catalog.
    pub feeds: Option<Vec<FeedDescriptor>>,
    /// YAML file holding the feed catalog.
    pub feeds_file: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            load_latency_ms: DEFAULT_LOAD_LATENCY.as_millis() as u64,
            entries_per_feed: DEFAULT_ENTRIES_PER_FEED,
            feeds: None,
            feeds_file: None,
        }
    }
}

impl AppConfig {
    pub fn load_latency(&self) -> Duration {
        Duration::from_millis(self.load_latency_ms)
    }

    /// Resolve the feed catalog.
    ///
    /// The catalog is not validated here; the suites report a broken one.
    pub fn catalog(&self) -> Result<FeedCatalog, ConfigError> {
        if let Some(path) = &self.feeds_file {
            return Ok(FeedCatalog::from_yaml_file(path)?);
        }
        Ok(match &self.feeds {
            Some(feeds) => FeedCatalog::new(feeds.clone()),
            None => FeedCatalog::default_feeds(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = AppConfig::default().catalog().unwrap();
        assert_eq!(catalog, FeedCatalog::default_feeds());
    }

    #[test]
    fn test_feeds_file_wins() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "- name: Only\n  url: http://only").unwrap();

        let config = AppConfig {
            feeds: Some(vec![FeedDescriptor::new("Inline", "http://inline")]),
            feeds_file: Some(file.path().display().to_string()),
            ..AppConfig::default()
        };
        let catalog = config.catalog().unwrap();
        assert_eq!(catalog.get(0).unwrap().display_name(), Some("Only"));
    }

    #[test]
    fn test_missing_feeds_file() {
        let config = AppConfig {
            feeds_file: Some("/nonexistent/feeds.yaml".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(config.catalog(), Err(ConfigError::Feeds(_))));
    }
}
