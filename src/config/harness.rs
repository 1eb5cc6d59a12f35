//! Harness and report configuration types.

use std::time::Duration;

use serde::Deserialize;

/// Default phase deadline in milliseconds.
pub const DEFAULT_PHASE_TIMEOUT_MS: u64 = 5000;

/// Harness configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// How long a phase may wait for its completion token.
    pub phase_timeout_ms: u64,
    /// Only run cases whose "suite case" name contains this text.
    pub filter: Option<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            phase_timeout_ms: DEFAULT_PHASE_TIMEOUT_MS,
            filter: None,
        }
    }
}

impl HarnessConfig {
    pub fn phase_timeout(&self) -> Duration {
        Duration::from_millis(self.phase_timeout_ms)
    }
}

/// Report output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Report configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_config_default() {
        let config = HarnessConfig::default();
        assert_eq!(config.phase_timeout(), Duration::from_secs(5));
        assert!(config.filter.is_none());
    }
}
