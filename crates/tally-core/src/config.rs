//! Analytics configuration
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/tally/config/analytics.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Every key is optional; missing keys keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/analytics.toml");

/// Settings for the spending aggregator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpendingConfig {
    /// Length of the top-categories ranking
    pub top_categories: usize,
}

impl Default for SpendingConfig {
    fn default() -> Self {
        Self { top_categories: 5 }
    }
}

/// Settings for the trend forecaster
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    pub default_months_ahead: u32,
    /// Requests beyond this horizon are rejected
    pub max_months_ahead: u32,
    pub min_transactions: usize,
    pub min_months: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_months_ahead: 1,
            max_months_ahead: 24,
            min_transactions: 3,
            min_months: 2,
        }
    }
}

/// Settings for the z-score anomaly detector
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub default_threshold: f64,
    pub max_results: usize,
    pub min_transactions: usize,
    pub min_group_size: usize,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            default_threshold: 2.0,
            max_results: 10,
            min_transactions: 3,
            min_group_size: 3,
        }
    }
}

/// Complete analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub spending: SpendingConfig,
    pub forecast: ForecastConfig,
    pub anomalies: AnomalyConfig,
}

impl AnalyticsConfig {
    /// Load configuration (explicit path, then data-dir override, then embedded)
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let override_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let content = match override_path {
            Some(p) if p.exists() => {
                tracing::debug!(path = %p.display(), "Loading analytics config");
                fs::read_to_string(&p)
                    .map_err(|e| Error::Config(format!("Failed to read {}: {}", p.display(), e)))?
            }
            _ => DEFAULT_CONFIG.to_string(),
        };

        Self::parse(&content)
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: AnalyticsConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        let threshold = self.anomalies.default_threshold;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::Config(format!(
                "anomalies.default_threshold must be positive, got {}",
                threshold
            )));
        }
        if self.forecast.default_months_ahead > self.forecast.max_months_ahead {
            return Err(Error::Config(
                "forecast.default_months_ahead exceeds forecast.max_months_ahead".into(),
            ));
        }
        if self.forecast.min_months < 2 {
            // A line needs two distinct points
            return Err(Error::Config("forecast.min_months must be at least 2".into()));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("tally").join("config").join("analytics.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = AnalyticsConfig::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = AnalyticsConfig::parse(
            r#"
            [anomalies]
            default_threshold = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.anomalies.default_threshold, 2.5);
        assert_eq!(config.anomalies.max_results, 10);
        assert_eq!(config.forecast.max_months_ahead, 24);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(AnalyticsConfig::parse("[anomalies]\ndefault_threshold = 0.0").is_err());
        assert!(AnalyticsConfig::parse("[forecast]\nmin_months = 1").is_err());
        assert!(AnalyticsConfig::parse(
            "[forecast]\ndefault_months_ahead = 30\nmax_months_ahead = 12"
        )
        .is_err());
        assert!(AnalyticsConfig::parse("not = [valid").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.toml");
        fs::write(&path, "[spending]\ntop_categories = 3\n").unwrap();

        let config = AnalyticsConfig::load(Some(&path)).unwrap();
        assert_eq!(config.spending.top_categories, 3);
    }

    #[test]
    fn test_load_missing_path_uses_defaults() {
        let config = AnalyticsConfig::load(Some(Path::new("/nonexistent/analytics.toml"))).unwrap();
        assert_eq!(config, AnalyticsConfig::default());
    }
}
