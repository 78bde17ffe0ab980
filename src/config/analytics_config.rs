use crate::config::parse_env;
use anyhow::{Result, ensure};

/// Thresholds used by the cleaner, the statistics engine, and the KPI
/// aggregator.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Decision threshold for hypothesis tests.
    pub significance_level: f64,
    /// IQR multiplier for outlier flagging.
    pub iqr_multiplier: f64,
    /// Percentile level for the lead-time and quantity KPIs.
    pub percentile_level: f64,
    /// Minimum rows a (region, segment) pair needs before it can be named
    /// the high-risk corridor.
    pub min_corridor_support: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            significance_level: 0.05,
            iqr_multiplier: 1.5,
            percentile_level: 0.90,
            min_corridor_support: 30,
        }
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            significance_level: parse_env("SHIPSIGHT_ALPHA", defaults.significance_level)?,
            iqr_multiplier: parse_env("SHIPSIGHT_IQR_MULTIPLIER", defaults.iqr_multiplier)?,
            percentile_level: parse_env("SHIPSIGHT_PERCENTILE", defaults.percentile_level)?,
            min_corridor_support: parse_env(
                "SHIPSIGHT_CORRIDOR_SUPPORT",
                defaults.min_corridor_support,
            )?,
        };

        ensure!(
            config.significance_level > 0.0 && config.significance_level < 1.0,
            "SHIPSIGHT_ALPHA must be in (0, 1), got {}",
            config.significance_level
        );
        ensure!(
            config.percentile_level > 0.0 && config.percentile_level < 1.0,
            "SHIPSIGHT_PERCENTILE must be in (0, 1), got {}",
            config.percentile_level
        );
        ensure!(
            config.iqr_multiplier > 0.0,
            "SHIPSIGHT_IQR_MULTIPLIER must be positive, got {}",
            config.iqr_multiplier
        );

        Ok(config)
    }
}
