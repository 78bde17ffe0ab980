//! Configuration module for Shipsight.
//!
//! Structured configuration loading from environment variables, organized by
//! domain: dataset access and analytics thresholds.

mod analytics_config;
mod dataset_config;

pub use analytics_config::AnalyticsConfig;
pub use dataset_config::DatasetConfig;

use anyhow::Result;

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Loads configuration from environment variables, applying defaults for
    /// anything unset. Call after `dotenvy::dotenv()`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            dataset: DatasetConfig::from_env()?,
            analytics: AnalyticsConfig::from_env()?,
        })
    }
}

pub(crate) fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    use anyhow::Context;
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid {key}: '{raw}'")),
        Err(_) => Ok(default),
    }
}
