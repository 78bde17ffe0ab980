use anyhow::{Result, bail};
use std::env;
use std::path::PathBuf;

/// Where the order-fulfillment export lives and how it is delimited.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    pub path: PathBuf,
    pub delimiter: u8,
}

impl DatasetConfig {
    pub fn from_env() -> Result<Self> {
        let path = env::var("SHIPSIGHT_DATASET")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/orders.csv"));

        let delimiter = match env::var("SHIPSIGHT_DELIMITER") {
            Ok(raw) => {
                let mut bytes = raw.bytes();
                match (bytes.next(), bytes.next()) {
                    (Some(b), None) => b,
                    _ => bail!(
                        "Invalid SHIPSIGHT_DELIMITER: '{raw}'. Must be a single byte, e.g. ',' or ';'"
                    ),
                }
            }
            Err(_) => b',',
        };

        Ok(Self { path, delimiter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only meaningful when the variables are unset in the test env.
        if env::var("SHIPSIGHT_DATASET").is_err() && env::var("SHIPSIGHT_DELIMITER").is_err() {
            let config = DatasetConfig::from_env().unwrap();
            assert_eq!(config.delimiter, b',');
            assert_eq!(config.path, PathBuf::from("data/orders.csv"));
        }
    }
}
