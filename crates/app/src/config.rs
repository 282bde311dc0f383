//! Runtime configuration.

use std::path::PathBuf;

use courier_infrastructure::default_data_dir;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No directory was given and the platform has no config directory.
    #[error("could not determine a data directory; pass --data-dir or set COURIER_DATA_DIR")]
    NoDataDir,
}

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding the state documents.
    pub data_dir: PathBuf,
    /// Debug logging requested.
    pub verbose: bool,
}

impl AppConfig {
    /// Resolves the data directory: the explicit value (flag or
    /// `COURIER_DATA_DIR`, already merged by clap) wins over the platform
    /// config directory.
    pub fn resolve(data_dir: Option<PathBuf>, verbose: bool) -> Result<Self, ConfigError> {
        let data_dir = data_dir
            .or_else(default_data_dir)
            .ok_or(ConfigError::NoDataDir)?;
        Ok(Self { data_dir, verbose })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_explicit_dir_wins() {
        let config = AppConfig::resolve(Some(PathBuf::from("/tmp/state")), true).unwrap();
        assert_eq!(
            config,
            AppConfig {
                data_dir: PathBuf::from("/tmp/state"),
                verbose: true
            }
        );
    }

    #[test]
    fn test_falls_back_to_platform_dir() {
        if let Ok(config) = AppConfig::resolve(None, false) {
            assert!(config.data_dir.ends_with("courier"));
        }
    }
}
