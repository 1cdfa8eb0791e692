//! TOML loader for [`ShareConfig`].

use std::fs;
use std::path::Path;

use share_core::ShareConfig;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Common result type for the loader.
pub type LoadResult<T> = Result<T, ConfigError>;

/// Loader for bridge configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Keys missing from the file take their default values.
    pub fn load(path: &Path) -> LoadResult<ShareConfig> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: ShareConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load config data, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> ShareConfig {
        match Self::load(path) {
            Ok(config) => {
                info!(
                    target: "share::config",
                    path = %path.display(),
                    require_hold_key = config.require_hold_key,
                    show_share_indicator = config.show_share_indicator,
                    auto_select_lowest_health = config.auto_select_lowest_health,
                    share_hotkey = %config.share_hotkey,
                    "Configuration loaded"
                );
                config
            }
            Err(error) => {
                warn!(
                    target: "share::config",
                    path = %path.display(),
                    error = %error,
                    "Using default configuration"
                );
                ShareConfig::default()
            }
        }
    }

    /// Write config data as TOML, creating parent directories as needed.
    pub fn save(path: &Path, config: &ShareConfig) -> LoadResult<()> {
        let io_error = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(path, content).map_err(io_error)?;

        info!(target: "share::config", path = %path.display(), "Configuration saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(
            ConfigLoader::load(&path),
            Err(ConfigError::Io { .. })
        ));
        assert_eq!(ConfigLoader::load_or_default(&path), ShareConfig::default());
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("share.toml");
        fs::write(&path, "requireHoldKey = \"definitely\"\n[[").unwrap();

        assert!(matches!(
            ConfigLoader::load(&path),
            Err(ConfigError::Parse(_))
        ));
        assert_eq!(ConfigLoader::load_or_default(&path), ShareConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("share.toml");
        fs::write(&path, "requireHoldKey = true\nshareHotkey = \"ALT\"\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert!(config.require_hold_key);
        assert_eq!(config.share_hotkey, "ALT");
        assert!(config.show_share_indicator);
        assert!(!config.auto_select_lowest_health);
        assert_eq!(
            config.excluded_actions,
            ShareConfig::default().excluded_actions
        );
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("share.toml");

        let config = ShareConfig {
            require_hold_key: true,
            show_share_indicator: false,
            auto_select_lowest_health: true,
            share_hotkey: "CTRL".into(),
            excluded_actions: vec!["Body Slam".into()],
        };
        ConfigLoader::save(&path, &config).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("autoSelectLowestHealth = true"));
        assert_eq!(ConfigLoader::load(&path).unwrap(), config);
    }
}
