/// Host configuration
use crate::error::{CliError, Result};
use cadence_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `cadence.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables (prefixed with CADENCE_)
        settings = settings.add_source(
            config::Environment::with_prefix("CADENCE")
                .separator("_")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Apply command-line flags on top of the loaded settings
    ///
    /// Mode flags only switch a mode on; they never turn off what the file
    /// enabled.
    pub fn apply_overrides(&mut self, shuffle: bool, repeat: bool, volume: Option<u8>) {
        self.playback.shuffle |= shuffle;
        self.playback.repeat |= repeat;
        if let Some(volume) = volume {
            self.playback.volume = volume;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.playback.volume > 100 {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0 and 100, got {}",
                self.playback.volume
            )));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(CliError::Config(
                "logging.filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_logging() -> LoggingSettings {
    LoggingSettings {
        filter: default_filter(),
    }
}

fn default_filter() -> String {
    "cadence=info,cadence_cli=info,cadence_playback=info".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        default_logging()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.toml");
        fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.playback, PlaybackConfig::default());
        assert!(config.logging.filter.contains("cadence_playback"));
        config.validate().unwrap();
    }

    #[test]
    fn loads_sections_from_file() {
        let (_dir, path) = write_config(
            r#"
            [playback]
            volume = 55
            shuffle = true

            [logging]
            filter = "cadence_playback=debug"
            "#,
        );

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.playback.volume, 55);
        assert!(config.playback.shuffle);
        assert!(!config.playback.repeat);
        assert_eq!(config.logging.filter, "cadence_playback=debug");
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let (_dir, path) = write_config("[playback]\nrepeat = true\n");

        let config = AppConfig::load(Some(&path)).unwrap();
        assert!(config.playback.repeat);
        assert_eq!(config.playback.volume, 80);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn volume_out_of_range_is_rejected() {
        let (_dir, path) = write_config("[playback]\nvolume = 150\n");

        let config = AppConfig::load(Some(&path)).unwrap();
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn flags_only_switch_modes_on() {
        let mut config = AppConfig::default();
        config.playback.repeat = true;

        config.apply_overrides(true, false, Some(30));
        assert!(config.playback.shuffle);
        assert!(config.playback.repeat);
        assert_eq!(config.playback.volume, 30);

        config.apply_overrides(false, false, None);
        assert_eq!(config.playback.volume, 30);
    }
}
