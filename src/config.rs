/// Configuration management for sug
///
/// sug stores configuration in ~/.sug/config.toml. Configuration only
/// controls ambient behavior (debug logging); it never changes what the
/// command line means.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = r#"# sug configuration file

[logging]
# Write debug logs to a file (default: false)
debug = false

# Custom log file location (optional)
# Default: ~/.sug/sug.log
#path = "/tmp/sug.log"
"#;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write debug logs to a file.
    #[serde(default)]
    pub debug: bool,

    /// Override the log file location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Get the configuration file path, creating the config directory.
pub fn config_file_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().context("cannot determine home directory")?;

    let config_dir = home_dir.join(".sug");
    fs::create_dir_all(&config_dir)
        .with_context(|| format!("failed to create config directory: {}", config_dir.display()))?;

    Ok(config_dir.join("config.toml"))
}

/// Write the default commented configuration file.
pub fn save_default_config() -> Result<()> {
    let config_path = config_file_path()?;

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config: {}", config_path.display()))?;

    Ok(())
}

/// Load configuration, creating the default file if needed.
///
/// A malformed config file is replaced with the default rather than
/// aborting the run.
pub fn load_config() -> Result<Config> {
    let config_path = config_file_path()?;

    if !config_path.exists() {
        save_default_config()?;
    }

    let config_str = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

    let config = match toml::from_str(&config_str) {
        Ok(config) => config,
        Err(_) => {
            save_default_config()?;
            Config::default()
        }
    };

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.logging.debug);
        assert_eq!(config.logging.path, None);
    }

    #[test]
    fn test_default_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(!config.logging.debug);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[logging]\ndebug = true\n").unwrap();
        assert!(config.logging.debug);
        assert_eq!(config.logging.path, None);

        let empty: Config = toml::from_str("").unwrap();
        assert!(!empty.logging.debug);
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config {
            logging: LoggingConfig { debug: true, path: Some(PathBuf::from("/tmp/sug.log")) },
        };
        let rendered = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert!(parsed.logging.debug);
        assert_eq!(parsed.logging.path, Some(PathBuf::from("/tmp/sug.log")));
    }
}
