//! Configuration module
//!
//! Handles loading and saving of verion.toml configuration files.
//! Defines Config, Inference, and Display types.

mod types;

pub use types::{Config, Inference};

use crate::error::{Result, VerionError};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "verion.toml";

/// Environment variable overriding `inference.api_base_url`
pub const API_URL_ENV: &str = "VERION_API_URL";

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        VerionError::Config(format!(
            "Cannot read config from '{}': {}. Run 'verion config init' to create one.",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Resolve the effective configuration for a command.
///
/// An explicit path must exist. Without one, `verion.toml` is used when
/// present and defaults otherwise. `VERION_API_URL` wins over the file.
pub fn resolve(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load(&path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load(&default_path)?
            } else {
                Config::default()
            }
        }
    };

    if let Ok(url) = std::env::var(API_URL_ENV) {
        if !url.trim().is_empty() {
            tracing::debug!(%url, "api base url overridden from environment");
            config.inference.api_base_url = url;
        }
    }

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| VerionError::Config(format!("Failed to serialize config: {}", e)))?;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("verion.toml");

        let config = Config::default();
        save(&config, &config_path).unwrap();

        let loaded = load(&config_path).unwrap();
        assert_eq!(loaded.display.cadence_ms, 30);
        assert!(loaded.display.animate);
    }

    #[test]
    fn test_load_missing_config() {
        let result = load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Run 'verion config init'"));
    }

    #[test]
    fn test_save_creates_directories() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("nested/dir/verion.toml");

        save(&Config::default(), &config_path).unwrap();

        assert!(config_path.exists());
    }

    #[test]
    #[serial]
    fn test_resolve_explicit_path_overridden_by_env() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("verion.toml");

        let mut config = Config::default();
        config.display.cadence_ms = 5;
        save(&config, &config_path).unwrap();

        std::env::set_var(API_URL_ENV, "http://example.test:1234");
        let resolved = resolve(Some(config_path)).unwrap();
        std::env::remove_var(API_URL_ENV);

        assert_eq!(resolved.display.cadence_ms, 5);
        assert_eq!(resolved.inference.api_base_url, "http://example.test:1234");
    }

    #[test]
    #[serial]
    fn test_resolve_explicit_missing_path_is_error() {
        std::env::remove_var(API_URL_ENV);
        let result = resolve(Some(PathBuf::from("/nonexistent/verion.toml")));
        assert!(matches!(result, Err(VerionError::Config(_))));
    }
}
