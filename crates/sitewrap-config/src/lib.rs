//! Sitewrap configuration system.
//!
//! TOML-based configuration describing the wrapped site and per-window
//! behavior. All sections use serde defaults so partial configs work; the
//! result is validated once at load. The config is immutable for the
//! process lifetime with one exception: the `maximize` flag is cleared and
//! written back after its first application.

pub mod loader;
pub mod schema;
pub mod validation;
pub mod writer;

pub use loader::default_config_path;
pub use schema::{AppConfig, TrayMode};
pub use writer::save_config_to_path;

use std::path::Path;

use sitewrap_common::ConfigError;

/// Load and validate config.
///
/// With an explicit path the file must exist. Without one, the platform
/// default path is tried and a missing file falls back to defaults (the
/// CLI can still supply the target URL).
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let config = match path {
        Some(path) => loader::load_from_path(path)?,
        None => {
            let default_path = default_config_path()?;
            if default_path.exists() {
                loader::load_from_path(&default_path)?
            } else {
                tracing::info!("no config at {}, using defaults", default_path.display());
                AppConfig::default()
            }
        }
    };

    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to JSON.
///
/// This is the payload pushed into the page context of every window on
/// every finished load, for in-page scripts to read.
pub fn config_to_json(config: &AppConfig) -> String {
    serde_json::to_string(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_missing_path_errors() {
        let err = load_config(Some(Path::new("/nonexistent/sitewrap.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn invalid_config_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitewrap.toml");
        std::fs::write(&path, "target_url = \"https://medium.com/\"\nzoom = -2.0\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn config_json_contains_target_url() {
        let mut config = AppConfig::default();
        config.target_url = "https://medium.com/".into();
        let json = config_to_json(&config);
        assert!(json.contains("\"target_url\""));
        assert!(json.contains("https://medium.com/"));
    }
}
