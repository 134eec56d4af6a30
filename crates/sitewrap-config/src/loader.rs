//! TOML config file loading.

use std::path::{Path, PathBuf};

use sitewrap_common::ConfigError;
use tracing::info;

use crate::schema::AppConfig;

/// Load config from a specific TOML file path.
///
/// Missing fields fall back to serde defaults. Validation runs in
/// `load_config`, not here, so callers can decide how strict to be.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Platform-specific default config file path.
///
/// On macOS: `~/Library/Application Support/sitewrap/sitewrap.toml`
/// On Linux: `~/.config/sitewrap/sitewrap.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("sitewrap").join("sitewrap.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_error() {
        let err = load_from_path(Path::new("/nonexistent/sitewrap.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn loads_valid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitewrap.toml");
        std::fs::write(&path, "target_url = \"https://medium.com/\"\nzoom = 1.5\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.target_url, "https://medium.com/");
        assert_eq!(config.zoom, 1.5);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitewrap.toml");
        std::fs::write(&path, "target_url = [not toml").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
