//! Write AppConfig back to TOML on disk.
//!
//! The shell rewrites the config exactly once, to clear the `maximize`
//! flag after its first application. Writes are atomic (write to `.tmp`,
//! then rename) to prevent corruption if the process dies mid-write.

use std::path::Path;

use sitewrap_common::ConfigError;

use crate::schema::AppConfig;

/// Write config to a specific path.
///
/// Creates parent directories if they don't exist. Falls back to a direct
/// write when the rename fails (Windows compat).
pub fn save_config_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ConfigError::ParseError(format!("failed to serialize config: {e}")))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &toml_str).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write config to {}: {e}",
            tmp_path.display()
        ))
    })?;

    if let Err(e) = std::fs::rename(&tmp_path, path) {
        tracing::warn!("atomic rename failed ({e}), falling back to direct write");
        std::fs::write(path, &toml_str).map_err(|e2| {
            ConfigError::ParseError(format!("failed to write config to {}: {e2}", path.display()))
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_from_path;

    #[test]
    fn save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitewrap.toml");

        let mut config = AppConfig::default();
        config.target_url = "https://medium.com/".into();
        config.maximize = true;
        save_config_to_path(&config, &path).unwrap();

        let reloaded = load_from_path(&path).unwrap();
        assert_eq!(reloaded.target_url, "https://medium.com/");
        assert!(reloaded.maximize);
    }

    #[test]
    fn maximize_rewrite_clears_flag_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitewrap.toml");

        let mut config = AppConfig::default();
        config.maximize = true;
        save_config_to_path(&config, &path).unwrap();

        // What the shell does after applying maximize once.
        config.maximize = false;
        save_config_to_path(&config, &path).unwrap();

        let reloaded = load_from_path(&path).unwrap();
        assert!(!reloaded.maximize);
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("sitewrap.toml");
        save_config_to_path(&AppConfig::default(), &path).unwrap();
        assert!(path.exists());
    }
}
