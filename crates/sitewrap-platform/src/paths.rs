use std::path::PathBuf;

use sitewrap_common::PlatformError;

const APP_NAME: &str = "sitewrap";

/// Returns the platform-specific data directory.
///
/// - macOS: `~/Library/Application Support/sitewrap`
/// - Linux: `$XDG_DATA_HOME/sitewrap` (defaults to `~/.local/share/sitewrap`)
/// - Windows: `%APPDATA%\sitewrap`
pub fn data_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(APP_NAME))
}

/// Path to the persisted window-state file.
///
/// Located at `data_dir()/window-state.json`.
pub fn window_state_file() -> Result<PathBuf, PlatformError> {
    Ok(data_dir()?.join("window-state.json"))
}

/// Creates the app data directory if it does not already exist.
pub fn ensure_dirs() -> Result<(), PlatformError> {
    std::fs::create_dir_all(data_dir()?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    Ok(())
}

/// Resolve a platform-appropriate application icon next to the executable.
///
/// Prefers `.ico` on Windows, falls back to `.png` everywhere. Returns
/// `None` when no icon was packaged; the window then keeps the system
/// default.
pub fn app_icon() -> Option<PathBuf> {
    let exe_dir = std::env::current_exe().ok()?.parent()?.to_path_buf();

    if cfg!(target_os = "windows") {
        let ico = exe_dir.join("icon.ico");
        if ico.exists() {
            return Some(ico);
        }
    }

    let png = exe_dir.join("icon.png");
    png.exists().then_some(png)
}
