//! Window bounds persistence.
//!
//! The main window's position and size are saved as JSON in the app data
//! directory on every move/resize and restored at startup, overriding the
//! config's build-time defaults. Persistence is best-effort: a missing or
//! corrupt state file just means the defaults apply.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outer bounds of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Persistence seam, so the orchestrator can run without a filesystem
/// in tests.
pub trait WindowStateProvider {
    /// Previously saved bounds, if any.
    fn bounds(&self) -> Option<WindowBounds>;
    /// Record the latest bounds.
    fn manage(&mut self, bounds: WindowBounds);
}

/// JSON file under the app data directory.
pub struct JsonFileState {
    path: PathBuf,
}

impl JsonFileState {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl WindowStateProvider for JsonFileState {
    fn bounds(&self) -> Option<WindowBounds> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(bounds) => Some(bounds),
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring corrupt window state: {e}");
                None
            }
        }
    }

    fn manage(&mut self, bounds: WindowBounds) {
        let json = match serde_json::to_string(&bounds) {
            Ok(json) => json,
            Err(e) => {
                warn!("serializing window state failed: {e}");
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, json) {
            warn!(path = %self.path.display(), "saving window state failed: {e}");
        } else {
            debug!(?bounds, "window state saved");
        }
    }
}

/// No persistence. Used when the data directory is unavailable.
pub struct NullState;

impl WindowStateProvider for NullState {
    fn bounds(&self) -> Option<WindowBounds> {
        None
    }

    fn manage(&mut self, _bounds: WindowBounds) {}
}
