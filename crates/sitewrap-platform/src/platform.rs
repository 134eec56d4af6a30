//! Platform identification and capability flags.

use serde::{Deserialize, Serialize};

/// The host desktop platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Dock semantics: closing the main window hides it and the dock icon
    /// persists, instead of quitting.
    pub fn has_dock(&self) -> bool {
        matches!(self, Platform::MacOS)
    }

    /// Whether windows can join native tab groups.
    pub fn native_tabs_supported(&self) -> bool {
        matches!(self, Platform::MacOS)
    }

    /// Whether the dock exposes a badge label.
    pub fn has_dock_badge(&self) -> bool {
        matches!(self, Platform::MacOS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_follow_dock_semantics() {
        assert!(Platform::MacOS.has_dock());
        assert!(Platform::MacOS.native_tabs_supported());
        assert!(Platform::MacOS.has_dock_badge());

        for platform in [Platform::Windows, Platform::Linux] {
            assert!(!platform.has_dock());
            assert!(!platform.native_tabs_supported());
            assert!(!platform.has_dock_badge());
        }
    }

    #[test]
    fn current_is_consistent_with_cfg() {
        let platform = Platform::current();
        #[cfg(target_os = "macos")]
        assert_eq!(platform, Platform::MacOS);
        #[cfg(target_os = "windows")]
        assert_eq!(platform, Platform::Windows);
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        assert_eq!(platform, Platform::Linux);
    }
}
