//! Dock badge sink.
//!
//! The badge counter writes through this trait; only macOS has a dock
//! tile, so every other platform gets a no-op sink and the counter logic
//! stays platform-agnostic.

use tracing::debug;

use crate::platform::Platform;

/// Receives badge updates. Writes are idempotent: last write wins.
pub trait BadgeSink {
    /// Set the badge label. `bounce` requests dock attention.
    fn set(&self, label: &str, bounce: bool);
    /// Clear the badge.
    fn clear(&self);
}

/// A sink that does nothing, for platforms without a dock badge.
pub struct NoopBadge;

impl BadgeSink for NoopBadge {
    fn set(&self, label: &str, _bounce: bool) {
        debug!(label, "badge update ignored (no dock badge on this platform)");
    }

    fn clear(&self) {}
}

/// The platform-appropriate badge sink.
pub fn dock_badge() -> Box<dyn BadgeSink> {
    if Platform::current().has_dock_badge() {
        platform_badge()
    } else {
        Box::new(NoopBadge)
    }
}

#[cfg(target_os = "macos")]
fn platform_badge() -> Box<dyn BadgeSink> {
    Box::new(macos::DockTileBadge)
}

#[cfg(not(target_os = "macos"))]
fn platform_badge() -> Box<dyn BadgeSink> {
    Box::new(NoopBadge)
}

#[cfg(target_os = "macos")]
mod macos {
    use objc2_app_kit::{NSApplication, NSRequestUserAttentionType};
    use objc2_foundation::{MainThreadMarker, NSString};
    use tracing::warn;

    use super::BadgeSink;

    /// Writes the label onto the shared application's dock tile.
    pub struct DockTileBadge;

    impl BadgeSink for DockTileBadge {
        fn set(&self, label: &str, bounce: bool) {
            let Some(mtm) = MainThreadMarker::new() else {
                warn!("dock badge update off the main thread, dropping");
                return;
            };
            let app = NSApplication::sharedApplication(mtm);
            let tile = unsafe { app.dockTile() };
            unsafe { tile.setBadgeLabel(Some(&NSString::from_str(label))) };
            if bounce {
                unsafe {
                    app.requestUserAttention(NSRequestUserAttentionType::NSInformationalRequest);
                }
            }
        }

        fn clear(&self) {
            let Some(mtm) = MainThreadMarker::new() else {
                return;
            };
            let app = NSApplication::sharedApplication(mtm);
            let tile = unsafe { app.dockTile() };
            unsafe { tile.setBadgeLabel(None) };
        }
    }
}
