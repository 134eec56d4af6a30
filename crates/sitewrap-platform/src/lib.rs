//! Platform integration for the sitewrap shell.
//!
//! Everything OS-specific that is not windowing lives here: platform
//! identification and capability flags, app data paths and icon
//! resolution, the dock badge sink, and blocking dialogs.

pub mod badge;
pub mod dialogs;
pub mod paths;
pub mod platform;

pub use badge::{dock_badge, BadgeSink, NoopBadge};
pub use platform::Platform;
