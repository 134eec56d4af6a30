//! Application state and the winit event loop glue.
//!
//! Implements `winit::application::ApplicationHandler` to drive the
//! shell: window orchestration, the main-window lifecycle, badge
//! bookkeeping, keyboard shortcuts, and single-instance handling.

mod badge;
mod core;
mod event_handler;
mod lifecycle;
mod menu;
mod orchestrator;
mod single_instance;
mod tabs;
mod window_state;

pub use self::core::ShellApp;
pub use single_instance::{acquire, Instance, InstanceGuard};
