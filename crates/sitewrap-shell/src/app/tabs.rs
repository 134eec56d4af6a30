//! Native tab group integration.
//!
//! On macOS, foreground "new tab" dispositions attach the new window to
//! the originating window's tab group, and closing a fullscreen tabbed
//! window first detaches its tab so sibling tabs are not disturbed.
//! Everywhere else these are no-ops; the disposition resolver never
//! produces tab decisions on platforms without native tabs.

#[cfg(target_os = "macos")]
mod imp {
    use objc2::rc::Retained;
    use objc2::runtime::AnyObject;
    use objc2_app_kit::{NSView, NSWindow, NSWindowTabbingMode};
    use tracing::warn;
    use winit::raw_window_handle::{HasWindowHandle, RawWindowHandle};
    use winit::window::Window;

    fn ns_window(window: &Window) -> Option<Retained<NSWindow>> {
        let handle = match window.window_handle() {
            Ok(handle) => handle,
            Err(e) => {
                warn!("window handle unavailable: {e}");
                return None;
            }
        };
        match handle.as_raw() {
            RawWindowHandle::AppKit(appkit) => {
                let view = appkit.ns_view.as_ptr() as *mut AnyObject;
                // winit hands out a valid NSView pointer for the window's
                // lifetime; we only borrow it within this call.
                let view: &NSView = unsafe { &*(view as *const NSView) };
                view.window()
            }
            _ => None,
        }
    }

    /// Mark a window as willing to join tab groups.
    pub fn prepare_for_tabbing(window: &Window) {
        if let Some(ns_window) = ns_window(window) {
            ns_window.setTabbingMode(NSWindowTabbingMode::Preferred);
        }
    }

    /// Attach `child` to `parent`'s tab group, selected or not.
    pub fn add_tab(parent: &Window, child: &Window, foreground: bool) {
        let (Some(parent_ns), Some(child_ns)) = (ns_window(parent), ns_window(child)) else {
            warn!("cannot attach tab, native window unavailable");
            return;
        };
        unsafe {
            parent_ns.addTabbedWindow_ordered(
                &child_ns,
                objc2_app_kit::NSWindowOrderingMode::NSWindowAbove,
            );
        }
        if foreground {
            child_ns.makeKeyAndOrderFront(None);
        }
    }

    /// Pull a window's tab out into a standalone window.
    pub fn detach_tab(window: &Window) {
        if let Some(ns_window) = ns_window(window) {
            unsafe {
                ns_window.moveTabToNewWindow(None);
            }
        }
    }
}

#[cfg(not(target_os = "macos"))]
mod imp {
    use winit::window::Window;

    pub fn prepare_for_tabbing(_window: &Window) {}

    pub fn add_tab(_parent: &Window, _child: &Window, _foreground: bool) {}

    pub fn detach_tab(_window: &Window) {}
}

pub use imp::{add_tab, detach_tab, prepare_for_tabbing};
