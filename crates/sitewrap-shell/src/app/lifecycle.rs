//! Lifecycle state machine for the main window.
//!
//! Decides what "close" means for the current platform/tray configuration
//! and sequences the fullscreen-exit-before-hide dance. The controller is
//! pure: it returns ordered [`CloseStep`]s for the orchestrator to enact,
//! which keeps every platform matrix unit-testable.

/// Static inputs to the close decision, fixed at startup.
#[derive(Debug, Clone, Copy)]
pub struct LifecyclePolicy {
    /// Platform with dock semantics: closing hides, the dock icon stays.
    pub dock_platform: bool,
    /// Windows can join native tab groups.
    pub native_tabs: bool,
    /// Close really quits, everywhere.
    pub fast_quit: bool,
    /// A tray icon is present (hide-to-tray on non-dock platforms).
    pub tray_present: bool,
    /// Clear the session cache as part of every close.
    pub clear_cache_on_close: bool,
}

/// Lifecycle state of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Visible,
    Hidden,
    /// Close requested while fullscreen; waiting for the asynchronous
    /// fullscreen exit to complete before hiding or destroying.
    ClosingFullscreen,
    Destroyed,
}

/// One step of a close sequence, enacted in order by the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseStep {
    /// Move the window's tab out to its own window, so exiting fullscreen
    /// does not disturb sibling tabs.
    DetachTab,
    ExitFullscreen,
    /// Fire-and-forget session cache clear; never gates the close.
    ClearCache,
    Hide,
    Destroy,
}

pub struct LifecycleController {
    policy: LifecyclePolicy,
    state: LifecycleState,
}

impl LifecycleController {
    pub fn new(policy: LifecyclePolicy) -> Self {
        Self {
            policy,
            state: LifecycleState::Visible,
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The window was shown again (dock click, second instance, tray).
    pub fn note_shown(&mut self) {
        if self.state == LifecycleState::Hidden {
            self.state = LifecycleState::Visible;
        }
    }

    /// The window started hidden (`start-in-tray`).
    pub fn note_start_hidden(&mut self) {
        self.state = LifecycleState::Hidden;
    }

    /// A close was requested on the main window.
    ///
    /// When fullscreen, only the detach/exit steps run now; the
    /// hide-or-destroy decision is deferred until the left-fullscreen
    /// signal arrives, because fullscreen exit is asynchronous on some
    /// platforms and hiding mid-transition is not safe.
    pub fn on_close_requested(&mut self, fullscreen: bool) -> Vec<CloseStep> {
        if self.state == LifecycleState::Destroyed {
            return Vec::new();
        }

        if fullscreen {
            let mut steps = Vec::new();
            if self.policy.native_tabs {
                steps.push(CloseStep::DetachTab);
            }
            steps.push(CloseStep::ExitFullscreen);
            self.state = LifecycleState::ClosingFullscreen;
            return steps;
        }

        self.finish_close()
    }

    /// The left-fullscreen signal. Completes a deferred close; a
    /// fullscreen exit that was not part of a close is ignored.
    pub fn on_fullscreen_exited(&mut self) -> Vec<CloseStep> {
        if self.state == LifecycleState::ClosingFullscreen {
            self.finish_close()
        } else {
            Vec::new()
        }
    }

    /// Whether closing the last window quits the process.
    pub fn quits_on_all_windows_closed(&self) -> bool {
        !(self.policy.dock_platform && !self.policy.fast_quit)
    }

    fn finish_close(&mut self) -> Vec<CloseStep> {
        let mut steps = Vec::new();
        if self.policy.clear_cache_on_close {
            steps.push(CloseStep::ClearCache);
        }

        let hide = !self.policy.fast_quit
            && (self.policy.dock_platform || self.policy.tray_present);
        if hide {
            steps.push(CloseStep::Hide);
            self.state = LifecycleState::Hidden;
        } else {
            steps.push(CloseStep::Destroy);
            self.state = LifecycleState::Destroyed;
        }
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> LifecyclePolicy {
        LifecyclePolicy {
            dock_platform: false,
            native_tabs: false,
            fast_quit: false,
            tray_present: false,
            clear_cache_on_close: false,
        }
    }

    #[test]
    fn plain_close_destroys_without_dock_or_tray() {
        let mut lc = LifecycleController::new(policy());
        assert_eq!(lc.on_close_requested(false), vec![CloseStep::Destroy]);
        assert_eq!(lc.state(), LifecycleState::Destroyed);
    }

    #[test]
    fn dock_platform_hides_instead_of_destroying() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            dock_platform: true,
            ..policy()
        });
        assert_eq!(lc.on_close_requested(false), vec![CloseStep::Hide]);
        assert_eq!(lc.state(), LifecycleState::Hidden);
    }

    #[test]
    fn fast_quit_overrides_dock_hide() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            dock_platform: true,
            fast_quit: true,
            ..policy()
        });
        assert_eq!(lc.on_close_requested(false), vec![CloseStep::Destroy]);
    }

    #[test]
    fn tray_hides_on_non_dock_platforms() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            tray_present: true,
            ..policy()
        });
        assert_eq!(lc.on_close_requested(false), vec![CloseStep::Hide]);
    }

    #[test]
    fn tray_with_fast_quit_destroys() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            tray_present: true,
            fast_quit: true,
            ..policy()
        });
        assert_eq!(lc.on_close_requested(false), vec![CloseStep::Destroy]);
    }

    #[test]
    fn fullscreen_close_detaches_tab_first_with_native_tabs() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            dock_platform: true,
            native_tabs: true,
            ..policy()
        });
        assert_eq!(
            lc.on_close_requested(true),
            vec![CloseStep::DetachTab, CloseStep::ExitFullscreen]
        );
        assert_eq!(lc.state(), LifecycleState::ClosingFullscreen);
    }

    #[test]
    fn fullscreen_close_without_native_tabs_skips_detach() {
        let mut lc = LifecycleController::new(policy());
        assert_eq!(lc.on_close_requested(true), vec![CloseStep::ExitFullscreen]);
    }

    #[test]
    fn deferred_close_completes_on_fullscreen_exit() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            dock_platform: true,
            native_tabs: true,
            ..policy()
        });
        lc.on_close_requested(true);
        assert_eq!(lc.on_fullscreen_exited(), vec![CloseStep::Hide]);
        assert_eq!(lc.state(), LifecycleState::Hidden);
    }

    #[test]
    fn unrelated_fullscreen_exit_is_ignored() {
        let mut lc = LifecycleController::new(policy());
        assert!(lc.on_fullscreen_exited().is_empty());
        assert_eq!(lc.state(), LifecycleState::Visible);
    }

    #[test]
    fn cache_clear_rides_every_close() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            clear_cache_on_close: true,
            dock_platform: true,
            ..policy()
        });
        assert_eq!(
            lc.on_close_requested(false),
            vec![CloseStep::ClearCache, CloseStep::Hide]
        );

        let mut lc = LifecycleController::new(LifecyclePolicy {
            clear_cache_on_close: true,
            ..policy()
        });
        assert_eq!(
            lc.on_close_requested(false),
            vec![CloseStep::ClearCache, CloseStep::Destroy]
        );
    }

    #[test]
    fn quit_rules_follow_dock_semantics() {
        let lc = LifecycleController::new(policy());
        assert!(lc.quits_on_all_windows_closed());

        let lc = LifecycleController::new(LifecyclePolicy {
            dock_platform: true,
            ..policy()
        });
        assert!(!lc.quits_on_all_windows_closed());

        let lc = LifecycleController::new(LifecyclePolicy {
            dock_platform: true,
            fast_quit: true,
            ..policy()
        });
        assert!(lc.quits_on_all_windows_closed());
    }

    #[test]
    fn hidden_window_can_be_shown_again() {
        let mut lc = LifecycleController::new(LifecyclePolicy {
            dock_platform: true,
            ..policy()
        });
        lc.on_close_requested(false);
        assert_eq!(lc.state(), LifecycleState::Hidden);
        lc.note_shown();
        assert_eq!(lc.state(), LifecycleState::Visible);
    }

    #[test]
    fn close_after_destroy_is_a_no_op() {
        let mut lc = LifecycleController::new(policy());
        lc.on_close_requested(false);
        assert!(lc.on_close_requested(false).is_empty());
    }

    #[test]
    fn start_in_tray_begins_hidden() {
        let mut lc = LifecycleController::new(policy());
        lc.note_start_hidden();
        assert_eq!(lc.state(), LifecycleState::Hidden);
    }
}
