//! `ApplicationHandler` implementation for the winit event loop.

use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::WindowId;

use super::core::ShellApp;
use super::lifecycle::LifecycleState;
use super::menu::action_for_key;

impl ApplicationHandler for ShellApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.main_token.is_some() {
            return;
        }
        if !self.create_main_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(&token) = self.ids.get(&window_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                if self.is_main(token) {
                    let fullscreen = self
                        .windows
                        .get(&token)
                        .is_some_and(|mw| mw.window.fullscreen().is_some());
                    let steps = self.lifecycle.on_close_requested(fullscreen);
                    self.apply_close_steps(event_loop, token, steps);
                } else {
                    self.destroy_window(token);
                    self.maybe_exit(event_loop);
                }
            }

            WindowEvent::Destroyed => {
                self.destroy_window(token);
                self.maybe_exit(event_loop);
            }

            WindowEvent::Focused(gained) => {
                if gained {
                    self.focused = Some(token);
                    if self.is_main(token) {
                        self.badge.on_focus(self.badge_sink.as_ref());
                        self.lifecycle.note_shown();
                    }
                } else if self.focused == Some(token) {
                    self.focused = None;
                }
            }

            WindowEvent::Resized(_) => {
                if self.is_main(token) {
                    // Fullscreen exit has no dedicated event; a resize
                    // while a close is pending is the signal to look.
                    if self.lifecycle.state() == LifecycleState::ClosingFullscreen {
                        let left = self
                            .windows
                            .get(&token)
                            .is_some_and(|mw| mw.window.fullscreen().is_none());
                        if left {
                            let steps = self.lifecycle.on_fullscreen_exited();
                            self.apply_close_steps(event_loop, token, steps);
                            return;
                        }
                    }
                    self.save_main_bounds();
                }
            }

            WindowEvent::Moved(_) => {
                if self.is_main(token) {
                    self.save_main_bounds();
                }
            }

            WindowEvent::ModifiersChanged(new_modifiers) => {
                self.modifiers = new_modifiers.state();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let modifier = if self.platform.has_dock() {
                    self.modifiers.super_key()
                } else {
                    self.modifiers.control_key()
                };
                if let Some(action) = action_for_key(modifier, &event.logical_key) {
                    self.handle_menu_action(event_loop, action);
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exiting {
            event_loop.exit();
            return;
        }

        if let Some(guard) = &self.instance {
            if guard.take_signal() {
                tracing::info!("second instance signalled, surfacing main window");
                self.show_main_window();
            }
            // The listener thread cannot wake a parked loop; poll for its
            // flag on a timer instead of blocking indefinitely.
            event_loop.set_control_flow(ControlFlow::WaitUntil(
                Instant::now() + Duration::from_millis(500),
            ));
        }

        for event in self.manager.drain_events() {
            self.process_webview_event(event_loop, event);
        }

        // Probe windows discarded above may have been the last live ones.
        self.maybe_exit(event_loop);
    }
}
