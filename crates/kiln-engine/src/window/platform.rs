use std::collections::HashMap;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::error::EventLoopError;
use winit::event::{ElementState, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowAttributes, WindowId};

use super::config::{centered_position, WindowConfig};
use crate::core::EngineError;
use crate::input::{InputEvent, InputState, Key, KeyState};

/// Upper bound on pump iterations spent waiting for a requested window.
const MAX_CREATE_PUMPS: usize = 64;

/// Events accumulated for one window between script polls.
#[derive(Debug, Default)]
pub struct WindowEvents {
    pub input: InputState,
    /// Set by the platform close button or by the script.
    pub close_requested: bool,
    resized: Option<PhysicalSize<u32>>,
}

impl WindowEvents {
    /// Returns the latest size reported since the previous call.
    pub fn take_resize(&mut self) -> Option<PhysicalSize<u32>> {
        self.resized.take()
    }
}

struct PendingWindow {
    attributes: WindowAttributes,
    size: LogicalSize<f64>,
}

#[derive(Default)]
struct PlatformState {
    pending: Option<PendingWindow>,
    created: Option<Result<Window, winit::error::OsError>>,
    windows: HashMap<WindowId, WindowEvents>,
    exited: bool,
}

impl PlatformState {
    /// Windows can only be created while the loop is active, so creation
    /// requests are parked here and fulfilled from the next callback.
    fn create_pending(&mut self, event_loop: &ActiveEventLoop) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let mut attrs = pending.attributes;
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        if let Some(monitor) = monitor {
            let screen = monitor.size().to_logical::<f64>(monitor.scale_factor());
            attrs = attrs.with_position(centered_position(screen, pending.size));
        }

        self.created = Some(event_loop.create_window(attrs));
    }
}

impl ApplicationHandler for PlatformState {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, _cause: StartCause) {
        self.create_pending(event_loop);
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        self.create_pending(event_loop);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.create_pending(event_loop);
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(events) = self.windows.get_mut(&window_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                log::debug!("close requested for {window_id:?}");
                events.close_requested = true;
            }

            WindowEvent::Resized(size) => {
                events.resized = Some(size);
            }

            WindowEvent::Focused(focused) => {
                events.input.apply_event(InputEvent::Focused(focused));
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let Some(key) = Key::from_key_code(code) else {
                    return;
                };
                let state = match event.state {
                    ElementState::Pressed => KeyState::Pressed,
                    ElementState::Released => KeyState::Released,
                };
                events.input.apply_event(InputEvent::Key { key, state });
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.exited = true;
    }
}

/// The process-wide event loop plus per-window event state.
///
/// winit allows one event loop per process; the engine creates it lazily on
/// the first window request and keeps it until teardown.
pub struct Platform {
    event_loop: EventLoop<()>,
    state: PlatformState,
}

impl Platform {
    pub fn new() -> Result<Self, EventLoopError> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);
        log::debug!("event loop created");

        Ok(Self {
            event_loop,
            state: PlatformState::default(),
        })
    }

    /// Creates a window, pumping the loop until the platform hands it over.
    pub fn create_window(&mut self, config: &WindowConfig) -> Result<Window, EngineError> {
        self.state.created = None;
        self.state.pending = Some(PendingWindow {
            attributes: config.attributes(),
            size: config.logical_size(),
        });

        for _ in 0..MAX_CREATE_PUMPS {
            self.pump();

            if let Some(result) = self.state.created.take() {
                let window = result?;
                self.state.windows.insert(window.id(), WindowEvents::default());
                return Ok(window);
            }
            if self.state.exited {
                break;
            }
        }

        self.state.pending = None;
        Err(EngineError::Platform(
            "event loop did not deliver the requested window".to_string(),
        ))
    }

    /// Processes pending platform events without blocking.
    pub fn pump(&mut self) {
        if self.state.exited {
            return;
        }

        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.state);

        if let PumpStatus::Exit(code) = status {
            log::warn!("event loop exited with code {code}");
            self.state.exited = true;
            for events in self.state.windows.values_mut() {
                events.close_requested = true;
            }
        }
    }

    pub fn events(&self, id: WindowId) -> Option<&WindowEvents> {
        self.state.windows.get(&id)
    }

    pub fn events_mut(&mut self, id: WindowId) -> Option<&mut WindowEvents> {
        self.state.windows.get_mut(&id)
    }

    /// Drops event state for a destroyed window.
    pub fn forget(&mut self, id: WindowId) {
        self.state.windows.remove(&id);
    }
}
