//! Window platform.
//!
//! Owns the `winit` EventLoop and drives it in pump mode: the script decides
//! when events are processed, so the loop never takes over the thread.

mod config;
mod platform;

pub use config::{centered_position, WindowConfig};
pub use platform::{Platform, WindowEvents};

use std::sync::Arc;

use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::WindowSurface;
use crate::resource::Resource;

/// A native window together with its presentation surface.
pub struct AppWindow {
    // Declared before `window` so the surface is dropped first.
    pub surface: WindowSurface,
    pub window: Arc<Window>,
    pub id: WindowId,
}

impl AppWindow {
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }
}

impl Resource for AppWindow {
    const KIND: &'static str = "window";
}
