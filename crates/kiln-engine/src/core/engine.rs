use std::sync::Arc;

use crate::core::{EngineConfig, EngineError};
use crate::device::Gpu;
use crate::mesh::Mesh;
use crate::procedural::NoiseGenerator;
use crate::render::{Framebuffer, RenderStats};
use crate::resource::{Handle, Resource, SlotKey, Slots};
use crate::shader::ShaderProgram;
use crate::text::Font;
use crate::texture::Texture;
use crate::window::{AppWindow, Platform, WindowConfig};

/// Owner of every engine resource, the GPU device and the window platform.
///
/// Single-threaded: all calls happen on the thread that created the engine.
/// No display or GPU is touched until the first window is created.
pub struct Engine {
    // Field order is drop order: resources first, then windows, then the
    // device, and the event loop last.
    pub(super) meshes: Slots<Mesh>,
    pub(super) textures: Slots<Texture>,
    pub(super) shaders: Slots<ShaderProgram>,
    pub(super) framebuffers: Slots<Framebuffer>,
    pub(super) fonts: Slots<Font>,
    pub(super) noises: Slots<NoiseGenerator>,
    pub(super) windows: Slots<AppWindow>,

    /// Target of `clear_color`; the most recently created live window.
    pub(super) current: Option<SlotKey>,

    pub(super) gpu: Option<Gpu>,
    pub(super) platform: Option<Platform>,

    pub(super) config: EngineConfig,
    pub(super) stats: RenderStats,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            meshes: Slots::new(),
            textures: Slots::new(),
            shaders: Slots::new(),
            framebuffers: Slots::new(),
            fonts: Slots::new(),
            noises: Slots::new(),
            windows: Slots::new(),
            current: None,
            gpu: None,
            platform: None,
            config,
            stats: RenderStats::default(),
        }
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn has_device(&self) -> bool {
        self.gpu.is_some()
    }

    // ── windows ───────────────────────────────────────────────────────────

    /// Opens a window. The first window also brings up the GPU device.
    ///
    /// The new window becomes the current one (the target of `clear_color`).
    pub fn create_window(&mut self, config: WindowConfig) -> Result<Handle<AppWindow>, EngineError> {
        if config.width == 0 || config.height == 0 {
            return Err(EngineError::InvalidArgument(format!(
                "window size must be positive, got {}x{}",
                config.width, config.height
            )));
        }

        if self.platform.is_none() {
            self.platform = Some(Platform::new()?);
        }
        let Some(platform) = self.platform.as_mut() else {
            return Err(EngineError::Platform("event loop unavailable".to_string()));
        };

        let window = Arc::new(platform.create_window(&config)?);
        let id = window.id();

        let surface = if let Some(gpu) = self.gpu.as_ref() {
            gpu.create_surface(window.clone())
        } else {
            match pollster::block_on(Gpu::new(window.clone(), self.config.gpu.clone())) {
                Ok((gpu, surface)) => {
                    self.gpu = Some(gpu);
                    Ok(surface)
                }
                Err(e) => Err(e),
            }
        };
        let surface = match surface {
            Ok(surface) => surface,
            Err(e) => {
                platform.forget(id);
                return Err(EngineError::gpu(e));
            }
        };

        let handle = self.windows.insert(AppWindow { surface, window, id });
        self.current = Some(handle.key());
        log::info!(
            "window `{}` created ({}x{}) as {handle:?}",
            config.title,
            config.width,
            config.height
        );
        Ok(handle)
    }

    pub fn delete_window(&mut self, handle: Handle<AppWindow>) -> Result<(), EngineError> {
        let key = handle.key();
        let window = release(&mut self.windows, handle)?;

        if let Some(platform) = self.platform.as_mut() {
            platform.forget(window.id);
        }
        if self.current == Some(key) {
            self.current = None;
        }
        log::info!("window {key} destroyed");
        Ok(())
    }

    /// `None` when the handle is stale.
    pub fn window_should_close(&self, handle: &Handle<AppWindow>) -> Option<bool> {
        let window = self.windows.get(handle)?;
        let closing = self
            .platform
            .as_ref()
            .and_then(|p| p.events(window.id))
            .is_none_or(|events| events.close_requested);
        Some(closing)
    }

    /// Returns `false` when the handle is stale.
    pub fn set_window_should_close(&mut self, handle: &Handle<AppWindow>) -> bool {
        let Some(window) = self.windows.get(handle) else {
            return false;
        };
        if let Some(events) = self.platform.as_mut().and_then(|p| p.events_mut(window.id)) {
            events.close_requested = true;
        }
        true
    }

    /// Processes pending window events without blocking and applies resizes.
    pub fn poll_events(&mut self) {
        let Some(platform) = self.platform.as_mut() else {
            return;
        };
        platform.pump();

        let Some(gpu) = self.gpu.as_ref() else {
            return;
        };
        for (_, window) in self.windows.iter_mut() {
            let Some(size) = platform.events_mut(window.id).and_then(|e| e.take_resize()) else {
                continue;
            };
            log::debug!("window {:?} resized to {}x{}", window.id, size.width, size.height);
            window.surface.resize(&gpu.device, size);
        }
    }

    /// Whether `code` (a script key code) is held in the window.
    ///
    /// `None` when the handle is stale; unknown codes read as released.
    pub fn get_key(&self, handle: &Handle<AppWindow>, code: i64) -> Option<bool> {
        let window = self.windows.get(handle)?;
        let down = self
            .platform
            .as_ref()
            .and_then(|p| p.events(window.id))
            .is_some_and(|events| events.input.code_down(code));
        Some(down)
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub(super) fn live_resources(&self) -> usize {
        self.meshes.len()
            + self.textures.len()
            + self.shaders.len()
            + self.framebuffers.len()
            + self.fonts.len()
            + self.noises.len()
            + self.windows.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        let live = self.live_resources();
        if live > 0 {
            log::warn!(
                "engine dropped with {live} unreleased resources \
                 (meshes {}, textures {}, shaders {}, framebuffers {}, fonts {}, noise {}, windows {})",
                self.meshes.len(),
                self.textures.len(),
                self.shaders.len(),
                self.framebuffers.len(),
                self.fonts.len(),
                self.noises.len(),
                self.windows.len(),
            );
        }
        self.current = None;
    }
}

/// Removes a resource, logging the release.
pub(super) fn release<T: Resource>(slots: &mut Slots<T>, handle: Handle<T>) -> Result<T, EngineError> {
    let key = handle.key();
    match slots.remove(handle) {
        Ok(value) => {
            log::debug!("{} {key} released", T::KIND);
            Ok(value)
        }
        Err(stale) => {
            log::warn!("{stale}");
            Err(stale.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_touches_nothing() {
        let engine = Engine::default();
        assert!(!engine.has_device());
        assert_eq!(engine.window_count(), 0);
        assert_eq!(engine.live_resources(), 0);
    }

    #[test]
    fn zero_sized_window_is_rejected_before_platform_init() {
        let mut engine = Engine::default();
        let err = engine
            .create_window(WindowConfig::new("x", 0, 600, ""))
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidArgument(_)));
        assert!(engine.platform.is_none());
    }

    #[test]
    fn poll_without_windows_is_a_no_op() {
        let mut engine = Engine::default();
        engine.poll_events();
        assert!(engine.platform.is_none());
    }
}
