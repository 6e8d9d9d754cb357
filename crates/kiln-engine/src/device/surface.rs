use anyhow::{Context, Result};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use super::Gpu;
use crate::coords::Viewport;
use crate::render::RenderTarget;

/// Depth attachment format used by every window and quad pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// What a caller should do after frame acquisition failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The swapchain was rebuilt; the next frame should succeed.
    Reconfigured,
    /// Drop this frame and try again later.
    SkipFrame,
    /// Fatal error (commonly OOM); the window should close.
    Fatal,
}

struct DepthTarget {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthTarget {
    fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiln window depth"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { _texture: texture, view }
    }
}

/// Frame acquired from the swapchain and not yet presented.
///
/// Holding the surface texture prevents acquisition of subsequent frames.
struct ActiveFrame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
}

impl ActiveFrame {
    fn acquire(surface: &wgpu::Surface<'static>) -> Result<Self, wgpu::SurfaceError> {
        let surface_texture = surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        Ok(Self { surface_texture, view })
    }
}

/// The in-flight frame of a surface and whether a pass has touched it yet.
struct FrameSlot<T> {
    current: Option<T>,
    touched: bool,
}

impl<T> FrameSlot<T> {
    fn new() -> Self {
        Self {
            current: None,
            touched: false,
        }
    }

    /// Fills the slot with `acquire` unless a frame is already held.
    fn ensure<E>(&mut self, acquire: impl FnOnce() -> Result<T, E>) -> Result<(), E> {
        if self.current.is_none() {
            self.current = Some(acquire()?);
            self.touched = false;
        }
        Ok(())
    }

    /// Marks the frame as drawn into. The flag is `true` on the first call
    /// after the frame was acquired.
    fn touch(&mut self) -> Option<(&T, bool)> {
        let frame = self.current.as_ref()?;
        let fresh = !self.touched;
        self.touched = true;
        Some((frame, fresh))
    }

    fn take(&mut self) -> Option<T> {
        self.touched = false;
        self.current.take()
    }

    /// Drops the held frame now.
    fn discard(&mut self) {
        drop(self.take());
    }
}

/// Presentation surface of one window plus its depth buffer.
///
/// Frames are acquired on the first clear/draw after a swap and presented by
/// [`WindowSurface::present`], mirroring a double-buffered GL window.
///
/// An unpresented frame is released before its surface, both on drop and on
/// resize.
pub struct WindowSurface {
    frame: FrameSlot<ActiveFrame>,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    depth: DepthTarget,
}

impl WindowSurface {
    pub(super) fn configure(
        gpu: &Gpu,
        surface: wgpu::Surface<'static>,
        size: PhysicalSize<u32>,
    ) -> Result<Self> {
        let init = gpu.init();
        let caps = surface.get_capabilities(gpu.adapter());
        let format = choose_surface_format(&caps, init.prefer_srgb)
            .context("no supported surface formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode: choose_alpha_mode(&caps, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };
        surface.configure(&gpu.device, &config);

        let depth = DepthTarget::new(&gpu.device, config.width, config.height);
        log::debug!("surface configured: {format:?} {}x{}", config.width, config.height);

        Ok(Self {
            frame: FrameSlot::new(),
            surface,
            config,
            size,
            depth,
        })
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.size.width, self.size.height)
    }

    /// Reconfigures the surface and depth buffer after a resize.
    ///
    /// A zero-sized window (minimized) only records the size; the swapchain is
    /// rebuilt once the window has an area again.
    pub fn resize(&mut self, device: &wgpu::Device, new_size: PhysicalSize<u32>) {
        self.size = new_size;
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }

        // An in-flight frame belongs to the old swapchain.
        self.frame.discard();
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(device, &self.config);
        self.depth = DepthTarget::new(device, new_size.width, new_size.height);
    }

    /// Returns the target for the current frame, acquiring one if needed.
    ///
    /// `fresh` is set only for the first pass recorded into a newly acquired
    /// frame, so that pass clears instead of loading undefined contents.
    pub fn target(&mut self, device: &wgpu::Device) -> Result<RenderTarget<'_>, SurfaceErrorAction> {
        if self.size.width == 0 || self.size.height == 0 {
            return Err(SurfaceErrorAction::SkipFrame);
        }

        if let Err(err) = self.frame.ensure(|| ActiveFrame::acquire(&self.surface)) {
            return Err(self.map_surface_error(device, err));
        }
        let Some((frame, fresh)) = self.frame.touch() else {
            return Err(SurfaceErrorAction::SkipFrame);
        };

        Ok(RenderTarget {
            color_view: &frame.view,
            depth_view: &self.depth.view,
            fresh,
        })
    }

    /// Presents the current frame. Returns `false` when no frame was acquired.
    pub fn present(&mut self, window: &Window) -> bool {
        let Some(frame) = self.frame.take() else {
            return false;
        };
        window.pre_present_notify();
        drop(frame.view);
        frame.surface_texture.present();
        true
    }

    fn map_surface_error(&self, device: &wgpu::Device, err: wgpu::SurfaceError) -> SurfaceErrorAction {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                if self.size.width > 0 && self.size.height > 0 {
                    self.surface.configure(device, &self.config);
                }
                SurfaceErrorAction::Reconfigured
            }
            wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
            wgpu::SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

impl Drop for WindowSurface {
    fn drop(&mut self) {
        self.frame.discard();
    }
}

fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    choose_format(&caps.formats, prefer_srgb)
}

fn choose_format(formats: &[wgpu::TextureFormat], prefer_srgb: bool) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == prefer_srgb)
        .or_else(|| formats.first().copied())
}

fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use wgpu::TextureFormat as F;

    #[test]
    fn linear_format_preferred_by_default() {
        let formats = [F::Bgra8UnormSrgb, F::Bgra8Unorm, F::Rgba8Unorm];
        assert_eq!(choose_format(&formats, false), Some(F::Bgra8Unorm));
    }

    #[test]
    fn srgb_format_when_requested() {
        let formats = [F::Bgra8Unorm, F::Rgba8UnormSrgb];
        assert_eq!(choose_format(&formats, true), Some(F::Rgba8UnormSrgb));
    }

    // ── frame slot ────────────────────────────────────────────────────────

    struct Tracked(Rc<Cell<bool>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(true);
        }
    }

    #[test]
    fn first_touch_after_acquire_is_fresh() {
        let mut slot = FrameSlot::new();
        slot.ensure(|| Ok::<_, ()>(1)).unwrap();
        assert_eq!(slot.touch(), Some((&1, true)));
        assert_eq!(slot.touch(), Some((&1, false)));

        // Already held: no second acquisition.
        slot.ensure(|| Err(())).unwrap();
        assert_eq!(slot.touch(), Some((&1, false)));
    }

    #[test]
    fn take_resets_freshness() {
        let mut slot = FrameSlot::new();
        slot.ensure(|| Ok::<_, ()>("a")).unwrap();
        slot.touch();
        assert_eq!(slot.take(), Some("a"));
        assert_eq!(slot.touch(), None);

        slot.ensure(|| Ok::<_, ()>("b")).unwrap();
        assert_eq!(slot.touch(), Some((&"b", true)));
    }

    #[test]
    fn failed_acquire_leaves_slot_empty() {
        let mut slot = FrameSlot::<u8>::new();
        assert_eq!(slot.ensure(|| Err("lost")), Err("lost"));
        assert_eq!(slot.touch(), None);
    }

    #[test]
    fn discard_drops_the_frame_immediately() {
        let dropped = Rc::new(Cell::new(false));
        let mut slot = FrameSlot::new();
        slot.ensure(|| Ok::<_, ()>(Tracked(dropped.clone()))).unwrap();

        slot.discard();
        assert!(dropped.get());
        assert!(slot.touch().is_none());
    }

    #[test]
    fn falls_back_to_first_format() {
        assert_eq!(choose_format(&[F::Bgra8UnormSrgb], false), Some(F::Bgra8UnormSrgb));
        assert_eq!(choose_format(&[], false), None);
    }
}
