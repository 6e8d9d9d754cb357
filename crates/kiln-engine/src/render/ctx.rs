/// Device handles a pass is recorded and submitted with.
pub struct RenderCtx<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
}

impl<'a> RenderCtx<'a> {
    #[inline]
    pub fn new(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> Self {
        Self { device, queue }
    }
}

/// Attachments of the frame currently being drawn.
pub struct RenderTarget<'a> {
    pub color_view: &'a wgpu::TextureView,
    pub depth_view: &'a wgpu::TextureView,
    /// First pass into a newly acquired frame.
    pub fresh: bool,
}

impl RenderTarget<'_> {
    pub(crate) fn color_load(&self) -> wgpu::LoadOp<wgpu::Color> {
        if self.fresh {
            wgpu::LoadOp::Clear(wgpu::Color::BLACK)
        } else {
            wgpu::LoadOp::Load
        }
    }

    pub(crate) fn depth_load(&self) -> wgpu::LoadOp<f32> {
        if self.fresh {
            wgpu::LoadOp::Clear(1.0)
        } else {
            wgpu::LoadOp::Load
        }
    }
}
