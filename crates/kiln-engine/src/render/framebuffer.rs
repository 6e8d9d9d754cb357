use crate::coords::Viewport;
use crate::resource::Resource;

/// Off-screen color target plus a depth/stencil attachment, sized to a window.
pub struct Framebuffer {
    pub color: wgpu::Texture,
    pub color_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub depth_stencil: wgpu::Texture,
    pub depth_stencil_view: wgpu::TextureView,
    pub size: Viewport,
}

impl Framebuffer {
    pub const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
    pub const DEPTH_STENCIL_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

    pub fn new(device: &wgpu::Device, size: Viewport) -> Self {
        let extent = wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        };

        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiln framebuffer color"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::COLOR_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });

        let depth_stencil = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("kiln framebuffer depth/stencil"),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::DEPTH_STENCIL_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kiln framebuffer sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        Self {
            color_view: color.create_view(&wgpu::TextureViewDescriptor::default()),
            depth_stencil_view: depth_stencil.create_view(&wgpu::TextureViewDescriptor::default()),
            color,
            sampler,
            depth_stencil,
            size,
        }
    }
}

impl Resource for Framebuffer {
    const KIND: &'static str = "framebuffer";
}
