use std::path::Path;

use crate::core::EngineError;
use crate::device::Gpu;
use crate::resource::Resource;

/// A sampled 2D texture with its bind group (group 1 of the quad layout).
///
/// Sampling is nearest-neighbour with clamp-to-edge addressing and no mipmaps.
pub struct Texture {
    _texture: wgpu::Texture,
    _view: wgpu::TextureView,
    _sampler: wgpu::Sampler,
    bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
    pub format: wgpu::TextureFormat,
}

impl Texture {
    pub fn from_rgba8(gpu: &Gpu, width: u32, height: u32, rgba: &[u8], label: &str) -> Self {
        Self::upload(gpu, width, height, wgpu::TextureFormat::Rgba8Unorm, 4, rgba, label)
    }

    /// Single-channel texture; shaders read the value from `.r`.
    pub fn from_r8(gpu: &Gpu, width: u32, height: u32, pixels: &[u8], label: &str) -> Self {
        Self::upload(gpu, width, height, wgpu::TextureFormat::R8Unorm, 1, pixels, label)
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    fn upload(
        gpu: &Gpu,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        bytes_per_pixel: u32,
        data: &[u8],
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        };

        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        if width > 0 && height > 0 {
            gpu.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(width * bytes_per_pixel),
                    rows_per_image: Some(height),
                },
                size,
            );
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("kiln nearest sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kiln texture bind group"),
            layout: &gpu.layouts.texture,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        Self {
            _texture: texture,
            _view: view,
            _sampler: sampler,
            bind_group,
            width,
            height,
            format,
        }
    }
}

impl Resource for Texture {
    const KIND: &'static str = "texture";
}

/// Rejects images with a side longer than `max_dimension` texels.
pub fn check_dimensions(path: &Path, width: u32, height: u32, max_dimension: u32) -> Result<(), EngineError> {
    if width > max_dimension || height > max_dimension {
        return Err(EngineError::TextureTooLarge {
            path: path.to_path_buf(),
            width,
            height,
            max: max_dimension,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_within_the_limit_fit() {
        let path = Path::new("sprite.png");
        assert!(check_dimensions(path, 16, 16, 8192).is_ok());
        assert!(check_dimensions(path, 8192, 8192, 8192).is_ok());
    }

    #[test]
    fn one_long_side_is_enough_to_reject() {
        let err = check_dimensions(Path::new("strip.png"), 16384, 1, 8192).unwrap_err();
        match err {
            EngineError::TextureTooLarge { width, height, max, .. } => {
                assert_eq!((width, height, max), (16384, 1, 8192));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(check_dimensions(Path::new("tall.png"), 1, 8193, 8192).is_err());
    }

    #[test]
    fn error_names_the_file_and_limit() {
        let msg = check_dimensions(Path::new("assets/huge.png"), 9000, 20, 8192)
            .unwrap_err()
            .to_string();
        assert!(msg.contains("assets/huge.png"), "{msg}");
        assert!(msg.contains("9000x20"), "{msg}");
        assert!(msg.contains("8192x8192"), "{msg}");
    }
}
