use std::path::Path;

use super::engine::{release, Engine};
use crate::core::EngineError;
use crate::device::Gpu;
use crate::mesh::{Mesh, Transform};
use crate::render::Framebuffer;
use crate::resource::Handle;
use crate::shader::ShaderProgram;
use crate::text::{bake_word, Font};
use crate::texture::{self, Texture};
use crate::window::AppWindow;

impl Engine {
    fn device(&self) -> Result<&Gpu, EngineError> {
        self.gpu.as_ref().ok_or(EngineError::NoDevice)
    }

    // ── framebuffers ──────────────────────────────────────────────────────

    /// Allocates an off-screen color + depth/stencil target sized to `window`.
    pub fn create_framebuffer(&mut self, window: &Handle<AppWindow>) -> Result<Handle<Framebuffer>, EngineError> {
        let gpu = self.device()?;
        let Some(window) = self.windows.get(window) else {
            return Err(EngineError::InvalidArgument("framebuffer needs a live window".to_string()));
        };

        let framebuffer = Framebuffer::new(&gpu.device, window.viewport());
        let handle = self.framebuffers.insert(framebuffer);
        log::debug!("created {handle:?}");
        Ok(handle)
    }

    pub fn delete_framebuffer(&mut self, handle: Handle<Framebuffer>) -> Result<(), EngineError> {
        release(&mut self.framebuffers, handle).map(drop)
    }

    // ── shaders ───────────────────────────────────────────────────────────

    /// Loads and links a WGSL vertex/fragment pair.
    pub fn create_shader(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Handle<ShaderProgram>, EngineError> {
        let Some(gpu) = self.gpu.as_ref() else {
            return Err(EngineError::NoDevice);
        };

        // Linked once up front; a layout mismatch fails creation.
        let format = self
            .current
            .and_then(|key| self.windows.get_key(key))
            .map_or(Framebuffer::COLOR_FORMAT, |window| window.surface.format());
        let mut program = ShaderProgram::load(gpu, vertex_path, fragment_path)?;
        program.prepare(gpu, format)?;

        let handle = self.shaders.insert(program);
        log::debug!(
            "created {handle:?} from {} + {}",
            vertex_path.display(),
            fragment_path.display()
        );
        Ok(handle)
    }

    pub fn delete_shader(&mut self, handle: Handle<ShaderProgram>) -> Result<(), EngineError> {
        release(&mut self.shaders, handle).map(drop)
    }

    // ── fonts and text ────────────────────────────────────────────────────

    /// Reads and parses a font file. Needs no GPU.
    pub fn load_font(&mut self, path: &Path) -> Result<Handle<Font>, EngineError> {
        let font = Font::load(path)?;
        let handle = self.fonts.insert(font);
        log::debug!("loaded {handle:?} from {}", path.display());
        Ok(handle)
    }

    pub fn delete_font(&mut self, handle: Handle<Font>) -> Result<(), EngineError> {
        release(&mut self.fonts, handle).map(drop)
    }

    /// Bakes `word` into a 512x64 single-channel texture.
    pub fn create_text(&mut self, font: &Handle<Font>, word: &str) -> Result<Handle<Texture>, EngineError> {
        let gpu = self.device()?;
        let Some(font) = self.fonts.get(font) else {
            return Err(EngineError::InvalidArgument("text needs a live font".to_string()));
        };

        let bitmap = bake_word(font, word).flipped();
        let texture = Texture::from_r8(
            gpu,
            bitmap.width as u32,
            bitmap.height as u32,
            &bitmap.pixels,
            "kiln text texture",
        );

        let handle = self.textures.insert(texture);
        log::debug!("baked `{word}` into {handle:?}");
        Ok(handle)
    }

    // ── textures ──────────────────────────────────────────────────────────

    pub fn load_texture(&mut self, path: &Path) -> Result<Handle<Texture>, EngineError> {
        let gpu = self.device()?;
        let image = texture::decode_file(path)?;
        let max = gpu.device.limits().max_texture_dimension_2d;
        texture::check_dimensions(path, image.width, image.height, max)?;
        let texture = Texture::from_rgba8(gpu, image.width, image.height, &image.rgba, "kiln image texture");

        let handle = self.textures.insert(texture);
        log::debug!(
            "loaded {handle:?} from {} ({}x{}, {} channels)",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        Ok(handle)
    }

    pub fn delete_texture(&mut self, handle: Handle<Texture>) -> Result<(), EngineError> {
        release(&mut self.textures, handle).map(drop)
    }

    // ── meshes ────────────────────────────────────────────────────────────

    /// Creates a zero-initialized quad mesh.
    pub fn create_mesh(&mut self) -> Result<Handle<Mesh>, EngineError> {
        let gpu = self.device()?;
        let mesh = Mesh::new(&gpu.device);
        let handle = self.meshes.insert(mesh);
        log::debug!("created {handle:?}");
        Ok(handle)
    }

    pub fn delete_mesh(&mut self, handle: Handle<Mesh>) -> Result<(), EngineError> {
        release(&mut self.meshes, handle).map(drop)
    }

    /// Returns `false` when the handle is stale.
    pub fn set_position(&mut self, mesh: &Handle<Mesh>, x: f32, y: f32, z: f32) -> bool {
        self.with_transform(mesh, |t| t.set_position(x, y, z))
    }

    pub fn set_scale(&mut self, mesh: &Handle<Mesh>, w: f32, h: f32) -> bool {
        self.with_transform(mesh, |t| t.set_scale(w, h))
    }

    pub fn set_rotation(&mut self, mesh: &Handle<Mesh>, degrees: f32) -> bool {
        self.with_transform(mesh, |t| t.set_rotation(degrees))
    }

    fn with_transform(&mut self, mesh: &Handle<Mesh>, f: impl FnOnce(&mut Transform)) -> bool {
        match self.meshes.get_mut(mesh) {
            Some(mesh) => {
                f(&mut mesh.transform);
                true
            }
            None => false,
        }
    }
}
