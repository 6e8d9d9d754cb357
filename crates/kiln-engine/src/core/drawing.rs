use winit::window::WindowId;

use super::engine::Engine;
use crate::device::SurfaceErrorAction;
use crate::mesh::Mesh;
use crate::render::{self, projection, DrawOutcome, DrawUniforms, QuadDraw, RenderCtx, SkipReason, TexRegion};
use crate::resource::{Handle, Resource, Slots};
use crate::shader::ShaderProgram;
use crate::texture::Texture;
use crate::window::{AppWindow, Platform};

impl Engine {
    /// Draws one textured quad into `window`'s current frame.
    ///
    /// Any missing, released or stale handle makes this a silent no-op; the
    /// outcome is returned and counted in [`Engine::stats`].
    pub fn draw(
        &mut self,
        mesh: Option<&Handle<Mesh>>,
        window: Option<&Handle<AppWindow>>,
        shader: Option<&Handle<ShaderProgram>>,
        texture: Option<&Handle<Texture>>,
        region: TexRegion,
    ) -> DrawOutcome {
        let outcome = self.encode_draw(mesh, window, shader, texture, region);
        self.stats.record(outcome);
        outcome
    }

    fn encode_draw(
        &mut self,
        mesh: Option<&Handle<Mesh>>,
        window: Option<&Handle<AppWindow>>,
        shader: Option<&Handle<ShaderProgram>>,
        texture: Option<&Handle<Texture>>,
        region: TexRegion,
    ) -> DrawOutcome {
        let (Some(mesh), Some(app), Some(program), Some(texture)) = (
            lookup(&self.meshes, mesh),
            lookup_mut(&mut self.windows, window),
            lookup_mut(&mut self.shaders, shader),
            lookup(&self.textures, texture),
        ) else {
            return DrawOutcome::Skipped(SkipReason::MissingResource);
        };
        let Some(gpu) = self.gpu.as_ref() else {
            return DrawOutcome::Skipped(SkipReason::NoDevice);
        };

        let format = app.surface.format();
        let viewport = app.surface.viewport();
        if let Err(err) = program.prepare(gpu, format) {
            log::error!("draw: {err}");
            return DrawOutcome::Skipped(SkipReason::NoPipeline);
        }

        let target = match app.surface.target(&gpu.device) {
            Ok(target) => target,
            Err(action) => {
                surface_failed(self.platform.as_mut(), app.id, action);
                return DrawOutcome::Skipped(SkipReason::NoFrame);
            }
        };
        let Some(pipeline) = program.pipeline(format) else {
            return DrawOutcome::Skipped(SkipReason::NoPipeline);
        };

        let ctx = RenderCtx::new(&gpu.device, &gpu.queue);
        let uniforms = DrawUniforms::new(mesh.transform.model_matrix(), projection(viewport), region);
        let quad = QuadDraw {
            pipeline,
            uniform_buffer: program.uniform_buffer(),
            uniform_bind_group: program.uniform_bind_group(),
            texture_bind_group: texture.bind_group(),
            geometry: &mesh.geometry,
        };
        render::draw_quad(&ctx, &target, &quad, &uniforms);

        DrawOutcome::Submitted
    }

    /// Clears color and depth of the current window's frame.
    ///
    /// Returns `false` when there is no current window or no frame to clear.
    pub fn clear_color(&mut self, r: f32, g: f32, b: f32) -> bool {
        let Some(key) = self.current else {
            log::trace!("clear_color without a current window");
            return false;
        };
        let (Some(app), Some(gpu)) = (self.windows.get_key_mut(key), self.gpu.as_ref()) else {
            return false;
        };

        let target = match app.surface.target(&gpu.device) {
            Ok(target) => target,
            Err(action) => {
                surface_failed(self.platform.as_mut(), app.id, action);
                return false;
            }
        };

        let ctx = RenderCtx::new(&gpu.device, &gpu.queue);
        render::clear(&ctx, &target, [r as f64, g as f64, b as f64]);
        self.stats.clears += 1;
        true
    }

    /// Presents everything drawn into the window since the previous swap.
    ///
    /// Returns `false` when the handle is stale or nothing was drawn.
    pub fn swap_buffers(&mut self, window: &Handle<AppWindow>) -> bool {
        let Some(app) = self.windows.get_mut(window) else {
            return false;
        };
        let presented = app.surface.present(&app.window);
        if presented {
            self.stats.frames_presented += 1;
        }
        presented
    }
}

fn lookup<'a, T: Resource>(slots: &'a Slots<T>, handle: Option<&Handle<T>>) -> Option<&'a T> {
    match handle {
        Some(handle) => slots.get(handle),
        None => None,
    }
}

fn lookup_mut<'a, T: Resource>(slots: &'a mut Slots<T>, handle: Option<&Handle<T>>) -> Option<&'a mut T> {
    match handle {
        Some(handle) => slots.get_mut(handle),
        None => None,
    }
}

fn surface_failed(platform: Option<&mut Platform>, id: WindowId, action: SurfaceErrorAction) {
    match action {
        SurfaceErrorAction::Reconfigured | SurfaceErrorAction::SkipFrame => {
            log::debug!("frame skipped for {id:?}: {action:?}");
        }
        SurfaceErrorAction::Fatal => {
            log::error!("surface of {id:?} is unusable; requesting close");
            if let Some(events) = platform.and_then(|p| p.events_mut(id)) {
                events.close_requested = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::SlotKey;

    #[test]
    fn draw_with_missing_handles_is_skipped() {
        let mut engine = Engine::default();
        let outcome = engine.draw(None, None, None, None, TexRegion::FULL);

        assert_eq!(outcome, DrawOutcome::Skipped(SkipReason::MissingResource));
        assert_eq!(engine.stats().draws_skipped, 1);
        assert_eq!(engine.stats().draws_submitted, 0);
    }

    #[test]
    fn draw_with_stale_handles_is_skipped() {
        let mut engine = Engine::default();
        let mesh: Handle<Mesh> = Handle::forge(SlotKey::forge(0, 3));
        let texture: Handle<Texture> = Handle::forge(SlotKey::forge(2, 0));

        let outcome = engine.draw(Some(&mesh), None, None, Some(&texture), TexRegion::FULL);
        assert_eq!(outcome, DrawOutcome::Skipped(SkipReason::MissingResource));
    }

    #[test]
    fn clear_without_window_reports_false() {
        let mut engine = Engine::default();
        assert!(!engine.clear_color(0.1, 0.2, 0.3));
        assert_eq!(engine.stats().clears, 0);
    }
}
