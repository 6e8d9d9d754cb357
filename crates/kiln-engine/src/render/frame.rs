use super::ctx::{RenderCtx, RenderTarget};
use super::uniforms::DrawUniforms;
use crate::mesh::QuadGeometry;

/// Why a draw request produced no GPU work.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SkipReason {
    /// One of mesh, window, shader or texture was nil, released or stale.
    MissingResource,
    /// No GPU device exists yet (no window was ever created).
    NoDevice,
    /// The window has no drawable frame right now (minimized, surface lost).
    NoFrame,
    /// The shader program does not link for the window's surface format.
    NoPipeline,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawOutcome {
    Submitted,
    Skipped(SkipReason),
}

/// Running counters over the engine's lifetime.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RenderStats {
    pub draws_submitted: u64,
    pub draws_skipped: u64,
    pub clears: u64,
    pub frames_presented: u64,
}

impl RenderStats {
    pub fn record(&mut self, outcome: DrawOutcome) {
        match outcome {
            DrawOutcome::Submitted => self.draws_submitted += 1,
            DrawOutcome::Skipped(reason) => {
                log::trace!("draw skipped: {reason:?}");
                self.draws_skipped += 1;
            }
        }
    }
}

/// Everything one quad draw binds.
pub struct QuadDraw<'a> {
    pub pipeline: &'a wgpu::RenderPipeline,
    pub uniform_buffer: &'a wgpu::Buffer,
    pub uniform_bind_group: &'a wgpu::BindGroup,
    pub texture_bind_group: &'a wgpu::BindGroup,
    pub geometry: &'a QuadGeometry,
}

/// Clears color (alpha 1) and depth of the target, then submits.
pub fn clear(ctx: &RenderCtx<'_>, target: &RenderTarget<'_>, rgb: [f64; 3]) {
    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("kiln clear encoder"),
        });

    {
        let _pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("kiln clear pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: rgb[0],
                        g: rgb[1],
                        b: rgb[2],
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
    }

    ctx.queue.submit(std::iter::once(encoder.finish()));
}

/// Draws one textured quad: uploads `uniforms`, records a pass and submits.
pub fn draw_quad(
    ctx: &RenderCtx<'_>,
    target: &RenderTarget<'_>,
    draw: &QuadDraw<'_>,
    uniforms: &DrawUniforms,
) {
    ctx.queue
        .write_buffer(draw.uniform_buffer, 0, bytemuck::bytes_of(uniforms));

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("kiln draw encoder"),
        });

    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("kiln quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: target.color_load(),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: target.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: target.depth_load(),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(draw.pipeline);
        rpass.set_bind_group(0, draw.uniform_bind_group, &[]);
        rpass.set_bind_group(1, draw.texture_bind_group, &[]);
        rpass.set_vertex_buffer(0, draw.geometry.vertex_buffer.slice(..));
        rpass.set_index_buffer(draw.geometry.index_buffer.slice(..), QuadGeometry::INDEX_FORMAT);
        rpass.draw_indexed(0..QuadGeometry::INDEX_COUNT, 0, 0..1);
    }

    ctx.queue.submit(std::iter::once(encoder.finish()));
}
