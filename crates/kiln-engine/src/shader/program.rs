use std::borrow::Cow;
use std::path::Path;

use super::compile::{capabilities_for, load_stage, CompiledStage, ShaderStage};
use crate::core::EngineError;
use crate::device::{Gpu, DEPTH_FORMAT};
use crate::mesh::QuadVertex;
use crate::render::DrawUniforms;
use crate::resource::Resource;

/// A linked vertex + fragment pair with its own uniform buffer.
///
/// Render pipelines are created on demand for each surface format the program
/// is drawn into and cached for the program's lifetime.
pub struct ShaderProgram {
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
    vertex_entry: String,
    fragment_entry: String,

    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,

    pipelines: Vec<(wgpu::TextureFormat, wgpu::RenderPipeline)>,
}

impl ShaderProgram {
    /// Loads, validates and links the two stages.
    pub fn load(gpu: &Gpu, vertex_path: &Path, fragment_path: &Path) -> Result<Self, EngineError> {
        let capabilities = capabilities_for(gpu.device.features());
        let vertex = load_stage(vertex_path, ShaderStage::Vertex, capabilities)?;
        let fragment = load_stage(fragment_path, ShaderStage::Fragment, capabilities)?;
        Self::from_stages(gpu, &vertex, &fragment)
    }

    pub fn from_stages(gpu: &Gpu, vertex: &CompiledStage, fragment: &CompiledStage) -> Result<Self, EngineError> {
        let (vertex_module, fragment_module) = gpu
            .validated(|device| {
                let vertex = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("kiln vertex shader"),
                    source: wgpu::ShaderSource::Wgsl(Cow::Owned(vertex.source.clone())),
                });
                let fragment = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                    label: Some("kiln fragment shader"),
                    source: wgpu::ShaderSource::Wgsl(Cow::Owned(fragment.source.clone())),
                });
                (vertex, fragment)
            })
            .map_err(EngineError::ShaderLink)?;

        let device = &gpu.device;

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("kiln draw ubo"),
            size: std::mem::size_of::<DrawUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("kiln draw ubo bind group"),
            layout: &gpu.layouts.uniforms,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            vertex: vertex_module,
            fragment: fragment_module,
            vertex_entry: vertex.entry_point.clone(),
            fragment_entry: fragment.entry_point.clone(),
            uniform_buffer,
            uniform_bind_group,
            pipelines: Vec::new(),
        })
    }

    /// Ensures a pipeline exists for `format`.
    pub fn prepare(&mut self, gpu: &Gpu, format: wgpu::TextureFormat) -> Result<(), EngineError> {
        if self.pipeline(format).is_some() {
            return Ok(());
        }

        let pipeline = gpu
            .validated(|device| {
                device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: Some("kiln quad pipeline"),
                    layout: Some(&gpu.layouts.pipeline),
                    vertex: wgpu::VertexState {
                        module: &self.vertex,
                        entry_point: Some(self.vertex_entry.as_str()),
                        compilation_options: Default::default(),
                        buffers: &[QuadVertex::layout()],
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &self.fragment,
                        entry_point: Some(self.fragment_entry.as_str()),
                        compilation_options: Default::default(),
                        targets: &[Some(wgpu::ColorTargetState {
                            format,
                            blend: None,
                            write_mask: wgpu::ColorWrites::ALL,
                        })],
                    }),
                    primitive: wgpu::PrimitiveState {
                        topology: wgpu::PrimitiveTopology::TriangleList,
                        strip_index_format: None,
                        front_face: wgpu::FrontFace::Ccw,
                        cull_mode: None,
                        polygon_mode: wgpu::PolygonMode::Fill,
                        unclipped_depth: false,
                        conservative: false,
                    },
                    depth_stencil: Some(wgpu::DepthStencilState {
                        format: DEPTH_FORMAT,
                        depth_write_enabled: true,
                        depth_compare: wgpu::CompareFunction::Less,
                        stencil: wgpu::StencilState::default(),
                        bias: wgpu::DepthBiasState::default(),
                    }),
                    multisample: wgpu::MultisampleState::default(),
                    multiview_mask: None,
                    cache: None,
                })
            })
            .map_err(EngineError::ShaderLink)?;

        log::debug!("built quad pipeline for {format:?}");
        self.pipelines.push((format, pipeline));
        Ok(())
    }

    pub fn pipeline(&self, format: wgpu::TextureFormat) -> Option<&wgpu::RenderPipeline> {
        self.pipelines
            .iter()
            .find(|(f, _)| *f == format)
            .map(|(_, p)| p)
    }

    pub fn uniform_buffer(&self) -> &wgpu::Buffer {
        &self.uniform_buffer
    }

    pub fn uniform_bind_group(&self) -> &wgpu::BindGroup {
        &self.uniform_bind_group
    }
}

impl Resource for ShaderProgram {
    const KIND: &'static str = "shader";
}
