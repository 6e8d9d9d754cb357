use std::fmt;
use std::path::Path;

use naga::valid::{Capabilities, ModuleInfo};

use crate::core::EngineError;
use crate::render::DrawUniforms;

/// Diagnostics longer than this are truncated.
pub const MAX_LOG_BYTES: usize = 512;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn matches(self, stage: naga::ShaderStage) -> bool {
        matches!(
            (self, stage),
            (ShaderStage::Vertex, naga::ShaderStage::Vertex)
                | (ShaderStage::Fragment, naga::ShaderStage::Fragment)
        )
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Validated WGSL source for one stage.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    pub source: String,
    pub entry_point: String,
    pub stage: ShaderStage,
}

/// Reads and validates one stage from disk.
pub fn load_stage(
    path: &Path,
    stage: ShaderStage,
    capabilities: Capabilities,
) -> Result<CompiledStage, EngineError> {
    let source = std::fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    compile_stage(&source, stage, capabilities).map_err(|log| EngineError::ShaderCompile {
        stage,
        path: path.to_path_buf(),
        log,
    })
}

/// Shader capabilities a device with `features` can run.
pub fn capabilities_for(features: wgpu::Features) -> Capabilities {
    let optional = [
        (wgpu::Features::SHADER_F64, Capabilities::FLOAT64),
        (wgpu::Features::SHADER_F16, Capabilities::SHADER_FLOAT16),
        (wgpu::Features::SHADER_PRIMITIVE_INDEX, Capabilities::PRIMITIVE_INDEX),
    ];

    optional
        .into_iter()
        .filter(|(feature, _)| features.contains(*feature))
        .fold(Capabilities::default(), |caps, (_, cap)| caps | cap)
}

/// Parses and validates `source`, returning the first entry point of `stage`.
///
/// Besides naga validation, the entry point must fit the quad pipeline: see
/// [`check_interface`]. The error is a human-readable log of at most
/// [`MAX_LOG_BYTES`] bytes.
pub fn compile_stage(
    source: &str,
    stage: ShaderStage,
    capabilities: Capabilities,
) -> Result<CompiledStage, String> {
    let module = naga::front::wgsl::parse_str(source)
        .map_err(|e| truncate_log(e.emit_to_string(source)))?;

    let mut validator = naga::valid::Validator::new(naga::valid::ValidationFlags::all(), capabilities);
    let info = validator
        .validate(&module)
        .map_err(|e| truncate_log(e.emit_to_string(source)))?;

    let index = module
        .entry_points
        .iter()
        .position(|ep| stage.matches(ep.stage))
        .ok_or_else(|| format!("no @{stage} entry point found"))?;

    check_interface(&module, &info, index)
        .map_err(|e| truncate_log(format!("{}: {e}", module.entry_points[index].name)))?;

    Ok(CompiledStage {
        source: source.to_string(),
        entry_point: module.entry_points[index].name.clone(),
        stage,
    })
}

/// Checks an entry point against the shared quad layout.
///
/// - `@group(0) @binding(0)`: a uniform block no larger than [`DrawUniforms`].
/// - `@group(1) @binding(0)`: a `texture_2d<f32>` (fragment only).
/// - `@group(1) @binding(1)`: a filtering `sampler` (fragment only).
/// - vertex inputs: float values at locations 0 (position) and 1 (uv).
/// - fragment outputs: one float color at location 0.
///
/// Bindings the entry point never touches are ignored.
pub fn check_interface(module: &naga::Module, info: &ModuleInfo, index: usize) -> Result<(), String> {
    let entry = &module.entry_points[index];
    let uses = info.get_entry_point(index);
    let fragment = entry.stage == naga::ShaderStage::Fragment;

    for (handle, var) in module.global_variables.iter() {
        let Some(binding) = &var.binding else {
            continue;
        };
        if uses[handle].is_empty() {
            continue;
        }

        let (group, slot) = (binding.group, binding.binding);
        let inner = &module.types[var.ty].inner;
        match (group, slot) {
            (0, 0) => {
                if var.space != naga::AddressSpace::Uniform {
                    return Err("@group(0) @binding(0) must be a uniform block".to_string());
                }
                let size = inner.try_size(module.to_ctx()).unwrap_or(u32::MAX) as usize;
                let limit = std::mem::size_of::<DrawUniforms>();
                if size > limit {
                    return Err(format!("uniform block is {size} bytes, at most {limit} are bound"));
                }
            }
            (1, 0) if fragment => {
                let sampled_2d = matches!(
                    inner,
                    naga::TypeInner::Image {
                        dim: naga::ImageDimension::D2,
                        arrayed: false,
                        class: naga::ImageClass::Sampled {
                            kind: naga::ScalarKind::Float,
                            multi: false,
                        },
                    }
                );
                if !sampled_2d {
                    return Err("@group(1) @binding(0) must be a texture_2d<f32>".to_string());
                }
            }
            (1, 1) if fragment => {
                if !matches!(inner, naga::TypeInner::Sampler { comparison: false }) {
                    return Err("@group(1) @binding(1) must be a filtering sampler".to_string());
                }
            }
            _ => {
                return Err(format!(
                    "@group({group}) @binding({slot}) is not bound for {:?} shaders",
                    entry.stage
                ));
            }
        }
    }

    let mut locations = Vec::new();
    if fragment {
        if let Some(result) = &entry.function.result {
            collect_locations(module, result.ty, result.binding.as_ref(), &mut locations);
        }
        for (location, inner) in locations {
            if location != 0 {
                return Err(format!("output @location({location}) has no color target"));
            }
            if !is_float(inner) {
                return Err("color output must be a float vector".to_string());
            }
        }
    } else {
        for arg in &entry.function.arguments {
            collect_locations(module, arg.ty, arg.binding.as_ref(), &mut locations);
        }
        for (location, inner) in locations {
            if location > 1 {
                return Err(format!("input @location({location}) has no vertex attribute"));
            }
            if !is_float(inner) {
                return Err(format!("input @location({location}) must be a float value"));
            }
        }
    }

    Ok(())
}

/// Flattens `@location` bindings, descending into unbound structs.
fn collect_locations<'a>(
    module: &'a naga::Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<(u32, &'a naga::TypeInner)>,
) {
    let inner = &module.types[ty].inner;
    match (binding, inner) {
        (Some(naga::Binding::Location { location, .. }), _) => out.push((*location, inner)),
        (None, naga::TypeInner::Struct { members, .. }) => {
            for member in members {
                collect_locations(module, member.ty, member.binding.as_ref(), out);
            }
        }
        _ => {}
    }
}

fn is_float(inner: &naga::TypeInner) -> bool {
    match inner {
        naga::TypeInner::Scalar(scalar) | naga::TypeInner::Vector { scalar, .. } => {
            scalar.kind == naga::ScalarKind::Float
        }
        _ => false,
    }
}

fn truncate_log(mut log: String) -> String {
    if log.len() > MAX_LOG_BYTES {
        let mut end = MAX_LOG_BYTES;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}
