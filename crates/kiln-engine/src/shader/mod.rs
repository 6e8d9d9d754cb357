//! WGSL shader programs.
//!
//! Each stage is read from its own file and validated with naga before any
//! GPU object is created, so compile errors surface as a logged diagnostic
//! instead of a device error. Pipelines are built lazily per surface format.

mod compile;
mod program;

pub use compile::{
    capabilities_for, check_interface, compile_stage, load_stage, CompiledStage, ShaderStage, MAX_LOG_BYTES,
};
pub use program::ShaderProgram;
