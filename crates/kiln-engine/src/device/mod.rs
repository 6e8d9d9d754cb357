//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue once, for the first window
//! - creating & configuring one Surface (plus depth target) per window
//! - acquiring frames lazily and presenting them on swap

mod gpu;
mod surface;

pub use gpu::{BindLayouts, Gpu, GpuInit};
pub use surface::{SurfaceErrorAction, WindowSurface, DEPTH_FORMAT};
