//! Matrix math for the quad pipeline.

mod mat4;

pub use mat4::Mat4;
