//! Frame renderer.
//!
//! One call, one GPU submission: every clear and every quad draw records its
//! own render pass and submits it immediately, so consecutive draws that share
//! a shader program each see their own uniform values.
//!
//! Convention:
//! - the quad spans `[-0.5, 0.5]` in model space, +Y up
//! - the projection is `ortho(-aspect, aspect, -1, 1, -10, 10)` per draw

mod ctx;
mod frame;
mod framebuffer;
mod uniforms;

pub use ctx::{RenderCtx, RenderTarget};
pub use frame::{clear, draw_quad, DrawOutcome, QuadDraw, RenderStats, SkipReason};
pub use framebuffer::Framebuffer;
pub use uniforms::{projection, DrawUniforms, TexRegion};
