//! Small vector and viewport types shared by the transform and renderer code.
//!
//! World space follows the orthographic projection used for every draw:
//! +X right, +Y up, the window spans `[-aspect, aspect] x [-1, 1]`.

mod vec;
mod viewport;

pub use vec::{Vec2, Vec3, Vec4};
pub use viewport::Viewport;
