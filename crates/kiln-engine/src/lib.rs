//! Kiln engine crate.
//!
//! Owns the platform, GPU and asset pieces that the scripting layer drives:
//! windows, shaders, textures, text bitmaps, quad meshes and noise.
//! Everything is single-threaded and reached through [`core::Engine`].

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod math;
pub mod mesh;
pub mod render;
pub mod resource;
pub mod shader;
pub mod texture;
pub mod text;
pub mod procedural;

pub use crate::core::{Engine, EngineConfig, EngineError};
