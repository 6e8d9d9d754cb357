//! The engine context.
//!
//! [`Engine`] replaces the implicit "current context / bound object" state of
//! a GL-style API with an explicit value: it owns every resource registry,
//! the GPU device and the window platform, and every operation goes through
//! it. Its impl is split by concern across the files of this module.

mod assets;
mod config;
mod drawing;
mod engine;
mod error;
mod procedural;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
