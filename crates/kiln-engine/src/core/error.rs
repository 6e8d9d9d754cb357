use std::path::PathBuf;

use thiserror::Error;

use crate::resource::StaleHandle;
use crate::shader::ShaderStage;

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to create the event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("window platform error: {0}")]
    Platform(String),

    #[error("no GPU device; create a window first")]
    NoDevice,

    #[error("GPU initialization failed: {0}")]
    Gpu(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to parse font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    #[error("failed to compile {stage} shader {}:\n{log}", path.display())]
    ShaderCompile {
        stage: ShaderStage,
        path: PathBuf,
        log: String,
    },

    #[error("failed to link shader program: {0}")]
    ShaderLink(String),

    #[error("{} is {width}x{height}, the device allows at most {max}x{max}", path.display())]
    TextureTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
        max: u32,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    StaleHandle(#[from] StaleHandle),
}

impl EngineError {
    pub(crate) fn gpu(err: anyhow::Error) -> Self {
        EngineError::Gpu(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let err = EngineError::Io {
            path: PathBuf::from("assets/missing.wgsl"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let msg = err.to_string();
        assert!(msg.contains("assets/missing.wgsl"), "{msg}");
        assert!(msg.contains("not found"), "{msg}");
    }

    #[test]
    fn shader_error_carries_stage_and_log() {
        let err = EngineError::ShaderCompile {
            stage: ShaderStage::Fragment,
            path: PathBuf::from("x.wgsl"),
            log: "expected `;`".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to compile fragment shader x.wgsl"), "{msg}");
        assert!(msg.ends_with("expected `;`"), "{msg}");
    }

    #[test]
    fn gpu_error_flattens_context_chain() {
        let err = EngineError::gpu(anyhow::anyhow!("no adapter").context("failed to init"));
        assert_eq!(err.to_string(), "GPU initialization failed: failed to init: no adapter");
    }
}
