use std::path::Path;

use crate::core::EngineError;

/// CPU-side RGBA8 pixels.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count of the source file, before expansion to RGBA.
    pub channels: u8,
    pub rgba: Vec<u8>,
}

/// Decodes an image for texturing. Rows are flipped so the first row is the
/// bottom of the picture, matching `v = 0` at the quad's bottom edge.
pub fn decode_file(path: &Path) -> Result<DecodedImage, EngineError> {
    decode(path, true)
}

/// Decodes an image for a window icon (top row first).
pub fn decode_icon(path: &Path) -> Result<DecodedImage, EngineError> {
    decode(path, false)
}

fn decode(path: &Path, flip: bool) -> Result<DecodedImage, EngineError> {
    let image = image::open(path).map_err(|source| EngineError::Image {
        path: path.to_path_buf(),
        source,
    })?;

    let channels = image.color().channel_count();
    let image = if flip { image.flipv() } else { image };
    let rgba = image.to_rgba8();

    Ok(DecodedImage {
        width: rgba.width(),
        height: rgba.height(),
        channels,
        rgba: rgba.into_raw(),
    })
}
