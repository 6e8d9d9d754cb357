use std::path::Path;

use crate::core::EngineError;
use crate::resource::Resource;

/// A parsed TrueType/OpenType font.
pub struct Font {
    pub(crate) inner: fontdue::Font,
}

impl Font {
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let bytes = std::fs::read(path).map_err(|source| EngineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, path)
    }

    /// Parses raw font bytes. `path` is only used for diagnostics.
    pub fn from_bytes(bytes: &[u8], path: &Path) -> Result<Self, EngineError> {
        let inner = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|reason| EngineError::Font {
                path: path.to_path_buf(),
                reason: reason.to_string(),
            })?;

        Ok(Self { inner })
    }

    /// Pixel size (em) at which ascent minus descent spans `line_height` pixels.
    pub fn px_for_line_height(&self, line_height: f32) -> f32 {
        let Some(lm) = self.inner.horizontal_line_metrics(1.0) else {
            return line_height;
        };
        let span = lm.ascent - lm.descent;
        if span <= 0.0 {
            return line_height;
        }
        line_height / span
    }
}

impl Resource for Font {
    const KIND: &'static str = "font";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_rejected() {
        let result = Font::from_bytes(b"not a font at all", Path::new("junk.ttf"));
        match result {
            Err(EngineError::Font { path, reason }) => {
                assert_eq!(path, Path::new("junk.ttf"));
                assert!(!reason.is_empty());
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("garbage parsed as a font"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Font::load(Path::new("/nonexistent/font.ttf")),
            Err(EngineError::Io { .. })
        ));
    }
}
