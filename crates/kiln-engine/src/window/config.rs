use std::path::PathBuf;

use winit::dpi::{LogicalPosition, LogicalSize};
use winit::window::{Icon, Window, WindowAttributes};

use crate::texture;

/// Parameters for a script-created window.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Image file for the window icon. Empty means no icon.
    pub icon_path: PathBuf,
}

impl WindowConfig {
    pub fn new(title: impl Into<String>, width: u32, height: u32, icon_path: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            width,
            height,
            icon_path: icon_path.into(),
        }
    }

    pub fn logical_size(&self) -> LogicalSize<f64> {
        LogicalSize::new(self.width as f64, self.height as f64)
    }

    /// Window attributes without a position; the platform centers the window
    /// once a monitor is known.
    pub(crate) fn attributes(&self) -> WindowAttributes {
        let mut attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(self.logical_size())
            .with_resizable(false);

        if let Some(icon) = self.load_icon() {
            attrs = attrs.with_window_icon(Some(icon));
        }
        attrs
    }

    fn load_icon(&self) -> Option<Icon> {
        if self.icon_path.as_os_str().is_empty() {
            return None;
        }

        let image = match texture::decode_icon(&self.icon_path) {
            Ok(image) => image,
            Err(e) => {
                log::error!("failed to load window icon: {e}");
                return None;
            }
        };

        match Icon::from_rgba(image.rgba, image.width, image.height) {
            Ok(icon) => Some(icon),
            Err(e) => {
                log::error!("invalid window icon {}: {e}", self.icon_path.display());
                None
            }
        }
    }
}

/// Top-left position that centers `window` on a monitor of size `monitor`.
///
/// Windows larger than the monitor are pinned to its top-left corner.
pub fn centered_position(monitor: LogicalSize<f64>, window: LogicalSize<f64>) -> LogicalPosition<f64> {
    LogicalPosition::new(
        ((monitor.width - window.width) / 2.0).max(0.0).floor(),
        ((monitor.height - window.height) / 2.0).max(0.0).floor(),
    )
}
