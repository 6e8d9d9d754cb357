//! Fonts and single-word text bitmaps.

mod bake;
mod font;

pub use bake::{bake_word, TextBitmap, TEXT_BITMAP_HEIGHT, TEXT_BITMAP_WIDTH, TEXT_LINE_HEIGHT};
pub use font::Font;
