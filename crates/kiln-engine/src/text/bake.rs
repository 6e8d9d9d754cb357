use super::font::Font;

pub const TEXT_BITMAP_WIDTH: usize = 512;
pub const TEXT_BITMAP_HEIGHT: usize = 64;
/// Distance from ascent to descent, in pixels.
pub const TEXT_LINE_HEIGHT: f32 = 64.0;

/// Single-channel coverage bitmap, row-major, top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBitmap {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u8>,
}

impl TextBitmap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Writes a `w x h` coverage block with its top-left corner at `(x, y)`.
    ///
    /// Parts outside the bitmap are dropped; overlapping glyph boxes keep the
    /// stronger coverage.
    pub fn blit(&mut self, x: i32, y: i32, w: usize, h: usize, src: &[u8]) {
        for row in 0..h {
            let dy = y + row as i32;
            if dy < 0 || dy as usize >= self.height {
                continue;
            }
            for col in 0..w {
                let dx = x + col as i32;
                if dx < 0 || dx as usize >= self.width {
                    continue;
                }
                let Some(&value) = src.get(row * w + col) else {
                    continue;
                };
                let dst = &mut self.pixels[dy as usize * self.width + dx as usize];
                *dst = (*dst).max(value);
            }
        }
    }

    /// Returns a copy with the row order reversed (bottom row first).
    pub fn flipped(&self) -> Self {
        let mut pixels = Vec::with_capacity(self.pixels.len());
        for row in self.pixels.chunks(self.width.max(1)).rev() {
            pixels.extend_from_slice(row);
        }
        Self {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

/// Rasterizes `word` on one line of a 512x64 bitmap.
///
/// The font is scaled so ascent to descent spans 64 pixels. Each glyph sits
/// on the rounded ascent baseline at the pen position plus its rounded left
/// bearing; the pen advances by the rounded advance plus rounded kerning.
pub fn bake_word(font: &Font, word: &str) -> TextBitmap {
    let mut bitmap = TextBitmap::new(TEXT_BITMAP_WIDTH, TEXT_BITMAP_HEIGHT);
    let px = font.px_for_line_height(TEXT_LINE_HEIGHT);
    let inner = &font.inner;

    let ascent = inner
        .horizontal_line_metrics(px)
        .map(|lm| lm.ascent.round() as i32)
        .unwrap_or(TEXT_BITMAP_HEIGHT as i32);

    let mut pen_x = 0i32;
    let mut chars = word.chars().peekable();

    while let Some(ch) = chars.next() {
        let (metrics, coverage) = inner.rasterize(ch, px);

        let top = metrics.ymin + metrics.height as i32;
        let x = pen_x + metrics.bounds.xmin.round() as i32;
        let y = ascent - top;
        bitmap.blit(x, y, metrics.width, metrics.height, &coverage);

        pen_x += metrics.advance_width.round() as i32;
        if let Some(&next) = chars.peek() {
            let kern = inner.horizontal_kern(ch, next, px).unwrap_or(0.0);
            pen_x += kern.round() as i32;
        }
    }

    bitmap
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── blit ──────────────────────────────────────────────────────────────

    #[test]
    fn blit_inside_bounds() {
        let mut b = TextBitmap::new(4, 3);
        b.blit(1, 1, 2, 1, &[10, 20]);
        assert_eq!(b.pixels[4 + 1], 10);
        assert_eq!(b.pixels[4 + 2], 20);
        assert_eq!(b.pixels.iter().filter(|&&p| p != 0).count(), 2);
    }

    #[test]
    fn blit_clips_negative_origin() {
        let mut b = TextBitmap::new(2, 2);
        b.blit(-1, -1, 2, 2, &[1, 2, 3, 4]);
        assert_eq!(b.pixels, vec![4, 0, 0, 0]);
    }

    #[test]
    fn blit_clips_right_and_bottom_edges() {
        let mut b = TextBitmap::new(2, 2);
        b.blit(1, 1, 3, 3, &[9; 9]);
        assert_eq!(b.pixels, vec![0, 0, 0, 9]);
    }

    #[test]
    fn blit_keeps_max_coverage() {
        let mut b = TextBitmap::new(1, 1);
        b.blit(0, 0, 1, 1, &[200]);
        b.blit(0, 0, 1, 1, &[50]);
        assert_eq!(b.pixels[0], 200);
    }

    #[test]
    fn blit_tolerates_short_source() {
        let mut b = TextBitmap::new(3, 1);
        b.blit(0, 0, 3, 1, &[7]);
        assert_eq!(b.pixels, vec![7, 0, 0]);
    }

    // ── flip ──────────────────────────────────────────────────────────────

    #[test]
    fn flip_reverses_rows() {
        let b = TextBitmap {
            width: 2,
            height: 3,
            pixels: vec![1, 1, 2, 2, 3, 3],
        };
        assert_eq!(b.flipped().pixels, vec![3, 3, 2, 2, 1, 1]);
        assert_eq!(b.flipped().flipped(), b);
    }

    #[test]
    fn default_bitmap_dimensions() {
        let b = TextBitmap::new(TEXT_BITMAP_WIDTH, TEXT_BITMAP_HEIGHT);
        assert_eq!(b.pixels.len(), 512 * 64);
    }
}
