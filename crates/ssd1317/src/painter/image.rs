//! Bitmap blitting.

use super::Painter;

impl Painter<'_> {
    /// Blits a page-packed 1bpp bitmap with its top-left corner at `(x, y)`.
    ///
    /// `data` holds `width` bytes per glyph page, bit 0 on top, pages top to
    /// bottom; missing bytes read as zero. With `mix` unset the destination
    /// rectangle is forced to background first; either way only lit bits are
    /// OR-ed in, through the current draw mode.
    pub fn draw_image(&mut self, x: i32, y: i32, width: i32, height: i32, data: &[u8], mix: bool) {
        if width <= 0 || height <= 0 {
            return;
        }

        if !mix {
            for row in 0..height {
                for col in 0..width {
                    self.draw_point(x + col, y + row, false);
                }
            }
        }

        let pages = (height + 7) / 8;
        for page in 0..pages {
            for col in 0..width {
                let byte = data
                    .get((page * width + col) as usize)
                    .copied()
                    .unwrap_or(0);
                for bit in 0..8u8 {
                    let row = page * 8 + bit as i32;
                    if row >= height {
                        break;
                    }
                    if byte & (1 << bit) != 0 {
                        self.draw_point(x + col, y + row, true);
                    }
                }
            }
        }
    }
}
