//! In-memory framebuffer for the SSD1317 panel.

use crate::protocol::{BUFFER_SIZE, HEIGHT, PAGES, WIDTH};

/// Pixel sink the drawing code renders into.
///
/// Implemented by [`FrameBuffer`]; tests substitute in-memory counting sinks.
pub trait DrawSurface {
    /// Surface width in pixels.
    fn width(&self) -> usize;
    /// Surface height in pixels.
    fn height(&self) -> usize;
    /// Sets a pixel state.
    ///
    /// Returns `true` when the pixel is in bounds, `false` otherwise.
    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool;
    /// Toggles a pixel state.
    ///
    /// Returns `true` when the pixel is in bounds, `false` otherwise.
    fn toggle_pixel(&mut self, x: usize, y: usize) -> bool;
    /// Reads a pixel state.
    fn pixel(&self, x: usize, y: usize) -> Option<bool>;
}

/// 1bpp framebuffer for the panel.
///
/// Byte `[page][column]` holds the 8 rows `page*8..page*8+8` of one column;
/// bit 0 is the topmost row of the page.
#[derive(Clone)]
pub struct FrameBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// Creates a new all-dark framebuffer.
    pub const fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// Returns the underlying framebuffer bytes.
    pub fn bytes(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }

    /// Returns mutable framebuffer bytes.
    pub fn bytes_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.bytes
    }

    /// Clears every pixel to dark.
    pub fn clear(&mut self) {
        self.bytes.fill(0x00);
    }

    /// Inverts every pixel.
    pub fn invert(&mut self) {
        for byte in &mut self.bytes {
            *byte ^= 0xFF;
        }
    }

    /// Clears the pixels of a rectangle; parts outside the panel are skipped.
    pub fn clear_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.for_region(x, y, width, height, |byte, mask| *byte &= !mask);
    }

    /// Inverts the pixels of a rectangle; parts outside the panel are skipped.
    pub fn invert_region(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.for_region(x, y, width, height, |byte, mask| *byte ^= mask);
    }

    fn for_region(&mut self, x: i32, y: i32, width: u32, height: u32, apply: impl Fn(&mut u8, u8)) {
        for yy in y..y.saturating_add(height as i32) {
            if !(0..HEIGHT as i32).contains(&yy) {
                continue;
            }
            for xx in x..x.saturating_add(width as i32) {
                if !(0..WIDTH as i32).contains(&xx) {
                    continue;
                }
                let index = (yy as usize / 8) * WIDTH + xx as usize;
                apply(&mut self.bytes[index], 1 << (yy as usize % 8));
            }
        }
    }

    /// Returns the byte row of one page.
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        if page >= PAGES {
            return None;
        }

        let start = page * WIDTH;
        <&[u8; WIDTH]>::try_from(&self.bytes[start..start + WIDTH]).ok()
    }

    /// Returns a byte run inside one page, for partial flushes.
    ///
    /// The run is clamped to the page end; an empty run yields `None`.
    pub fn page_segment(&self, page: usize, column: usize, len: usize) -> Option<&[u8]> {
        if page >= PAGES || column >= WIDTH {
            return None;
        }

        let start = page * WIDTH + column;
        let end = start + len.min(WIDTH - column);
        (start < end).then(|| &self.bytes[start..end])
    }
}

impl DrawSurface for FrameBuffer {
    fn width(&self) -> usize {
        WIDTH
    }

    fn height(&self) -> usize {
        HEIGHT
    }

    fn set_pixel(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        let index = (y / 8) * WIDTH + x;
        let mask = 1u8 << (y % 8);

        if on {
            self.bytes[index] |= mask;
        } else {
            self.bytes[index] &= !mask;
        }

        true
    }

    fn toggle_pixel(&mut self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }

        self.bytes[(y / 8) * WIDTH + x] ^= 1u8 << (y % 8);
        true
    }

    fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        Some(self.bytes[(y / 8) * WIDTH + x] & (1u8 << (y % 8)) != 0)
    }
}
