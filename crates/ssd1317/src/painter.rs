//! Shape, text and image drawing over a [`DrawSurface`].
//!
//! Every call takes signed coordinates and silently skips pixels outside the
//! surface. The `op` bit is interpreted through the current [`DrawMode`]:
//! under [`DrawMode::Normal`] it sets or clears, under [`DrawMode::Xor`] it
//! toggles or force-clears. Closed shapes touch each pixel at most once per
//! call, so an identical second call in XOR mode erases the first.

use crate::framebuffer::DrawSurface;

mod curves;
mod image;
mod text;

#[cfg(test)]
mod tests;

/// Pixel-combination semantics.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DrawMode {
    /// `op` 1 sets a pixel, 0 clears it.
    #[default]
    Normal,
    /// `op` 1 toggles a pixel, 0 clears it.
    Xor,
}

/// Stateful drawing front end over a pixel sink.
pub struct Painter<'a> {
    surface: &'a mut dyn DrawSurface,
    mode: DrawMode,
}

impl<'a> Painter<'a> {
    /// Creates a painter in [`DrawMode::Normal`].
    pub fn new(surface: &'a mut dyn DrawSurface) -> Self {
        Self {
            surface,
            mode: DrawMode::Normal,
        }
    }

    /// Returns the active draw mode.
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Switches the draw mode for subsequent calls.
    pub fn set_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    /// Surface width in pixels.
    pub fn width(&self) -> i32 {
        self.surface.width() as i32
    }

    /// Surface height in pixels.
    pub fn height(&self) -> i32 {
        self.surface.height() as i32
    }

    /// Draws a single pixel; out-of-bounds coordinates are skipped.
    pub fn draw_point(&mut self, x: i32, y: i32, op: bool) {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return;
        }

        let (x, y) = (x as usize, y as usize);
        match self.mode {
            DrawMode::Normal => {
                let _ = self.surface.set_pixel(x, y, op);
            }
            DrawMode::Xor => {
                if op {
                    let _ = self.surface.toggle_pixel(x, y);
                } else {
                    let _ = self.surface.set_pixel(x, y, false);
                }
            }
        }
    }

    /// Horizontal run including both ends; handles swapped arguments.
    fn hline(&mut self, x0: i32, x1: i32, y: i32, op: bool) {
        let (start, end) = if x1 < x0 { (x1, x0) } else { (x0, x1) };
        for x in start..=end {
            self.draw_point(x, y, op);
        }
    }

    /// Vertical run including both ends; handles swapped arguments.
    fn vline(&mut self, x: i32, y0: i32, y1: i32, op: bool) {
        let (start, end) = if y1 < y0 { (y1, y0) } else { (y0, y1) };
        for y in start..=end {
            self.draw_point(x, y, op);
        }
    }

    /// Draws a line segment.
    ///
    /// With `include_endpoints` unset, both end pixels stay untouched so that
    /// adjoining segments compose without double-drawing shared corners.
    pub fn draw_line(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        include_endpoints: bool,
        op: bool,
    ) {
        if y0 == y1 {
            let (mut start, mut end) = if x0 > x1 { (x1, x0) } else { (x0, x1) };
            if !include_endpoints {
                start += 1;
                end -= 1;
            }
            for x in start..=end {
                self.draw_point(x, y0, op);
            }
            return;
        }

        if x0 == x1 {
            let (mut start, mut end) = if y0 > y1 { (y1, y0) } else { (y0, y1) };
            if !include_endpoints {
                start += 1;
                end -= 1;
            }
            for y in start..=end {
                self.draw_point(x0, y, op);
            }
            return;
        }

        // Bresenham over the first octant; the flags undo the reflections.
        let (mut x0, mut y0, mut x1, mut y1) = (x0, y0, x1, y1);
        let mut y_flipped = false;
        let mut xy_swapped = false;

        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }
        if y0 > y1 {
            y0 = -y0;
            y1 = -y1;
            y_flipped = true;
        }
        if y1 - y0 > x1 - x0 {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
            xy_swapped = true;
        }

        let dx = x1 - x0;
        let dy = y1 - y0;
        let incr_e = 2 * dy;
        let incr_ne = 2 * (dy - dx);
        let mut d = 2 * dy - dx;
        let mut x = x0;
        let mut y = y0;

        let mut plot = |p: &mut Self, x: i32, y: i32| match (y_flipped, xy_swapped) {
            (true, true) => p.draw_point(y, -x, op),
            (true, false) => p.draw_point(x, -y, op),
            (false, true) => p.draw_point(y, x, op),
            (false, false) => p.draw_point(x, y, op),
        };

        if include_endpoints {
            plot(self, x, y);
        }

        while x < x1 {
            x += 1;
            if d < 0 {
                d += incr_e;
            } else {
                y += 1;
                d += incr_ne;
            }

            if !include_endpoints && x == x1 {
                break;
            }
            plot(self, x, y);
        }
    }

    /// Draws a rectangle.
    ///
    /// The outline pairs endpoint-inclusive horizontal edges with
    /// endpoint-exclusive vertical edges, touching each corner once.
    pub fn draw_rectangle(&mut self, x: i32, y: i32, width: i32, height: i32, filled: bool, op: bool) {
        if width <= 0 || height <= 0 {
            return;
        }

        if filled {
            for xx in x..x + width {
                for yy in y..y + height {
                    self.draw_point(xx, yy, op);
                }
            }
            return;
        }

        self.draw_line(x, y, x + width - 1, y, true, op);
        self.draw_line(x, y + height - 1, x + width - 1, y + height - 1, true, op);
        self.draw_line(x, y, x, y + height - 1, false, op);
        self.draw_line(x + width - 1, y, x + width - 1, y + height - 1, false, op);
    }

    /// Draws a triangle.
    ///
    /// The outline excludes the shared vertices from two edges and restores
    /// the first vertex separately, touching each vertex once.
    pub fn draw_triangle(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        filled: bool,
        op: bool,
    ) {
        if !filled {
            self.draw_line(x0, y0, x1, y1, false, op);
            self.draw_line(x0, y0, x2, y2, false, op);
            self.draw_line(x1, y1, x2, y2, true, op);
            self.draw_point(x0, y0, op);
            return;
        }

        let vx = [x0, x1, x2];
        let vy = [y0, y1, y2];
        let min_x = x0.min(x1).min(x2);
        let max_x = x0.max(x1).max(x2);
        let min_y = y0.min(y1).min(y2);
        let max_y = y0.max(y1).max(y2);

        for x in min_x..=max_x {
            for y in min_y..=max_y {
                if point_in_polygon(&vx, &vy, x, y) {
                    self.draw_point(x, y, op);
                }
            }
        }
    }
}

/// W. Randolph Franklin's ray-crossing test.
fn point_in_polygon(vx: &[i32], vy: &[i32], test_x: i32, test_y: i32) -> bool {
    let mut inside = false;
    let mut j = vx.len() - 1;
    for i in 0..vx.len() {
        if ((vy[i] > test_y) != (vy[j] > test_y))
            && (test_x < (vx[j] - vx[i]) * (test_y - vy[i]) / (vy[j] - vy[i]) + vx[i])
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}
