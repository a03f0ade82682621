//! Circles, ellipses, arcs and rounded rectangles.
//!
//! Outlines come from midpoint traces with symmetry expansion; the expansion
//! skips mirror points that coincide on an axis, so one call never emits the
//! same pixel twice. Filled XOR variants pair a scanline interior pass with a
//! boundary pass restricted to pixels the scanline rounding left out.

use libm::{cosf, fabsf, sinf, sqrtf};

use super::{DrawMode, Painter};

const RAD_PER_DEG: f32 = 0.017_453_292_519_943_295;
const ANGLE_EPS: f32 = 1e-6;

/// Half-width of the filled-circle scanline `dy_abs` rows from the center.
pub(super) fn circle_scan_dx(r: i32, dy_abs: i32) -> i32 {
    let t = r * r - dy_abs * dy_abs;
    if t <= 0 {
        0
    } else {
        (sqrtf(t as f32) + 0.5) as i32
    }
}

/// Half-width of the filled-ellipse scanline `dy_abs` rows from the center.
pub(super) fn ellipse_scan_dx(rx: i32, ry: i32, dy_abs: i32) -> i32 {
    if ry == 0 {
        return 0;
    }
    let ratio = (dy_abs * dy_abs) as f32 / (ry * ry) as f32;
    if ratio >= 1.0 {
        0
    } else {
        (rx as f32 * sqrtf(1.0 - ratio) + 0.5) as i32
    }
}

/// Unit direction for a degree angle, exact on the four axis angles.
fn angle_to_unit(deg: i32) -> (f32, f32) {
    let mut a = deg % 360;
    if a < 0 {
        a += 360;
    }
    match a {
        0 => (1.0, 0.0),
        90 => (0.0, 1.0),
        180 => (-1.0, 0.0),
        270 => (0.0, -1.0),
        _ => {
            let rad = a as f32 * RAD_PER_DEG;
            (cosf(rad), sinf(rad))
        }
    }
}

/// Angular span between a start and an end direction, counter-clockwise.
///
/// Membership includes the start ray and excludes the end ray, so two wedges
/// sharing a boundary angle never claim the same pixel. A zero sweep stands
/// for the full circle.
#[derive(Clone, Copy)]
struct Wedge {
    start: (f32, f32),
    end: (f32, f32),
    sweep: i32,
}

impl Wedge {
    fn new(start_deg: i32, end_deg: i32) -> Self {
        let mut a0 = start_deg % 360;
        if a0 < 0 {
            a0 += 360;
        }
        let mut a1 = end_deg % 360;
        if a1 < 0 {
            a1 += 360;
        }
        let mut sweep = a1 - a0;
        if sweep < 0 {
            sweep += 360;
        }
        Self {
            start: angle_to_unit(a0),
            end: angle_to_unit(a1),
            sweep,
        }
    }

    fn contains(self, dx: i32, dy: i32) -> bool {
        if self.sweep == 0 {
            return true;
        }

        // Screen y grows downward; flip into mathematical orientation.
        let px = dx as f32;
        let py = -(dy as f32);
        let (sx, sy) = self.start;
        let (ex, ey) = self.end;

        let cross_start = sx * py - sy * px;
        let cross_end = px * ey - py * ex;

        if fabsf(cross_start) <= ANGLE_EPS && sx * px + sy * py >= -ANGLE_EPS {
            return true;
        }
        if fabsf(cross_end) <= ANGLE_EPS && ex * px + ey * py >= -ANGLE_EPS {
            return false;
        }

        if self.sweep <= 180 {
            cross_start > ANGLE_EPS && cross_end > ANGLE_EPS
        } else {
            !(cross_start < -ANGLE_EPS && cross_end < -ANGLE_EPS)
        }
    }
}

impl Painter<'_> {
    /// Walks the midpoint circle trace, visiting one octant point per step.
    fn circle_trace(&mut self, r: i32, mut visit: impl FnMut(&mut Self, i32, i32)) {
        let mut x = 0;
        let mut y = r;
        let mut d = 1 - r;
        while x <= y {
            visit(self, x, y);
            if d < 0 {
                d += 2 * x + 3;
            } else {
                d += 2 * (x - y) + 5;
                y -= 1;
            }
            x += 1;
        }
    }

    /// Walks the midpoint ellipse trace, visiting one quadrant point per step.
    fn ellipse_trace(&mut self, rx: i32, ry: i32, mut visit: impl FnMut(&mut Self, i32, i32)) {
        let a2 = (rx as i64) * (rx as i64);
        let b2 = (ry as i64) * (ry as i64);
        let mut x: i32 = 0;
        let mut y: i32 = ry;
        let mut dx: i64 = 0;
        let mut dy: i64 = 2 * a2 * y as i64;
        let mut d1: i64 = b2 - a2 * ry as i64 + a2 / 4;

        while dx < dy {
            visit(self, x, y);
            if d1 < 0 {
                x += 1;
                dx += 2 * b2;
                d1 += dx + b2;
            } else {
                x += 1;
                y -= 1;
                dx += 2 * b2;
                dy -= 2 * a2;
                d1 += dx - dy + b2;
            }
        }

        let fx = x as f32 + 0.5;
        let fy = (y - 1) as f32;
        let mut d2 = (b2 as f32 * fx * fx + a2 as f32 * fy * fy - (a2 * b2) as f32) as i64;
        while y >= 0 {
            visit(self, x, y);
            if d2 > 0 {
                y -= 1;
                dy -= 2 * a2;
                d2 += a2 - dy;
            } else {
                y -= 1;
                x += 1;
                dx += 2 * b2;
                dy -= 2 * a2;
                d2 += dx - dy + a2;
            }
        }
    }

    /// Emits the eight octant mirrors of `(x, y)`, skipping coincident ones.
    fn plot_octants(&mut self, cx: i32, cy: i32, x: i32, y: i32, op: bool) {
        self.draw_point(cx + x, cy + y, op);
        if x != 0 {
            self.draw_point(cx - x, cy + y, op);
        }
        if y != 0 {
            self.draw_point(cx + x, cy - y, op);
        }
        if x != 0 && y != 0 {
            self.draw_point(cx - x, cy - y, op);
        }
        if x != y {
            self.draw_point(cx + y, cy + x, op);
            if y != 0 {
                self.draw_point(cx - y, cy + x, op);
            }
            if x != 0 {
                self.draw_point(cx + y, cy - x, op);
            }
            if x != 0 && y != 0 {
                self.draw_point(cx - y, cy - x, op);
            }
        }
    }

    /// Emits the four quadrant mirrors of `(x, y)`, skipping coincident ones.
    fn plot_quadrants(&mut self, cx: i32, cy: i32, x: i32, y: i32, op: bool) {
        self.draw_point(cx + x, cy + y, op);
        if x != 0 {
            self.draw_point(cx - x, cy + y, op);
        }
        if y != 0 {
            self.draw_point(cx + x, cy - y, op);
        }
        if x != 0 && y != 0 {
            self.draw_point(cx - x, cy - y, op);
        }
    }

    /// Like [`Self::plot_quadrants`], but only when the point falls outside
    /// the scanline extent for its row.
    fn plot_boundary_quadrants(&mut self, cx: i32, cy: i32, bx: i32, by: i32, scan_dx: i32, op: bool) {
        if bx.abs() <= scan_dx {
            return;
        }
        self.plot_quadrants(cx, cy, bx, by, op);
    }

    /// Emits the octant mirrors of `(x, y)` that lie inside `wedge`, skipping
    /// coincident candidates.
    fn plot_arc_octants(&mut self, cx: i32, cy: i32, x: i32, y: i32, wedge: Wedge, op: bool) {
        let ox = [x, -x, x, -x, y, -y, y, -y];
        let oy = [y, y, -y, -y, x, x, -x, -x];
        for i in 0..8 {
            let mut duplicate = false;
            for j in 0..i {
                if ox[j] == ox[i] && oy[j] == oy[i] {
                    duplicate = true;
                    break;
                }
            }
            if duplicate || !wedge.contains(ox[i], oy[i]) {
                continue;
            }
            self.draw_point(cx + ox[i], cy + oy[i], op);
        }
    }

    /// Arc counterpart of [`Self::plot_boundary_quadrants`]: octant mirrors
    /// inside `wedge` that the scanline extent for their row missed.
    fn plot_arc_boundary(&mut self, cx: i32, cy: i32, x: i32, y: i32, r: i32, wedge: Wedge, op: bool) {
        let ox = [x, -x, x, -x, y, -y, y, -y];
        let oy = [y, y, -y, -y, x, x, -x, -x];
        for i in 0..8 {
            let mut duplicate = false;
            for j in 0..i {
                if ox[j] == ox[i] && oy[j] == oy[i] {
                    duplicate = true;
                    break;
                }
            }
            if duplicate || !wedge.contains(ox[i], oy[i]) {
                continue;
            }
            if ox[i].abs() <= circle_scan_dx(r, oy[i].abs()) {
                continue;
            }
            self.draw_point(cx + ox[i], cy + oy[i], op);
        }
    }

    /// Draws a circle of radius `r` around `(cx, cy)`.
    pub fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, filled: bool, op: bool) {
        if r < 0 {
            return;
        }
        if r == 0 {
            self.draw_point(cx, cy, op);
            return;
        }

        if filled && self.mode == DrawMode::Xor {
            for dy in -r..=r {
                let dx = circle_scan_dx(r, dy.abs());
                for step in -dx..=dx {
                    self.draw_point(cx + step, cy + dy, op);
                }
            }
            self.circle_trace(r, |p, x, y| {
                p.plot_boundary_quadrants(cx, cy, x, y, circle_scan_dx(r, y), op);
                if x != y {
                    p.plot_boundary_quadrants(cx, cy, y, x, circle_scan_dx(r, x), op);
                }
            });
            return;
        }

        if filled {
            self.circle_trace(r, |p, x, y| {
                p.hline(cx - x, cx + x, cy + y, op);
                p.hline(cx - x, cx + x, cy - y, op);
                p.hline(cx - y, cx + y, cy + x, op);
                p.hline(cx - y, cx + y, cy - x, op);
            });
        } else {
            self.circle_trace(r, |p, x, y| p.plot_octants(cx, cy, x, y, op));
        }
    }

    /// Draws an axis-aligned ellipse with semi-axes `rx` and `ry`.
    pub fn draw_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, filled: bool, op: bool) {
        if rx < 0 || ry < 0 {
            return;
        }
        if rx == 0 && ry == 0 {
            self.draw_point(cx, cy, op);
            return;
        }
        if rx == 0 {
            if filled {
                self.vline(cx, cy - ry, cy + ry, op);
            } else {
                self.draw_point(cx, cy - ry, op);
                self.draw_point(cx, cy + ry, op);
            }
            return;
        }
        if ry == 0 {
            if filled {
                self.hline(cx - rx, cx + rx, cy, op);
            } else {
                self.draw_point(cx - rx, cy, op);
                self.draw_point(cx + rx, cy, op);
            }
            return;
        }

        if filled && self.mode == DrawMode::Xor {
            for dy in -ry..=ry {
                let dx = ellipse_scan_dx(rx, ry, dy.abs());
                for step in -dx..=dx {
                    self.draw_point(cx + step, cy + dy, op);
                }
            }
            self.ellipse_trace(rx, ry, |p, x, y| {
                p.plot_boundary_quadrants(cx, cy, x, y, ellipse_scan_dx(rx, ry, y), op);
            });
            return;
        }

        if filled {
            self.ellipse_trace(rx, ry, |p, x, y| {
                p.hline(cx - x, cx + x, cy + y, op);
                p.hline(cx - x, cx + x, cy - y, op);
            });
        } else {
            self.ellipse_trace(rx, ry, |p, x, y| p.plot_quadrants(cx, cy, x, y, op));
        }
    }

    /// Draws a circular arc (outline) or pie slice (filled) between two
    /// angles in degrees.
    ///
    /// Zero degrees points along +X and angles grow counter-clockwise on
    /// screen. The span includes the start angle and excludes the end angle;
    /// equal angles select the full circle.
    pub fn draw_arc(
        &mut self,
        cx: i32,
        cy: i32,
        r: i32,
        start_deg: i32,
        end_deg: i32,
        filled: bool,
        op: bool,
    ) {
        if r < 0 {
            return;
        }
        if r == 0 {
            if filled {
                self.draw_point(cx, cy, op);
            }
            return;
        }

        let wedge = Wedge::new(start_deg, end_deg);

        if !filled {
            self.circle_trace(r, |p, x, y| p.plot_arc_octants(cx, cy, x, y, wedge, op));
            return;
        }

        for dy in -r..=r {
            let dx = circle_scan_dx(r, dy.abs());
            for step in -dx..=dx {
                if wedge.contains(step, dy) {
                    self.draw_point(cx + step, cy + dy, op);
                }
            }
        }

        if self.mode == DrawMode::Xor {
            self.circle_trace(r, |p, x, y| p.plot_arc_boundary(cx, cy, x, y, r, wedge, op));
        }
    }

    /// Draws a rectangle with circularly rounded corners.
    ///
    /// The outline decomposes into four quarter arcs plus four edges trimmed
    /// off the pixels the adjacent arcs own, keeping every outline pixel
    /// single-touch under XOR.
    pub fn draw_round_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        radius: i32,
        filled: bool,
        op: bool,
    ) {
        if width <= 0 || height <= 0 {
            return;
        }
        let mut r = radius.max(0);
        let limit = width.min(height) / 2;
        if r > limit {
            r = limit;
        }

        if r == 0 {
            if filled {
                for yy in y..y + height {
                    self.hline(x, x + width - 1, yy, op);
                }
            } else {
                self.draw_rectangle(x, y, width, height, false, op);
            }
            return;
        }

        let left_cx = x + r;
        let right_cx = x + width - r - 1;
        let top_cy = y + r;
        let bottom_cy = y + height - r - 1;

        if filled {
            for yy in y..y + height {
                let mut x_min = x;
                let mut x_max = x + width - 1;
                if yy < top_cy {
                    let dx = circle_scan_dx(r, top_cy - yy);
                    x_min = left_cx - dx;
                    x_max = right_cx + dx;
                } else if yy > bottom_cy {
                    let dx = circle_scan_dx(r, yy - bottom_cy);
                    x_min = left_cx - dx;
                    x_max = right_cx + dx;
                }
                x_min = x_min.max(x);
                x_max = x_max.min(x + width - 1);
                if x_min <= x_max {
                    self.hline(x_min, x_max, yy, op);
                }
            }
            return;
        }

        self.draw_arc(right_cx, top_cy, r, 0, 90, false, op);
        self.draw_arc(left_cx, top_cy, r, 90, 180, false, op);
        self.draw_arc(left_cx, bottom_cy, r, 180, 270, false, op);
        self.draw_arc(right_cx, bottom_cy, r, 270, 360, false, op);

        if x + r + 1 <= x + width - r - 1 {
            self.hline(x + r + 1, x + width - r - 1, y, op);
        }
        if x + r <= x + width - r - 2 {
            self.hline(x + r, x + width - r - 2, y + height - 1, op);
        }
        if y + r <= y + height - r - 2 {
            self.vline(x, y + r, y + height - r - 2, op);
        }
        if y + r + 1 <= y + height - r - 1 {
            self.vline(x + width - 1, y + r + 1, y + height - r - 1, op);
        }
    }
}
