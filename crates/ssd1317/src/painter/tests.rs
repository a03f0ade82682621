use super::*;

use crate::font::{glyph_index, Font, FONT_8X16};
use crate::framebuffer::{DrawSurface, FrameBuffer};
use crate::protocol::BUFFER_SIZE;

/// Pixel sink that records how often each address is written.
struct TouchCounter {
    width: usize,
    height: usize,
    counts: Vec<u32>,
}

impl TouchCounter {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            counts: vec![0; width * height],
        }
    }

    fn reset(&mut self) {
        self.counts.fill(0);
    }

    fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    fn touched(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    fn count_at(&self, x: i32, y: i32) -> u32 {
        self.counts[y as usize * self.width + x as usize]
    }
}

impl DrawSurface for TouchCounter {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: usize, y: usize, _on: bool) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.counts[y * self.width + x] += 1;
        true
    }

    fn toggle_pixel(&mut self, x: usize, y: usize) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.counts[y * self.width + x] += 1;
        true
    }

    fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.counts[y * self.width + x] % 2 == 1)
    }
}

const SMILE: [u8; 8] = [0x3C, 0x42, 0xA5, 0x81, 0xA5, 0x99, 0x42, 0x3C];

fn rendered(draw: impl FnOnce(&mut Painter<'_>)) -> FrameBuffer {
    let mut fb = FrameBuffer::new();
    let mut painter = Painter::new(&mut fb);
    draw(&mut painter);
    fb
}

fn patterned() -> FrameBuffer {
    let mut fb = FrameBuffer::new();
    for y in 0..fb.height() {
        for x in 0..fb.width() {
            if (x * 31 + y * 17) % 5 < 2 {
                fb.set_pixel(x, y, true);
            }
        }
    }
    fb
}

#[test]
fn fully_out_of_range_draws_leave_the_buffer_unchanged() {
    let mut fb = patterned();
    let before = *fb.bytes();

    let mut painter = Painter::new(&mut fb);
    painter.draw_point(-1, 0, true);
    painter.draw_point(0, 96, true);
    painter.draw_circle(-200, -200, 48, true, true);
    painter.draw_rectangle(96, 96, 50, 50, true, true);
    painter.draw_line(-10, -10, -90, -40, true, true);
    painter.draw_ellipse(300, 5, 20, 10, false, true);
    painter.draw_round_rect(-100, 200, 30, 30, 8, true, true);
    painter.draw_arc(-60, 150, 20, 0, 270, true, true);
    painter.draw_str(200, 50, "off", Font::F6x8);
    painter.draw_image(96, 0, 8, 8, &[0xFF; 8], false);
    drop(painter);

    assert_eq!(*fb.bytes(), before);
}

#[test]
fn xor_circle_touches_each_pixel_at_most_once() {
    let mut counter = TouchCounter::new(160, 160);
    for r in 0..=48 {
        for filled in [false, true] {
            counter.reset();
            let mut painter = Painter::new(&mut counter);
            painter.set_mode(DrawMode::Xor);
            painter.draw_circle(80, 80, r, filled, true);
            drop(painter);
            assert!(counter.max_count() <= 1, "r={r} filled={filled}");
        }
    }
}

#[test]
fn xor_ellipse_touches_each_pixel_at_most_once() {
    let radii = [0, 1, 2, 3, 5, 7, 12, 17, 24, 31, 48];
    let mut counter = TouchCounter::new(160, 160);
    for rx in 0..=48 {
        for &ry in &radii {
            for filled in [false, true] {
                counter.reset();
                let mut painter = Painter::new(&mut counter);
                painter.set_mode(DrawMode::Xor);
                painter.draw_ellipse(80, 80, rx, ry, filled, true);
                drop(painter);
                assert!(counter.max_count() <= 1, "rx={rx} ry={ry} filled={filled}");
            }
        }
    }
}

#[test]
fn xor_arc_touches_each_pixel_at_most_once() {
    let radii = [0, 1, 2, 3, 5, 7, 12, 17, 24, 31, 48];
    let angles = [0, 1, 45, 90, 179, 180, 181, 300, 359, 360];
    let mut counter = TouchCounter::new(160, 160);
    for &r in &radii {
        for &a0 in &angles {
            for &a1 in &angles {
                for filled in [false, true] {
                    counter.reset();
                    let mut painter = Painter::new(&mut counter);
                    painter.set_mode(DrawMode::Xor);
                    painter.draw_arc(80, 80, r, a0, a1, filled, true);
                    drop(painter);
                    assert!(
                        counter.max_count() <= 1,
                        "r={r} a0={a0} a1={a1} filled={filled}"
                    );
                }
            }
        }
    }
}

#[test]
fn xor_round_rect_touches_each_pixel_at_most_once() {
    let mut counter = TouchCounter::new(160, 160);
    for w in 1..=16 {
        for h in 1..=16 {
            for r in [0, 1, 2, 3, 7, 48] {
                for filled in [false, true] {
                    counter.reset();
                    let mut painter = Painter::new(&mut counter);
                    painter.set_mode(DrawMode::Xor);
                    painter.draw_round_rect(40, 40, w, h, r, filled, true);
                    drop(painter);
                    assert!(counter.max_count() <= 1, "w={w} h={h} r={r} filled={filled}");
                }
            }
        }
    }
    for r in 0..=48 {
        for filled in [false, true] {
            counter.reset();
            let mut painter = Painter::new(&mut counter);
            painter.set_mode(DrawMode::Xor);
            painter.draw_round_rect(5, 30, 97, 50, r, filled, true);
            drop(painter);
            assert!(counter.max_count() <= 1, "r={r} filled={filled}");
        }
    }
}

#[test]
fn drawing_a_shape_twice_in_xor_mode_restores_the_buffer() {
    let shapes: &[fn(&mut Painter<'_>)] = &[
        |p| p.draw_circle(48, 40, 20, true, true),
        |p| p.draw_circle(48, 40, 17, false, true),
        |p| p.draw_circle(48, 40, 0, false, true),
        |p| p.draw_ellipse(50, 45, 25, 14, true, true),
        |p| p.draw_ellipse(50, 45, 9, 30, false, true),
        |p| p.draw_arc(47, 44, 22, 45, 310, true, true),
        |p| p.draw_arc(47, 44, 22, 200, 80, false, true),
        |p| p.draw_round_rect(4, 6, 60, 40, 11, true, true),
        |p| p.draw_round_rect(4, 6, 60, 40, 11, false, true),
        |p| p.draw_round_rect(10, 10, 25, 9, 0, false, true),
        |p| p.draw_line(3, 90, 88, 7, true, true),
        |p| p.draw_triangle(5, 5, 30, 12, 12, 40, true, true),
        |p| p.draw_triangle(5, 5, 30, 12, 12, 40, false, true),
        |p| p.draw_char(30, 50, 'A', Font::F6x8),
        |p| p.draw_image(60, 60, 8, 8, &SMILE, true),
    ];

    for (i, shape) in shapes.iter().enumerate() {
        let mut fb = patterned();
        let before = *fb.bytes();
        let mut painter = Painter::new(&mut fb);
        painter.set_mode(DrawMode::Xor);
        shape(&mut painter);
        shape(&mut painter);
        drop(painter);
        assert_eq!(*fb.bytes(), before, "shape {i}");
    }
}

#[test]
fn adjoining_arcs_partition_their_union() {
    let triples = [
        (30, 140, 260),
        (0, 90, 180),
        (300, 20, 100),
        (10, 200, 350),
        (0, 90, 360),
    ];
    let mut counter = TouchCounter::new(160, 160);

    for &(a, b, c) in &triples {
        for filled in [false, true] {
            counter.reset();
            let mut painter = Painter::new(&mut counter);
            painter.set_mode(DrawMode::Xor);
            painter.draw_arc(80, 80, 30, a, b, filled, true);
            painter.draw_arc(80, 80, 30, b, c, filled, true);
            drop(painter);
            assert!(counter.max_count() <= 1, "a={a} b={b} c={c} filled={filled}");

            let mut halves = FrameBuffer::new();
            let mut painter = Painter::new(&mut halves);
            painter.set_mode(DrawMode::Xor);
            painter.draw_arc(40, 40, 30, a, b, filled, true);
            painter.draw_arc(40, 40, 30, b, c, filled, true);
            drop(painter);

            let mut whole = FrameBuffer::new();
            let mut painter = Painter::new(&mut whole);
            painter.set_mode(DrawMode::Xor);
            painter.draw_arc(40, 40, 30, a, c, filled, true);
            drop(painter);

            assert_eq!(
                halves.bytes(),
                whole.bytes(),
                "a={a} b={b} c={c} filled={filled}"
            );
        }
    }
}

#[test]
fn exclusive_line_endpoints_compose_without_overlap() {
    let mut counter = TouchCounter::new(64, 64);
    let mut painter = Painter::new(&mut counter);
    painter.set_mode(DrawMode::Xor);
    painter.draw_rectangle(3, 5, 20, 11, false, true);
    drop(painter);

    assert_eq!(counter.max_count(), 1);
    assert_eq!(counter.touched(), 2 * 20 + 2 * (11 - 2));
}

#[test]
fn triangle_outline_touches_each_vertex_once() {
    let mut counter = TouchCounter::new(64, 64);
    let mut painter = Painter::new(&mut counter);
    painter.set_mode(DrawMode::Xor);
    painter.draw_triangle(5, 5, 30, 12, 12, 40, false, true);
    drop(painter);

    assert_eq!(counter.max_count(), 1);
    assert_eq!(counter.count_at(5, 5), 1);
    assert_eq!(counter.count_at(30, 12), 1);
    assert_eq!(counter.count_at(12, 40), 1);
}

#[test]
fn filled_triangle_follows_the_crossing_test() {
    let fb = rendered(|p| p.draw_triangle(0, 0, 4, 0, 0, 4, true, true));
    assert_eq!(fb.pixel(0, 0), Some(true));
    assert_eq!(fb.pixel(1, 1), Some(true));
    // the crossing test leaves the trailing vertex and the far side out
    assert_eq!(fb.pixel(4, 0), Some(false));
    assert_eq!(fb.pixel(3, 3), Some(false));
}

#[test]
fn xor_with_zero_operation_clears_instead_of_toggling() {
    let mut fb = FrameBuffer::new();
    let mut painter = Painter::new(&mut fb);
    painter.draw_rectangle(10, 10, 20, 15, true, true);
    painter.set_mode(DrawMode::Xor);
    painter.draw_rectangle(10, 10, 20, 15, true, false);
    painter.draw_rectangle(10, 10, 20, 15, true, false);
    drop(painter);
    assert_eq!(*fb.bytes(), [0u8; BUFFER_SIZE]);
}

#[test]
fn zero_radius_round_rect_outline_matches_the_rectangle_outline() {
    let a = rendered(|p| p.draw_round_rect(5, 9, 30, 14, 0, false, true));
    let b = rendered(|p| p.draw_rectangle(5, 9, 30, 14, false, true));
    assert_eq!(a.bytes(), b.bytes());
}

#[test]
fn glyph_blit_sets_only_lit_bits() {
    let mut fb = FrameBuffer::new();
    fb.set_pixel(0, 0, true);
    let mut painter = Painter::new(&mut fb);
    painter.draw_char(0, 0, '0', Font::F6x8);
    drop(painter);

    // column 0 of the 6x8 cell is blank and must not clear the background
    assert_eq!(fb.pixel(0, 0), Some(true));
    assert_eq!(fb.pixel(1, 1), Some(true));
    assert_eq!(fb.pixel(1, 0), Some(false));
    assert_eq!(fb.pixel(2, 4), Some(true));
}

#[test]
fn tall_font_blit_matches_its_table_columns() {
    let mut fb = FrameBuffer::new();
    let mut painter = Painter::new(&mut fb);
    painter.draw_char(10, 16, 'A', Font::F8x16);
    drop(painter);

    let glyph = &FONT_8X16[glyph_index('A')];
    for col in 0..8 {
        for row in 0..8 {
            assert_eq!(
                fb.pixel(10 + col, 16 + row),
                Some(glyph[col] & (1 << row) != 0)
            );
            assert_eq!(
                fb.pixel(10 + col, 24 + row),
                Some(glyph[col + 8] & (1 << row) != 0)
            );
        }
    }
}

#[test]
fn fixed_width_number_fields_render_as_digit_strings() {
    let a = rendered(|p| p.draw_uint(0, 0, 42, 3, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 0, "042", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());

    let a = rendered(|p| p.draw_int(0, 0, -7, 2, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 0, "-07", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());

    let a = rendered(|p| p.draw_int(0, 8, 35, 2, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 8, "+35", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());

    let a = rendered(|p| p.draw_hex(0, 0, 0x2A5F, 4, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 0, "2A5F", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());

    let a = rendered(|p| p.draw_bin(0, 0, 0b0101, 4, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 0, "0101", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());
}

#[test]
fn float_rendering_rounds_and_carries_into_the_integer_field() {
    let a = rendered(|p| p.draw_float(0, 0, 3.14159, 1, 4, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 0, "+3.1416", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());

    let a = rendered(|p| p.draw_float(0, 8, -2.5, 2, 1, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 8, "-02.5", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());

    let a = rendered(|p| p.draw_float(0, 16, 0.9999, 1, 3, Font::F6x8));
    let b = rendered(|p| p.draw_str(0, 16, "+1.000", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());
}

#[test]
fn formatted_draw_matches_the_plain_string() {
    let a = rendered(|p| p.draw_fmt(0, 0, Font::F6x8, format_args!("{:>3}", 42)));
    let b = rendered(|p| p.draw_str(0, 0, " 42", Font::F6x8));
    assert_eq!(a.bytes(), b.bytes());
}

#[test]
fn image_blit_honors_the_mix_flag() {
    let mut fb = FrameBuffer::new();
    fb.set_pixel(2, 1, true);

    let mut painter = Painter::new(&mut fb);
    painter.draw_image(0, 0, 8, 8, &SMILE, true);
    drop(painter);
    assert_eq!(fb.pixel(2, 1), Some(true));
    assert_eq!(fb.pixel(2, 0), Some(true));

    let mut painter = Painter::new(&mut fb);
    painter.draw_image(0, 0, 8, 8, &SMILE, false);
    drop(painter);
    assert_eq!(fb.pixel(2, 1), Some(false));
    assert_eq!(fb.pixel(2, 0), Some(true));
}

#[test]
fn short_image_data_reads_as_blank_columns() {
    let mut fb = FrameBuffer::new();
    let mut painter = Painter::new(&mut fb);
    painter.draw_image(0, 0, 16, 8, &[0xFF; 4], false);
    drop(painter);
    assert_eq!(fb.pixel(3, 0), Some(true));
    assert_eq!(fb.pixel(5, 0), Some(false));
}
