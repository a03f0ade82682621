//! Glyph and number rendering.
//!
//! Glyph blits draw only the lit bits, leaving the background untouched, so
//! text composes over existing content and highlights cleanly in XOR mode.
//! Numeric helpers render fixed-width digit fields; the field width is the
//! caller's layout contract, not derived from the value.

use core::fmt::{self, Write as _};

use heapless::String;
use libm::{fabsf, roundf};

use crate::font::{glyph_index, Font, FONT_6X8, FONT_8X16};

use super::Painter;

/// Integer power with saturation; oversized digit counts degrade to zeros
/// instead of wrapping.
fn pow(base: u64, exp: u8) -> u64 {
    let mut value = 1u64;
    for _ in 0..exp {
        value = value.saturating_mul(base);
    }
    value
}

impl Painter<'_> {
    /// Draws one character cell at `(x, y)` (top-left corner).
    pub fn draw_char(&mut self, x: i32, y: i32, ch: char, font: Font) {
        let index = glyph_index(ch);
        match font {
            Font::F6x8 => {
                for (col, bits) in FONT_6X8[index].iter().enumerate() {
                    for row in 0..8u8 {
                        if bits & (1 << row) != 0 {
                            self.draw_point(x + col as i32, y + row as i32, true);
                        }
                    }
                }
            }
            Font::F8x16 => {
                let glyph = &FONT_8X16[index];
                for col in 0..8usize {
                    let top = glyph[col];
                    let bottom = glyph[col + 8];
                    for row in 0..8u8 {
                        if top & (1 << row) != 0 {
                            self.draw_point(x + col as i32, y + row as i32, true);
                        }
                        if bottom & (1 << row) != 0 {
                            self.draw_point(x + col as i32, y + 8 + row as i32, true);
                        }
                    }
                }
            }
        }
    }

    /// Draws a string left-to-right, advancing one cell width per character.
    pub fn draw_str(&mut self, x: i32, y: i32, text: &str, font: Font) {
        let mut pen_x = x;
        for ch in text.chars() {
            self.draw_char(pen_x, y, ch, font);
            pen_x += font.width();
        }
    }

    /// Draws `value` as exactly `digits` decimal digits, zero-padded.
    pub fn draw_uint(&mut self, x: i32, y: i32, value: u32, digits: u8, font: Font) {
        let value = value as u64;
        for i in 0..digits {
            let digit = value / pow(10, digits - 1 - i) % 10;
            self.draw_char(
                x + i as i32 * font.width(),
                y,
                (b'0' + digit as u8) as char,
                font,
            );
        }
    }

    /// Draws a sign character followed by exactly `digits` decimal digits.
    pub fn draw_int(&mut self, x: i32, y: i32, value: i32, digits: u8, font: Font) {
        let magnitude = if value >= 0 {
            self.draw_char(x, y, '+', font);
            value as u64
        } else {
            self.draw_char(x, y, '-', font);
            (value as i64).unsigned_abs()
        };
        for i in 0..digits {
            let digit = magnitude / pow(10, digits - 1 - i) % 10;
            self.draw_char(
                x + (i as i32 + 1) * font.width(),
                y,
                (b'0' + digit as u8) as char,
                font,
            );
        }
    }

    /// Draws `value` as exactly `digits` hexadecimal digits, zero-padded.
    pub fn draw_hex(&mut self, x: i32, y: i32, value: u32, digits: u8, font: Font) {
        let value = value as u64;
        for i in 0..digits {
            let digit = (value / pow(16, digits - 1 - i) % 16) as u8;
            let ch = if digit < 10 {
                (b'0' + digit) as char
            } else {
                (b'A' + digit - 10) as char
            };
            self.draw_char(x + i as i32 * font.width(), y, ch, font);
        }
    }

    /// Draws `value` as exactly `digits` binary digits, zero-padded.
    pub fn draw_bin(&mut self, x: i32, y: i32, value: u32, digits: u8, font: Font) {
        let value = value as u64;
        for i in 0..digits {
            let digit = value / pow(2, digits - 1 - i) % 2;
            self.draw_char(
                x + i as i32 * font.width(),
                y,
                (b'0' + digit as u8) as char,
                font,
            );
        }
    }

    /// Draws a sign, `int_digits` integer digits, a decimal point and
    /// `fra_digits` fractional digits.
    ///
    /// The fractional part is rounded to `fra_digits` places; a round-up past
    /// 1.0 carries into the integer field and leaves the fraction at zero.
    pub fn draw_float(
        &mut self,
        x: i32,
        y: i32,
        value: f32,
        int_digits: u8,
        fra_digits: u8,
        font: Font,
    ) {
        self.draw_char(x, y, if value >= 0.0 { '+' } else { '-' }, font);
        let magnitude = fabsf(value);

        let mut int_part = magnitude as u64;
        let scale = pow(10, fra_digits);
        let fra_part = roundf((magnitude - int_part as f32) * scale as f32) as u64;
        // fra_part == scale after a round-up; its digit field still reads as
        // zeros, so only the carry is added.
        int_part += fra_part / scale;

        self.draw_uint(x + font.width(), y, int_part as u32, int_digits, font);
        self.draw_char(x + (int_digits as i32 + 1) * font.width(), y, '.', font);
        self.draw_uint(
            x + (int_digits as i32 + 2) * font.width(),
            y,
            fra_part as u32,
            fra_digits,
            font,
        );
    }

    /// Formats into a stack buffer and draws the result; output past the
    /// buffer capacity is dropped.
    pub fn draw_fmt(&mut self, x: i32, y: i32, font: Font, args: fmt::Arguments<'_>) {
        let mut buf: String<128> = String::new();
        let _ = buf.write_fmt(args);
        self.draw_str(x, y, buf.as_str(), font);
    }
}
