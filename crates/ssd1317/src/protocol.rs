//! Command-level protocol helpers for the SSD1317 controller.

/// Panel width in pixels.
pub const WIDTH: usize = 96;
/// Panel height in pixels.
pub const HEIGHT: usize = 96;
/// Number of 8-row pages.
pub const PAGES: usize = HEIGHT / 8;
/// Total framebuffer size in bytes.
pub const BUFFER_SIZE: usize = PAGES * WIDTH;

/// First GDDRAM column wired to a visible pixel.
///
/// The 96 visible columns occupy GDDRAM columns 16..=111.
pub const COLUMN_OFFSET: usize = 16;
/// Highest addressable GDDRAM column.
pub const COLUMN_MAX: usize = 127;

/// Display off (sleep).
pub const CMD_DISPLAY_OFF: u8 = 0xAE;
/// Display on.
pub const CMD_DISPLAY_ON: u8 = 0xAF;
/// Non-inverted video.
pub const CMD_NORMAL_VIDEO: u8 = 0xA6;
/// Inverted video.
pub const CMD_INVERSE_VIDEO: u8 = 0xA7;
/// Contrast control, followed by one level byte.
pub const CMD_CONTRAST: u8 = 0x81;

const CMD_PAGE_ADDRESS: u8 = 0xB0;
const CMD_COLUMN_HIGH: u8 = 0x10;
const CMD_COLUMN_LOW: u8 = 0x00;

/// Power-on initialization sequence, streamed as consecutive command bytes.
///
/// Display clock 0xE1, multiplex ratio 95, zero display offset and start
/// line, segment remap + reversed COM scan, COM pins 0x12, contrast 0x40,
/// precharge 0xF1, VCOMH 0x30, RAM-follow, non-inverted, charge pump on.
/// The display itself stays off; the driver clears RAM and sends
/// [`CMD_DISPLAY_ON`] afterwards.
pub const INIT_SEQUENCE: &[u8] = &[
    CMD_DISPLAY_OFF,
    0xD5, 0xE1,
    0xA8, 0x5F,
    0xD3, 0x00,
    0x40,
    0xA1,
    0xC0,
    0xDA, 0x12,
    CMD_CONTRAST, 0x40,
    0xD9, 0xF1,
    0xDB, 0x30,
    0xA4,
    CMD_NORMAL_VIDEO,
    0x8D, 0x14,
];

/// Builds the three-byte cursor command for a page and visible column.
///
/// The column offset is applied here; columns past the GDDRAM end clamp to
/// [`COLUMN_MAX`]. Returns `None` for an invalid page.
#[inline]
pub fn encode_set_cursor(page: usize, column: usize) -> Option<[u8; 3]> {
    if page >= PAGES {
        return None;
    }

    let column = (column + COLUMN_OFFSET).min(COLUMN_MAX);
    Some([
        CMD_PAGE_ADDRESS | (page as u8 & 0x0F),
        CMD_COLUMN_HIGH | ((column >> 4) as u8 & 0x0F),
        CMD_COLUMN_LOW | (column as u8 & 0x0F),
    ])
}

/// Builds the contrast command pair.
#[inline]
pub fn encode_contrast(level: u8) -> [u8; 2] {
    [CMD_CONTRAST, level]
}

/// Page span touched by the pixel rows `y..y + height`, before clamping.
///
/// The start may be negative and the end may exceed [`PAGES`]; callers clamp
/// to the panel. Rows starting above the panel shift the whole span up one
/// page.
#[inline]
pub fn page_span(y: i32, height: i32) -> (i32, i32) {
    let mut first = y / 8;
    let mut last = (y + height - 1) / 8 + 1;
    if y < 0 {
        first -= 1;
        last -= 1;
    }
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_encoding_applies_column_offset() {
        assert_eq!(encode_set_cursor(0, 0), Some([0xB0, 0x11, 0x00]));
        assert_eq!(encode_set_cursor(11, 95), Some([0xBB, 0x16, 0x0F]));
        assert_eq!(encode_set_cursor(3, 16), Some([0xB3, 0x12, 0x00]));
    }

    #[test]
    fn cursor_column_clamps_to_gddram_end() {
        assert_eq!(encode_set_cursor(0, 200), Some([0xB0, 0x17, 0x0F]));
    }

    #[test]
    fn invalid_page_is_rejected() {
        assert_eq!(encode_set_cursor(PAGES, 0), None);
    }

    #[test]
    fn init_sequence_matches_datasheet_values() {
        assert_eq!(INIT_SEQUENCE[0], CMD_DISPLAY_OFF);
        // Multiplex ratio must cover all 96 rows.
        let mux = INIT_SEQUENCE
            .windows(2)
            .find(|w| w[0] == 0xA8)
            .map(|w| w[1]);
        assert_eq!(mux, Some(95));
        // Charge pump enable is the final step before display-on.
        assert_eq!(&INIT_SEQUENCE[INIT_SEQUENCE.len() - 2..], &[0x8D, 0x14]);
        assert!(!INIT_SEQUENCE.contains(&CMD_DISPLAY_ON));
    }

    #[test]
    fn page_span_covers_requested_rows() {
        assert_eq!(page_span(0, 8), (0, 1));
        assert_eq!(page_span(0, 96), (0, 12));
        assert_eq!(page_span(5, 10), (0, 2));
        assert_eq!(page_span(88, 8), (11, 12));
    }

    #[test]
    fn page_span_shifts_up_for_negative_rows() {
        assert_eq!(page_span(-3, 2), (-1, 0));
        assert_eq!(page_span(-3, 12), (-1, 1));
    }
}
