//! Auto-hiding list scroll indicator.
//!
//! Thumb geometry is smoothed in 8.8 fixed point so the bar eases
//! toward each new target instead of jumping. Interaction arms a show
//! timer; once it decays the thumb collapses against the top of the
//! track and the gutter goes dark until the next scroll.

use ssd1317::{DrawMode, Painter};

use crate::ui::{ITEM_HEIGHT, ITEM_LINES};

/// Tuning knobs for the scroll indicator.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScrollBarConfig {
    /// Gutter width in pixels.
    pub width: i32,
    /// How long the track stays visible after an interaction.
    pub show_ms: u16,
    /// Easing strength (out of 16) while the bar is active.
    pub smooth_active: u8,
    /// Easing strength (out of 16) while the bar is collapsing.
    pub smooth_idle: u8,
    /// Minimum thumb height is `ITEM_HEIGHT / min_thumb_divisor`.
    pub min_thumb_divisor: i32,
}

impl Default for ScrollBarConfig {
    fn default() -> Self {
        Self {
            width: crate::ui::SCROLL_BAR_WIDTH,
            show_ms: 700,
            smooth_active: 2,
            smooth_idle: 2,
            min_thumb_divisor: 1,
        }
    }
}

/// Scroll indicator state for one list viewport.
#[derive(Clone, Copy, Debug)]
pub struct ScrollBar {
    config: ScrollBarConfig,
    y_fp: i32,
    h_fp: i32,
    w_fp: i32,
    visible_ms: u16,
    prev_visible_ms: u16,
    last_top: u16,
    last_selected: u8,
}

impl ScrollBar {
    pub const fn new(config: ScrollBarConfig) -> Self {
        Self {
            config,
            y_fp: 0,
            h_fp: 0,
            w_fp: 0,
            visible_ms: 0,
            prev_visible_ms: 0,
            last_top: u16::MAX,
            last_selected: 0,
        }
    }

    /// Advances the smoothing and draws the indicator for this tick.
    ///
    /// `top_index` is the id of the topmost visible row, `selected` the
    /// cursor row. `force_show` rearms the show timer without a scroll.
    pub fn tick(
        &mut self,
        painter: &mut Painter<'_>,
        total_items: u16,
        top_index: i32,
        selected: u8,
        dt_ms: u16,
        force_show: bool,
    ) {
        let track_x = painter.width() - self.config.width;
        let track_y = 0;
        let track_h = painter.height();

        if (total_items as i32) <= ITEM_LINES {
            self.tick_fits(painter, track_x, track_y, top_index, selected, dt_ms);
            return;
        }

        let top_changed = self.last_top != top_index as u16;
        let selected_changed = selected != self.last_selected;
        if selected_changed || top_changed || force_show {
            self.visible_ms = self.config.show_ms;
        } else {
            self.visible_ms = self.visible_ms.saturating_sub(dt_ms);
        }
        let became_active = self.prev_visible_ms == 0 && self.visible_ms > 0;

        let total = total_items as i32;
        let mut thumb_h = (ITEM_LINES * track_h + total / 2) / total;
        let thumb_min = (ITEM_HEIGHT / self.config.min_thumb_divisor).max(2);
        if thumb_h < thumb_min {
            thumb_h = thumb_min;
        }
        if thumb_h > track_h {
            thumb_h = track_h;
        }

        let max_top = (total - ITEM_LINES).max(1);
        let top = top_index.clamp(0, max_top);
        let thumb_y = (top * (track_h - thumb_h) + max_top / 2) / max_top + track_y;

        let w_max = self.config.width;
        let w_min = if self.config.width > 2 {
            self.config.width - 2
        } else {
            1
        };

        let interacted = selected_changed || top_changed || force_show;
        let mut target_h = thumb_h;
        let mut target_y = thumb_y;
        let mut target_w = if self.visible_ms > 0 || interacted {
            w_max
        } else {
            w_min
        };
        if self.visible_ms == 0 && !interacted {
            // fully idle: collapse against the top of the track
            target_h = 0;
            target_y = track_y;
            target_w = w_min;
        }

        let smooth = if self.visible_ms > 0 || selected_changed || top_changed {
            self.config.smooth_active
        } else {
            self.config.smooth_idle
        }
        .min(16) as i32;

        let target_y_fp = target_y << 8;
        let target_h_fp = target_h << 8;
        let target_w_fp = target_w << 8;
        if self.y_fp == 0 && self.h_fp == 0 && self.w_fp == 0 {
            self.y_fp = target_y_fp;
            self.h_fp = target_h_fp;
            self.w_fp = target_w_fp;
        }
        if became_active {
            self.w_fp = target_w_fp;
        } else {
            self.w_fp += (target_w_fp - self.w_fp) * smooth / 16;
        }
        self.y_fp += (target_y_fp - self.y_fp) * smooth / 16;
        self.h_fp += (target_h_fp - self.h_fp) * smooth / 16;

        let mut draw_y = self.y_fp >> 8;
        let draw_h = (self.h_fp >> 8).max(0);
        let draw_w = (self.w_fp >> 8).max(1);
        if draw_y < track_y {
            draw_y = track_y;
        }
        if draw_y + draw_h > track_y + track_h {
            draw_y = track_y + track_h - draw_h;
        }
        if draw_y < track_y {
            draw_y = track_y;
        }

        if self.visible_ms > 0 {
            painter.draw_round_rect(track_x, track_y, self.config.width, track_h, 1, false, true);
        }
        if draw_h > 0 {
            let draw_x = track_x + (self.config.width - draw_w) / 2;
            painter.set_mode(DrawMode::Normal);
            painter.draw_round_rect(draw_x + 1, draw_y + 1, draw_w - 1, draw_h, 0, true, true);
        }

        self.last_top = top as u16;
        self.last_selected = selected;
        self.prev_visible_ms = self.visible_ms;
    }

    /// Everything fits on screen: ease the thumb away and keep decaying
    /// the show timer.
    fn tick_fits(
        &mut self,
        painter: &mut Painter<'_>,
        track_x: i32,
        track_y: i32,
        top_index: i32,
        selected: u8,
        dt_ms: u16,
    ) {
        let target_y_fp = track_y << 8;
        let target_h_fp = 0;
        let target_w_fp = (self.config.width - 1) << 8;
        let smooth = self.config.smooth_idle.min(16) as i32;

        if self.y_fp == 0 && self.h_fp == 0 && self.w_fp == 0 {
            self.y_fp = target_y_fp;
            self.h_fp = target_h_fp;
            self.w_fp = target_w_fp;
        }
        self.y_fp += (target_y_fp - self.y_fp) * smooth / 16;
        self.h_fp += (target_h_fp - self.h_fp) * smooth / 16;
        self.w_fp += (target_w_fp - self.w_fp) * smooth / 16;
        self.visible_ms = self.visible_ms.saturating_sub(dt_ms);

        if self.visible_ms > 0 || self.h_fp >> 8 > 0 {
            let draw_h = self.h_fp >> 8;
            if draw_h > 0 {
                let draw_w = (self.w_fp >> 8).max(1);
                let draw_x = track_x + (self.config.width - draw_w) / 2;
                let draw_y = self.y_fp >> 8;
                let radius = (draw_w / 2).min(draw_h / 2).min(4);
                painter.set_mode(DrawMode::Normal);
                painter.draw_round_rect(draw_x, draw_y, draw_w, draw_h, radius, true, true);
            }
        }

        self.last_top = top_index as u16;
        self.last_selected = selected;
        self.prev_visible_ms = self.visible_ms;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssd1317::{DrawSurface, FrameBuffer};

    fn bar() -> ScrollBar {
        ScrollBar::new(ScrollBarConfig::default())
    }

    #[test]
    fn first_tick_of_a_long_list_shows_track_and_thumb() {
        let mut frame = FrameBuffer::new();
        let mut bar = bar();
        {
            let mut painter = Painter::new(&mut frame);
            bar.tick(&mut painter, 20, 0, 0, 15, false);
        }
        // track frame occupies the right gutter
        assert_eq!(frame.pixel(92, 48), Some(true));
        assert_eq!(frame.pixel(95, 48), Some(true));
        // thumb height for 20 rows seeds at (8 * 96 + 10) / 20 = 38
        assert_eq!(frame.pixel(93, 10), Some(true));
        assert_eq!(frame.pixel(93, 38), Some(true));
        assert_eq!(frame.pixel(93, 50), Some(false));
    }

    #[test]
    fn short_list_never_draws_unprompted() {
        let mut frame = FrameBuffer::new();
        let mut bar = bar();
        for _ in 0..10 {
            let mut painter = Painter::new(&mut frame);
            bar.tick(&mut painter, 5, 0, 0, 15, false);
        }
        assert!(frame.bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn show_timer_decays_and_the_bar_goes_dark() {
        let mut bar = bar();
        // arm the timer, then hold still long enough for the timer to
        // lapse and the thumb to ease away
        for _ in 0..200 {
            let mut frame = FrameBuffer::new();
            let mut painter = Painter::new(&mut frame);
            bar.tick(&mut painter, 20, 0, 0, 15, false);
        }
        let mut frame = FrameBuffer::new();
        {
            let mut painter = Painter::new(&mut frame);
            bar.tick(&mut painter, 20, 0, 0, 15, false);
        }
        assert!(
            frame.bytes().iter().all(|byte| *byte == 0),
            "idle bar must leave the gutter dark"
        );
    }

    #[test]
    fn scrolling_rearms_the_show_timer() {
        let mut bar = bar();
        for _ in 0..200 {
            let mut frame = FrameBuffer::new();
            let mut painter = Painter::new(&mut frame);
            bar.tick(&mut painter, 20, 0, 0, 15, false);
        }
        let mut frame = FrameBuffer::new();
        {
            let mut painter = Painter::new(&mut frame);
            bar.tick(&mut painter, 20, 3, 3, 15, false);
        }
        assert_eq!(frame.pixel(92, 48), Some(true), "track must reappear");
    }

    #[test]
    fn thumb_tracks_the_top_row() {
        let mut frame_top = FrameBuffer::new();
        let mut bar_top = bar();
        {
            let mut painter = Painter::new(&mut frame_top);
            bar_top.tick(&mut painter, 20, 0, 0, 15, false);
        }
        let mut frame_bottom = FrameBuffer::new();
        let mut bar_bottom = bar();
        {
            let mut painter = Painter::new(&mut frame_bottom);
            bar_bottom.tick(&mut painter, 20, 12, 19, 15, false);
        }
        // top=12 is the maximum: thumb seeds flush with the track bottom
        assert_eq!(frame_bottom.pixel(93, 94), Some(true));
        assert_eq!(frame_bottom.pixel(93, 10), Some(false));
        assert_eq!(frame_top.pixel(93, 94), Some(false));
    }
}
