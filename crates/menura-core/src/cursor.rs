//! Selection cursor: a rounded rect that glides between targets.
//!
//! The tween is keyed by an opaque identity word so callers can tell
//! "same target, keep gliding" apart from "new target, re-aim" without
//! the engine knowing what the word encodes. List pages pack page id,
//! row and a sub-kind tag; custom pages are free to pack anything.

use ssd1317::{DrawMode, Painter};

/// Identity value meaning "never aimed anywhere".
pub const CURSOR_IDENTITY_UNSET: u32 = 0xFFFF_FFFF;

/// Packs a cursor identity from page, row and a caller-chosen tag.
pub const fn pack_identity(page: u16, row: u8, tag: u8) -> u32 {
    ((page as u32) << 16) | ((row as u32) << 8) | tag as u32
}

/// Axis-aligned rect in float pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl CursorRect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            x: from.x + (to.x - from.x) * t,
            y: from.y + (to.y - from.y) * t,
            w: from.w + (to.w - from.w) * t,
            h: from.h + (to.h - from.h) * t,
        }
    }
}

/// Time-based rect tween drawn as an XOR rounded box.
#[derive(Clone, Copy, Debug)]
pub struct CursorTween {
    visible: bool,
    active: bool,
    radius: i32,
    identity: u32,
    now: CursorRect,
    start: CursorRect,
    target: CursorRect,
    elapsed: u32,
    duration: u32,
}

impl CursorTween {
    pub const fn new() -> Self {
        Self {
            visible: true,
            active: false,
            radius: 1,
            identity: CURSOR_IDENTITY_UNSET,
            now: CursorRect::new(0.0, 0.0, 0.0, 0.0),
            start: CursorRect::new(0.0, 0.0, 0.0, 0.0),
            target: CursorRect::new(0.0, 0.0, 0.0, 0.0),
            elapsed: 0,
            duration: 1,
        }
    }

    pub fn identity(&self) -> u32 {
        self.identity
    }

    pub fn now(&self) -> CursorRect {
        self.now
    }

    pub fn is_moving(&self) -> bool {
        self.active
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Teleports the cursor without touching its identity.
    pub fn set_now(&mut self, rect: CursorRect, radius: i32) {
        self.radius = radius;
        self.now = rect;
        self.start = rect;
        self.target = rect;
        self.elapsed = 0;
        self.duration = 1;
        self.active = false;
    }

    /// Starts a glide from the current rect toward `target`.
    ///
    /// The identity is overwritten unconditionally; callers compare
    /// against [`identity`](Self::identity) first when they only want
    /// to re-aim on a change.
    pub fn glide(&mut self, identity: u32, target: CursorRect, duration_ms: u32, radius: i32) {
        self.duration = duration_ms.max(1);
        self.radius = radius;
        self.identity = identity;
        self.start = self.now;
        self.target = target;
        self.elapsed = 0;
        self.active = true;
    }

    /// Starts a glide from an explicit rect instead of the current one.
    pub fn glide_from(
        &mut self,
        identity: u32,
        start: CursorRect,
        target: CursorRect,
        duration_ms: u32,
        radius: i32,
    ) {
        self.glide(identity, target, duration_ms, radius);
        self.now = start;
        self.start = start;
    }

    /// Advances the glide by `dt_ms`. Snaps onto the target when the
    /// duration elapses.
    pub fn update(&mut self, dt_ms: u32) {
        if !self.active {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt_ms);
        let t = if self.elapsed >= self.duration {
            1.0
        } else {
            self.elapsed as f32 / self.duration as f32
        };
        self.now = CursorRect::lerp(self.start, self.target, t);
        if self.elapsed >= self.duration {
            self.now = self.target;
            self.active = false;
        }
    }

    /// XOR-draws the cursor box at its current rect.
    pub fn draw(&self, painter: &mut Painter<'_>) {
        if !self.visible {
            return;
        }
        let x = (self.now.x + 0.5) as i32;
        let y = (self.now.y + 0.5) as i32;
        let w = (self.now.w + 0.5) as i32;
        let h = (self.now.h + 0.5) as i32;
        if w <= 0 || h <= 0 {
            return;
        }
        painter.set_mode(DrawMode::Xor);
        painter.draw_round_rect(x, y, w, h, self.radius, true, true);
        painter.set_mode(DrawMode::Normal);
    }
}

impl Default for CursorTween {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssd1317::{DrawSurface, FrameBuffer};

    #[test]
    fn glide_converges_within_its_duration() {
        let mut tween = CursorTween::new();
        tween.set_now(CursorRect::new(0.0, 0.0, 20.0, 12.0), 1);
        let target = CursorRect::new(0.0, 36.0, 44.0, 12.0);
        tween.glide(7, target, 100, 1);

        let mut last_y = tween.now().y;
        for _ in 0..6 {
            tween.update(15);
            assert!(tween.now().y > last_y, "glide must move toward the target");
            last_y = tween.now().y;
        }
        assert!(tween.is_moving());
        tween.update(15);
        assert_eq!(tween.now(), target);
        assert!(!tween.is_moving());
    }

    #[test]
    fn set_now_keeps_the_identity() {
        let mut tween = CursorTween::new();
        assert_eq!(tween.identity(), CURSOR_IDENTITY_UNSET);
        tween.glide(pack_identity(2, 5, 0), CursorRect::new(0.0, 0.0, 10.0, 12.0), 50, 1);
        tween.set_now(CursorRect::new(0.0, 96.0, 30.0, 0.0), 1);
        assert_eq!(tween.identity(), pack_identity(2, 5, 0));
        assert!(!tween.is_moving());
    }

    #[test]
    fn glide_from_restarts_at_the_given_rect() {
        let mut tween = CursorTween::new();
        tween.set_now(CursorRect::new(0.0, 0.0, 20.0, 12.0), 1);
        let start = CursorRect::new(0.0, 75.0, 20.0, 12.0);
        tween.glide_from(3, start, CursorRect::new(0.0, 84.0, 20.0, 12.0), 100, 1);
        assert_eq!(tween.now(), start);
    }

    #[test]
    fn draw_rounds_to_the_nearest_pixel_and_skips_empty_rects() {
        let mut frame = FrameBuffer::new();
        {
            let mut painter = Painter::new(&mut frame);
            let mut tween = CursorTween::new();
            tween.set_now(CursorRect::new(9.6, 4.4, 10.0, 8.0), 0);
            tween.draw(&mut painter);
        }
        // rect rounds to x=10, y=4
        assert_eq!(frame.pixel(10, 4), Some(true));
        assert_eq!(frame.pixel(9, 4), Some(false));
        assert_eq!(frame.pixel(19, 11), Some(true));
        assert_eq!(frame.pixel(20, 4), Some(false));

        let mut frame = FrameBuffer::new();
        {
            let mut painter = Painter::new(&mut frame);
            let mut tween = CursorTween::new();
            tween.set_now(CursorRect::new(0.0, 96.0, 30.0, 0.0), 1);
            tween.draw(&mut painter);
        }
        assert!(frame.bytes().iter().all(|byte| *byte == 0));
    }

    #[test]
    fn hidden_cursor_draws_nothing() {
        let mut frame = FrameBuffer::new();
        let mut painter = Painter::new(&mut frame);
        let mut tween = CursorTween::new();
        tween.set_now(CursorRect::new(0.0, 0.0, 20.0, 12.0), 1);
        tween.set_visible(false);
        tween.draw(&mut painter);
        drop(painter);
        assert!(frame.bytes().iter().all(|byte| *byte == 0));
    }
}
