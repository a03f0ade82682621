//! Input abstraction layer.

mod mock;

pub use mock::MockKeys;

/// One key's edge and level flags for a single tick.
///
/// `pressed` and `released` are one-tick edges; `held` is a level the
/// driver raises while the key has been down past its hold threshold.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct KeyState {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
}

/// The three-key state sampled once per tick.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct KeySnapshot {
    pub up: KeyState,
    pub down: KeyState,
    pub confirm: KeyState,
}

/// Source of per-tick key snapshots.
pub trait KeyProvider {
    type Error;

    fn poll(&mut self) -> Result<KeySnapshot, Self::Error>;
}

/// One-tick navigation actions decoded from the keys.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Actions {
    pub up: bool,
    pub down: bool,
    pub click: bool,
    pub exit: bool,
}

impl Actions {
    pub fn any(self) -> bool {
        self.up || self.down || self.click || self.exit
    }
}

/// Folds confirm press/hold/release edges into click and exit actions.
///
/// A hold fires `exit` exactly once and latches; the release that ends
/// a latched hold is swallowed so one gesture never yields both a click
/// and an exit.
#[derive(Debug, Default)]
pub struct ActionMonitor {
    hold_latched: bool,
}

impl ActionMonitor {
    pub const fn new() -> Self {
        Self { hold_latched: false }
    }

    pub fn translate(&mut self, keys: KeySnapshot) -> Actions {
        let mut actions = Actions::default();
        if keys.up.pressed {
            actions.up = true;
        }
        if keys.down.pressed {
            actions.down = true;
        }
        if keys.confirm.pressed {
            self.hold_latched = false;
        }
        if keys.confirm.held && !self.hold_latched {
            actions.exit = true;
            self.hold_latched = true;
        }
        if keys.confirm.released {
            if !self.hold_latched {
                actions.click = true;
            }
            self.hold_latched = false;
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn confirm(pressed: bool, held: bool, released: bool) -> KeySnapshot {
        KeySnapshot {
            confirm: KeyState {
                pressed,
                held,
                released,
            },
            ..KeySnapshot::default()
        }
    }

    #[test]
    fn short_press_clicks_on_release() {
        let mut monitor = ActionMonitor::new();
        let down = monitor.translate(confirm(true, false, false));
        assert!(!down.any());
        let up = monitor.translate(confirm(false, false, true));
        assert!(up.click);
        assert!(!up.exit);
    }

    #[test]
    fn hold_exits_once_and_swallows_the_release() {
        let mut monitor = ActionMonitor::new();
        monitor.translate(confirm(true, false, false));
        let held = monitor.translate(confirm(false, true, false));
        assert!(held.exit);
        // still held: the level must not retrigger
        let still = monitor.translate(confirm(false, true, false));
        assert!(!still.exit);
        let up = monitor.translate(confirm(false, false, true));
        assert!(!up.click);
        assert!(!up.exit);
    }

    #[test]
    fn next_press_rearms_after_a_hold() {
        let mut monitor = ActionMonitor::new();
        monitor.translate(confirm(true, false, false));
        monitor.translate(confirm(false, true, false));
        monitor.translate(confirm(false, false, true));
        monitor.translate(confirm(true, false, false));
        let up = monitor.translate(confirm(false, false, true));
        assert!(up.click);
    }

    #[test]
    fn directional_edges_pass_through() {
        let mut monitor = ActionMonitor::new();
        let keys = KeySnapshot {
            up: KeyState {
                pressed: true,
                ..KeyState::default()
            },
            down: KeyState {
                pressed: true,
                ..KeyState::default()
            },
            ..KeySnapshot::default()
        };
        let actions = monitor.translate(keys);
        assert!(actions.up);
        assert!(actions.down);
        assert!(!actions.click);
    }
}
