impl<K, H> Ui<K, H>
where
    K: KeyProvider,
    H: UiHooks,
{
    /// Advances the active transition, reworking the persisted frame in
    /// place.
    ///
    /// Phase `k` applies once `elapsed` crosses `k * interval`, so the
    /// first phase lands immediately. The finished frame holds for one
    /// more interval before normal ticks resume.
    fn tick_transition(&mut self, frame: &mut FrameBuffer, dt: u32) -> TickResult {
        let Some(mut transition) = self.transition.take() else {
            return TickResult::NoRender;
        };
        let phases = transition.phases();
        let interval = (self.config.transition_ms / phases as u32).max(1);
        transition.elapsed = transition.elapsed.saturating_add(dt);

        let mut applied_any = false;
        while transition.applied < phases
            && transition.elapsed >= interval * transition.applied as u32
        {
            Self::clear_phase(frame, transition.applied);
            transition.applied += 1;
            applied_any = true;
        }

        let done =
            transition.applied >= phases && transition.elapsed >= interval * phases as u32;
        if !done {
            self.transition = Some(transition);
        }
        if applied_any {
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    /// Clears one pixel parity class across the whole frame.
    ///
    /// The four classes in phase order are (even x, odd y),
    /// (odd x, odd y), (odd x, even y), (even x, even y); running all
    /// four empties the frame, stopping after three leaves a quarter
    /// lattice standing.
    fn clear_phase(frame: &mut FrameBuffer, phase: u8) {
        let (x_odd, y_odd) = match phase {
            0 => (false, true),
            1 => (true, true),
            2 => (true, false),
            _ => (false, false),
        };
        let mask: u8 = if y_odd { 0xAA } else { 0x55 };
        let bytes = frame.bytes_mut();
        let start = if x_odd { 1 } else { 0 };
        for page in 0..ssd1317::protocol::PAGES {
            let base = page * ssd1317::protocol::WIDTH;
            for column in (start..ssd1317::protocol::WIDTH).step_by(2) {
                bytes[base + column] &= !mask;
            }
        }
    }
}
