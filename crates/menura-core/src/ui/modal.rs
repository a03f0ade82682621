impl<K, H> Ui<K, H>
where
    K: KeyProvider,
    H: UiHooks,
{
    /// Ticks the active modal surface.
    ///
    /// The underlying list page is frozen; the dialog sits on top of
    /// the dimmed frame left by the open transition. Message and
    /// progress dialogs draw once and then wait for exit, the value
    /// editor repaints every tick, custom items run their hook.
    fn tick_modal(&mut self, frame: &mut FrameBuffer, actions: Actions) -> TickResult {
        let page_id = self.page_stack[self.layer];
        let anchor_row = self.row_stack[self.layer];
        let Some(modal) = self.modal else {
            return TickResult::NoRender;
        };
        let Some((slot_index, title, kind)) = self.find_modal_item(page_id, anchor_row) else {
            self.modal = None;
            debug!("ui-modal: anchor row {} missing, released", anchor_row);
            return TickResult::NoRender;
        };
        let anchor = ItemId {
            page: PageId(page_id),
            index: slot_index,
        };

        match modal {
            ModalKind::Message { drawn } => {
                let ItemKind::Message { text } = kind else {
                    self.modal = None;
                    return TickResult::NoRender;
                };
                if !drawn {
                    let mut painter = Painter::new(frame);
                    draw_message_box(&mut painter, text);
                    self.modal = Some(ModalKind::Message { drawn: true });
                    return TickResult::RenderRequested;
                }
                if actions.exit {
                    self.modal = None;
                    debug!("ui-modal: message dismissed");
                }
                TickResult::NoRender
            }
            ModalKind::Progress { drawn } => {
                let ItemKind::Progress { percent } = kind else {
                    self.modal = None;
                    return TickResult::NoRender;
                };
                if !drawn {
                    let mut painter = Painter::new(frame);
                    draw_progress_dialog(&mut painter, title, percent);
                    self.modal = Some(ModalKind::Progress { drawn: true });
                    return TickResult::RenderRequested;
                }
                if actions.exit {
                    self.modal = None;
                    debug!("ui-modal: progress dismissed");
                }
                TickResult::NoRender
            }
            ModalKind::Editor(state) => {
                let ItemKind::Value { slot } = kind else {
                    self.modal = None;
                    return TickResult::NoRender;
                };
                self.tick_editor(frame, anchor, title, slot, state, actions)
            }
            ModalKind::Custom => {
                let flow = {
                    let mut painter = Painter::new(frame);
                    self.hooks
                        .custom_item(anchor, &mut self.model, &mut painter, actions)
                };
                if flow == ModalFlow::Release {
                    self.modal = None;
                    debug!("ui-modal: custom item released");
                }
                TickResult::RenderRequested
            }
        }
    }

    fn find_modal_item(&self, page_id: u16, row: u8) -> Option<(u8, &'static str, ItemKind)> {
        let page = self.model.page(PageId(page_id))?;
        let slot = page.items().iter().position(|item| item.id == row)?;
        let item = &page.items()[slot];
        Some((slot as u8, item.title, item.kind))
    }

    /// One value editor tick: repaint, then apply this tick's actions.
    fn tick_editor(
        &mut self,
        frame: &mut FrameBuffer,
        anchor: ItemId,
        title: &str,
        slot: ValueSlot,
        state: EditorState,
        actions: Actions,
    ) -> TickResult {
        let mut slot = slot;
        let mut state = state;
        let title_len = title.chars().count() as i32;
        let (x, y, width, height) = dialog_frame(title_len, 4);
        let off = (ITEM_HEIGHT - FONT_HEIGHT) / 2 + 1;
        let value_box_w = (title_len + 1) * FONT_WIDTH + 5;

        {
            let mut painter = Painter::new(frame);
            painter.draw_round_rect(x - 1, y - 1, width + 2, height + 2, 8, true, false);
            painter.draw_round_rect(x - 1, y - 1, width + 2, height + 2, 8, false, true);
            painter.draw_str(x + 3, y + off, title, LIST_FONT);
            painter.draw_str(x + 3 + title_len * FONT_WIDTH, y + off, ":", LIST_FONT);
            painter.draw_str(x + 3, y + 2 * ITEM_HEIGHT + off, "Step:", LIST_FONT);
            painter.draw_str(x + 3, y + 3 * ITEM_HEIGHT + off, "Save", LIST_FONT);
            let return_x = x + width - 6 * FONT_WIDTH - 4;
            painter.draw_str(return_x, y + 3 * ITEM_HEIGHT + off, "Return", LIST_FONT);

            if state.editing_value {
                painter.set_mode(DrawMode::Xor);
                painter.draw_round_rect(x + 1, y + 1, value_box_w, ITEM_HEIGHT, 4, true, true);
                painter.set_mode(DrawMode::Normal);
                apply_value_edit(&mut slot, state.step, actions);
            } else if state.editing_step {
                painter.set_mode(DrawMode::Xor);
                painter.draw_round_rect(
                    x + 1,
                    y + 1 + 2 * ITEM_HEIGHT,
                    5 * FONT_WIDTH + 5,
                    ITEM_HEIGHT,
                    4,
                    true,
                    true,
                );
                painter.set_mode(DrawMode::Normal);
                state.step = cycle_step(state.step, actions);
            } else {
                if actions.down {
                    state.row = if state.row < 4 { state.row + 1 } else { 1 };
                }
                if actions.up {
                    state.row = if state.row > 1 { state.row - 1 } else { 4 };
                }
            }

            let value_y = y + ITEM_HEIGHT + off;
            match slot.value {
                Number::Unsigned(v) => {
                    painter.draw_fmt(x + 3, value_y, LIST_FONT, format_args!("{v}"))
                }
                Number::Signed(v) => {
                    painter.draw_fmt(x + 3, value_y, LIST_FONT, format_args!("{v}"))
                }
                Number::Float(v) => {
                    painter.draw_fmt(x + 3, value_y, LIST_FONT, format_args!("{v:.4}"))
                }
            }

            let step_y = y + 2 * ITEM_HEIGHT + off;
            match state.step {
                EditorStep::Int(1) => {
                    painter.draw_str(x + 3 + 9 * FONT_WIDTH, step_y, "1", LIST_FONT)
                }
                EditorStep::Int(10) => {
                    painter.draw_str(x + 3 + 8 * FONT_WIDTH, step_y, "10", LIST_FONT)
                }
                EditorStep::Int(_) => {
                    painter.draw_str(x + 3 + 7 * FONT_WIDTH, step_y, "100", LIST_FONT)
                }
                EditorStep::Float(step) => {
                    let text = if step == 0.0001 {
                        "0.0001"
                    } else if step == 0.001 {
                        "0.001"
                    } else if step == 0.01 {
                        "0.01"
                    } else if step == 0.1 {
                        "0.1"
                    } else {
                        "1"
                    };
                    painter.draw_str(x + 3 + 6 * FONT_WIDTH, step_y, text, LIST_FONT);
                }
            }

            match state.row {
                1 => painter.draw_round_rect(x + 1, y + 1, value_box_w, ITEM_HEIGHT, 4, false, true),
                2 => painter.draw_round_rect(
                    x + 1,
                    y + 1 + 2 * ITEM_HEIGHT,
                    5 * FONT_WIDTH + 5,
                    ITEM_HEIGHT,
                    4,
                    false,
                    true,
                ),
                3 => painter.draw_round_rect(
                    x + 1,
                    y + 1 + 3 * ITEM_HEIGHT,
                    4 * FONT_WIDTH + 5,
                    ITEM_HEIGHT,
                    4,
                    false,
                    true,
                ),
                _ => painter.draw_round_rect(
                    x + width - 6 * FONT_WIDTH - 6,
                    y + 1 + 3 * ITEM_HEIGHT,
                    6 * FONT_WIDTH + 5,
                    ITEM_HEIGHT,
                    4,
                    false,
                    true,
                ),
            }
        }

        let mut close = false;
        if actions.click {
            match state.row {
                1 => state.editing_value = true,
                2 => state.editing_step = true,
                3 => {
                    slot.commit();
                    close = true;
                    debug!("ui-modal: editor saved");
                }
                _ => {
                    slot.revert();
                    close = true;
                    debug!("ui-modal: editor abandoned");
                }
            }
        }
        if actions.exit {
            // exit backs out of an edit mode, never out of the dialog
            if state.row == 1 {
                state.editing_value = false;
            }
            if state.row == 2 {
                state.editing_step = false;
            }
        }

        if let Some(item) = self.model.item_mut(anchor) {
            item.kind = ItemKind::Value { slot };
        }
        if close {
            if let Number::Float(_) = slot.value {
                self.float_step_seed = 0.01;
            }
            self.modal = None;
            self.transition = Some(Transition::dim());
        } else {
            self.modal = Some(ModalKind::Editor(state));
        }
        TickResult::RenderRequested
    }
}

fn apply_value_edit(slot: &mut ValueSlot, step: EditorStep, actions: Actions) {
    match (&mut slot.value, step) {
        (Number::Unsigned(v), EditorStep::Int(step)) => {
            if actions.up {
                *v = v.saturating_add(step);
            }
            if actions.down {
                *v = if *v >= step { *v - step } else { 0 };
            }
        }
        (Number::Signed(v), EditorStep::Int(step)) => {
            if actions.up {
                *v = v.saturating_add(step as i32);
            }
            if actions.down {
                *v = v.saturating_sub(step as i32);
            }
        }
        (Number::Float(v), EditorStep::Float(step)) => {
            if actions.up {
                *v += step;
            }
            if actions.down {
                *v -= step;
            }
        }
        _ => {}
    }
}

fn cycle_step(step: EditorStep, actions: Actions) -> EditorStep {
    match step {
        EditorStep::Int(step) => {
            let mut step = step;
            if actions.up {
                step = match step {
                    1 => 10,
                    10 => 100,
                    _ => 1,
                };
            }
            if actions.down {
                step = match step {
                    100 => 10,
                    10 => 1,
                    _ => 100,
                };
            }
            EditorStep::Int(step)
        }
        EditorStep::Float(step) => {
            let mut step = step;
            if actions.up {
                step = if step == 0.0001 {
                    0.001
                } else if step == 0.001 {
                    0.01
                } else if step == 0.01 {
                    0.1
                } else if step == 0.1 {
                    1.0
                } else {
                    0.0001
                };
            }
            if actions.down {
                step = if step == 1.0 {
                    0.1
                } else if step == 0.1 {
                    0.01
                } else if step == 0.01 {
                    0.001
                } else if step == 0.001 {
                    0.0001
                } else {
                    1.0
                };
            }
            EditorStep::Float(step)
        }
    }
}

/// Centered dialog frame sized to the title, `rows` item rows tall.
fn dialog_frame(title_chars: i32, rows: i32) -> (i32, i32, i32, i32) {
    let height = ITEM_HEIGHT * rows + 2;
    let mut width = (title_chars + 1).max(12) * FONT_WIDTH + 7;
    let min_width = 2 * SCREEN_WIDTH / 3;
    if width < min_width {
        width = min_width;
    }
    let x = (SCREEN_WIDTH - width) / 2;
    let y = (SCREEN_HEIGHT - height) / 2;
    (x, y, width, height)
}

fn draw_progress_dialog(painter: &mut Painter<'_>, title: &str, percent: f32) {
    let title_len = title.chars().count() as i32;
    let (x, y, width, height) = dialog_frame(title_len, 2);
    let off = (ITEM_HEIGHT - FONT_HEIGHT) / 2 + 1;
    let bar_w = width - 6 * FONT_WIDTH - 10;

    painter.draw_rectangle(x - 1, y - 1, width + 2, height + 2, false, true);
    painter.draw_rectangle(x, y, width, height, true, false);
    painter.draw_str(x + 3, y + off, title, LIST_FONT);
    painter.draw_str(x + 3 + title_len * FONT_WIDTH, y + off, ":", LIST_FONT);

    let mut t = percent;
    if t < 0.0 {
        t = 0.0;
    }
    if t > 100.0 {
        t = 100.0;
    }
    let bar_y = y + ITEM_HEIGHT + off;
    painter.draw_rectangle(x + 3, bar_y, bar_w, FONT_HEIGHT, false, true);
    let fill = (t / 100.0 * (bar_w - 4) as f32) as i32;
    painter.draw_rectangle(x + 5, bar_y + 2, fill, FONT_HEIGHT - 4, true, true);

    if t > 0.0 && t < 10.0 {
        painter.draw_fmt(
            x + width - 5 * FONT_WIDTH - 4,
            bar_y,
            LIST_FONT,
            format_args!("{t:.2}%"),
        );
    } else if (10.0..100.0).contains(&t) {
        painter.draw_fmt(
            x + width - 6 * FONT_WIDTH - 5,
            bar_y,
            LIST_FONT,
            format_args!("{t:.2}%"),
        );
    } else if t == 100.0 {
        painter.draw_str(x + width - 4 * FONT_WIDTH - 4, bar_y, "100%", LIST_FONT);
    } else {
        painter.draw_str(x + width - 2 * FONT_WIDTH - 4, bar_y, "0%", LIST_FONT);
    }
}

const MSG_MARGIN: i32 = 3;
const MSG_PAD_X: i32 = 4;
const MSG_PAD_Y: i32 = 3;
const MSG_LINE_GAP: i32 = 2;

/// Greedy line split: up to `cap` chars, a newline forces a break and
/// is consumed even when it lands right after a full line.
fn split_message_line(text: &str, cap: usize) -> (&str, &str) {
    let mut taken = 0;
    let mut split = text.len();
    for (i, ch) in text.char_indices() {
        if taken >= cap || ch == '\n' {
            split = i;
            break;
        }
        taken += 1;
    }
    let line = &text[..split];
    let mut rest = &text[split..];
    if let Some(tail) = rest.strip_prefix('\n') {
        rest = tail;
    }
    (line, rest)
}

/// Wraps `text` into a top-left message box sized to its longest drawn
/// line. Overflowing content truncates with a trailing ellipsis.
fn draw_message_box(painter: &mut Painter<'_>, text: &str) {
    let line_h = FONT_HEIGHT + MSG_LINE_GAP;
    let max_content_w = SCREEN_WIDTH - 2 * MSG_MARGIN - 2 * MSG_PAD_X;
    let max_content_h = SCREEN_HEIGHT - 2 * MSG_MARGIN - 2 * MSG_PAD_Y;
    let chars_per_line = (max_content_w / FONT_WIDTH).max(1) as usize;
    let max_lines = (max_content_h / line_h).max(1) as usize;

    let mut total_lines = 0usize;
    let mut rest = text;
    while !rest.is_empty() {
        let (_, tail) = split_message_line(rest, chars_per_line);
        total_lines += 1;
        rest = tail;
    }
    let truncated = total_lines > max_lines;
    let draw_lines = total_lines.min(max_lines);

    let mut longest = 0usize;
    let mut rest = text;
    for line_index in 0..draw_lines {
        let (line, tail) = split_message_line(rest, chars_per_line);
        let mut chars = line.chars().count();
        if truncated && line_index + 1 == draw_lines {
            chars = if chars_per_line >= 3 {
                chars.min(chars_per_line - 3) + 3
            } else {
                1
            };
        }
        longest = longest.max(chars);
        rest = tail;
    }

    let longest = longest.max(1) as i32;
    let content_w = (longest * FONT_WIDTH).min(max_content_w);
    let box_w = content_w + 2 * MSG_PAD_X;
    let box_h = draw_lines as i32 * line_h + 2 * MSG_PAD_Y;
    let x = MSG_MARGIN;
    let y = MSG_MARGIN;

    let r_max_w = if box_w > 2 { (box_w - 1) / 2 } else { 1 };
    let r_max_h = if box_h > 2 { (box_h - 1) / 2 } else { 1 };
    let radius = 6.min(r_max_w).min(r_max_h).max(1);

    painter.draw_round_rect(x, y, box_w, box_h, radius, true, true);

    painter.set_mode(DrawMode::Xor);
    let mut rest = text;
    for line_index in 0..draw_lines {
        let (line, tail) = split_message_line(rest, chars_per_line);
        let text_y = y + MSG_PAD_Y + line_index as i32 * line_h + (line_h - FONT_HEIGHT) / 2;
        let last = line_index + 1 == draw_lines;
        if last && !tail.is_empty() {
            let mut buf: heapless::String<32> = heapless::String::new();
            if chars_per_line >= 3 {
                for ch in line.chars().take(chars_per_line - 3) {
                    let _ = buf.push(ch);
                }
                let _ = buf.push_str("...");
            } else {
                let _ = buf.push('.');
            }
            painter.draw_str(x + MSG_PAD_X, text_y, &buf, LIST_FONT);
        } else {
            painter.draw_str(x + MSG_PAD_X, text_y, line, LIST_FONT);
        }
        rest = tail;
    }
    painter.set_mode(DrawMode::Normal);
}
