impl<K, H> Ui<K, H>
where
    K: KeyProvider,
    H: UiHooks,
{
    /// Per-tick row layout.
    ///
    /// When the selected row sits outside the viewport every line slot
    /// shifts by the overshoot, then each item eases toward its slot's
    /// pixel target. The shared clock restarts whenever the last item
    /// lands on target, so a page at rest costs one comparison.
    fn layout_rows(&mut self, page_id: u16, dt: u32) {
        let speed = (self.config.item_move_ms as u32 / dt).max(1) as f32;
        let item_move_ms = self.config.item_move_ms as u32;
        let row = self.row;
        let Some(page) = self.model.page_mut(PageId(page_id)) else {
            return;
        };

        let mut shift = 0i16;
        if let Some(selected) = page.items.iter().find(|item| item.id == row) {
            let bottom = (ITEM_LINES - 1) as i16;
            if selected.line < 0 {
                shift = selected.line;
            } else if selected.line > bottom {
                shift = selected.line - bottom;
            }
        }
        if shift != 0 {
            for item in page.items.iter_mut() {
                item.line -= shift;
            }
        }

        let offset = ((ITEM_HEIGHT - FONT_HEIGHT) / 2) as i16;
        let count = page.items.len();
        let mut clock = self.scroll_clock;
        let mut anim_row = self.anim_row;
        for (index, item) in page.items.iter_mut().enumerate() {
            let target = offset + item.line * ITEM_HEIGHT as i16;
            if clock == 0 || row != anim_row {
                item.anim_step = (target - item.position) as f32 / speed;
            }
            if (clock as u32) < item_move_ms {
                item.position_accum += item.anim_step;
            } else {
                item.position_accum = target as f32;
            }
            item.position = item.position_accum as i16;
            anim_row = row;
            if index + 1 == count {
                if target == item.position {
                    clock = 0;
                } else {
                    clock = clock.saturating_add(dt as u16);
                }
            }
        }
        self.scroll_clock = clock;
        self.anim_row = anim_row;
    }

    fn draw_list_items(&self, painter: &mut Painter<'_>, page_id: u16) {
        let Some(page) = self.model.page(PageId(page_id)) else {
            return;
        };
        for item in page.items() {
            draw_list_item(painter, item);
        }
    }

    /// Aims and draws the selection cursor.
    ///
    /// The cursor identity packs page and row; a changed identity
    /// re-aims the glide. A row change that is not a wrap while the
    /// selected item is still off screen grafts the glide onto the
    /// viewport edge the item will enter from.
    fn draw_cursor(&mut self, painter: &mut Painter<'_>, page_id: u16, dt: u32) {
        let Some(page) = self.model.page(PageId(page_id)) else {
            return;
        };
        let identity = pack_identity(page_id, self.row, 0);
        let height = ITEM_HEIGHT as f32;

        if self.cursor.now().w as i32 == 0 {
            if let Some(first) = page.items().first() {
                let rect = CursorRect::new(0.0, SCREEN_HEIGHT as f32, title_width(first), 0.0);
                self.cursor.set_now(rect, 1);
            }
        }

        let last_identity = self.cursor.identity();
        if let Some(selected) = page.items().iter().find(|item| item.id == self.row) {
            let target = CursorRect::new(
                0.0,
                (selected.line as i32 * ITEM_HEIGHT) as f32,
                title_width(selected),
                height,
            );
            if identity != last_identity {
                self.cursor.glide(identity, target, self.config.cursor_move_ms, 1);

                let last_row = ((last_identity >> 8) & 0xFF) as u8;
                let wrap_span = page.last_id().unwrap_or(0) as u16;
                let row_delta = (self.row as i16 - last_row as i16).unsigned_abs();
                if self.row != last_row && row_delta < wrap_span {
                    let now = self.cursor.now();
                    if selected.position < 0 {
                        let edge_y = (3 * ITEM_HEIGHT / 4) as f32;
                        let start = CursorRect::new(now.x, edge_y, now.w, height);
                        self.cursor
                            .glide_from(identity, start, target, self.config.cursor_move_ms, 1);
                    } else if selected.position as i32 >= SCREEN_HEIGHT {
                        let edge_y =
                            ((ITEM_LINES - 2) * ITEM_HEIGHT) as f32 + ITEM_HEIGHT as f32 / 4.0;
                        let start = CursorRect::new(now.x, edge_y, now.w, height);
                        self.cursor
                            .glide_from(identity, start, target, self.config.cursor_move_ms, 1);
                    }
                }
            }
        }
        self.cursor.update(dt);
        self.cursor.draw(painter);
    }

    fn draw_scroll_bar(&mut self, painter: &mut Painter<'_>, page_id: u16, dt: u32) {
        let Some(page) = self.model.page(PageId(page_id)) else {
            return;
        };
        let total = page.last_id().map(|id| id as u16 + 1).unwrap_or(0);
        let top = top_row_index(page);
        self.scroll_bar
            .tick(painter, total, top, self.row, dt as u16, false);
    }
}

fn draw_list_item(painter: &mut Painter<'_>, item: &Item) {
    let y = item.position as i32;
    match item.kind {
        ItemKind::Label => {
            painter.draw_str(2, y, item.title, LIST_FONT);
        }
        ItemKind::Jump { .. } => {
            painter.draw_str(2, y, "+", LIST_FONT);
            painter.draw_str(5 + FONT_WIDTH, y, item.title, LIST_FONT);
        }
        ItemKind::Checkbox { on, .. } | ItemKind::Radio { on, .. } => {
            painter.draw_str(2, y, "-", LIST_FONT);
            painter.draw_str(5 + FONT_WIDTH, y, item.title, LIST_FONT);
            draw_checkbox(
                painter,
                SCREEN_WIDTH - 7 - SCROLL_BAR_WIDTH - ITEM_HEIGHT + 2,
                y - (ITEM_HEIGHT - FONT_HEIGHT) / 2 + 1,
                ITEM_HEIGHT - 2,
                CHECK_BOX_OFFSET,
                on,
                1,
            );
        }
        ItemKind::Switch { on, .. } => {
            painter.draw_str(2, y, "-", LIST_FONT);
            painter.draw_str(5 + FONT_WIDTH, y, item.title, LIST_FONT);
            let state_x = SCREEN_WIDTH - 7 - 3 * FONT_WIDTH - SCROLL_BAR_WIDTH;
            painter.draw_str(state_x, y, if on { "ON" } else { "OFF" }, LIST_FONT);
        }
        ItemKind::Progress { percent } => {
            painter.draw_str(2, y, "-", LIST_FONT);
            painter.draw_str(5 + FONT_WIDTH, y, item.title, LIST_FONT);
            draw_progress_cell(painter, y, percent);
        }
        ItemKind::Value { slot } => {
            painter.draw_str(2, y, "-", LIST_FONT);
            painter.draw_str(5 + FONT_WIDTH, y, item.title, LIST_FONT);
            draw_value_cell(painter, y, slot.value);
        }
        ItemKind::Message { .. } | ItemKind::Custom => {
            painter.draw_str(2, y, "-", LIST_FONT);
            painter.draw_str(5 + FONT_WIDTH, y, item.title, LIST_FONT);
        }
    }
}

/// Right-aligned percentage cell.
///
/// Fractional values render through the float formatter with a forced
/// sign, then the sign glyph is XOR-erased so the digits stay put
/// without reserving a sign column.
fn draw_progress_cell(painter: &mut Painter<'_>, y: i32, percent: f32) {
    let right = |cells: i32| SCREEN_WIDTH - SCROLL_BAR_WIDTH - cells * FONT_WIDTH;
    if percent > 0.0 && percent < 10.0 {
        let x = right(7);
        painter.draw_float(x, y, percent, 1, 2, LIST_FONT);
        painter.set_mode(DrawMode::Xor);
        painter.draw_str(x, y, "+", LIST_FONT);
        painter.set_mode(DrawMode::Normal);
        painter.draw_str(right(2), y, "%", LIST_FONT);
    } else if percent >= 10.0 && percent < 100.0 {
        let x = right(8);
        painter.draw_float(x, y, percent, 2, 2, LIST_FONT);
        painter.set_mode(DrawMode::Xor);
        painter.draw_str(x, y, "+", LIST_FONT);
        painter.set_mode(DrawMode::Normal);
        painter.draw_str(right(2), y, "%", LIST_FONT);
    } else if percent == 100.0 {
        painter.draw_str(right(5), y, "100%", LIST_FONT);
    } else if percent == 0.0 {
        painter.draw_str(right(3), y, "0%", LIST_FONT);
    } else {
        painter.draw_str(right(4), y, "***", LIST_FONT);
    }
}

/// Right-aligned numeric cell; width tracks the digit count and values
/// too wide for the row degrade to an ellipsis.
fn draw_value_cell(painter: &mut Painter<'_>, y: i32, value: Number) {
    let right = |cells: i32| SCREEN_WIDTH - SCROLL_BAR_WIDTH - cells * FONT_WIDTH;
    match value {
        Number::Unsigned(v) => {
            if v < 10 {
                painter.draw_fmt(right(2), y, LIST_FONT, format_args!("{v}"));
            } else if v < 100 {
                painter.draw_fmt(right(3), y, LIST_FONT, format_args!("{v}"));
            } else if v < 1000 {
                painter.draw_fmt(right(4), y, LIST_FONT, format_args!("{v}"));
            } else if v < 10000 {
                painter.draw_fmt(right(5), y, LIST_FONT, format_args!("{v}"));
            } else {
                painter.draw_str(right(4), y, "...", LIST_FONT);
            }
        }
        Number::Signed(v) => {
            if v >= 0 {
                if v < 10 {
                    painter.draw_fmt(right(2), y, LIST_FONT, format_args!("{v}"));
                } else if v < 100 {
                    painter.draw_fmt(right(3), y, LIST_FONT, format_args!("{v}"));
                } else if v < 1000 {
                    painter.draw_fmt(right(4), y, LIST_FONT, format_args!("{v}"));
                } else if v < 10000 {
                    painter.draw_fmt(right(5), y, LIST_FONT, format_args!("{v}"));
                } else {
                    painter.draw_str(right(4), y, "...", LIST_FONT);
                }
            } else if v > -10 {
                painter.draw_fmt(right(3), y, LIST_FONT, format_args!("{v}"));
            } else if v > -100 {
                painter.draw_fmt(right(4), y, LIST_FONT, format_args!("{v}"));
            } else if v > -1000 {
                painter.draw_fmt(right(5), y, LIST_FONT, format_args!("{v}"));
            } else if v > -10000 {
                painter.draw_fmt(right(6), y, LIST_FONT, format_args!("{v}"));
            } else {
                painter.draw_str(right(4), y, "...", LIST_FONT);
            }
        }
        Number::Float(v) => {
            if v > 0.0 {
                if v >= 10000.0 {
                    painter.draw_str(right(4), y, "...", LIST_FONT);
                } else if v < 10.0 {
                    painter.draw_fmt(right(6), y, LIST_FONT, format_args!("{v:.3}"));
                } else if v < 100.0 {
                    painter.draw_fmt(right(6), y, LIST_FONT, format_args!("{v:.2}"));
                } else if v < 1000.0 {
                    painter.draw_fmt(right(6), y, LIST_FONT, format_args!("{v:.1}"));
                } else {
                    painter.draw_fmt(right(5), y, LIST_FONT, format_args!("{v:.0}"));
                }
            } else if v < 0.0 {
                if v <= -10000.0 {
                    painter.draw_str(right(4), y, "...", LIST_FONT);
                } else if v > -10.0 {
                    painter.draw_fmt(right(7), y, LIST_FONT, format_args!("{v:.3}"));
                } else if v > -100.0 {
                    painter.draw_fmt(right(7), y, LIST_FONT, format_args!("{v:.2}"));
                } else if v > -1000.0 {
                    painter.draw_fmt(right(7), y, LIST_FONT, format_args!("{v:.1}"));
                } else {
                    painter.draw_fmt(right(6), y, LIST_FONT, format_args!("{v:.0}"));
                }
            } else {
                painter.draw_str(right(2), y, "0", LIST_FONT);
            }
        }
    }
}

/// Cursor box width for an item row.
fn title_width(item: &Item) -> f32 {
    let chars = item.title.chars().count() as i32;
    let width = match item.kind {
        ItemKind::Label => chars * FONT_WIDTH + 5,
        _ => (chars + 1) * FONT_WIDTH + 8,
    };
    width as f32
}

/// Id of the topmost visible row, reconstructed from the line slots.
fn top_row_index(page: &Page) -> i32 {
    if let Some(item) = page.items().iter().find(|item| item.line == 0) {
        return item.id as i32;
    }
    let on_screen = page
        .items()
        .iter()
        .filter(|item| item.line >= 0)
        .min_by_key(|item| item.line);
    match on_screen {
        Some(item) => {
            if item.id as i16 >= item.line {
                (item.id as i16 - item.line) as i32
            } else {
                0
            }
        }
        None => 0,
    }
}

/// Draws a square check frame with an optional mark inset by `inset`.
pub fn draw_checkbox(
    painter: &mut Painter<'_>,
    x: i32,
    y: i32,
    size: i32,
    inset: i32,
    checked: bool,
    radius: i32,
) {
    painter.draw_round_rect(x, y, size, size, radius, false, true);
    if checked {
        let mut inset = inset.min(size / 2);
        let mut inner = size - 2 * inset;
        if inner < 1 {
            inner = 1;
            inset = (size - 1) / 2;
        }
        painter.draw_round_rect(x + inset, y + inset, inner, inner, radius, true, true);
    }
}

/// Frames an icon cell with four corner brackets, `pad` pixels out from
/// the icon bounds.
pub fn draw_corner_brackets(
    painter: &mut Painter<'_>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    pad: i32,
    len: i32,
    thickness: i32,
) {
    if len <= 0 || thickness <= 0 {
        return;
    }
    let fx = x - pad;
    let fy = y - pad;
    let fw = width + 2 * pad;
    let fh = height + 2 * pad;
    painter.draw_round_rect(fx, fy, len, thickness, 1, true, true);
    painter.draw_round_rect(fx, fy, thickness, len, 1, true, true);
    painter.draw_round_rect(fx + fw - len, fy, len, thickness, 1, true, true);
    painter.draw_round_rect(fx + fw - thickness, fy, thickness, len, 1, true, true);
    painter.draw_round_rect(fx, fy + fh - thickness, len, thickness, 1, true, true);
    painter.draw_round_rect(fx, fy + fh - len, thickness, len, 1, true, true);
    painter.draw_round_rect(fx + fw - len, fy + fh - thickness, len, thickness, 1, true, true);
    painter.draw_round_rect(fx + fw - thickness, fy + fh - len, thickness, len, 1, true, true);
}
