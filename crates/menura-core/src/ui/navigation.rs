impl<K, H> Ui<K, H>
where
    K: KeyProvider,
    H: UiHooks,
{
    /// Runs one engine tick.
    ///
    /// Polls the keys, advances animations and redraws the frame when
    /// anything moved. Actions decode once and fire exactly once; a
    /// tick with no key edges and settled animations reports
    /// [`TickResult::NoRender`] so the host can skip the flush.
    pub fn tick(&mut self, frame: &mut FrameBuffer, dt_ms: u32) -> TickResult {
        let dt = dt_ms.max(1);
        let keys = self.keys.poll().unwrap_or_default();
        let actions = self.monitor.translate(keys);

        if self.transition.is_some() {
            // the wipe owns the frame; this tick's actions are dropped
            return self.tick_transition(frame, dt);
        }

        let page_id = self.page_stack[self.layer];
        let Some(page) = self.model.page(PageId(page_id)) else {
            return TickResult::NoRender;
        };
        let page_kind = page.kind;

        // arriving on a page restores its remembered cursor row
        if self.synced_slot != Some((self.layer, page_id)) {
            self.row = self.row_stack[self.layer];
            self.synced_slot = Some((self.layer, page_id));
        }

        if self.modal.is_some() {
            return self.tick_modal(frame, actions);
        }

        frame.clear();
        match page_kind {
            PageKind::Custom => self.tick_custom_page(frame, actions),
            PageKind::List => self.tick_list_page(frame, actions, dt),
        }
    }

    fn tick_custom_page(&mut self, frame: &mut FrameBuffer, actions: Actions) -> TickResult {
        let page = PageId(self.page_stack[self.layer]);
        let flow = {
            let mut painter = Painter::new(frame);
            self.hooks
                .custom_page(page, &mut self.model, &mut painter, actions)
        };
        if self.layer > 0 && actions.exit && flow == HookFlow::Continue {
            self.pop_layer(false);
        }
        TickResult::RenderRequested
    }

    fn tick_list_page(&mut self, frame: &mut FrameBuffer, actions: Actions, dt: u32) -> TickResult {
        let page_id = self.page_stack[self.layer];
        self.layout_rows(page_id, dt);
        {
            let mut painter = Painter::new(frame);
            self.draw_list_items(&mut painter, page_id);
            self.draw_cursor(&mut painter, page_id, dt);
            self.draw_scroll_bar(&mut painter, page_id, dt);
        }
        self.apply_list_actions(page_id, actions);
        TickResult::RenderRequested
    }

    fn apply_list_actions(&mut self, page_id: u16, actions: Actions) {
        let last_id = self
            .model
            .page(PageId(page_id))
            .and_then(Page::last_id)
            .unwrap_or(0);

        if actions.down {
            if self.row < last_id {
                self.row += 1;
            } else if self.config.list_loop {
                self.row = 0;
            }
        }
        if actions.up {
            if self.row > 0 {
                self.row -= 1;
            } else if self.config.list_loop {
                self.row = last_id;
            }
        }
        if actions.click {
            self.click_selected(page_id);
        }
        self.row_stack[self.layer] = self.row;

        if self.layer > 0 && actions.exit {
            self.pop_layer(true);
        }
    }

    fn click_selected(&mut self, page_id: u16) {
        let row = self.row;
        let Some(page) = self.model.page(PageId(page_id)) else {
            return;
        };
        let Some(slot) = page.items().iter().position(|item| item.id == row) else {
            return;
        };
        let kind = page.items()[slot].kind;
        let item = ItemId {
            page: PageId(page_id),
            index: slot as u8,
        };

        match kind {
            ItemKind::Label => {}
            ItemKind::Jump { target } => self.enter_page(page_id, target),
            ItemKind::Switch { .. } | ItemKind::Checkbox { .. } => {
                if let Some(item) = self.model.item_mut(item) {
                    if let Some(on) = item.flag() {
                        item.set_flag(!on);
                    }
                }
            }
            ItemKind::Radio { on, .. } => self.select_radio(page_id, slot, on),
            ItemKind::Progress { .. } => self.open_modal(ModalKind::Progress { drawn: false }, true),
            ItemKind::Value { slot: value } => self.open_editor(value),
            ItemKind::Message { .. } => self.open_modal(ModalKind::Message { drawn: false }, true),
            ItemKind::Custom => self.open_modal(ModalKind::Custom, false),
        }
    }

    /// Radio click: every other radio on the page clears, the clicked
    /// one toggles.
    fn select_radio(&mut self, page_id: u16, slot: usize, was_on: bool) {
        let Some(page) = self.model.page_mut(PageId(page_id)) else {
            return;
        };
        for (index, item) in page.items.iter_mut().enumerate() {
            if let ItemKind::Radio { on, .. } = &mut item.kind {
                *on = if index == slot { !was_on } else { false };
            }
        }
    }

    /// Descends into `target`, remembering the cursor row of the page
    /// being left.
    fn enter_page(&mut self, from: u16, target: PageId) {
        if self.layer == MAX_LAYER - 1 {
            debug!("ui-nav: depth capped layer={} target={}", self.layer, target.0);
            return;
        }
        if self.model.page(target).is_none() {
            debug!("ui-nav: jump to unregistered page {}", target.0);
            return;
        }
        self.row_stack[self.layer] = self.row;
        self.layer += 1;
        self.page_stack[self.layer] = target.0;
        self.row = 0;
        if let Some(page) = self.model.page_mut(PageId(from)) {
            for item in page.items.iter_mut() {
                if item.line >= 0 {
                    item.position = 0;
                    item.position_accum = 0.0;
                }
            }
        }
        self.transition = Some(Transition::dissolve());
        debug!("ui-nav: jump layer={} page={}", self.layer, target.0);
    }

    /// Climbs one layer and restores the parent's cursor row.
    fn pop_layer(&mut self, reset_departed: bool) {
        if reset_departed {
            let departed = PageId(self.page_stack[self.layer]);
            if let Some(page) = self.model.page_mut(departed) {
                for item in page.items.iter_mut() {
                    item.position = 0;
                    item.position_accum = 0.0;
                }
            }
        }
        self.page_stack[self.layer] = 0;
        self.row_stack[self.layer] = 0;
        self.layer -= 1;
        self.row = self.row_stack[self.layer];
        self.transition = Some(Transition::dissolve());
        debug!(
            "ui-nav: pop layer={} page={} row={}",
            self.layer, self.page_stack[self.layer], self.row
        );
    }

    fn open_modal(&mut self, modal: ModalKind, dim: bool) {
        self.row_stack[self.layer] = self.row;
        self.modal = Some(modal);
        if dim {
            self.transition = Some(Transition::dim());
        }
        debug!("ui-nav: modal open row={}", self.row);
    }

    fn open_editor(&mut self, slot: ValueSlot) {
        let step = match slot.value {
            Number::Float(_) => EditorStep::Float(self.float_step_seed),
            _ => EditorStep::Int(1),
        };
        self.open_modal(
            ModalKind::Editor(EditorState {
                row: 1,
                editing_value: false,
                editing_step: false,
                step,
            }),
            true,
        );
    }
}
