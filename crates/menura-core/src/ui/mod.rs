//! Menu engine: layered navigation, modal dialogs and per-tick animation.
//!
//! One [`Ui`] value owns the registered model, the input translation
//! and every piece of animation state. The host calls [`Ui::tick`] on a
//! fixed period with its frame buffer; the engine redraws into it and
//! reports whether the panel needs a flush. The buffer must persist
//! between ticks since page dissolves and dialog dims rework the
//! previous frame in place.

use log::debug;
use ssd1317::{DrawMode, Font, FrameBuffer, Painter};

use crate::cursor::{pack_identity, CursorRect, CursorTween};
use crate::input::{ActionMonitor, Actions, KeyProvider};
use crate::model::{Item, ItemId, ItemKind, MenuModel, Number, Page, PageId, PageKind, ValueSlot};
use crate::scrollbar::{ScrollBar, ScrollBarConfig};

/// Panel width in pixels.
pub const SCREEN_WIDTH: i32 = ssd1317::protocol::WIDTH as i32;
/// Panel height in pixels.
pub const SCREEN_HEIGHT: i32 = ssd1317::protocol::HEIGHT as i32;
/// Cell width of the list font.
pub const FONT_WIDTH: i32 = 6;
/// Cell height of the list font.
pub const FONT_HEIGHT: i32 = 8;
/// Height of one list row.
pub const ITEM_HEIGHT: i32 = 12;
/// Inset of a checked mark from its box frame.
pub const CHECK_BOX_OFFSET: i32 = 2;
/// Width of the scroll gutter on list pages.
pub const SCROLL_BAR_WIDTH: i32 = 4;
/// Rows visible on one screen.
pub const ITEM_LINES: i32 = SCREEN_HEIGHT / ITEM_HEIGHT;
/// Maximum navigation depth.
pub const MAX_LAYER: usize = 10;

/// Font used for all engine-rendered chrome.
pub(crate) const LIST_FONT: Font = Font::F6x8;

/// Outcome of one engine tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    /// The frame is unchanged; the host may skip the flush.
    NoRender,
    /// The frame changed and should go out to the panel.
    RenderRequested,
}

/// Engine timing and behavior knobs.
#[derive(Clone, Copy, Debug)]
pub struct UiConfig {
    /// Time a list row takes to slide into a new slot.
    pub item_move_ms: u16,
    /// Cursor glide duration.
    pub cursor_move_ms: u32,
    /// Wall time of page dissolves and dialog dims.
    pub transition_ms: u32,
    /// Wrap the cursor past the ends of a list.
    pub list_loop: bool,
    pub scroll_bar: ScrollBarConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            item_move_ms: 100,
            cursor_move_ms: 100,
            transition_ms: 120,
            list_loop: true,
            scroll_bar: ScrollBarConfig::default(),
        }
    }
}

/// What a custom page hook did with the tick's actions.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HookFlow {
    /// The engine applies its default handling; exit pops the layer.
    Continue,
    /// The hook consumed the actions itself.
    Consumed,
}

/// Whether a custom modal item keeps control of upcoming ticks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModalFlow {
    Keep,
    Release,
}

/// Host callbacks for custom pages and custom modal items.
///
/// Both hooks get a painter in normal mode and the tick's decoded
/// actions. A page hook starts from a cleared frame; an item hook
/// paints over the frozen list page it was opened from. Dispatch on
/// the page or item handle when one host serves several custom
/// surfaces.
pub trait UiHooks {
    fn custom_page(
        &mut self,
        page: PageId,
        model: &mut MenuModel,
        painter: &mut Painter<'_>,
        actions: Actions,
    ) -> HookFlow {
        let _ = (page, model, painter, actions);
        HookFlow::Continue
    }

    fn custom_item(
        &mut self,
        item: ItemId,
        model: &mut MenuModel,
        painter: &mut Painter<'_>,
        actions: Actions,
    ) -> ModalFlow {
        let _ = (item, model, painter, actions);
        ModalFlow::Release
    }
}

impl UiHooks for () {}

/// Step magnitude selected inside the value editor.
#[derive(Clone, Copy, Debug, PartialEq)]
enum EditorStep {
    Int(u32),
    Float(f32),
}

/// Value editor dialog state.
#[derive(Clone, Copy, Debug, PartialEq)]
struct EditorState {
    /// Selected dialog row, 1 value / 2 step / 3 save / 4 return.
    row: u8,
    editing_value: bool,
    editing_step: bool,
    step: EditorStep,
}

/// Which modal surface owns the ticks while the list page is frozen.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ModalKind {
    Editor(EditorState),
    Message { drawn: bool },
    Progress { drawn: bool },
    Custom,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TransitionKind {
    /// Four-phase checkerboard wipe between pages; ends with the frame
    /// fully cleared.
    Dissolve,
    /// Three-phase darkening under a dialog; leaves a quarter of the
    /// pixels standing.
    Dim,
}

/// An in-flight frame transition. Input is ignored until it completes.
#[derive(Clone, Copy, Debug)]
struct Transition {
    kind: TransitionKind,
    elapsed: u32,
    applied: u8,
}

impl Transition {
    const fn dissolve() -> Self {
        Self {
            kind: TransitionKind::Dissolve,
            elapsed: 0,
            applied: 0,
        }
    }

    const fn dim() -> Self {
        Self {
            kind: TransitionKind::Dim,
            elapsed: 0,
            applied: 0,
        }
    }

    const fn phases(&self) -> u8 {
        match self.kind {
            TransitionKind::Dissolve => 4,
            TransitionKind::Dim => 3,
        }
    }
}

/// The menu engine.
pub struct Ui<K, H>
where
    K: KeyProvider,
    H: UiHooks,
{
    model: MenuModel,
    keys: K,
    hooks: H,
    config: UiConfig,
    monitor: ActionMonitor,
    cursor: CursorTween,
    scroll_bar: ScrollBar,
    layer: usize,
    page_stack: [u16; MAX_LAYER],
    row_stack: [u8; MAX_LAYER],
    row: u8,
    synced_slot: Option<(usize, u16)>,
    modal: Option<ModalKind>,
    transition: Option<Transition>,
    scroll_clock: u16,
    anim_row: u8,
    float_step_seed: f32,
}

impl<K, H> Ui<K, H>
where
    K: KeyProvider,
    H: UiHooks,
{
    /// Builds an engine over a registered model.
    ///
    /// Navigation starts on the first registered page.
    pub fn new(model: MenuModel, keys: K, hooks: H, config: UiConfig) -> Self {
        Self {
            monitor: ActionMonitor::new(),
            cursor: CursorTween::new(),
            scroll_bar: ScrollBar::new(config.scroll_bar),
            layer: 0,
            page_stack: [0; MAX_LAYER],
            row_stack: [0; MAX_LAYER],
            row: 0,
            synced_slot: None,
            modal: None,
            transition: None,
            scroll_clock: 0,
            anim_row: 0,
            float_step_seed: 0.0001,
            model,
            keys,
            hooks,
            config,
        }
    }

    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut MenuModel {
        &mut self.model
    }

    pub fn current_page(&self) -> PageId {
        PageId(self.page_stack[self.layer])
    }

    /// Navigation depth, zero at the root.
    pub fn depth(&self) -> usize {
        self.layer
    }

    pub fn selected_row(&self) -> u8 {
        self.row
    }

    pub fn in_modal(&self) -> bool {
        self.modal.is_some()
    }

    pub fn in_transition(&self) -> bool {
        self.transition.is_some()
    }

    pub fn cursor_mut(&mut self) -> &mut CursorTween {
        &mut self.cursor
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }
}

include!("navigation.rs");
include!("view.rs");
include!("modal.rs");
include!("transition.rs");
