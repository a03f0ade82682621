#![cfg_attr(not(test), no_std)]

//! Menu navigation and animation engine for small paged monochrome
//! panels.
//!
//! Hosts register a tree of pages and items into a [`MenuModel`], then
//! hand it to a [`Ui`] together with a key provider and optional
//! custom-surface hooks. Each call to [`Ui::tick`] polls the keys,
//! advances the cursor glide, row scroll and scroll indicator, redraws
//! the caller's [`FrameBuffer`] and reports whether the panel needs a
//! flush. Rendering goes through the `ssd1317` rasterizer.

pub mod cursor;
pub mod input;
pub mod model;
pub mod scrollbar;
pub mod ui;

pub use cursor::{pack_identity, CursorRect, CursorTween, CURSOR_IDENTITY_UNSET};
pub use input::{ActionMonitor, Actions, KeyProvider, KeySnapshot, KeyState, MockKeys};
pub use model::{
    Item, ItemId, ItemKind, ItemSpec, MenuModel, ModelError, Number, Page, PageId, PageKind,
    ValueSlot,
};
pub use scrollbar::{ScrollBar, ScrollBarConfig};
pub use ui::{
    draw_checkbox, draw_corner_brackets, HookFlow, ModalFlow, TickResult, Ui, UiConfig, UiHooks,
};

pub use ssd1317::{DrawMode, DrawSurface, Font, FrameBuffer, Painter};
