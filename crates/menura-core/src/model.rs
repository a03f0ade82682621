//! Menu model: pages and items held in index-stable arenas.
//!
//! Hosts describe their menu tree once at startup. Pages and items are
//! appended into fixed-capacity arenas and addressed by the integer
//! handles returned at registration, so the engine never chases pointers
//! and the whole model is `'static`-friendly.

use heapless::Vec;

/// Upper bound on registered pages.
pub const MAX_PAGES: usize = 16;
/// Upper bound on items per page.
pub const MAX_ITEMS_PER_PAGE: usize = 32;

/// Handle to a registered page.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageId(pub u16);

/// Handle to a registered item: page plus slot index within it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ItemId {
    pub page: PageId,
    pub index: u8,
}

/// Registration failures surfaced to the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ModelError {
    /// The page arena is full.
    PageArenaFull,
    /// The target page's item arena is full.
    ItemArenaFull,
    /// The page handle does not name a registered page.
    UnknownPage,
}

/// How a page's tick is produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PageKind {
    /// Engine-rendered scrolling item list.
    List,
    /// Host-rendered page driven through [`UiHooks::custom_page`].
    ///
    /// [`UiHooks::custom_page`]: crate::ui::UiHooks::custom_page
    Custom,
}

/// A numeric payload carried by progress and value-editor items.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Unsigned(u32),
    Signed(i32),
    Float(f32),
}

impl Number {
    pub fn as_f32(self) -> f32 {
        match self {
            Number::Unsigned(v) => v as f32,
            Number::Signed(v) => v as f32,
            Number::Float(v) => v,
        }
    }
}

/// Editable number with its commit and registration snapshots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueSlot {
    pub value: Number,
    backup: Number,
    default: Number,
}

impl ValueSlot {
    fn new(value: Number) -> Self {
        Self {
            value,
            backup: value,
            default: value,
        }
    }

    /// Last committed value, restored when an edit is abandoned.
    pub fn backup(&self) -> Number {
        self.backup
    }

    /// Value captured at registration.
    pub fn default_value(&self) -> Number {
        self.default
    }

    pub(crate) fn commit(&mut self) {
        self.backup = self.value;
    }

    pub(crate) fn revert(&mut self) {
        self.value = self.backup;
    }
}

/// Item payload the host hands to [`MenuModel::add_item`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemSpec {
    /// Inert caption row.
    Label,
    /// Descends into another page when clicked.
    Jump(PageId),
    /// ON/OFF toggle.
    Switch(bool),
    /// Boxed check mark toggle.
    Checkbox(bool),
    /// Mutually exclusive check mark within its page.
    Radio(bool),
    /// Read-only percentage, expanded into a modal bar when clicked.
    Progress(f32),
    /// Opens the modal value editor when clicked.
    Value(Number),
    /// Opens a modal message box when clicked.
    Message(&'static str),
    /// Clicking hands the tick to [`UiHooks::custom_item`].
    ///
    /// [`UiHooks::custom_item`]: crate::ui::UiHooks::custom_item
    Custom,
}

/// Item payload plus the per-kind state the engine tracks for it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ItemKind {
    Label,
    Jump { target: PageId },
    Switch { on: bool, default_on: bool },
    Checkbox { on: bool, default_on: bool },
    Radio { on: bool, default_on: bool },
    Progress { percent: f32 },
    Value { slot: ValueSlot },
    Message { text: &'static str },
    Custom,
}

impl ItemKind {
    fn from_spec(spec: ItemSpec) -> Self {
        match spec {
            ItemSpec::Label => ItemKind::Label,
            ItemSpec::Jump(target) => ItemKind::Jump { target },
            ItemSpec::Switch(on) => ItemKind::Switch { on, default_on: on },
            ItemSpec::Checkbox(on) => ItemKind::Checkbox { on, default_on: on },
            ItemSpec::Radio(on) => ItemKind::Radio { on, default_on: on },
            ItemSpec::Progress(percent) => ItemKind::Progress { percent },
            ItemSpec::Value(value) => ItemKind::Value {
                slot: ValueSlot::new(value),
            },
            ItemSpec::Message(text) => ItemKind::Message { text },
            ItemSpec::Custom => ItemKind::Custom,
        }
    }
}

/// One registered menu row.
///
/// `line` is the item's row slot relative to the page viewport and
/// `position` the vertical pixel it is currently drawn at; both are
/// engine-owned animation state.
#[derive(Clone, Copy, Debug)]
pub struct Item {
    pub(crate) id: u8,
    pub(crate) line: i16,
    pub(crate) position: i16,
    pub(crate) position_accum: f32,
    pub(crate) anim_step: f32,
    pub title: &'static str,
    pub kind: ItemKind,
}

impl Item {
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Toggle state for switch, checkbox and radio items.
    pub fn flag(&self) -> Option<bool> {
        match self.kind {
            ItemKind::Switch { on, .. }
            | ItemKind::Checkbox { on, .. }
            | ItemKind::Radio { on, .. } => Some(on),
            _ => None,
        }
    }

    /// Sets the toggle state. Returns `false` for non-toggle items.
    pub fn set_flag(&mut self, value: bool) -> bool {
        match &mut self.kind {
            ItemKind::Switch { on, .. }
            | ItemKind::Checkbox { on, .. }
            | ItemKind::Radio { on, .. } => {
                *on = value;
                true
            }
            _ => false,
        }
    }

    /// Current number of a value-editor item.
    pub fn value(&self) -> Option<Number> {
        match self.kind {
            ItemKind::Value { slot } => Some(slot.value),
            _ => None,
        }
    }

    /// Overwrites a value-editor item's number. Returns `false` otherwise.
    pub fn set_value(&mut self, value: Number) -> bool {
        match &mut self.kind {
            ItemKind::Value { slot } => {
                slot.value = value;
                true
            }
            _ => false,
        }
    }

    pub fn percent(&self) -> Option<f32> {
        match self.kind {
            ItemKind::Progress { percent } => Some(percent),
            _ => None,
        }
    }

    /// Updates a progress item's percentage. Returns `false` otherwise.
    pub fn set_percent(&mut self, value: f32) -> bool {
        match &mut self.kind {
            ItemKind::Progress { percent } => {
                *percent = value;
                true
            }
            _ => false,
        }
    }
}

/// A registered page and its items.
#[derive(Clone, Debug)]
pub struct Page {
    pub(crate) id: u16,
    pub kind: PageKind,
    pub(crate) items: Vec<Item, MAX_ITEMS_PER_PAGE>,
}

impl Page {
    pub fn id(&self) -> PageId {
        PageId(self.id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Highest item id on the page, `None` when empty.
    pub fn last_id(&self) -> Option<u8> {
        self.items.last().map(|item| item.id)
    }
}

/// The menu tree. Page ids index the arena directly.
#[derive(Clone, Debug, Default)]
pub struct MenuModel {
    pages: Vec<Page, MAX_PAGES>,
}

impl MenuModel {
    pub const fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Registers a page and returns its handle.
    pub fn add_page(&mut self, kind: PageKind) -> Result<PageId, ModelError> {
        let id = self.pages.len() as u16;
        self.pages
            .push(Page {
                id,
                kind,
                items: Vec::new(),
            })
            .map_err(|_| ModelError::PageArenaFull)?;
        Ok(PageId(id))
    }

    /// Registers an item on `page`.
    ///
    /// Item ids are assigned sequentially from zero in registration
    /// order and double as the item's initial row slot. Toggle and
    /// numeric payloads are snapshotted here as the item defaults.
    pub fn add_item(
        &mut self,
        page: PageId,
        title: &'static str,
        spec: ItemSpec,
    ) -> Result<ItemId, ModelError> {
        let slot = self.page_mut(page).ok_or(ModelError::UnknownPage)?;
        let id = slot.items.len() as u8;
        slot.items
            .push(Item {
                id,
                line: id as i16,
                position: 0,
                position_accum: 0.0,
                anim_step: 0.0,
                title,
                kind: ItemKind::from_spec(spec),
            })
            .map_err(|_| ModelError::ItemArenaFull)?;
        Ok(ItemId { page, index: id })
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.get(id.0 as usize)
    }

    pub(crate) fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.get_mut(id.0 as usize)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.page(id.page)?.items.get(id.index as usize)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.page_mut(id.page)?.items.get_mut(id.index as usize)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_and_item_ids_are_sequential() {
        let mut model = MenuModel::new();
        let root = model.add_page(PageKind::List).unwrap();
        let second = model.add_page(PageKind::Custom).unwrap();
        assert_eq!(root, PageId(0));
        assert_eq!(second, PageId(1));

        let a = model.add_item(root, "First", ItemSpec::Label).unwrap();
        let b = model.add_item(root, "Second", ItemSpec::Switch(true)).unwrap();
        assert_eq!(a.index, 0);
        assert_eq!(b.index, 1);
        assert_eq!(model.page(root).unwrap().last_id(), Some(1));
    }

    #[test]
    fn registration_snapshots_defaults() {
        let mut model = MenuModel::new();
        let page = model.add_page(PageKind::List).unwrap();
        let value = model
            .add_item(page, "Gain", ItemSpec::Value(Number::Signed(-3)))
            .unwrap();
        let toggle = model
            .add_item(page, "Mute", ItemSpec::Checkbox(true))
            .unwrap();

        let item = model.item_mut(value).unwrap();
        item.set_value(Number::Signed(7));
        match item.kind {
            ItemKind::Value { slot } => {
                assert_eq!(slot.value, Number::Signed(7));
                assert_eq!(slot.backup(), Number::Signed(-3));
                assert_eq!(slot.default_value(), Number::Signed(-3));
            }
            _ => panic!("expected value item"),
        }

        let item = model.item_mut(toggle).unwrap();
        item.set_flag(false);
        match item.kind {
            ItemKind::Checkbox { on, default_on } => {
                assert!(!on);
                assert!(default_on);
            }
            _ => panic!("expected checkbox item"),
        }
    }

    #[test]
    fn arena_exhaustion_is_reported() {
        let mut model = MenuModel::new();
        for _ in 0..MAX_PAGES {
            model.add_page(PageKind::List).unwrap();
        }
        assert_eq!(model.add_page(PageKind::List), Err(ModelError::PageArenaFull));

        let page = PageId(0);
        for _ in 0..MAX_ITEMS_PER_PAGE {
            model.add_item(page, "Row", ItemSpec::Label).unwrap();
        }
        assert_eq!(
            model.add_item(page, "Row", ItemSpec::Label),
            Err(ModelError::ItemArenaFull)
        );
        assert_eq!(
            model.add_item(PageId(99), "Row", ItemSpec::Label),
            Err(ModelError::UnknownPage)
        );
    }

    #[test]
    fn kind_accessors_reject_mismatched_items() {
        let mut model = MenuModel::new();
        let page = model.add_page(PageKind::List).unwrap();
        let label = model.add_item(page, "About", ItemSpec::Label).unwrap();
        let progress = model
            .add_item(page, "Upload", ItemSpec::Progress(42.0))
            .unwrap();

        assert_eq!(model.item(label).unwrap().flag(), None);
        assert!(!model.item_mut(label).unwrap().set_percent(10.0));
        assert_eq!(model.item(progress).unwrap().percent(), Some(42.0));
        assert!(model.item_mut(progress).unwrap().set_percent(55.5));
        assert_eq!(model.item(progress).unwrap().percent(), Some(55.5));
    }
}
