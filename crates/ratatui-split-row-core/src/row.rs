//! The row and cell contracts a child must satisfy to occupy a split row slot.
use crate::input::InputEvent;
use crate::slot::Slot;
use crate::subscription::Notifier;
use crate::validation::ValidationError;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::fmt;

/// Tab order direction: `Down` is "next field", `Up` is "previous field".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
}

/// A cell's reported height, in terminal rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowHeight {
    /// Sized by content; cannot be compared with fixed heights.
    Automatic,
    Fixed(u16),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionStyle {
    #[default]
    Default,
    None,
}

/// Non-owning reference to the form section a row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SectionId(pub usize);

/// Identifies a row to the enclosing form.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RowKey(String);

impl RowKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RowKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The view half of a row.
pub trait RowCell {
    fn is_highlighted(&self) -> bool;

    /// `None` means the cell never reported a height.
    fn height(&self) -> Option<RowHeight>;

    fn set_height(&mut self, height: Option<RowHeight>);

    fn can_become_first_responder(&self) -> bool;

    /// Whether this cell currently holds the focused input.
    fn is_first_responder(&self) -> bool;

    fn become_first_responder(&mut self, direction: Direction) -> bool;

    fn resign_first_responder(&mut self) -> bool;

    fn set_selection_style(&mut self, style: SelectionStyle);

    fn setup(&mut self) {}

    fn update(&mut self) {}

    fn render(&self, area: Rect, buf: &mut Buffer);

    fn cursor_pos(&self, _area: Rect) -> Option<(u16, u16)> {
        None
    }
}

/// A form field that can sit in a split row slot.
///
/// Implementations must notify their subscriber (see [`FormRow::subscribe`]) whenever their value
/// actually changes or their highlight state flips, regardless of who caused the change.
pub trait FormRow {
    type Value: Clone + PartialEq + fmt::Debug;
    type Cell: RowCell;

    fn value(&self) -> Option<&Self::Value>;

    fn set_value(&mut self, value: Option<Self::Value>);

    fn tag(&self) -> Option<Slot>;

    fn set_tag(&mut self, tag: Option<Slot>);

    fn is_disabled(&self) -> bool;

    fn is_highlighted(&self) -> bool;

    fn section(&self) -> Option<SectionId>;

    fn set_section(&mut self, section: Option<SectionId>);

    /// Installs the value-change and highlight-change subscriptions.
    fn subscribe(&mut self, notifier: Notifier);

    fn unsubscribe(&mut self);

    fn validate(&mut self) -> Vec<ValidationError>;

    /// Handles an input event while focused. Returns `true` if the event was consumed.
    fn input(&mut self, event: &InputEvent) -> bool;

    fn cell(&self) -> &Self::Cell;

    fn cell_mut(&mut self) -> &mut Self::Cell;
}

/// Bookkeeping shared by most cells.
#[derive(Clone, Debug, Default)]
pub struct CellState {
    pub highlighted: bool,
    pub focused: bool,
    pub height: Option<RowHeight>,
    pub selection_style: SelectionStyle,
    needs_redraw: bool,
}

impl CellState {
    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns whether a redraw was pending and clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
