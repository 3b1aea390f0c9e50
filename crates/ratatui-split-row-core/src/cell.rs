//! The view half of a split row: layout, focus traversal and input routing.
use crate::focus;
use crate::focus::FocusMove;
use crate::form::EditingEvent;
use crate::input::InputEvent;
use crate::input::MouseButton;
use crate::render;
use crate::row::Direction;
use crate::row::FormRow;
use crate::row::RowHeight;
use crate::row::SelectionStyle;
use crate::slot::Slot;
use crate::split_row::SplitRow;
use crate::split_row::SplitRowOptions;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SplitRowAction {
    None,
    Redraw,
    /// The aggregate value was republished.
    Changed,
    /// Focus left the row; the form should move to the neighbouring row.
    FocusEscaped(Direction),
}

/// Areas of the three slot containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SplitRowLayout {
    pub left: Rect,
    pub center: Rect,
    pub right: Rect,
}

impl SplitRowLayout {
    /// Left pinned to the left edge, right pinned to the right edge, center centered.
    ///
    /// Each width is its share of `area.width` minus the inset.
    pub fn compute(area: Rect, options: &SplitRowOptions) -> Self {
        let width_for = |percentage: f32| -> u16 {
            let cols = (percentage * area.width as f32).round().max(0.0) as u16;
            cols.saturating_sub(options.inset).min(area.width)
        };
        let left_w = width_for(options.left_percentage);
        let center_w = width_for(options.center_percentage);
        let right_w = width_for(options.right_percentage());

        Self {
            left: Rect::new(area.x, area.y, left_w, area.height),
            center: Rect::new(
                area.x + (area.width - center_w) / 2,
                area.y,
                center_w,
                area.height,
            ),
            right: Rect::new(area.x + (area.width - right_w), area.y, right_w, area.height),
        }
    }

    pub fn get(&self, slot: Slot) -> Rect {
        match slot {
            Slot::Left => self.left,
            Slot::Center => self.center,
            Slot::Right => self.right,
        }
    }

    pub fn slot_at(&self, x: u16, y: u16) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| {
            let r = self.get(*slot);
            x >= r.x && x < r.x + r.width && y >= r.y && y < r.y + r.height
        })
    }
}

/// A split row bound to its view for one render/input cycle.
///
/// The cell borrows the row; build a fresh one whenever the row is drawn or receives input.
pub struct SplitRowCell<'r, L: FormRow, C: FormRow, R: FormRow> {
    row: &'r mut SplitRow<L, C, R>,
    shared_height: Option<u16>,
}

impl<'r, L: FormRow, C: FormRow, R: FormRow> SplitRowCell<'r, L, C, R> {
    pub fn new(row: &'r mut SplitRow<L, C, R>) -> Self {
        let shared_height = match row.cell.height {
            Some(RowHeight::Fixed(h)) => Some(h),
            _ => None,
        };
        Self {
            row,
            shared_height,
        }
    }

    pub fn row(&self) -> &SplitRow<L, C, R> {
        &*self.row
    }

    pub fn row_mut(&mut self) -> &mut SplitRow<L, C, R> {
        &mut *self.row
    }

    pub fn shared_height(&self) -> Option<u16> {
        self.shared_height
    }

    /// Settles the shared height and sets up each child cell present.
    ///
    /// Only the left and right children are forced to the shared height.
    pub fn setup(&mut self) {
        self.row.cell.selection_style = SelectionStyle::None;

        let shared = self.compute_shared_height();
        if let Some(h) = shared {
            self.row.cell.height = Some(RowHeight::Fixed(h));
            for slot in [Slot::Left, Slot::Right] {
                if let Some(cell) = self.row.cell_for_mut(slot) {
                    cell.set_height(Some(RowHeight::Fixed(h)));
                }
            }
        }
        self.shared_height = shared;

        for slot in Slot::ALL {
            if let Some(cell) = self.row.cell_for_mut(slot) {
                cell.setup();
            }
        }
        self.row.cell.mark_dirty();
    }

    /// Forwards an update to every child cell.
    pub fn update(&mut self) {
        self.row.refresh_cells();
    }

    pub fn layout(&self, area: Rect) -> SplitRowLayout {
        SplitRowLayout::compute(area, self.row.options())
    }

    /// The row's own highlight or any child's.
    pub fn is_highlighted(&self) -> bool {
        self.row.is_self_highlighted()
            || Slot::ALL
                .into_iter()
                .any(|slot| self.row.cell_for(slot).is_some_and(|c| c.is_highlighted()))
    }

    pub fn is_first_responder(&self) -> bool {
        self.focused_slot().is_some()
    }

    pub fn focused_slot(&self) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| self.is_focused(*slot))
    }

    /// Whether focus can land on this row.
    ///
    /// With no child focused, any capable child qualifies. Once a child holds focus, the answer
    /// comes from the first unfocused child in slot order.
    pub fn can_become_first_responder(&self) -> bool {
        if self.row.is_disabled() {
            return false;
        }
        let left = self.is_focused(Slot::Left);
        let center = self.is_focused(Slot::Center);
        let right = self.is_focused(Slot::Right);

        if !left && !center && !right {
            return Slot::ALL.into_iter().any(|slot| self.is_capable(slot));
        }
        if !left {
            return self.is_capable(Slot::Left);
        }
        if !center {
            return self.is_capable(Slot::Center);
        }
        if !right {
            return self.is_capable(Slot::Right);
        }
        false
    }

    /// Gives focus to the first eligible child for `direction`.
    ///
    /// `Down` tries left, center, right. `Up` tries right, then left; the center is never
    /// entered from below.
    pub fn become_first_responder(&mut self, direction: Direction) -> bool {
        let candidates: &[Slot] = match direction {
            Direction::Down => &[Slot::Left, Slot::Center, Slot::Right],
            Direction::Up => &[Slot::Right, Slot::Left],
        };
        let target = candidates
            .iter()
            .copied()
            .find(|slot| !self.is_focused(*slot) && self.is_capable(*slot));

        let became = target.is_some_and(|slot| self.transfer_focus(slot, direction));
        if became {
            self.row.record_editing(EditingEvent::Began);
        }
        self.row.process_notifications();
        became
    }

    /// Asks every child to resign. Succeeds only if all three do.
    pub fn resign_first_responder(&mut self) -> bool {
        let results = Slot::ALL.map(|slot| {
            self.row
                .cell_for_mut(slot)
                .is_some_and(|cell| cell.resign_first_responder())
        });
        let resigned = results.iter().all(|ok| *ok);

        #[cfg(feature = "tracing")]
        tracing::debug!(row = %self.row.key(), ?results, resigned, "split row resign");

        if resigned {
            self.row.record_editing(EditingEvent::Ended);
        }
        self.row.process_notifications();
        resigned
    }

    /// Moves focus to the next capable slot after the focused one, or leaves the row.
    pub fn move_focus(&mut self, direction: Direction) -> FocusMove {
        let current = self.focused_slot();
        for slot in focus::traversal(direction, current) {
            if self.is_capable(slot) && self.transfer_focus(slot, direction) {
                if current.is_none() {
                    self.row.record_editing(EditingEvent::Began);
                }
                self.row.process_notifications();
                return FocusMove::Moved(slot);
            }
        }
        if current.is_some() {
            self.resign_first_responder();
        }
        FocusMove::Escaped(direction)
    }

    /// Focuses `slot` directly, e.g. after a click.
    pub fn focus_slot(&mut self, slot: Slot) -> bool {
        if self.is_focused(slot) {
            return true;
        }
        if !self.is_capable(slot) {
            return false;
        }
        let entering = !self.is_first_responder();
        let became = self.transfer_focus(slot, Direction::Down);
        if became && entering {
            self.row.record_editing(EditingEvent::Began);
        }
        self.row.process_notifications();
        became
    }

    pub fn input(&mut self, event: &InputEvent) -> SplitRowAction {
        match event {
            InputEvent::Key(key) => {
                if let Some(direction) = self.row.options().focus.direction_for(key) {
                    return match self.move_focus(direction) {
                        FocusMove::Moved(_) => SplitRowAction::Redraw,
                        FocusMove::Escaped(direction) => SplitRowAction::FocusEscaped(direction),
                    };
                }
            }
            InputEvent::Mouse(mouse) => {
                if mouse.button != MouseButton::Left {
                    return SplitRowAction::None;
                }
                let Some(area) = self.row.last_area else {
                    return SplitRowAction::None;
                };
                return match self.layout(area).slot_at(mouse.x, mouse.y) {
                    Some(slot) if self.focus_slot(slot) => SplitRowAction::Redraw,
                    _ => SplitRowAction::None,
                };
            }
            InputEvent::Paste(_) => {}
        }

        let Some(slot) = self.focused_slot() else {
            return SplitRowAction::None;
        };
        let revision = self.row.revision();
        let consumed = self
            .row
            .child_mut(slot)
            .is_some_and(|child| child.input(event));
        self.row.process_notifications();

        if self.row.revision() != revision {
            SplitRowAction::Changed
        } else if consumed {
            SplitRowAction::Redraw
        } else {
            SplitRowAction::None
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "split_row_render",
            row = %self.row.key(),
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        if area.width == 0 || area.height == 0 {
            return;
        }
        self.row.last_area = Some(area);

        let theme = &self.row.options().theme;
        let style = if self.is_highlighted() {
            theme.text.patch(theme.highlighted)
        } else {
            theme.text
        };
        render::clear_area(area, buf, style);

        let layout = self.layout(area);
        for slot in Slot::ALL {
            if let Some(cell) = self.row.cell_for(slot) {
                cell.render(layout.get(slot), buf);
            }
        }
        self.row.cell.take_redraw();
    }

    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let slot = self.focused_slot()?;
        let cell = self.row.cell_for(slot)?;
        cell.cursor_pos(self.layout(area).get(slot))
    }

    fn compute_shared_height(&self) -> Option<u16> {
        let default = RowHeight::Fixed(self.row.options().default_height);
        let height_of = |slot: Slot| {
            self.row
                .cell_for(slot)
                .and_then(|c| c.height())
                .unwrap_or(default)
        };
        match (height_of(Slot::Left), height_of(Slot::Right)) {
            (RowHeight::Fixed(a), RowHeight::Fixed(b)) => Some(a.max(b)),
            (RowHeight::Fixed(h), RowHeight::Automatic)
            | (RowHeight::Automatic, RowHeight::Fixed(h)) => Some(h),
            (RowHeight::Automatic, RowHeight::Automatic) => None,
        }
    }

    fn is_focused(&self, slot: Slot) -> bool {
        self.row
            .cell_for(slot)
            .is_some_and(|c| c.is_first_responder())
    }

    fn is_capable(&self, slot: Slot) -> bool {
        self.row
            .child(slot)
            .is_some_and(|child| !child.is_disabled() && child.cell().can_become_first_responder())
    }

    /// Hands focus to `slot`. Other children keep their focus unless `slot` accepts it.
    fn transfer_focus(&mut self, slot: Slot, direction: Direction) -> bool {
        let became = self
            .row
            .cell_for_mut(slot)
            .is_some_and(|cell| cell.become_first_responder(direction));

        #[cfg(feature = "tracing")]
        tracing::debug!(row = %self.row.key(), %slot, ?direction, became, "split row focus");

        if became {
            for other in Slot::ALL {
                if other != slot && self.is_focused(other) {
                    if let Some(cell) = self.row.cell_for_mut(other) {
                        cell.resign_first_responder();
                    }
                }
            }
        }
        became
    }
}
