//! The split row controller: three child rows kept in sync with one [`TriValue`].
use crate::focus::FocusBindings;
use crate::form::EditingEvent;
use crate::form::FormDelegate;
use crate::input::InputEvent;
use crate::row::CellState;
use crate::row::FormRow;
use crate::row::RowCell;
use crate::row::RowHeight;
use crate::row::RowKey;
use crate::row::SectionId;
use crate::row::SelectionStyle;
use crate::slot::Slot;
use crate::slot::SlotSet;
use crate::subscription::Inbox;
use crate::subscription::RowNotification;
use crate::subscription::Subscription;
use crate::theme::Theme;
use crate::validation::ValidationError;
use crate::value::TriValue;
use ratatui::layout::Rect;

/// The aggregate value type of a `SplitRow<L, C, R>`.
pub type SplitValue<L, C, R> =
    TriValue<<L as FormRow>::Value, <C as FormRow>::Value, <R as FormRow>::Value>;

#[derive(Clone, Debug)]
pub struct SplitRowOptions {
    /// Share of the row width given to the left slot. Expected in `(0, 1)`; not validated.
    pub left_percentage: f32,
    /// Share of the row width given to the center slot. Expected in `(0, 1)`; not validated.
    pub center_percentage: f32,
    /// Columns taken off each slot's width.
    pub inset: u16,
    /// Height used when a child never reported one.
    pub default_height: u16,
    pub focus: FocusBindings,
    pub theme: Theme,
}

impl Default for SplitRowOptions {
    fn default() -> Self {
        Self {
            left_percentage: 0.3,
            center_percentage: 0.3,
            inset: 1,
            default_height: 1,
            focus: FocusBindings::default(),
            theme: Theme::default(),
        }
    }
}

impl SplitRowOptions {
    pub fn right_percentage(&self) -> f32 {
        1.0 - self.center_percentage - self.left_percentage
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SplitRowError {
    #[error("split row slot `{0}` has no child row")]
    NotConfigured(Slot),
}

/// Object-safe view of a child row, for code that treats the three slots uniformly.
pub trait ErasedRow {
    fn is_disabled(&self) -> bool;
    fn is_highlighted(&self) -> bool;
    fn set_section(&mut self, section: Option<SectionId>);
    fn input(&mut self, event: &InputEvent) -> bool;
    fn cell(&self) -> &dyn RowCell;
    fn cell_mut(&mut self) -> &mut dyn RowCell;
}

impl<T: FormRow> ErasedRow for T {
    fn is_disabled(&self) -> bool {
        FormRow::is_disabled(self)
    }

    fn is_highlighted(&self) -> bool {
        FormRow::is_highlighted(self)
    }

    fn set_section(&mut self, section: Option<SectionId>) {
        FormRow::set_section(self, section);
    }

    fn input(&mut self, event: &InputEvent) -> bool {
        FormRow::input(self, event)
    }

    fn cell(&self) -> &dyn RowCell {
        FormRow::cell(self)
    }

    fn cell_mut(&mut self) -> &mut dyn RowCell {
        FormRow::cell_mut(self)
    }
}

#[derive(Debug)]
struct Child<T> {
    row: T,
    subscription: Subscription,
}

impl<T: FormRow> Child<T> {
    fn attach(slot: Slot, mut row: T, section: Option<SectionId>, inbox: &Inbox) -> Self {
        let subscription = inbox.subscribe(slot);
        row.set_tag(Some(slot));
        FormRow::set_section(&mut row, section);
        row.subscribe(subscription.notifier());
        Self { row, subscription }
    }

    /// Unhooks the row and drops whatever it queued but was never handled.
    fn detach(mut self, inbox: &Inbox) -> T {
        inbox.discard(self.subscription.slot());
        self.row.unsubscribe();
        self.row.set_tag(None);
        self.row
    }

    /// Pushes `next` into the child if it differs. Returns whether a push happened.
    fn push(&mut self, next: Option<&T::Value>, inbox: &Inbox) -> bool {
        if self.row.value() == next {
            return false;
        }
        self.row.set_value(next.cloned());
        // A push the child stored verbatim is not echoed back; a normalized one is.
        if self.row.value() == next {
            inbox.discard_value_changes(self.subscription.slot());
        }
        true
    }
}

/// A form row split into left, center and right child rows.
pub struct SplitRow<L: FormRow, C: FormRow, R: FormRow> {
    key: RowKey,
    left: Option<Child<L>>,
    center: Option<Child<C>>,
    right: Option<Child<R>>,
    value: Option<SplitValue<L, C, R>>,
    value_changed: SlotSet,
    revision: u64,
    section: Option<SectionId>,
    disabled: bool,
    options: SplitRowOptions,
    pub(crate) cell: CellState,
    pub(crate) last_area: Option<Rect>,
    inbox: Inbox,
    editing: Vec<EditingEvent>,
}

impl<L: FormRow, C: FormRow, R: FormRow> SplitRow<L, C, R> {
    pub fn new(key: impl Into<RowKey>) -> Self {
        Self::with_options(key, SplitRowOptions::default())
    }

    pub fn with_options(key: impl Into<RowKey>, options: SplitRowOptions) -> Self {
        Self {
            key: key.into(),
            left: None,
            center: None,
            right: None,
            value: None,
            value_changed: SlotSet::empty(),
            revision: 0,
            section: None,
            disabled: false,
            options,
            cell: CellState::default(),
            last_area: None,
            inbox: Inbox::new(),
            editing: Vec::new(),
        }
    }

    pub fn key(&self) -> &RowKey {
        &self.key
    }

    pub fn options(&self) -> &SplitRowOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: SplitRowOptions) {
        self.options = options;
        self.cell.mark_dirty();
    }

    pub fn left_percentage(&self) -> f32 {
        self.options.left_percentage
    }

    pub fn set_left_percentage(&mut self, percentage: f32) {
        self.options.left_percentage = percentage;
        self.cell.mark_dirty();
    }

    pub fn center_percentage(&self) -> f32 {
        self.options.center_percentage
    }

    pub fn set_center_percentage(&mut self, percentage: f32) {
        self.options.center_percentage = percentage;
        self.cell.mark_dirty();
    }

    pub fn right_percentage(&self) -> f32 {
        self.options.right_percentage()
    }

    pub fn left(&self) -> Option<&L> {
        self.left.as_ref().map(|c| &c.row)
    }

    pub fn center(&self) -> Option<&C> {
        self.center.as_ref().map(|c| &c.row)
    }

    pub fn right(&self) -> Option<&R> {
        self.right.as_ref().map(|c| &c.row)
    }

    /// Puts `row` in the left slot and returns the row it replaced.
    ///
    /// The aggregate's left field is seeded from the new row's value, so this can publish a new
    /// aggregate value.
    pub fn set_left(&mut self, row: L) -> Option<L> {
        let previous = self.left.take().map(|c| c.detach(&self.inbox));
        let child = Child::attach(Slot::Left, row, self.section, &self.inbox);
        let mut value = self.value.clone().unwrap_or_default();
        value.left = child.row.value().cloned();
        self.left = Some(child);
        self.replaced(Slot::Left, value);
        previous
    }

    /// Puts `row` in the center slot and returns the row it replaced.
    pub fn set_center(&mut self, row: C) -> Option<C> {
        let previous = self.center.take().map(|c| c.detach(&self.inbox));
        let child = Child::attach(Slot::Center, row, self.section, &self.inbox);
        let mut value = self.value.clone().unwrap_or_default();
        value.center = child.row.value().cloned();
        self.center = Some(child);
        self.replaced(Slot::Center, value);
        previous
    }

    /// Puts `row` in the right slot and returns the row it replaced.
    pub fn set_right(&mut self, row: R) -> Option<R> {
        let previous = self.right.take().map(|c| c.detach(&self.inbox));
        let child = Child::attach(Slot::Right, row, self.section, &self.inbox);
        let mut value = self.value.clone().unwrap_or_default();
        value.right = child.row.value().cloned();
        self.right = Some(child);
        self.replaced(Slot::Right, value);
        previous
    }

    /// Empties the left slot. The aggregate value keeps its left field.
    pub fn remove_left(&mut self) -> Option<L> {
        let row = self.left.take().map(|c| c.detach(&self.inbox));
        self.cell.mark_dirty();
        row
    }

    pub fn remove_center(&mut self) -> Option<C> {
        let row = self.center.take().map(|c| c.detach(&self.inbox));
        self.cell.mark_dirty();
        row
    }

    pub fn remove_right(&mut self) -> Option<R> {
        let row = self.right.take().map(|c| c.detach(&self.inbox));
        self.cell.mark_dirty();
        row
    }

    /// Runs `f` against the left row, then processes whatever it changed.
    pub fn update_left<T>(&mut self, f: impl FnOnce(&mut L) -> T) -> Option<T> {
        let out = self.left.as_mut().map(|c| f(&mut c.row));
        self.process_notifications();
        out
    }

    pub fn update_center<T>(&mut self, f: impl FnOnce(&mut C) -> T) -> Option<T> {
        let out = self.center.as_mut().map(|c| f(&mut c.row));
        self.process_notifications();
        out
    }

    pub fn update_right<T>(&mut self, f: impl FnOnce(&mut R) -> T) -> Option<T> {
        let out = self.right.as_mut().map(|c| f(&mut c.row));
        self.process_notifications();
        out
    }

    pub fn has_child(&self, slot: Slot) -> bool {
        self.child(slot).is_some()
    }

    /// Whether any child cell or child row is highlighted.
    pub fn is_editing(&self) -> bool {
        Slot::ALL.into_iter().any(|slot| {
            self.child(slot)
                .is_some_and(|child| child.cell().is_highlighted() || child.is_highlighted())
        })
    }

    pub fn child(&self, slot: Slot) -> Option<&dyn ErasedRow> {
        match slot {
            Slot::Left => self.left.as_ref().map(|c| &c.row as &dyn ErasedRow),
            Slot::Center => self.center.as_ref().map(|c| &c.row as &dyn ErasedRow),
            Slot::Right => self.right.as_ref().map(|c| &c.row as &dyn ErasedRow),
        }
    }

    pub fn child_mut(&mut self, slot: Slot) -> Option<&mut dyn ErasedRow> {
        match slot {
            Slot::Left => self.left.as_mut().map(|c| &mut c.row as &mut dyn ErasedRow),
            Slot::Center => self.center.as_mut().map(|c| &mut c.row as &mut dyn ErasedRow),
            Slot::Right => self.right.as_mut().map(|c| &mut c.row as &mut dyn ErasedRow),
        }
    }

    pub fn cell_for(&self, slot: Slot) -> Option<&dyn RowCell> {
        self.child(slot).map(|c| c.cell())
    }

    pub fn cell_for_mut(&mut self, slot: Slot) -> Option<&mut dyn RowCell> {
        self.child_mut(slot).map(|c| c.cell_mut())
    }

    pub fn value(&self) -> Option<&SplitValue<L, C, R>> {
        self.value.as_ref()
    }

    /// Assigns the aggregate value, pushing each field into its child row.
    ///
    /// A slot counts as changed if its field differs from the previous aggregate, or if its child
    /// held a different value and was updated. The value is stored only if some slot changed.
    pub fn set_value(&mut self, value: Option<SplitValue<L, C, R>>) {
        self.assign(value);
        self.process_notifications();
    }

    /// Slots changed by the most recent value assignment.
    pub fn value_changed(&self) -> SlotSet {
        self.value_changed
    }

    /// Number of times the aggregate value has been published.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn section(&self) -> Option<SectionId> {
        self.section
    }

    /// Moves the row and all its children into `section`; children first.
    pub fn set_section(&mut self, section: Option<SectionId>) {
        for slot in Slot::ALL {
            if let Some(child) = self.child_mut(slot) {
                child.set_section(section);
            }
        }
        self.section = section;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.cell.mark_dirty();
    }

    /// Whether the row's own cell is highlighted, ignoring its children.
    pub fn is_self_highlighted(&self) -> bool {
        self.cell.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.cell.highlighted != highlighted {
            self.cell.highlighted = highlighted;
            self.cell.mark_dirty();
        }
    }

    /// Height settled on by the last cell setup, or the default height.
    pub fn preferred_height(&self) -> u16 {
        match self.cell.height {
            Some(RowHeight::Fixed(h)) => h,
            _ => self.options.default_height,
        }
    }

    pub fn needs_redraw(&self) -> bool {
        self.cell.needs_redraw()
    }

    /// Validates all three children and concatenates their errors in slot order.
    ///
    /// Every child is validated even if an earlier one fails.
    pub fn validate(&mut self) -> Result<Vec<ValidationError>, SplitRowError> {
        match (
            self.left.as_mut(),
            self.center.as_mut(),
            self.right.as_mut(),
        ) {
            (Some(left), Some(center), Some(right)) => {
                let mut errors = left.row.validate();
                errors.extend(center.row.validate());
                errors.extend(right.row.validate());
                Ok(errors)
            }
            (None, _, _) => Err(SplitRowError::NotConfigured(Slot::Left)),
            (_, None, _) => Err(SplitRowError::NotConfigured(Slot::Center)),
            (_, _, None) => Err(SplitRowError::NotConfigured(Slot::Right)),
        }
    }

    /// Re-renders this row, then each child without selection highlighting.
    pub fn update_cell(&mut self) {
        self.cell.mark_dirty();
        for slot in Slot::ALL {
            if let Some(cell) = self.cell_for_mut(slot) {
                cell.update();
                cell.set_selection_style(SelectionStyle::None);
            }
        }
    }

    /// Forwards an update to every child cell in slot order.
    pub fn refresh_cells(&mut self) {
        self.cell.mark_dirty();
        for slot in Slot::ALL {
            if let Some(cell) = self.cell_for_mut(slot) {
                cell.update();
            }
        }
    }

    /// Handles every queued child notification.
    ///
    /// Public mutating methods call this before returning; call it yourself after changing a
    /// child through a reference obtained some other way.
    pub fn process_notifications(&mut self) {
        while let Some((slot, notification)) = self.inbox.pop() {
            match notification {
                RowNotification::ValueChanged => self.child_value_changed(slot),
                RowNotification::HighlightChanged => self.child_highlight_changed(slot),
            }
        }
    }

    /// Drains editing transitions recorded since the last call.
    pub fn take_editing_events(&mut self) -> Vec<EditingEvent> {
        std::mem::take(&mut self.editing)
    }

    /// Forwards recorded editing transitions to `form`, in order.
    pub fn dispatch_editing(&mut self, form: &mut dyn FormDelegate) {
        for event in self.take_editing_events() {
            event.dispatch(&self.key, form);
        }
    }

    pub(crate) fn record_editing(&mut self, event: EditingEvent) {
        #[cfg(feature = "tracing")]
        tracing::debug!(row = %self.key, ?event, "split row editing");
        self.editing.push(event);
    }

    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn replaced(&mut self, slot: Slot, value: SplitValue<L, C, R>) {
        #[cfg(feature = "tracing")]
        tracing::debug!(row = %self.key, %slot, "split row child replaced");
        self.cell.mark_dirty();
        self.assign(Some(value));
        self.process_notifications();
    }

    fn assign(&mut self, value: Option<SplitValue<L, C, R>>) -> SlotSet {
        let mut changed = SlotSet::empty();
        let old = self.value.as_ref();
        let new = value.as_ref();
        if old.and_then(|v| v.left.as_ref()) != new.and_then(|v| v.left.as_ref()) {
            changed.insert(Slot::Left);
        }
        if old.and_then(|v| v.center.as_ref()) != new.and_then(|v| v.center.as_ref()) {
            changed.insert(Slot::Center);
        }
        if old.and_then(|v| v.right.as_ref()) != new.and_then(|v| v.right.as_ref()) {
            changed.insert(Slot::Right);
        }

        let pushed = [
            self.left
                .as_mut()
                .is_some_and(|c| c.push(new.and_then(|v| v.left.as_ref()), &self.inbox)),
            self.center
                .as_mut()
                .is_some_and(|c| c.push(new.and_then(|v| v.center.as_ref()), &self.inbox)),
            self.right
                .as_mut()
                .is_some_and(|c| c.push(new.and_then(|v| v.right.as_ref()), &self.inbox)),
        ];
        for (slot, pushed) in Slot::ALL.into_iter().zip(pushed) {
            if pushed {
                changed.insert(slot);
            }
        }

        self.value_changed = changed;
        if !changed.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::debug!(row = %self.key, ?changed, "split row value published");
            self.value = value;
            self.revision += 1;
            self.cell.mark_dirty();
        }
        changed
    }

    fn child_value_changed(&mut self, slot: Slot) {
        // Refreshes all three cells even though only one changed.
        self.refresh_cells();

        let mut value = self.value.clone().unwrap_or_default();
        match slot {
            Slot::Left => value.left = self.left.as_ref().and_then(|c| c.row.value().cloned()),
            Slot::Center => {
                value.center = self.center.as_ref().and_then(|c| c.row.value().cloned())
            }
            Slot::Right => value.right = self.right.as_ref().and_then(|c| c.row.value().cloned()),
        }
        self.assign(Some(value));
    }

    /// Any child cell or child row highlighted keeps the editing session open, so focus moving
    /// between children reads as one session.
    fn child_highlight_changed(&mut self, slot: Slot) {
        if !self.has_child(slot) {
            return;
        }
        self.record_editing(if self.is_editing() {
            EditingEvent::Began
        } else {
            EditingEvent::Ended
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::CheckRow;
    use crate::fields::StepperRow;
    use crate::fields::TextRow;
    use crate::validation;

    type Row = SplitRow<StepperRow, TextRow, CheckRow>;

    fn filled() -> Row {
        let mut row = Row::new("dims");
        row.set_left(StepperRow::new().with_value(5));
        row.set_center(TextRow::new().with_value("x"));
        row.set_right(CheckRow::new("ok").with_value(true));
        row
    }

    #[test]
    fn right_percentage_is_derived() {
        let mut row = Row::new("dims");
        row.set_left_percentage(0.3);
        row.set_center_percentage(0.3);
        assert!((row.right_percentage() - 0.4).abs() < 1e-6);
        row.set_left_percentage(0.5);
        assert!((row.right_percentage() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn setting_children_seeds_the_aggregate() {
        let row = filled();
        let value = row.value().cloned().unwrap_or_default();
        assert_eq!(value.left, Some(5));
        assert_eq!(value.center.as_deref(), Some("x"));
        assert_eq!(value.right, Some(true));
        assert_eq!(row.left().and_then(|r| r.tag()), Some(Slot::Left));
        assert_eq!(row.center().and_then(|r| r.tag()), Some(Slot::Center));
        assert_eq!(row.right().and_then(|r| r.tag()), Some(Slot::Right));
    }

    #[test]
    fn child_edit_republishes_aggregate() {
        let mut row = filled();
        row.update_left(|left| left.set_value(Some(7)));
        let value = row.value().cloned().unwrap_or_default();
        assert_eq!(value.left, Some(7));
        assert_eq!(value.center.as_deref(), Some("x"));
        assert_eq!(value.right, Some(true));
        assert_eq!(row.value_changed().iter().collect::<Vec<_>>(), vec![Slot::Left]);
    }

    #[test]
    fn set_value_pushes_into_children() {
        let mut row = filled();
        let before = row.revision();
        row.set_value(Some(TriValue::new(Some(1), Some("y".to_string()), Some(true))));
        assert_eq!(row.left().and_then(|r| r.value()), Some(&1));
        assert_eq!(row.center().and_then(|r| r.value()).map(String::as_str), Some("y"));
        let changed: Vec<_> = row.value_changed().iter().collect();
        assert_eq!(changed, vec![Slot::Left, Slot::Center]);
        assert_eq!(row.revision(), before + 1);
    }

    #[test]
    fn identical_value_is_not_republished() {
        let mut row = filled();
        let before = row.revision();
        let same = row.value().cloned();
        row.set_value(same);
        assert!(row.value_changed().is_empty());
        assert_eq!(row.revision(), before);
    }

    #[test]
    fn center_only_change_is_tracked_despite_equality() {
        let mut row = filled();
        let old = row.value().cloned().unwrap_or_default();
        let mut new = old.clone();
        new.center = Some("z".to_string());
        assert_eq!(old, new);
        row.set_value(Some(new));
        assert_eq!(row.value_changed().iter().collect::<Vec<_>>(), vec![Slot::Center]);
        assert_eq!(
            row.value().and_then(|v| v.center.as_deref()),
            Some("z")
        );
    }

    #[test]
    fn normalized_push_flows_back_into_aggregate() {
        let mut row = filled();
        row.set_left(StepperRow::new().with_value(5).with_bounds(0, 10));
        row.set_value(Some(TriValue::new(Some(50), Some("x".to_string()), Some(true))));
        assert_eq!(row.left().and_then(|r| r.value()), Some(&10));
        assert_eq!(row.value().and_then(|v| v.left), Some(10));
    }

    #[test]
    fn replacing_a_child_severs_its_subscription() {
        let mut row = filled();
        let old = row.set_left(StepperRow::new().with_value(2));
        let mut old = old.unwrap_or_default();
        assert_eq!(old.tag(), None);
        assert_eq!(row.value().and_then(|v| v.left), Some(2));

        old.set_value(Some(99));
        row.process_notifications();
        assert_eq!(row.value().and_then(|v| v.left), Some(2));
    }

    #[test]
    fn section_propagates_to_children() {
        let mut row = filled();
        row.set_section(Some(SectionId(3)));
        assert_eq!(row.section(), Some(SectionId(3)));
        assert_eq!(row.left().and_then(|r| r.section()), Some(SectionId(3)));
        assert_eq!(row.center().and_then(|r| r.section()), Some(SectionId(3)));
        assert_eq!(row.right().and_then(|r| r.section()), Some(SectionId(3)));
    }

    #[test]
    fn validate_reports_missing_slot() {
        let mut row = Row::new("dims");
        row.set_left(StepperRow::new());
        assert_eq!(
            row.validate(),
            Err(SplitRowError::NotConfigured(Slot::Center))
        );
        assert_eq!(
            SplitRowError::NotConfigured(Slot::Center).to_string(),
            "split row slot `center` has no child row"
        );
    }

    #[test]
    fn validate_concatenates_in_slot_order() {
        let mut row = Row::new("dims");
        row.set_left(StepperRow::new().with_rule(validation::required("width")));
        row.set_center(
            TextRow::new()
                .with_rule(validation::required("unit"))
                .with_rule(validation::check("short", |s: &String| s.len() < 3)),
        );
        row.set_right(CheckRow::new("ok").with_rule(validation::required("ok")));
        let messages: Vec<_> = row
            .validate()
            .unwrap_or_default()
            .into_iter()
            .map(|e| e.message)
            .collect();
        assert_eq!(messages, vec!["width", "unit", "ok"]);
    }

    #[test]
    fn update_cell_marks_row_dirty() {
        let mut row = Row::new("dims");
        assert!(!row.needs_redraw());
        row.update_cell();
        assert!(row.needs_redraw());
    }
}
