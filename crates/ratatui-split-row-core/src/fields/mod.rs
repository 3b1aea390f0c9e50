//! Ready-made child rows for split row slots.

/// Expands to the `FormRow` methods that forward to a `base: RowBase<_>` field.
macro_rules! forward_row_base {
    () => {
        fn value(&self) -> Option<&Self::Value> {
            self.base.value()
        }

        fn tag(&self) -> Option<crate::slot::Slot> {
            self.base.tag()
        }

        fn set_tag(&mut self, tag: Option<crate::slot::Slot>) {
            self.base.set_tag(tag);
        }

        fn is_disabled(&self) -> bool {
            self.base.is_disabled()
        }

        fn is_highlighted(&self) -> bool {
            self.base.is_highlighted()
        }

        fn section(&self) -> Option<crate::row::SectionId> {
            self.base.section()
        }

        fn set_section(&mut self, section: Option<crate::row::SectionId>) {
            self.base.set_section(section);
        }

        fn subscribe(&mut self, notifier: crate::subscription::Notifier) {
            self.base.subscribe(notifier);
        }

        fn unsubscribe(&mut self) {
            self.base.unsubscribe();
        }

        fn validate(&mut self) -> Vec<crate::validation::ValidationError> {
            self.base.validate()
        }

        fn cell(&self) -> &Self::Cell {
            self
        }

        fn cell_mut(&mut self) -> &mut Self::Cell {
            self
        }
    };
}

/// Expands to the `RowCell` methods that forward to a `base: RowBase<_>` field.
macro_rules! forward_cell_base {
    () => {
        fn is_highlighted(&self) -> bool {
            self.base.cell.highlighted
        }

        fn height(&self) -> Option<crate::row::RowHeight> {
            self.base.cell.height
        }

        fn set_height(&mut self, height: Option<crate::row::RowHeight>) {
            self.base.cell.height = height;
        }

        fn can_become_first_responder(&self) -> bool {
            self.base.can_focus()
        }

        fn is_first_responder(&self) -> bool {
            self.base.cell.focused
        }

        fn become_first_responder(&mut self, _direction: crate::row::Direction) -> bool {
            self.base.focus()
        }

        fn resign_first_responder(&mut self) -> bool {
            self.base.blur()
        }

        fn set_selection_style(&mut self, style: crate::row::SelectionStyle) {
            self.base.cell.selection_style = style;
        }

        fn update(&mut self) {
            self.base.cell.mark_dirty();
        }
    };
}

pub(crate) use forward_cell_base;
pub(crate) use forward_row_base;

pub mod base;
pub mod check;
pub mod stepper;
pub mod text;

pub use base::RowBase;
pub use check::CheckRow;
pub use stepper::StepperRow;
pub use text::TextInput;
pub use text::TextRow;
