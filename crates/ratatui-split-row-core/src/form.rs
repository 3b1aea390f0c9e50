use crate::row::RowKey;

/// The enclosing form, as seen by a split row.
pub trait FormDelegate {
    fn begin_editing(&mut self, row: &RowKey);
    fn end_editing(&mut self, row: &RowKey);
}

/// A composite editing session transition, recorded until the form collects it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditingEvent {
    Began,
    Ended,
}

impl EditingEvent {
    pub fn dispatch(self, row: &RowKey, form: &mut dyn FormDelegate) {
        match self {
            EditingEvent::Began => form.begin_editing(row),
            EditingEvent::Ended => form.end_editing(row),
        }
    }
}

/// A [`FormDelegate`] that records every call, handy for tests and simple apps.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditingLog {
    pub calls: Vec<(EditingEvent, RowKey)>,
}

impl EditingLog {
    pub fn last(&self) -> Option<EditingEvent> {
        self.calls.last().map(|(event, _)| *event)
    }

    /// Whether some recorded row is inside an editing session.
    pub fn is_editing(&self) -> bool {
        self.last() == Some(EditingEvent::Began)
    }
}

impl FormDelegate for EditingLog {
    fn begin_editing(&mut self, row: &RowKey) {
        self.calls.push((EditingEvent::Began, row.clone()));
    }

    fn end_editing(&mut self, row: &RowKey) {
        self.calls.push((EditingEvent::Ended, row.clone()));
    }
}
