use crate::row::CellState;
use crate::row::SectionId;
use crate::slot::Slot;
use crate::subscription::Notifier;
use crate::theme::Theme;
use crate::validation;
use crate::validation::Rule;
use crate::validation::ValidationError;
use ratatui::style::Style;
use std::fmt;

/// State every bundled row shares: value, slot tag, flags, subscription and rules.
pub struct RowBase<V> {
    value: Option<V>,
    tag: Option<Slot>,
    disabled: bool,
    section: Option<SectionId>,
    notifier: Option<Notifier>,
    rules: Vec<Rule<V>>,
    pub cell: CellState,
    pub theme: Theme,
}

impl<V> Default for RowBase<V> {
    fn default() -> Self {
        Self {
            value: None,
            tag: None,
            disabled: false,
            section: None,
            notifier: None,
            rules: Vec::new(),
            cell: CellState::default(),
            theme: Theme::default(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for RowBase<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBase")
            .field("value", &self.value)
            .field("tag", &self.tag)
            .field("disabled", &self.disabled)
            .field("section", &self.section)
            .field("subscribed", &self.notifier.is_some())
            .field("rules", &self.rules.len())
            .field("cell", &self.cell)
            .finish()
    }
}

impl<V: Clone + PartialEq> RowBase<V> {
    pub fn new(value: Option<V>) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Stores `value` and notifies the subscriber. Returns `false` if nothing changed.
    pub fn set_value(&mut self, value: Option<V>) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.cell.mark_dirty();
        if let Some(notifier) = &self.notifier {
            notifier.value_changed();
        }
        true
    }

    pub fn tag(&self) -> Option<Slot> {
        self.tag
    }

    pub fn set_tag(&mut self, tag: Option<Slot>) {
        self.tag = tag;
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        if self.disabled != disabled {
            self.disabled = disabled;
            self.cell.mark_dirty();
        }
    }

    pub fn is_highlighted(&self) -> bool {
        self.cell.highlighted
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        if self.cell.highlighted == highlighted {
            return;
        }
        self.cell.highlighted = highlighted;
        self.cell.mark_dirty();
        if let Some(notifier) = &self.notifier {
            notifier.highlight_changed();
        }
    }

    pub fn section(&self) -> Option<SectionId> {
        self.section
    }

    pub fn set_section(&mut self, section: Option<SectionId>) {
        self.section = section;
    }

    pub fn subscribe(&mut self, notifier: Notifier) {
        self.notifier = Some(notifier);
    }

    pub fn unsubscribe(&mut self) {
        self.notifier = None;
    }

    pub fn is_subscribed(&self) -> bool {
        self.notifier.as_ref().is_some_and(Notifier::is_connected)
    }

    pub fn add_rule(&mut self, rule: Rule<V>) {
        self.rules.push(rule);
    }

    pub fn validate(&self) -> Vec<ValidationError> {
        validation::run_rules(&self.rules, self.value.as_ref())
    }

    pub fn can_focus(&self) -> bool {
        !self.disabled
    }

    /// Takes focus; focus implies highlight.
    pub fn focus(&mut self) -> bool {
        if !self.can_focus() {
            return false;
        }
        if !self.cell.focused {
            self.cell.focused = true;
            self.cell.mark_dirty();
        }
        self.set_highlighted(true);
        true
    }

    pub fn blur(&mut self) -> bool {
        if self.cell.focused {
            self.cell.focused = false;
            self.cell.mark_dirty();
        }
        self.set_highlighted(false);
        true
    }

    pub fn style(&self) -> Style {
        self.theme
            .cell_style(self.disabled, self.cell.focused, self.cell.highlighted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subscription::RowNotification;
    use crate::subscription::Inbox;

    #[test]
    fn set_value_notifies_only_on_change() {
        let inbox = Inbox::new();
        let sub = inbox.subscribe(Slot::Left);
        let mut base = RowBase::new(Some(1));
        base.subscribe(sub.notifier());
        assert!(base.is_subscribed());

        assert!(!base.set_value(Some(1)));
        assert!(!inbox.is_pending());
        assert!(base.set_value(Some(2)));
        assert_eq!(inbox.pop(), Some((Slot::Left, RowNotification::ValueChanged)));
    }

    #[test]
    fn disabled_row_refuses_focus() {
        let mut base = RowBase::<bool>::new(None);
        base.set_disabled(true);
        assert!(!base.focus());
        assert!(!base.cell.focused);
        base.set_disabled(false);
        assert!(base.focus());
        assert!(base.is_highlighted());
        assert!(base.blur());
        assert!(!base.is_highlighted());
    }

    #[test]
    fn focus_posts_highlight_change() {
        let inbox = Inbox::new();
        let sub = inbox.subscribe(Slot::Center);
        let mut base = RowBase::<i64>::new(None);
        base.subscribe(sub.notifier());
        base.focus();
        base.focus();
        assert_eq!(inbox.pop(), Some((Slot::Center, RowNotification::HighlightChanged)));
        assert_eq!(inbox.pop(), None);
    }
}
