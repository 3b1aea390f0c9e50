use crate::fields::RowBase;
use crate::fields::forward_cell_base;
use crate::fields::forward_row_base;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::render;
use crate::row::FormRow;
use crate::row::RowCell;
use crate::theme::Theme;
use crate::validation::Rule;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// A boolean toggle, rendered as `[x] label`.
#[derive(Debug, Default)]
pub struct CheckRow {
    base: RowBase<bool>,
    label: String,
}

impl CheckRow {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            base: RowBase::default(),
            label: label.into(),
        }
    }

    pub fn with_value(mut self, value: bool) -> Self {
        self.base.set_value(Some(value));
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.base.theme = theme;
        self
    }

    pub fn with_rule(mut self, rule: Rule<bool>) -> Self {
        self.base.add_rule(rule);
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.base.set_disabled(disabled);
    }

    pub fn is_checked(&self) -> bool {
        self.base.value().copied().unwrap_or(false)
    }

    pub fn toggle(&mut self) {
        let next = !self.is_checked();
        self.base.set_value(Some(next));
    }
}

impl FormRow for CheckRow {
    type Value = bool;
    type Cell = Self;

    forward_row_base!();

    fn set_value(&mut self, value: Option<bool>) {
        self.base.set_value(value);
    }

    fn input(&mut self, event: &InputEvent) -> bool {
        if self.base.is_disabled() {
            return false;
        }
        match event {
            InputEvent::Key(key) if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) => {
                self.toggle();
                true
            }
            _ => false,
        }
    }
}

impl RowCell for CheckRow {
    forward_cell_base!();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = self.base.style();
        render::clear_area(area, buf, style);
        let mark = match self.base.value() {
            Some(true) => "[x]",
            Some(false) => "[ ]",
            None => "[-]",
        };
        render::render_str_clipped(area.x, area.y, 0, area.width, buf, mark, style);
        let offset = render::display_width(mark) as u16 + 1;
        if self.label.is_empty() || offset >= area.width {
            return;
        }
        render::render_str_clipped(
            area.x + offset,
            area.y,
            0,
            area.width - offset,
            buf,
            &self.label,
            style.patch(self.base.theme.label),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn space_toggles_from_unset() {
        let mut row = CheckRow::new("ok");
        assert_eq!(row.value(), None);
        assert!(row.input(&InputEvent::key(KeyCode::Char(' '))));
        assert_eq!(row.value(), Some(&true));
        assert!(row.input(&InputEvent::key(KeyCode::Enter)));
        assert_eq!(row.value(), Some(&false));
        assert!(!row.input(&InputEvent::key(KeyCode::Char('x'))));
    }

    #[test]
    fn renders_mark_and_label() {
        let row = CheckRow::new("ok").with_value(true);
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 1));
        row.render(Rect::new(0, 0, 8, 1), &mut buf);
        let text: String = (0..8)
            .filter_map(|x| buf.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect();
        assert_eq!(text, "[x] ok  ");
    }
}
