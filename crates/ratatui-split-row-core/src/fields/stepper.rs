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

/// An integer field stepped with `+`/`-` or `Right`/`Left`, clamped to optional bounds.
#[derive(Debug)]
pub struct StepperRow {
    base: RowBase<i64>,
    step: i64,
    min: Option<i64>,
    max: Option<i64>,
}

impl Default for StepperRow {
    fn default() -> Self {
        Self {
            base: RowBase::default(),
            step: 1,
            min: None,
            max: None,
        }
    }
}

impl StepperRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: i64) -> Self {
        self.set_value(Some(value));
        self
    }

    pub fn with_step(mut self, step: i64) -> Self {
        self.step = step;
        self
    }

    pub fn with_bounds(mut self, min: i64, max: i64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        let clamped = self.base.value().map(|v| self.clamp(*v));
        self.base.set_value(clamped);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.base.theme = theme;
        self
    }

    pub fn with_rule(mut self, rule: Rule<i64>) -> Self {
        self.base.add_rule(rule);
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.base.set_disabled(disabled);
    }

    /// Moves by `steps` increments. An unset value starts from the lower bound or zero.
    pub fn step_by(&mut self, steps: i64) {
        let start = self
            .base
            .value()
            .copied()
            .unwrap_or_else(|| self.min.unwrap_or(0));
        let next = self.clamp(start.saturating_add(self.step.saturating_mul(steps)));
        self.base.set_value(Some(next));
    }

    fn clamp(&self, value: i64) -> i64 {
        let value = self.min.map_or(value, |min| value.max(min));
        self.max.map_or(value, |max| value.min(max))
    }
}

impl FormRow for StepperRow {
    type Value = i64;
    type Cell = Self;

    forward_row_base!();

    fn set_value(&mut self, value: Option<i64>) {
        let value = value.map(|v| self.clamp(v));
        self.base.set_value(value);
    }

    fn input(&mut self, event: &InputEvent) -> bool {
        if self.base.is_disabled() {
            return false;
        }
        let InputEvent::Key(key) = event else {
            return false;
        };
        match key.code {
            KeyCode::Char('+') | KeyCode::Right => self.step_by(1),
            KeyCode::Char('-') | KeyCode::Left => self.step_by(-1),
            _ => return false,
        }
        true
    }
}

impl RowCell for StepperRow {
    forward_cell_base!();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = self.base.style();
        render::clear_area(area, buf, style);
        let value = self
            .base
            .value()
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let text = format!("‹ {value} ›");
        render::render_str_clipped(area.x, area.y, 0, area.width, buf, &text, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_within_bounds() {
        let mut row = StepperRow::new().with_value(9).with_bounds(0, 10).with_step(2);
        assert!(row.input(&InputEvent::key(KeyCode::Char('+'))));
        assert_eq!(row.value(), Some(&10));
        row.input(&InputEvent::key(KeyCode::Left));
        assert_eq!(row.value(), Some(&8));
    }

    #[test]
    fn unset_value_starts_from_lower_bound() {
        let mut row = StepperRow::new().with_bounds(3, 5);
        row.step_by(1);
        assert_eq!(row.value(), Some(&4));
        row.set_value(Some(100));
        assert_eq!(row.value(), Some(&5));
    }

    #[test]
    fn ignores_unrelated_keys() {
        let mut row = StepperRow::new();
        assert!(!row.input(&InputEvent::key(KeyCode::Char('a'))));
        assert!(!row.input(&InputEvent::Paste("3".to_string())));
        assert_eq!(row.value(), None);
    }
}
