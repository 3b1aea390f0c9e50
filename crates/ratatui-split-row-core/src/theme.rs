use ratatui::style::Style;

/// Styles used by the split row and the bundled child rows.
#[derive(Clone, Debug)]
pub struct Theme {
    pub text: Style,
    pub placeholder: Style,
    pub label: Style,
    pub focused: Style,
    pub highlighted: Style,
    pub disabled: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text: Style::default(),
            placeholder: Style::default().dark_gray(),
            label: Style::default().bold(),
            focused: Style::default().cyan(),
            highlighted: Style::default().underlined(),
            disabled: Style::default().dark_gray(),
        }
    }
}

impl Theme {
    /// Resolves the style for a child cell from its interaction state.
    pub fn cell_style(&self, disabled: bool, focused: bool, highlighted: bool) -> Style {
        if disabled {
            return self.disabled;
        }
        let mut style = self.text;
        if highlighted {
            style = style.patch(self.highlighted);
        }
        if focused {
            style = style.patch(self.focused);
        }
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn disabled_wins_over_focus() {
        let theme = Theme::default();
        assert_eq!(theme.cell_style(true, true, true), theme.disabled);
        assert_eq!(theme.cell_style(false, true, false).fg, Some(Color::Cyan));
    }
}
