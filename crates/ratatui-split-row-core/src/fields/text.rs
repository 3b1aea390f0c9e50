use crate::fields::RowBase;
use crate::fields::forward_cell_base;
use crate::fields::forward_row_base;
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::render;
use crate::row::FormRow;
use crate::row::RowCell;
use crate::theme::Theme;
use crate::validation::Rule;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextInputAction {
    None,
    Moved,
    Changed,
}

/// Single-line text editor.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    text: String,
    cursor: usize, // char index
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the text and moves the cursor to its end. Newlines are dropped.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = single_line(&text.into());
        self.cursor = self.char_len();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn input(&mut self, event: &InputEvent) -> TextInputAction {
        match event {
            InputEvent::Paste(s) => {
                let s = single_line(s);
                if s.is_empty() {
                    return TextInputAction::None;
                }
                for ch in s.chars() {
                    self.insert_char(ch);
                }
                TextInputAction::Changed
            }
            InputEvent::Key(key) => self.handle_key(key),
            InputEvent::Mouse(_) => TextInputAction::None,
        }
    }

    /// First display column shown in a field `width` columns wide, keeping the cursor visible.
    pub fn scroll_x(&self, width: u16) -> u32 {
        if width == 0 {
            return 0;
        }
        let cx = self.cursor_display_x() as u32;
        cx.saturating_sub(width.saturating_sub(1) as u32)
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, style: Style) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        render::render_str_clipped(
            area.x,
            area.y,
            self.scroll_x(area.width),
            area.width,
            buf,
            &self.text,
            style,
        );
    }

    pub fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        let cx = self.cursor_display_x() as u32;
        let x = cx.saturating_sub(self.scroll_x(area.width));
        if x >= area.width as u32 {
            return None;
        }
        Some((area.x + x as u16, area.y))
    }

    fn handle_key(&mut self, key: &KeyEvent) -> TextInputAction {
        match key.code {
            KeyCode::Char(c) => {
                if key.modifiers.ctrl || key.modifiers.alt {
                    return TextInputAction::None;
                }
                self.insert_char(c);
                TextInputAction::Changed
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return TextInputAction::None;
                }
                self.remove_char(self.cursor - 1);
                self.cursor -= 1;
                TextInputAction::Changed
            }
            KeyCode::Delete => {
                if self.cursor >= self.char_len() {
                    return TextInputAction::None;
                }
                self.remove_char(self.cursor);
                TextInputAction::Changed
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                TextInputAction::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.char_len());
                TextInputAction::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                TextInputAction::Moved
            }
            KeyCode::End => {
                self.cursor = self.char_len();
                TextInputAction::Moved
            }
            _ => TextInputAction::None,
        }
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn cursor_display_x(&self) -> usize {
        self.text
            .chars()
            .take(self.cursor)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    fn insert_char(&mut self, ch: char) {
        let byte_idx = byte_index_from_char_index(&self.text, self.cursor);
        self.text.insert(byte_idx, ch);
        self.cursor += 1;
    }

    fn remove_char(&mut self, char_idx: usize) {
        let start = byte_index_from_char_index(&self.text, char_idx);
        let end = byte_index_from_char_index(&self.text, char_idx + 1);
        self.text.replace_range(start..end, "");
    }
}

fn byte_index_from_char_index(s: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    match s.char_indices().nth(char_idx) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

fn single_line(s: &str) -> String {
    s.chars().filter(|c| *c != '\n' && *c != '\r').collect()
}

/// A text field. Empty text is an unset value.
#[derive(Debug, Default)]
pub struct TextRow {
    base: RowBase<String>,
    editor: TextInput,
    placeholder: String,
}

impl TextRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(Some(value.into()));
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.base.theme = theme;
        self
    }

    pub fn with_rule(mut self, rule: Rule<String>) -> Self {
        self.base.add_rule(rule);
        self
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.base.set_disabled(disabled);
    }

    pub fn editor(&self) -> &TextInput {
        &self.editor
    }

    pub fn needs_redraw(&self) -> bool {
        self.base.cell.needs_redraw()
    }
}

impl FormRow for TextRow {
    type Value = String;
    type Cell = Self;

    forward_row_base!();

    fn set_value(&mut self, value: Option<String>) {
        let value = value.map(|v| single_line(&v)).filter(|v| !v.is_empty());
        if self.editor.text() != value.as_deref().unwrap_or("") {
            self.editor.set_text(value.clone().unwrap_or_default());
        }
        self.base.set_value(value);
    }

    fn input(&mut self, event: &InputEvent) -> bool {
        if self.base.is_disabled() {
            return false;
        }
        match self.editor.input(event) {
            TextInputAction::None => false,
            TextInputAction::Moved => {
                self.base.cell.mark_dirty();
                true
            }
            TextInputAction::Changed => {
                let text = self.editor.text().to_string();
                self.base.set_value((!text.is_empty()).then_some(text));
                self.base.cell.mark_dirty();
                true
            }
        }
    }
}

impl RowCell for TextRow {
    forward_cell_base!();

    fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = self.base.style();
        render::clear_area(area, buf, style);
        if self.editor.is_empty() {
            render::render_str_clipped(
                area.x,
                area.y,
                0,
                area.width,
                buf,
                &self.placeholder,
                style.patch(self.base.theme.placeholder),
            );
            return;
        }
        self.editor.render(area, buf, style);
    }

    fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        if !self.base.cell.focused {
            return None;
        }
        self.editor.cursor_pos(area)
    }
}
