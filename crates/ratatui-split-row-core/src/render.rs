use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

/// Paints `area` with blanks in `style`.
pub fn clear_area(area: Rect, buf: &mut Buffer, style: Style) {
    for dy in 0..area.height {
        for dx in 0..area.width {
            if let Some(cell) = buf.cell_mut((area.x + dx, area.y + dy)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
}

/// Renders `input` starting at display column `start_col`, writing at most `max_cols` cells.
///
/// Wide characters that straddle either edge are skipped rather than split.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;

    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col < start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            return;
        }

        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        dx += 1;
        out_cols += 1;
        col += w;

        if w == 2 {
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
            dx += 1;
            out_cols += 1;
        }
    }
}

/// Returns the display width of `s` in terminal columns.
pub fn display_width(s: &str) -> usize {
    s.chars()
        .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn clips_to_max_cols() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        render_str_clipped(0, 0, 0, 3, &mut buf, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0, 6), "abc   ");
    }

    #[test]
    fn skips_leading_columns() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 4, 1));
        render_str_clipped(0, 0, 2, 4, &mut buf, "abcdef", Style::default());
        assert_eq!(row_text(&buf, 0, 4), "cdef");
    }

    #[test]
    fn wide_char_does_not_overflow() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        render_str_clipped(0, 0, 0, 3, &mut buf, "a界b", Style::default());
        assert_eq!(display_width("a界b"), 4);
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some("a"));
        assert_eq!(buf.cell((1, 0)).map(|c| c.symbol()), Some("界"));
    }
}
