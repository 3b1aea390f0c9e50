use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEventKind;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Constraint;
use ratatui::layout::Direction;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui_split_row::SplitRow;
use ratatui_split_row::SplitRowAction;
use ratatui_split_row::SplitRowCell;
use ratatui_split_row::crossterm_input::input_event_from_crossterm;
use ratatui_split_row::fields::CheckRow;
use ratatui_split_row::fields::StepperRow;
use ratatui_split_row::fields::TextRow;
use ratatui_split_row::form::EditingLog;
use ratatui_split_row::input::InputEvent;
use ratatui_split_row::keymap;
use ratatui_split_row::row::Direction as TabDirection;
use ratatui_split_row::validation;
use std::io;
use std::time::Duration;

type DimensionRow = SplitRow<StepperRow, TextRow, CheckRow>;

struct Form {
    rows: Vec<DimensionRow>,
    focused: usize,
    log: EditingLog,
    status: String,
}

fn main() -> io::Result<()> {
    init_tracing()?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        crossterm::event::EnableMouseCapture
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut form = Form {
        rows: vec![dimension_row("width", 80), dimension_row("height", 24)],
        focused: 0,
        log: EditingLog::default(),
        status: String::new(),
    };
    for row in &mut form.rows {
        SplitRowCell::new(row).setup();
    }
    SplitRowCell::new(&mut form.rows[0]).become_first_responder(TabDirection::Down);

    let res = run(&mut terminal, &mut form);

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::event::DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    res
}

/// Writes debug output to the file named by `SPLIT_FORM_LOG`, filtered by `RUST_LOG`.
fn init_tracing() -> io::Result<()> {
    let Some(path) = std::env::var_os("SPLIT_FORM_LOG") else {
        return Ok(());
    };
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn dimension_row(name: &str, value: i64) -> DimensionRow {
    let mut row = DimensionRow::new(name);
    row.set_left(
        StepperRow::new()
            .with_value(value)
            .with_bounds(1, 500)
            .with_rule(validation::required(format!("{name} is required"))),
    );
    row.set_center(
        TextRow::new()
            .with_placeholder("unit")
            .with_rule(validation::required(format!("{name} needs a unit"))),
    );
    row.set_right(CheckRow::new("locked"));
    row
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    form: &mut Form,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| {
            let area = f.area();
            let [main, status] = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .areas(area);

            let block = Block::default()
                .title("Split rows (Tab/Shift-Tab, +/-, Space, Ctrl-S validates, Esc quits)")
                .borders(Borders::ALL);
            let inner = block.inner(main);
            f.render_widget(block, main);

            let mut cursor = None;
            let mut y = inner.y;
            for (idx, row) in form.rows.iter_mut().enumerate() {
                let height = row.preferred_height().min(inner.bottom().saturating_sub(y));
                let row_area = Rect::new(inner.x, y, inner.width, height);
                let mut cell = SplitRowCell::new(row);
                cell.render(row_area, f.buffer_mut());
                if idx == form.focused {
                    cursor = cell.cursor_pos(row_area);
                }
                y = y.saturating_add(height + 1);
            }

            let buf = f.buffer_mut();
            let status_span = Span::styled(form.status.as_str(), Style::default());
            buf.set_span(status.x, status.y, &status_span, status.width);

            if let Some((x, y)) = cursor {
                f.set_cursor_position((x, y));
            }
        })?;

        if !crossterm::event::poll(Duration::from_millis(50))? {
            continue;
        }
        let event = crossterm::event::read()?;
        if let Event::Key(key) = &event {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.code == KeyCode::Esc {
                return Ok(());
            }
        }
        let Some(ev) = input_event_from_crossterm(event) else {
            continue;
        };
        if let InputEvent::Key(key) = &ev {
            if keymap::key_event_matches(&keymap::key_ctrl('s'), key) {
                validate(form);
                continue;
            }
        }

        let focused = form.focused;
        let action = SplitRowCell::new(&mut form.rows[focused]).input(&ev);
        match action {
            SplitRowAction::FocusEscaped(direction) => move_row(form, direction),
            SplitRowAction::Changed => {
                let row = &form.rows[focused];
                form.status = format!("{}: {:?}", row.key(), row.value());
            }
            SplitRowAction::Redraw | SplitRowAction::None => {}
        }
        for row in &mut form.rows {
            row.dispatch_editing(&mut form.log);
        }
    }
}

fn move_row(form: &mut Form, direction: TabDirection) {
    let len = form.rows.len();
    form.focused = match direction {
        TabDirection::Down => (form.focused + 1) % len,
        TabDirection::Up => (form.focused + len - 1) % len,
    };
    SplitRowCell::new(&mut form.rows[form.focused]).become_first_responder(direction);
}

fn validate(form: &mut Form) {
    let mut messages = Vec::new();
    for row in &mut form.rows {
        match row.validate() {
            Ok(errors) => messages.extend(errors.into_iter().map(|e| e.to_string())),
            Err(err) => messages.push(err.to_string()),
        }
    }
    form.status = if messages.is_empty() {
        "valid".to_string()
    } else {
        messages.join("; ")
    };
}
