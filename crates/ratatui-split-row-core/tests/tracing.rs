//! Tracing instrumentation tests.
//!
//!   cargo test -p ratatui-split-row-core --features tracing --test tracing
#![cfg(feature = "tracing")]

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui_split_row_core::cell::SplitRowCell;
use ratatui_split_row_core::fields::CheckRow;
use ratatui_split_row_core::fields::StepperRow;
use ratatui_split_row_core::fields::TextRow;
use ratatui_split_row_core::row::Direction;
use ratatui_split_row_core::split_row::SplitRow;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Debug)]
struct Captured {
    name: String,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

struct FieldVisitor(HashMap<String, String>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for Capture {
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(HashMap::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(HashMap::new());
        event.record(&mut visitor);
        let name = visitor.0.remove("message").unwrap_or_default();
        self.events.lock().unwrap().push(Captured {
            name,
            fields: visitor.0,
        });
    }
}

fn with_capture(f: impl FnOnce()) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn dims() -> SplitRow<StepperRow, TextRow, CheckRow> {
    let mut row = SplitRow::new("dims");
    row.set_left(StepperRow::new().with_value(5));
    row.set_center(TextRow::new().with_value("cm"));
    row.set_right(CheckRow::new("locked"));
    row
}

#[test]
fn render_opens_a_span_per_row() {
    let capture = with_capture(|| {
        let mut row = dims();
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        SplitRowCell::new(&mut row).render(area, &mut buf);
    });

    let spans = capture.spans.lock().unwrap().clone();
    let render = spans
        .iter()
        .find(|s| s.name == "split_row_render")
        .expect("render span");
    assert_eq!(render.fields.get("row").map(String::as_str), Some("dims"));
    assert_eq!(render.fields.get("w").map(String::as_str), Some("30"));
}

#[test]
fn focus_and_value_changes_are_logged() {
    let capture = with_capture(|| {
        let mut row = dims();
        let mut cell = SplitRowCell::new(&mut row);
        cell.become_first_responder(Direction::Down);
        cell.resign_first_responder();
        row.update_left(|left| left.step_by(1));
    });

    let events = capture.events.lock().unwrap().clone();
    let names: Vec<&str> = events.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"split row child replaced"), "{names:?}");
    assert!(names.contains(&"split row focus"), "{names:?}");
    assert!(names.contains(&"split row editing"), "{names:?}");
    assert!(names.contains(&"split row resign"), "{names:?}");
    assert!(names.contains(&"split row value published"), "{names:?}");
}
