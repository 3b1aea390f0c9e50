//! Maps crossterm events onto [`InputEvent`]. Anything a split row cannot act on maps to `None`.
use crate::input::InputEvent;
use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;
use crate::input::MouseButton;
use crate::input::MouseEvent;
use crossterm::event as ct;

pub fn input_event_from_crossterm(ev: ct::Event) -> Option<InputEvent> {
    match ev {
        ct::Event::Key(key) if key.kind == ct::KeyEventKind::Press => {
            key_event_from_crossterm(key).map(InputEvent::Key)
        }
        ct::Event::Paste(s) => Some(InputEvent::Paste(s)),
        ct::Event::Mouse(m) => mouse_event_from_crossterm(m).map(InputEvent::Mouse),
        _ => None,
    }
}

pub fn key_event_from_crossterm(key: ct::KeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        ct::KeyCode::Char(c) => KeyCode::Char(c),
        ct::KeyCode::Enter => KeyCode::Enter,
        ct::KeyCode::Backspace => KeyCode::Backspace,
        ct::KeyCode::Delete => KeyCode::Delete,
        ct::KeyCode::Tab => KeyCode::Tab,
        ct::KeyCode::BackTab => KeyCode::BackTab,
        ct::KeyCode::Left => KeyCode::Left,
        ct::KeyCode::Right => KeyCode::Right,
        ct::KeyCode::Home => KeyCode::Home,
        ct::KeyCode::End => KeyCode::End,
        _ => return None,
    };
    let m = key.modifiers;
    Some(KeyEvent::new(code).with_modifiers(KeyModifiers {
        shift: m.contains(ct::KeyModifiers::SHIFT),
        ctrl: m.contains(ct::KeyModifiers::CONTROL),
        alt: m.contains(ct::KeyModifiers::ALT),
    }))
}

/// Only button presses are kept.
pub fn mouse_event_from_crossterm(m: ct::MouseEvent) -> Option<MouseEvent> {
    let ct::MouseEventKind::Down(button) = m.kind else {
        return None;
    };
    let button = match button {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Right => MouseButton::Right,
        ct::MouseButton::Middle => MouseButton::Middle,
    };
    Some(MouseEvent {
        x: m.column,
        y: m.row,
        button,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mouse(kind: ct::MouseEventKind) -> ct::Event {
        ct::Event::Mouse(ct::MouseEvent {
            kind,
            column: 4,
            row: 2,
            modifiers: ct::KeyModifiers::NONE,
        })
    }

    #[test]
    fn back_tab_keeps_shift() {
        let ev = ct::KeyEvent::new(ct::KeyCode::BackTab, ct::KeyModifiers::SHIFT);
        assert_eq!(
            key_event_from_crossterm(ev),
            Some(crate::keymap::key_back_tab())
        );
    }

    #[test]
    fn release_events_are_dropped() {
        let ev = ct::KeyEvent::new_with_kind(
            ct::KeyCode::Char('a'),
            ct::KeyModifiers::NONE,
            ct::KeyEventKind::Release,
        );
        assert_eq!(input_event_from_crossterm(ct::Event::Key(ev)), None);
    }

    #[test]
    fn keys_without_a_row_binding_are_dropped() {
        let ev = ct::KeyEvent::new(ct::KeyCode::Esc, ct::KeyModifiers::NONE);
        assert_eq!(input_event_from_crossterm(ct::Event::Key(ev)), None);
    }

    #[test]
    fn only_presses_become_mouse_events() {
        assert_eq!(
            input_event_from_crossterm(mouse(ct::MouseEventKind::Down(ct::MouseButton::Left))),
            Some(InputEvent::click(4, 2))
        );
        assert_eq!(
            input_event_from_crossterm(mouse(ct::MouseEventKind::Down(ct::MouseButton::Right))),
            Some(InputEvent::Mouse(MouseEvent {
                x: 4,
                y: 2,
                button: MouseButton::Right,
            }))
        );
        assert_eq!(
            input_event_from_crossterm(mouse(ct::MouseEventKind::Up(ct::MouseButton::Left))),
            None
        );
        assert_eq!(input_event_from_crossterm(mouse(ct::MouseEventKind::Moved)), None);
    }
}
