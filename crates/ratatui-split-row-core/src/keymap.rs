use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::input::KeyModifiers;

pub fn key_event_matches(pattern: &KeyEvent, event: &KeyEvent) -> bool {
    pattern.code == event.code && modifiers_match(pattern.modifiers, event.modifiers)
}

fn modifiers_match(pattern: KeyModifiers, event: KeyModifiers) -> bool {
    pattern.shift == event.shift && pattern.ctrl == event.ctrl && pattern.alt == event.alt
}

/// Returns `true` if `event` matches any of `patterns`.
pub fn any_matches(patterns: &[KeyEvent], event: &KeyEvent) -> bool {
    patterns.iter().any(|p| key_event_matches(p, event))
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code)
}

pub fn key_char(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c))
}

pub fn key_ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c)).with_modifiers(KeyModifiers {
        shift: false,
        ctrl: true,
        alt: false,
    })
}

/// `BackTab` as reported by terminals that fold shift into the key code.
pub fn key_back_tab() -> KeyEvent {
    KeyEvent::new(KeyCode::BackTab).with_modifiers(KeyModifiers::shift())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_exact_modifiers() {
        assert!(key_event_matches(&key_char('q'), &key_char('q')));
        assert!(!key_event_matches(&key_char('q'), &key_ctrl('q')));
    }

    #[test]
    fn any_matches_checks_every_pattern() {
        let patterns = vec![key(KeyCode::Tab), key_back_tab()];
        assert!(any_matches(&patterns, &key_back_tab()));
        assert!(!any_matches(&patterns, &key(KeyCode::BackTab)));
        assert!(!any_matches(&[], &key(KeyCode::Tab)));
    }
}
