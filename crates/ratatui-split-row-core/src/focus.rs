use crate::input::KeyCode;
use crate::input::KeyEvent;
use crate::keymap;
use crate::row::Direction;
use crate::slot::Slot;

/// Key bindings that move focus between the slots of a split row.
#[derive(Clone, Debug)]
pub struct FocusBindings {
    pub next: Vec<KeyEvent>,
    pub prev: Vec<KeyEvent>,
}

impl Default for FocusBindings {
    fn default() -> Self {
        Self {
            next: vec![keymap::key(KeyCode::Tab)],
            prev: vec![keymap::key_back_tab(), keymap::key(KeyCode::BackTab)],
        }
    }
}

impl FocusBindings {
    pub fn direction_for(&self, key: &KeyEvent) -> Option<Direction> {
        if keymap::any_matches(&self.next, key) {
            return Some(Direction::Down);
        }
        if keymap::any_matches(&self.prev, key) {
            return Some(Direction::Up);
        }
        None
    }
}

/// Result of moving focus inside a split row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMove {
    Moved(Slot),
    /// No further slot in that direction; the row gave up focus.
    Escaped(Direction),
}

/// Slots visited by intra-row navigation, in order, starting after `from`.
pub fn traversal(direction: Direction, from: Option<Slot>) -> Vec<Slot> {
    let mut order = Slot::ALL.to_vec();
    if direction == Direction::Up {
        order.reverse();
    }
    match from.and_then(|slot| order.iter().position(|s| *s == slot)) {
        Some(idx) => order.split_off(idx + 1),
        None => order,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let b = FocusBindings::default();
        assert_eq!(b.direction_for(&keymap::key(KeyCode::Tab)), Some(Direction::Down));
        assert_eq!(b.direction_for(&keymap::key_back_tab()), Some(Direction::Up));
        assert_eq!(b.direction_for(&keymap::key(KeyCode::Enter)), None);
    }

    #[test]
    fn traversal_starts_after_current() {
        assert_eq!(
            traversal(Direction::Down, None),
            vec![Slot::Left, Slot::Center, Slot::Right]
        );
        assert_eq!(traversal(Direction::Down, Some(Slot::Center)), vec![Slot::Right]);
        assert_eq!(
            traversal(Direction::Up, Some(Slot::Right)),
            vec![Slot::Center, Slot::Left]
        );
        assert!(traversal(Direction::Up, Some(Slot::Left)).is_empty());
    }
}
