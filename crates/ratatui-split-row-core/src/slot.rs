use std::fmt;

/// One of the three fixed positions in a split row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Slot {
    Left,
    Center,
    Right,
}

impl Slot {
    /// Slots in layout order.
    pub const ALL: [Slot; 3] = [Slot::Left, Slot::Center, Slot::Right];

    pub fn as_str(self) -> &'static str {
        match self {
            Slot::Left => "left",
            Slot::Center => "center",
            Slot::Right => "right",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Slot::Left => 0b001,
            Slot::Center => 0b010,
            Slot::Right => 0b100,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A set of slots, used to report which slots changed on the last value assignment.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotSet(u8);

impl SlotSet {
    pub fn empty() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, slot: Slot) {
        self.0 |= slot.bit();
    }

    pub fn contains(&self, slot: Slot) -> bool {
        self.0 & slot.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates in layout order.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        Slot::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

impl FromIterator<Slot> for SlotSet {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        let mut set = SlotSet::empty();
        for slot in iter {
            set.insert(slot);
        }
        set
    }
}

impl fmt::Debug for SlotSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
