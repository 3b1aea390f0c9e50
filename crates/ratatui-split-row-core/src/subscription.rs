//! Change subscriptions between a split row and its child rows.
//!
//! The split row owns one [`Inbox`] and one [`Subscription`] per occupied slot. Every
//! subscription posts into the shared inbox, so notifications come back out in the order the
//! children raised them. The child only receives a [`Notifier`], which holds a weak reference
//! to its subscription: once the split row drops the subscription (the child was replaced or
//! removed) the notifier goes quiet.
use crate::slot::Slot;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::rc::Weak;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowNotification {
    ValueChanged,
    HighlightChanged,
}

type Queue = RefCell<VecDeque<(Slot, RowNotification)>>;

#[derive(Debug, Default)]
pub struct Inbox {
    queue: Rc<Queue>,
}

impl Inbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a subscription for the child in `slot`.
    pub fn subscribe(&self, slot: Slot) -> Subscription {
        Subscription {
            link: Rc::new(Link {
                slot,
                queue: Rc::clone(&self.queue),
            }),
        }
    }

    /// The oldest queued notification and the slot that raised it.
    pub fn pop(&self) -> Option<(Slot, RowNotification)> {
        self.queue.borrow_mut().pop_front()
    }

    pub fn is_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }

    /// Drops queued value notifications from `slot`, keeping highlight notifications.
    pub fn discard_value_changes(&self, slot: Slot) {
        self.queue
            .borrow_mut()
            .retain(|(s, n)| *s != slot || *n != RowNotification::ValueChanged);
    }

    /// Drops everything queued by `slot`.
    pub fn discard(&self, slot: Slot) {
        self.queue.borrow_mut().retain(|(s, _)| *s != slot);
    }
}

#[derive(Debug)]
struct Link {
    slot: Slot,
    queue: Rc<Queue>,
}

/// The split row's handle on one child's notifications.
#[derive(Debug)]
pub struct Subscription {
    link: Rc<Link>,
}

impl Subscription {
    pub fn slot(&self) -> Slot {
        self.link.slot
    }

    /// Creates a notifier that posts into the inbox while this subscription lives.
    pub fn notifier(&self) -> Notifier {
        Notifier {
            slot: self.link.slot,
            link: Rc::downgrade(&self.link),
        }
    }
}

/// The child-side end of a [`Subscription`].
#[derive(Clone, Debug)]
pub struct Notifier {
    slot: Slot,
    link: Weak<Link>,
}

impl Notifier {
    pub fn slot(&self) -> Slot {
        self.slot
    }

    pub fn is_connected(&self) -> bool {
        self.link.strong_count() > 0
    }

    pub fn value_changed(&self) {
        self.post(RowNotification::ValueChanged);
    }

    pub fn highlight_changed(&self) {
        self.post(RowNotification::HighlightChanged);
    }

    fn post(&self, notification: RowNotification) {
        let Some(link) = self.link.upgrade() else {
            return;
        };
        let entry = (link.slot, notification);
        let mut queue = link.queue.borrow_mut();
        // Consecutive duplicates carry no extra information; handlers read live state.
        if queue.back() != Some(&entry) {
            queue.push_back(entry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notifier_posts_until_subscription_dropped() {
        let inbox = Inbox::new();
        let sub = inbox.subscribe(Slot::Left);
        let notifier = sub.notifier();
        assert_eq!(notifier.slot(), Slot::Left);
        notifier.value_changed();
        notifier.value_changed();
        notifier.highlight_changed();
        assert_eq!(inbox.pop(), Some((Slot::Left, RowNotification::ValueChanged)));
        assert_eq!(inbox.pop(), Some((Slot::Left, RowNotification::HighlightChanged)));
        assert_eq!(inbox.pop(), None);

        drop(sub);
        assert!(!notifier.is_connected());
        notifier.value_changed();
        assert!(!inbox.is_pending());
    }

    #[test]
    fn notifications_keep_arrival_order_across_slots() {
        let inbox = Inbox::new();
        let right = inbox.subscribe(Slot::Right);
        let left = inbox.subscribe(Slot::Left);
        right.notifier().highlight_changed();
        left.notifier().highlight_changed();
        right.notifier().value_changed();

        let drained: Vec<_> = std::iter::from_fn(|| inbox.pop()).collect();
        assert_eq!(
            drained,
            vec![
                (Slot::Right, RowNotification::HighlightChanged),
                (Slot::Left, RowNotification::HighlightChanged),
                (Slot::Right, RowNotification::ValueChanged),
            ]
        );
    }

    #[test]
    fn discard_is_scoped_to_one_slot() {
        let inbox = Inbox::new();
        let right_sub = inbox.subscribe(Slot::Right);
        let center_sub = inbox.subscribe(Slot::Center);
        let right = right_sub.notifier();
        let center = center_sub.notifier();
        right.value_changed();
        center.value_changed();
        right.highlight_changed();
        right.value_changed();

        inbox.discard_value_changes(Slot::Right);
        assert_eq!(inbox.pop(), Some((Slot::Center, RowNotification::ValueChanged)));
        assert_eq!(inbox.pop(), Some((Slot::Right, RowNotification::HighlightChanged)));
        assert!(!inbox.is_pending());

        center.highlight_changed();
        inbox.discard(Slot::Center);
        assert!(!inbox.is_pending());
    }
}
