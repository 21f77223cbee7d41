//! Insertion-ordered subscriber registry.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Callback = Rc<dyn Fn()>;

/// Subscribers in registration order.
///
/// Notification iterates a snapshot taken at the start of the pass, so
/// callbacks may subscribe or unsubscribe while it runs; changes apply from
/// the next pass on.
#[derive(Default)]
pub(crate) struct SubscriberSet {
    next_id: Cell<u64>,
    entries: RefCell<Vec<(u64, Callback)>>,
}

impl SubscriberSet {
    pub(crate) fn insert(&self, callback: Callback) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.entries.borrow_mut().push((id, callback));
        id
    }

    pub(crate) fn remove(&self, id: u64) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    fn snapshot(&self) -> Vec<Callback> {
        self.entries
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect()
    }

    /// Run one notification pass. A panicking callback aborts the rest.
    pub(crate) fn notify(&self) {
        let snapshot = self.snapshot();
        tracing::trace!(subscribers = snapshot.len(), "notifying subscribers");
        for callback in snapshot {
            callback();
        }
    }
}

/// Registration returned by [`StateContainer::subscribe`](crate::StateContainer::subscribe).
///
/// Dropping it does not unsubscribe; call [`unsubscribe`](Self::unsubscribe).
#[derive(Clone, Debug)]
pub struct Subscription {
    id: u64,
    set: Weak<SubscriberSet>,
}

impl Subscription {
    pub(crate) fn new(id: u64, set: &Rc<SubscriberSet>) -> Self {
        Self {
            id,
            set: Rc::downgrade(set),
        }
    }

    /// Remove the callback. Returns `false` if it was already removed or the
    /// container is gone.
    pub fn unsubscribe(&self) -> bool {
        self.set.upgrade().is_some_and(|set| set.remove(self.id))
    }
}

impl std::fmt::Debug for SubscriberSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberSet")
            .field("len", &self.len())
            .finish()
    }
}
