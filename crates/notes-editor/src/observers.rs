//! Change listeners and their disposable handles.
//!
//! Listeners are zero-argument callbacks. The list has set semantics by
//! pointer identity: subscribing the same `Rc` twice registers it once and
//! both handles refer to the same entry. Invocation order is unspecified.

use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type Listener = Rc<dyn Fn()>;

type Key = u64;

#[derive(Default)]
struct Slots {
    next_key: Key,
    entries: SmallVec<[(Key, Listener); 4]>,
}

impl Slots {
    fn contains(&self, key: Key) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    fn remove(&mut self, key: Key) -> bool {
        match self.entries.iter().position(|(k, _)| *k == key) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Observer list owned by the canvas.
#[derive(Clone, Default)]
pub struct ObserverList {
    slots: Rc<RefCell<Slots>>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. Returns the handle that removes it again.
    pub fn subscribe(&self, listener: Listener) -> Subscription {
        let mut slots = self.slots.borrow_mut();
        let existing = slots
            .entries
            .iter()
            .find(|(_, l)| Rc::ptr_eq(l, &listener))
            .map(|(key, _)| *key);
        let key = match existing {
            Some(key) => key,
            None => {
                let key = slots.next_key;
                slots.next_key += 1;
                slots.entries.push((key, listener));
                key
            }
        };
        Subscription {
            slots: Some(Rc::downgrade(&self.slots)),
            key,
        }
    }

    /// Invoke every listener once.
    ///
    /// Runs on a snapshot so listeners may subscribe or unsubscribe while
    /// being notified. A listener removed by an earlier one in the same round
    /// is skipped; one added during the round waits for the next.
    pub fn notify(&self) {
        let snapshot: SmallVec<[(Key, Listener); 4]> = self.slots.borrow().entries.clone();
        for (key, listener) in snapshot {
            if self.slots.borrow().contains(key) {
                listener();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().entries.is_empty()
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle does *not* unsubscribe; call `unsubscribe` (the
/// teardown function handed to reactive consumers). Outliving the canvas is
/// fine: unsubscribing then is a no-op.
#[must_use = "keep the subscription to be able to unsubscribe"]
pub struct Subscription {
    slots: Option<Weak<RefCell<Slots>>>,
    key: Key,
}

impl Subscription {
    /// A handle bound to nothing. Used when there is no canvas to observe.
    pub fn detached() -> Self {
        Self {
            slots: None,
            key: 0,
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.slots
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|slots| slots.borrow().contains(self.key))
    }

    /// Remove exactly this listener. Idempotent.
    pub fn unsubscribe(&self) {
        if let Some(slots) = self.slots.as_ref().and_then(Weak::upgrade) {
            slots.borrow_mut().remove(self.key);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<u32>>, Listener) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, Rc::new(move || c.set(c.get() + 1)))
    }

    #[test]
    fn notify_calls_each_listener_once() {
        let list = ObserverList::new();
        let (a, la) = counter();
        let (b, lb) = counter();
        let _sa = list.subscribe(la);
        let _sb = list.subscribe(lb);

        list.notify();
        assert_eq!((a.get(), b.get()), (1, 1));
    }

    #[test]
    fn same_listener_registers_once() {
        let list = ObserverList::new();
        let (count, listener) = counter();
        let first = list.subscribe(listener.clone());
        let second = list.subscribe(listener);
        assert_eq!(list.len(), 1);

        list.notify();
        assert_eq!(count.get(), 1);

        second.unsubscribe();
        assert!(!first.is_active());
        assert!(list.is_empty());
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let list = ObserverList::new();
        let (_, listener) = counter();
        let sub = list.subscribe(listener);
        sub.unsubscribe();
        sub.unsubscribe();
        assert!(list.is_empty());
    }

    #[test]
    fn listener_removed_mid_round_is_skipped() {
        let list = ObserverList::new();
        let (late, late_listener) = counter();
        let late_sub = Rc::new(RefCell::new(None::<Subscription>));

        let handle = late_sub.clone();
        let _remover = list.subscribe(Rc::new(move || {
            if let Some(sub) = handle.borrow().as_ref() {
                sub.unsubscribe();
            }
        }));
        *late_sub.borrow_mut() = Some(list.subscribe(late_listener));

        list.notify();
        assert_eq!(late.get(), 0);
    }

    #[test]
    fn handle_outliving_list_is_inert() {
        let (_, listener) = counter();
        let sub = {
            let list = ObserverList::new();
            list.subscribe(listener)
        };
        assert!(!sub.is_active());
        sub.unsubscribe();
    }

    #[test]
    fn detached_handle_does_nothing() {
        let sub = Subscription::detached();
        assert!(!sub.is_active());
        sub.unsubscribe();
    }
}
