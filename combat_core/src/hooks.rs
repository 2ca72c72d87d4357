//! Observer hooks fired after an action completes

use crate::action::ActionReport;
use std::fmt;

/// A post-action callback
pub type Observer = Box<dyn FnMut(&ActionReport)>;

/// Handle returned when registering an observer, used to remove it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered list of observers owned by one action
///
/// Observers run synchronously in registration order with no isolation: one
/// that mutates shared state is seen by every observer after it.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Observer)>,
}

impl Observers {
    pub fn new() -> Self {
        Observers::default()
    }

    /// Register an observer at the end of the list
    pub fn add<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&ActionReport) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Register an observer if one was given; `None` is ignored
    pub fn add_optional<F>(&mut self, observer: Option<F>) -> Option<ObserverId>
    where
        F: FnMut(&ActionReport) + 'static,
    {
        observer.map(|f| self.add(f))
    }

    /// Remove an observer. Unknown or already-removed handles are ignored.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run every observer once, in registration order
    pub fn fire(&mut self, report: &ActionReport) {
        for (_, observer) in &mut self.entries {
            observer(report);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stat_core::EntityId;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn report() -> ActionReport {
        ActionReport::Death {
            entity: EntityId(1),
        }
    }

    fn recorder(log: &Rc<RefCell<Vec<u32>>>, tag: u32) -> impl FnMut(&ActionReport) + 'static {
        let log = Rc::clone(log);
        move |_| log.borrow_mut().push(tag)
    }

    #[test]
    fn test_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        observers.add(recorder(&log, 1));
        observers.add(recorder(&log, 2));
        observers.add(recorder(&log, 3));

        observers.fire(&report());
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_by_handle() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        observers.add(recorder(&log, 1));
        let second = observers.add(recorder(&log, 2));
        observers.add(recorder(&log, 3));

        assert!(observers.remove(second));
        assert!(!observers.remove(second));
        observers.fire(&report());
        assert_eq!(*log.borrow(), vec![1, 3]);
    }

    #[test]
    fn test_none_is_ignored() {
        let mut observers = Observers::new();
        let none: Option<fn(&ActionReport)> = None;
        assert!(observers.add_optional(none).is_none());
        assert!(observers.is_empty());

        assert!(observers.add_optional(Some(|_: &ActionReport| {})).is_some());
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_clear() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();
        observers.add(recorder(&log, 1));
        observers.clear();
        observers.fire(&report());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_shared_state_visible_to_later_observers() {
        let counter = Rc::new(RefCell::new(0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let c = Rc::clone(&counter);
        observers.add(move |_| *c.borrow_mut() += 10);
        let (c, s) = (Rc::clone(&counter), Rc::clone(&seen));
        observers.add(move |_| s.borrow_mut().push(*c.borrow()));

        observers.fire(&report());
        observers.fire(&report());
        assert_eq!(*seen.borrow(), vec![10, 20]);
    }
}
