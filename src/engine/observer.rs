//! Per-test notification of a running scenario.

use std::ptr;
use std::rc::Rc;

use super::test::Test;

/// Receives every test right after it finished, in registration order.
///
/// Called synchronously on the thread running the scenario, once per test, before the next test starts.
pub trait RegistryObserver {
    fn update(&self, test: &Test);
}

impl<F: Fn(&Test)> RegistryObserver for F {
    fn update(&self, test: &Test) {
        self(test)
    }
}

/// Identity set of observers, kept in insertion order.
#[derive(Default)]
pub(crate) struct Observers {
    entries: Vec<Rc<dyn RegistryObserver>>,
}

impl Observers {
    /// Returns `false` when the same observer is already registered.
    pub(crate) fn add(&mut self, observer: Rc<dyn RegistryObserver>) -> bool {
        if self.position(&observer).is_some() {
            return false;
        }
        self.entries.push(observer);
        true
    }

    pub(crate) fn remove<O: RegistryObserver + ?Sized>(&mut self, observer: &Rc<O>) -> bool {
        match self.position(observer) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&self, test: &Test) {
        for observer in &self.entries {
            observer.update(test);
        }
    }

    fn position<O: ?Sized>(&self, observer: &Rc<O>) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| ptr::addr_eq(Rc::as_ptr(entry), Rc::as_ptr(observer)))
    }
}
