//! The signal container (spec §4.8): "a minimal wrapper that bundles a
//! value with a dirty flag and a `cycle()` call on write." Storage is a
//! single-slot `vapor_slot::SlotStore`: reading a signal after its owner
//! has gone away reports [`vapor_slot::SlotError`] instead of dangling,
//! the same contract `vapor-slot` already gives bound element references
//! (SPEC_FULL §5).

use std::cell::{Cell, Ref};
use std::rc::Rc;

use vapor_slot::{BoundElement, Owner, SlotError, SlotStore};

use crate::active::notify_active;

/// A reactive value. Cloning a `Signal` is cheap and shares the same
/// backing slot and dirty flag — every clone observes the same writes.
pub struct Signal<T: 'static> {
    bound: BoundElement<T>,
    owner: Rc<Owner<T>>,
    dirty: Rc<Cell<bool>>,
}

impl<T: 'static> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self { bound: self.bound.clone(), owner: self.owner.clone(), dirty: self.dirty.clone() }
    }
}

impl<T: 'static> Signal<T> {
    /// Create a signal whose storage is owned by this `Signal`'s own
    /// clone family; it is freed once every clone (and the scope that
    /// created it) has dropped, matching spec §4.8's "dirty flag" bundle
    /// without needing a shared runtime-wide store.
    pub fn new(value: T) -> Self {
        let owner = Rc::new(SlotStore::new().owner());
        let bound = owner.insert(value);
        Self { bound, owner, dirty: Rc::new(Cell::new(false)) }
    }

    pub fn try_read(&self) -> Result<Ref<'_, T>, SlotError> {
        self.bound.try_read()
    }

    pub fn read(&self) -> Ref<'_, T> {
        self.bound.read()
    }

    pub fn set(&self, value: T) {
        *self.bound.try_write().expect("signal written after its owner scope ended") = value;
        self.mark_dirty();
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.bound.try_write().expect("signal written after its owner scope ended"));
        self.mark_dirty();
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    pub fn clear_dirty(&self) {
        self.dirty.set(false);
    }

    fn mark_dirty(&self) {
        self.dirty.set(true);
        notify_active();
    }
}

impl<T: Clone + 'static> Signal<T> {
    /// Convenience for `Copy`/`Clone` payloads: read and clone in one call.
    pub fn get(&self) -> T {
        self.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_round_trip() {
        let signal = Signal::new(1);
        assert_eq!(signal.get(), 1);
        signal.set(2);
        assert_eq!(signal.get(), 2);
    }

    #[test]
    fn write_marks_dirty() {
        let signal = Signal::new(0);
        assert!(!signal.is_dirty());
        signal.set(1);
        assert!(signal.is_dirty());
        signal.clear_dirty();
        assert!(!signal.is_dirty());
    }

    #[test]
    fn clones_share_storage_and_dirty_flag() {
        let a = Signal::new(String::from("x"));
        let b = a.clone();
        b.set(String::from("y"));
        assert_eq!(a.get(), "y");
        assert!(a.is_dirty());
    }

    #[test]
    fn update_mutates_in_place() {
        let signal = Signal::new(vec![1, 2, 3]);
        signal.update(|v| v.push(4));
        assert_eq!(signal.get(), vec![1, 2, 3, 4]);
    }
}
