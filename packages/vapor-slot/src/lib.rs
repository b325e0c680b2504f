//! Generation-checked slots.
//!
//! Spec §3 describes a "bound element reference": an opaque handle the
//! host hands back to user code that bridges across render passes to a
//! retained-tree node identity, living in the persist or view arena. This
//! crate is the mechanism: a [`BoundElement`] is a `(slot, generation)`
//! pair. Reading it after its owning [`Owner`] (i.e. the arena-scoped
//! region that produced it) has gone away returns an error rather than
//! dangling — this is what makes "store a slice from a TextField into a
//! list" a diagnosable misuse instead of undefined behavior (see
//! `spec.md` §4.1's rationale).

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SlotError {
    #[error("slot was freed (its owner scope ended) before this read")]
    Freed,
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

struct Inner<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Inner<T> {
    fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new() }
    }

    fn insert(&mut self, value: T) -> (usize, u32) {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.value = Some(value);
            (index, slot.generation)
        } else {
            let index = self.slots.len();
            self.slots.push(Slot { generation: 0, value: Some(value) });
            (index, 0)
        }
    }

    fn free(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.value = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(index);
    }
}

/// Shared backing store for one type of bound reference. Typically one
/// `SlotStore` per kind of cross-pass handle the engine hands out.
pub struct SlotStore<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> SlotStore<T> {
    pub fn new() -> Self {
        Self { inner: Rc::new(RefCell::new(Inner::new())) }
    }

    /// Open a new owning scope. All slots inserted through this owner are
    /// freed when the owner is dropped — model this as "the view arena was
    /// reset" or "the persist arena was torn down" by dropping the
    /// corresponding owner at that boundary.
    pub fn owner(&self) -> Owner<T> {
        Owner { inner: self.inner.clone(), owned: RefCell::new(Vec::new()) }
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().slots.len() - self.inner.borrow().free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for SlotStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for SlotStore<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

/// An owning scope. Dropping it frees every slot it inserted, bumping
/// their generation so outstanding [`BoundElement`]s start returning
/// [`SlotError::Freed`].
pub struct Owner<T> {
    inner: Rc<RefCell<Inner<T>>>,
    owned: RefCell<Vec<usize>>,
}

impl<T> Owner<T> {
    pub fn insert(&self, value: T) -> BoundElement<T> {
        let (index, generation) = self.inner.borrow_mut().insert(value);
        self.owned.borrow_mut().push(index);
        BoundElement { inner: self.inner.clone(), index, generation }
    }
}

impl<T> Drop for Owner<T> {
    fn drop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        for index in self.owned.borrow().iter().copied() {
            inner.free(index);
        }
    }
}

/// An opaque, `Copy`-free handle bridging user code to a slot value across
/// render passes. Cloning is cheap (index + generation + a shared-store
/// handle); cloning does not extend the slot's lifetime.
pub struct BoundElement<T> {
    inner: Rc<RefCell<Inner<T>>>,
    index: usize,
    generation: u32,
}

impl<T> Clone for BoundElement<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone(), index: self.index, generation: self.generation }
    }
}

impl<T> BoundElement<T> {
    pub fn try_read(&self) -> Result<Ref<'_, T>, SlotError> {
        let borrow = self.inner.borrow();
        let slot = &borrow.slots[self.index];
        if slot.generation != self.generation || slot.value.is_none() {
            return Err(SlotError::Freed);
        }
        Ok(Ref::map(borrow, |inner| inner.slots[self.index].value.as_ref().unwrap()))
    }

    pub fn try_write(&self) -> Result<RefMut<'_, T>, SlotError> {
        let borrow = self.inner.borrow_mut();
        let slot = &borrow.slots[self.index];
        if slot.generation != self.generation || slot.value.is_none() {
            return Err(SlotError::Freed);
        }
        Ok(RefMut::map(borrow, |inner| inner.slots[self.index].value.as_mut().unwrap()))
    }

    /// Convenience for call sites that treat a freed handle as a
    /// programmer error rather than a recoverable condition.
    pub fn read(&self) -> Ref<'_, T> {
        self.try_read().expect("bound element read after its owner scope ended")
    }

    #[cfg(test)]
    fn raw_index(&self) -> usize {
        self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn works() {
        let store = SlotStore::new();
        let owner = store.owner();
        let key = owner.insert(1);
        assert_eq!(*key.read(), 1);
    }

    #[test]
    fn drops_invalidate_reads() {
        let store = SlotStore::new();
        let key;
        {
            let owner = store.owner();
            key = owner.insert(String::from("hello world"));
        }
        assert_eq!(key.try_read(), Err(SlotError::Freed));
    }

    #[test]
    fn leaking_is_ok() {
        let store = SlotStore::new();
        let key;
        {
            let owner = store.owner();
            key = owner.insert(String::from("hello world"));
            std::mem::forget(owner);
        }
        assert_eq!(key.try_read().as_deref().unwrap(), "hello world");
    }

    #[test]
    fn freed_slots_are_reused() {
        let store: SlotStore<i32> = SlotStore::new();
        let first_index;
        {
            let owner = store.owner();
            first_index = owner.insert(1).raw_index();
        }
        let owner = store.owner();
        let second = owner.insert(2);
        assert_eq!(second.raw_index(), first_index);
    }

    #[test]
    fn insert_while_holding_a_read() {
        let store = SlotStore::new();
        let owner = store.owner();
        let key = owner.insert(String::from("hello world"));
        let value = key.try_read().unwrap();
        owner.insert(999);
        assert_eq!(&*value, "hello world");
    }

    #[test]
    fn write_mutates_in_place() {
        let store = SlotStore::new();
        let owner = store.owner();
        let key = owner.insert(1);
        *key.try_write().unwrap() = 2;
        assert_eq!(*key.read(), 2);
    }

    #[test]
    fn store_len_tracks_live_slots() {
        let store: SlotStore<i32> = SlotStore::new();
        let owner = store.owner();
        for i in 0..10 {
            owner.insert(i);
        }
        assert_eq!(store.len(), 10);
        drop(owner);
        assert_eq!(store.len(), 0);
    }
}
