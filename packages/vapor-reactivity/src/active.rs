//! The driver's thread-local handle, installed once so `Signal::set`
//! can reach the in-flight driver without either crate depending on the
//! facade that owns both. Same pattern as `vapor_core::stack`'s lifecycle
//! stack and `vapor_style::active`'s interner slot.

use std::cell::RefCell;
use std::rc::Rc;

/// What a signal write needs from the driver: "something changed, decide
/// whether that warrants a pass" (spec §4.8's mode-dependent rerun rule).
pub trait DriverHandle {
    fn notify(&self);
}

thread_local! {
    static ACTIVE_DRIVER: RefCell<Option<Rc<dyn DriverHandle>>> = const { RefCell::new(None) };
}

pub fn install_driver(handle: Rc<dyn DriverHandle>) {
    ACTIVE_DRIVER.with(|cell| *cell.borrow_mut() = Some(handle));
}

pub fn uninstall_driver() {
    ACTIVE_DRIVER.with(|cell| *cell.borrow_mut() = None);
}

pub fn driver_installed() -> bool {
    ACTIVE_DRIVER.with(|cell| cell.borrow().is_some())
}

pub(crate) fn notify_active() {
    ACTIVE_DRIVER.with(|cell| {
        if let Some(handle) = cell.borrow().as_ref() {
            handle.notify();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct CountingHandle(Rc<Cell<u32>>);
    impl DriverHandle for CountingHandle {
        fn notify(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn notify_without_a_driver_is_a_silent_no_op() {
        uninstall_driver();
        notify_active();
    }

    #[test]
    fn installed_driver_receives_notifications() {
        let count = Rc::new(Cell::new(0));
        install_driver(Rc::new(CountingHandle(count.clone())));
        notify_active();
        notify_active();
        assert_eq!(count.get(), 2);
        uninstall_driver();
    }
}
