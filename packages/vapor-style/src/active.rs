//! Thread-local access to the session's style interner.
//!
//! The builder surface needs to turn an accumulated [`StyleValue`] into a
//! [`StyleHandle`] at every commit point, without `vapor-builder` taking a
//! dependency on the facade crate that owns the engine singleton. This
//! mirrors `vapor_core::stack`'s thread-local lifecycle stack: the active
//! interner is installed once at `init` and reached via free functions
//! from then on.

use std::cell::RefCell;

use crate::interner::{InternError, StyleHandle, StyleInterner};
use crate::value::StyleValue;

thread_local! {
    static ACTIVE_INTERNER: RefCell<Option<StyleInterner<'static>>> = const { RefCell::new(None) };
}

/// Install the session's interner as the thread-local target for
/// [`intern_active`]. Typically called once, at engine `init`, with an
/// interner borrowing a leaked (session-lifetime) persist arena.
pub fn install_interner(interner: StyleInterner<'static>) {
    ACTIVE_INTERNER.with(|cell| {
        *cell.borrow_mut() = Some(interner);
    });
}

pub fn interner_installed() -> bool {
    ACTIVE_INTERNER.with(|cell| cell.borrow().is_some())
}

/// Intern `value` against the thread's active interner. Panics if no
/// interner has been installed — a call this early is an engine init bug,
/// not a recoverable condition a render pass could encounter.
pub fn intern_active(value: StyleValue) -> Result<StyleHandle, InternError> {
    ACTIVE_INTERNER.with(|cell| {
        let borrow = cell.borrow();
        let interner = borrow.as_ref().expect("no style interner installed; call init() first");
        interner.intern(value)
    })
}

/// Remove the installed interner, e.g. at engine teardown or between
/// independent test runs on the same thread.
pub fn uninstall_interner() {
    ACTIVE_INTERNER.with(|cell| {
        cell.borrow_mut().take();
    });
}
