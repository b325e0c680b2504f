//! `eventListener(global_event_kind, fn)` (spec §6): a process-wide
//! listener registry for events with no single originating node — window
//! resize, visibility change, connectivity changes. Distinct from
//! per-element handler bindings (`vapor_builder`'s `on_click`/`on_input`),
//! which attach to one node and flow through the lifecycle stack instead.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use vapor_core::EventValue;

/// A global event vapor hosts may dispatch. `Other` covers host-specific
/// kinds this crate has no name for (matching `vapor-core`'s builder
/// attribute surface, which is itself a closed enumeration per spec §3 —
/// global events get the same closed-with-an-escape-hatch treatment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalEventKind {
    Resize,
    VisibilityChange,
    Online,
    Offline,
    Other(&'static str),
}

thread_local! {
    static LISTENERS: RefCell<FxHashMap<GlobalEventKind, Vec<Rc<dyn Fn(&EventValue)>>>> =
        RefCell::new(FxHashMap::default());
}

/// `eventListener(global_event_kind, fn)`. Listeners run in registration
/// order; there is no way to unregister one (matching the spec's
/// "register a process-wide listener" wording, which names no removal
/// operation).
pub fn event_listener(kind: GlobalEventKind, f: impl Fn(&EventValue) + 'static) {
    LISTENERS.with(|cell| {
        cell.borrow_mut().entry(kind).or_default().push(Rc::new(f));
    });
}

/// Dispatch `value` to every listener registered for `kind`, in
/// registration order. Host adapters call this from wherever they learn
/// the underlying platform event happened (a resize callback, a
/// `navigator.onLine` handler, ...).
pub fn dispatch_global_event(kind: GlobalEventKind, value: &EventValue) {
    let listeners = LISTENERS.with(|cell| cell.borrow().get(&kind).cloned().unwrap_or_default());
    for listener in &listeners {
        listener(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;

    fn reset() {
        LISTENERS.with(|cell| cell.borrow_mut().clear());
    }

    #[test]
    fn registered_listeners_run_in_order() {
        reset();
        let order = Rc::new(StdRefCell::new(Vec::new()));
        let a = order.clone();
        let b = order.clone();
        event_listener(GlobalEventKind::Resize, move |_| a.borrow_mut().push(1));
        event_listener(GlobalEventKind::Resize, move |_| b.borrow_mut().push(2));
        dispatch_global_event(GlobalEventKind::Resize, &());
        assert_eq!(*order.borrow(), vec![1, 2]);
    }

    #[test]
    fn other_kinds_are_unaffected() {
        reset();
        let fired = Rc::new(StdRefCell::new(false));
        let fired_clone = fired.clone();
        event_listener(GlobalEventKind::Online, move |_| *fired_clone.borrow_mut() = true);
        dispatch_global_event(GlobalEventKind::Offline, &());
        assert!(!*fired.borrow());
    }
}
