//! The facade's thread-local engine context: the fourth instance of the
//! "active context installed once, reached via free functions" pattern
//! already used by [`vapor_core::stack`]'s lifecycle stack,
//! [`vapor_style::active`]'s interner slot, and
//! [`vapor_reactivity::active`]'s driver handle. Type-erased via `Rc<dyn
//! Fn()>` closures so this module never needs to be generic over the
//! [`vapor_core::CommandApplier`] type parameter [`crate::Engine`] carries.

use std::cell::RefCell;
use std::rc::Rc;

use vapor_arena::{Arena, ArenaKind, ArenaSet};

#[cfg(feature = "router")]
use vapor_router::{Router, RouterError};

pub(crate) struct EngineContext {
    pub(crate) arenas: &'static ArenaSet,
    pub(crate) cycle: Rc<dyn Fn()>,
    #[cfg(feature = "router")]
    pub(crate) force_full_replace: Rc<dyn Fn()>,
    #[cfg(feature = "router")]
    pub(crate) router: Rc<Router<'static>>,
}

thread_local! {
    static ACTIVE: RefCell<Option<Rc<EngineContext>>> = const { RefCell::new(None) };
}

pub(crate) fn install(context: Rc<EngineContext>) {
    ACTIVE.with(|cell| *cell.borrow_mut() = Some(context));
}

pub(crate) fn uninstall() {
    ACTIVE.with(|cell| {
        cell.borrow_mut().take();
    });
}

pub(crate) fn installed() -> bool {
    ACTIVE.with(|cell| cell.borrow().is_some())
}

fn with_active<R>(f: impl FnOnce(&EngineContext) -> R) -> R {
    ACTIVE.with(|cell| {
        let borrow = cell.borrow();
        let context = borrow.as_ref().expect("no vapor engine installed; call vapor::init() first");
        f(context)
    })
}

/// `arena(kind) -> allocator` (spec §6).
pub fn arena(kind: ArenaKind) -> &'static Arena {
    with_active(|ctx| ctx.arenas.get(kind))
}

pub(crate) fn cycle_active() {
    with_active(|ctx| (ctx.cycle)());
}

#[cfg(feature = "router")]
pub(crate) fn router_active() -> Rc<Router<'static>> {
    with_active(|ctx| ctx.router.clone())
}

/// Cross to `path`, then force the next pass to discard the retained tree
/// (spec §4.9: "the retained tree is discarded and the next pass is a
/// full add") and run it immediately.
#[cfg(feature = "router")]
pub(crate) fn navigate_active(path: &str) -> Result<(), RouterError> {
    with_active(|ctx| {
        ctx.router.navigate(path)?;
        (ctx.force_full_replace)();
        (ctx.cycle)();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_without_an_installed_engine_panics() {
        uninstall();
        let result = std::panic::catch_unwind(|| arena(ArenaKind::Scratch));
        assert!(result.is_err());
    }

    #[test]
    fn installed_flag_tracks_install_and_uninstall() {
        uninstall();
        assert!(!installed());
        let arenas: &'static ArenaSet = Box::leak(Box::new(ArenaSet::new()));
        install(Rc::new(EngineContext {
            arenas,
            cycle: Rc::new(|| {}),
            #[cfg(feature = "router")]
            force_full_replace: Rc::new(|| {}),
            #[cfg(feature = "router")]
            router: Rc::new(Router::new(arenas.view())),
        }));
        assert!(installed());
        uninstall();
        assert!(!installed());
    }
}
