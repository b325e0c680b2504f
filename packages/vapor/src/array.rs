//! `array(T, kind) -> dynamic_sequence` (spec §6): a growing ordered
//! sequence allocated in one of the four named arenas, for render code
//! that needs to build up a list before handing it to a builder call
//! (e.g. collecting child keys). Grounded on [`vapor_arena::Arena::bump`]
//! and `bumpalo::collections::Vec`, the crate's own growable-in-a-bump-arena
//! type.

use bumpalo::collections::Vec as BumpVec;

use vapor_arena::ArenaKind;

use crate::context::arena;

/// `array(T, kind)`. The returned vector is valid until `kind`'s arena is
/// next reset, exactly like any other value [`vapor_arena::Arena::alloc`]
/// hands back.
pub fn array<T>(kind: ArenaKind) -> BumpVec<'static, T> {
    BumpVec::new_in(arena(kind).bump())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{self, EngineContext};
    use vapor_arena::ArenaSet;

    fn install_test_engine() {
        let arenas: &'static ArenaSet = Box::leak(Box::new(ArenaSet::new()));
        context::install(std::rc::Rc::new(EngineContext {
            arenas,
            cycle: std::rc::Rc::new(|| {}),
            #[cfg(feature = "router")]
            force_full_replace: std::rc::Rc::new(|| {}),
            #[cfg(feature = "router")]
            router: std::rc::Rc::new(vapor_router::Router::new(arenas.view())),
        }));
    }

    #[test]
    fn array_grows_and_reads_back() {
        install_test_engine();
        let mut values: BumpVec<'static, u32> = array(ArenaKind::Scratch);
        values.push(1);
        values.push(2);
        values.push(3);
        assert_eq!(&values[..], &[1, 2, 3]);
        context::uninstall();
    }
}
