//! A persist-arena-backed table of semantic icon names to icon sources
//! (`SPEC_FULL.md` §8: icon tokens get the same "resolve by name against a
//! registry" treatment as colors and spacing, but the result is an opaque
//! source string rather than a style field, so it lives alongside the
//! theme registry rather than inside [`crate::resolve`]).

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use vapor_arena::Arena;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IconError {
    #[error("icon `{name}` is not registered")]
    UnknownIcon { name: String },
    #[error("icon registry's persist arena is exhausted: {0}")]
    ArenaExhausted(#[from] vapor_arena::AllocError),
}

/// Maps a semantic icon name (`"chevron-down"`, `"close"`) to a source the
/// host knows how to render (an SVG path, a font glyph, a sprite key). The
/// engine has no opinion on what the source string means.
pub struct IconRegistry<'a> {
    arena: &'a Arena,
    icons: RefCell<FxHashMap<&'a str, &'a str>>,
}

impl<'a> IconRegistry<'a> {
    pub fn new(persist_arena: &'a Arena) -> Self {
        Self { arena: persist_arena, icons: RefCell::new(FxHashMap::default()) }
    }

    pub fn register(&self, name: &str, source: &str) -> Result<(), IconError> {
        let name = self.arena.alloc_str(name)?;
        let source = self.arena.alloc_str(source)?;
        self.icons.borrow_mut().insert(name, source);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&'a str, IconError> {
        self.icons
            .borrow()
            .get(name)
            .copied()
            .ok_or_else(|| IconError::UnknownIcon { name: name.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_arena::ArenaKind;

    #[test]
    fn registers_and_resolves() {
        let arena = Arena::new(ArenaKind::Persist);
        let icons = IconRegistry::new(&arena);
        icons.register("close", "M1 1L9 9").unwrap();
        assert_eq!(icons.resolve("close").unwrap(), "M1 1L9 9");
    }

    #[test]
    fn unregistered_icon_errors() {
        let arena = Arena::new(ArenaKind::Persist);
        let icons = IconRegistry::new(&arena);
        let err = icons.resolve("missing").unwrap_err();
        assert_eq!(err, IconError::UnknownIcon { name: "missing".to_string() });
    }
}
