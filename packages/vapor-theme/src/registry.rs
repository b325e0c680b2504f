//! The theme registry (`SPEC_FULL.md` §8, spec §4.10): a persist-arena
//! backed mapping from theme name to its token tables, plus the
//! currently-active theme. Modeled on `vapor-style::StyleInterner`'s own
//! persist-arena-backed table shape.

use std::cell::RefCell;

use rustc_hash::FxHashMap;
use vapor_arena::Arena;
use vapor_style::{Color, Dimension};

use crate::token::{SemanticColor, SemanticSpacing};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ThemeError {
    #[error("theme `{name}` is not registered")]
    UnknownTheme { name: String },
    #[error("theme registry's persist arena is exhausted: {0}")]
    ArenaExhausted(#[from] vapor_arena::AllocError),
}

/// One theme's token tables. A theme need not define every token; an
/// unresolved token is the caller's bug to surface (style resolution
/// leaves it `Unset` rather than guessing).
#[derive(Debug, Clone, Default)]
pub struct ThemeDefinition {
    pub colors: FxHashMap<SemanticColor, Color>,
    pub spacing: FxHashMap<SemanticSpacing, Dimension>,
}

impl ThemeDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, token: SemanticColor, value: Color) -> Self {
        self.colors.insert(token, value);
        self
    }

    pub fn with_spacing(mut self, token: SemanticSpacing, value: Dimension) -> Self {
        self.spacing.insert(token, value);
        self
    }
}

/// Persist-arena-backed registry of named themes plus the active one.
/// Registration is expected once at `init` (spec §6: `init(config)`'s
/// `themes: [(name, colors, default?)]`).
pub struct ThemeRegistry<'a> {
    arena: &'a Arena,
    themes: RefCell<FxHashMap<&'a str, ThemeDefinition>>,
    active: RefCell<Option<&'a str>>,
}

impl<'a> ThemeRegistry<'a> {
    pub fn new(persist_arena: &'a Arena) -> Self {
        Self { arena: persist_arena, themes: RefCell::new(FxHashMap::default()), active: RefCell::new(None) }
    }

    /// Register a theme by name, optionally making it the active one. The
    /// first theme registered becomes active by default even without
    /// `default: true`, so a single-theme app never needs to say so.
    pub fn register(&self, name: &str, definition: ThemeDefinition, default: bool) -> Result<(), ThemeError> {
        let stored_name: &'a str = self.arena.alloc_str(name)?;
        let make_active = default || self.active.borrow().is_none();
        self.themes.borrow_mut().insert(stored_name, definition);
        if make_active {
            *self.active.borrow_mut() = Some(stored_name);
        }
        Ok(())
    }

    pub fn set_active(&self, name: &str) -> Result<(), ThemeError> {
        let themes = self.themes.borrow();
        let Some((&stored, _)) = themes.get_key_value(name) else {
            return Err(ThemeError::UnknownTheme { name: name.to_string() });
        };
        *self.active.borrow_mut() = Some(stored);
        Ok(())
    }

    pub fn active_name(&self) -> Option<&'a str> {
        *self.active.borrow()
    }

    pub fn resolve_color(&self, token: SemanticColor) -> Option<Color> {
        let active = (*self.active.borrow())?;
        self.themes.borrow().get(active)?.colors.get(&token).copied()
    }

    pub fn resolve_spacing(&self, token: SemanticSpacing) -> Option<Dimension> {
        let active = (*self.active.borrow())?;
        self.themes.borrow().get(active)?.spacing.get(&token).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_arena::ArenaKind;
    use vapor_style::Color as Rgb;

    #[test]
    fn first_registered_theme_becomes_active() {
        let arena = Arena::new(ArenaKind::Persist);
        let registry = ThemeRegistry::new(&arena);
        registry.register("light", ThemeDefinition::new().with_color(SemanticColor::Primary, Rgb::rgb(1, 1, 1)), false).unwrap();
        assert_eq!(registry.active_name(), Some("light"));
    }

    #[test]
    fn default_flag_overrides_registration_order() {
        let arena = Arena::new(ArenaKind::Persist);
        let registry = ThemeRegistry::new(&arena);
        registry.register("light", ThemeDefinition::new(), false).unwrap();
        registry.register("dark", ThemeDefinition::new(), true).unwrap();
        assert_eq!(registry.active_name(), Some("dark"));
    }

    #[test]
    fn resolves_against_the_active_theme_only() {
        let arena = Arena::new(ArenaKind::Persist);
        let registry = ThemeRegistry::new(&arena);
        registry
            .register("light", ThemeDefinition::new().with_color(SemanticColor::Primary, Rgb::rgb(255, 255, 255)), true)
            .unwrap();
        registry
            .register("dark", ThemeDefinition::new().with_color(SemanticColor::Primary, Rgb::rgb(0, 0, 0)), false)
            .unwrap();

        assert_eq!(registry.resolve_color(SemanticColor::Primary), Some(Rgb::rgb(255, 255, 255)));
        registry.set_active("dark").unwrap();
        assert_eq!(registry.resolve_color(SemanticColor::Primary), Some(Rgb::rgb(0, 0, 0)));
    }

    #[test]
    fn unknown_theme_activation_errors() {
        let arena = Arena::new(ArenaKind::Persist);
        let registry = ThemeRegistry::new(&arena);
        let err = registry.set_active("nonexistent").unwrap_err();
        assert_eq!(err, ThemeError::UnknownTheme { name: "nonexistent".to_string() });
    }
}
