//! Thread-local access to the session's active theme registry.
//!
//! The builder surface needs to resolve `StyleField::Token` fields against
//! "the" active theme at every commit point, without `vapor-builder` taking
//! a dependency on the facade crate that owns the engine singleton. This
//! mirrors `vapor_style::active`'s thread-local interner exactly: the active
//! registry is installed once at `init` and reached via free functions from
//! then on.

use std::cell::RefCell;

use vapor_style::StyleValue;

use crate::registry::ThemeRegistry;
use crate::resolve::resolve_style_value;

thread_local! {
    static ACTIVE_THEME: RefCell<Option<&'static ThemeRegistry<'static>>> = const { RefCell::new(None) };
}

/// Install the session's theme registry as the thread-local target for
/// [`resolve_active`]. Typically called once, at engine `init`, with a
/// leaked (session-lifetime) registry — the same leaked-for-`'static`
/// pattern `init` already uses for its arena set.
pub fn install_theme(registry: &'static ThemeRegistry<'static>) {
    ACTIVE_THEME.with(|cell| {
        *cell.borrow_mut() = Some(registry);
    });
}

pub fn theme_installed() -> bool {
    ACTIVE_THEME.with(|cell| cell.borrow().is_some())
}

/// Resolve `value`'s tokens against the thread's active theme, if one is
/// installed. With no theme installed, `value` passes through unchanged —
/// a builder with no `StyleField::Token` fields (the common case before a
/// host ever calls [`install_theme`]) has nothing to resolve, and failing
/// this call would break every style-interning path that predates theming.
pub fn resolve_active(value: &StyleValue) -> StyleValue {
    ACTIVE_THEME.with(|cell| match *cell.borrow() {
        Some(registry) => resolve_style_value(value, registry),
        None => value.clone(),
    })
}

/// Remove the installed registry, e.g. at engine teardown or between
/// independent test runs on the same thread.
pub fn uninstall_theme() {
    ACTIVE_THEME.with(|cell| {
        cell.borrow_mut().take();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_arena::{Arena, ArenaKind};
    use vapor_style::{Color, StyleField};

    use crate::registry::ThemeDefinition;
    use crate::token::SemanticColor;

    #[test]
    fn no_theme_installed_passes_tokens_through_unresolved() {
        let mut value = StyleValue::default();
        value.visual.color = StyleField::Token(SemanticColor::Primary.token_id());

        let resolved = resolve_active(&value);
        assert_eq!(resolved.visual.color, StyleField::Token(SemanticColor::Primary.token_id()));
    }

    #[test]
    fn installed_theme_resolves_color_tokens() {
        let arena: &'static Arena = Box::leak(Box::new(Arena::new(ArenaKind::Persist)));
        let registry: &'static ThemeRegistry<'static> = Box::leak(Box::new(ThemeRegistry::new(arena)));
        registry
            .register("default", ThemeDefinition::new().with_color(SemanticColor::Primary, Color::rgb(10, 20, 30)), true)
            .unwrap();
        install_theme(registry);

        let mut value = StyleValue::default();
        value.visual.color = StyleField::Token(SemanticColor::Primary.token_id());
        let resolved = resolve_active(&value);
        assert_eq!(resolved.visual.color, StyleField::Literal(Color::rgb(10, 20, 30)));

        uninstall_theme();
    }
}
