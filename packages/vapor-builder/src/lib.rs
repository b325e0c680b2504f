//! The fluent builder surface (C5): element constructors, style accessors,
//! and commit points layered over `vapor-core`'s lifecycle stack.

mod commit;
mod constructors;
mod element;
mod salt;

pub use commit::container_item;
pub use constructors::{
    container, container_keyed, image, image_keyed, input, input_keyed, interactive,
    interactive_keyed, text, text_keyed,
};
pub use element::{
    ContainerAttrs, ElementBuilder, ImageAttrs, InputAttrs, InteractiveAttrs, KindAttrs, TextAttrs,
};

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_arena::{Arena, ArenaKind};
    use vapor_style::StyleInterner;

    fn with_engine(f: impl FnOnce()) {
        let arena: &'static Arena = Box::leak(Box::new(Arena::new(ArenaKind::Persist)));
        vapor_style::install_interner(StyleInterner::new(arena));
        vapor_core::begin_pass();
        f();
        let _ = vapor_core::end_pass();
        vapor_style::uninstall_interner();
    }

    #[test]
    fn simple_leaf_commits() {
        with_engine(|| {
            text("hello").content("hello, world!").end().unwrap();
        });
    }

    #[test]
    fn nested_child_attaches_under_container() {
        with_engine(|| {
            container()
                .children(|| {
                    interactive()
                        .children(|| {
                            text("label").end().unwrap();
                        })
                        .unwrap();
                })
                .unwrap();
        });
    }

    #[test]
    fn keyed_list_items_build() {
        with_engine(|| {
            container()
                .children(|| {
                    for key in ["a", "b", "c"] {
                        text_keyed(key, key).end().unwrap();
                    }
                })
                .unwrap();
        });
    }

    #[test]
    fn style_accessors_accumulate_without_mutating_original() {
        with_engine(|| {
            let base = container();
            let styled = base.background(vapor_style::Color::rgb(1, 2, 3));
            styled.children(|| {}).unwrap();
        });
    }

    #[test]
    fn color_token_resolves_against_the_active_theme_before_interning() {
        use vapor_theme::{SemanticColor, ThemeDefinition, ThemeRegistry};

        let theme_arena: &'static Arena = Box::leak(Box::new(Arena::new(ArenaKind::Persist)));
        let theme: &'static ThemeRegistry<'static> = Box::leak(Box::new(ThemeRegistry::new(theme_arena)));
        theme
            .register(
                "default",
                ThemeDefinition::new().with_color(SemanticColor::Primary, vapor_style::Color::rgb(9, 9, 9)),
                true,
            )
            .unwrap();
        vapor_theme::install_theme(theme);

        with_engine(|| {
            container().color_token(SemanticColor::Primary).children(|| {}).unwrap();
        });

        vapor_theme::uninstall_theme();
    }
}
