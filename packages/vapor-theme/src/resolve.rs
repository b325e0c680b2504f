//! Resolving token-typed style fields against the active theme
//! (`SPEC_FULL.md` §8: "resolution happens before equality is considered" —
//! the interner must never see a `StyleField::Token`, only the literal it
//! resolves to).

use vapor_style::{StyleField, StyleValue};

use crate::registry::ThemeRegistry;
use crate::token::{SemanticColor, SemanticSpacing};

fn resolve_color_field(field: &StyleField<vapor_style::Color>, registry: &ThemeRegistry) -> StyleField<vapor_style::Color> {
    match field {
        StyleField::Token(token_id) => SemanticColor::ALL
            .iter()
            .find(|c| c.token_id() == *token_id)
            .and_then(|c| registry.resolve_color(*c))
            .map(StyleField::Literal)
            .unwrap_or(StyleField::Unset),
        other => other.clone(),
    }
}

fn resolve_dimension_field(
    field: &StyleField<vapor_style::Dimension>,
    registry: &ThemeRegistry,
) -> StyleField<vapor_style::Dimension> {
    match field {
        StyleField::Token(token_id) => SemanticSpacing::ALL
            .iter()
            .find(|s| s.token_id() == *token_id)
            .and_then(|s| registry.resolve_spacing(*s))
            .map(StyleField::Literal)
            .unwrap_or(StyleField::Unset),
        other => other.clone(),
    }
}

/// Replace every token-typed color and spacing field in `value` with its
/// literal resolution against `registry`'s active theme. Fields already
/// holding a literal (or unset) pass through untouched.
pub fn resolve_style_value(value: &StyleValue, registry: &ThemeRegistry) -> StyleValue {
    let mut resolved = value.clone();

    resolved.visual.color = resolve_color_field(&value.visual.color, registry);
    resolved.visual.background = resolve_color_field(&value.visual.background, registry);
    resolved.border.color = resolve_color_field(&value.border.color, registry);
    resolved.shadow.color = resolve_color_field(&value.shadow.color, registry);

    resolved.sizing.width = resolve_dimension_field(&value.sizing.width, registry);
    resolved.sizing.height = resolve_dimension_field(&value.sizing.height, registry);
    resolved.sizing.min_width = resolve_dimension_field(&value.sizing.min_width, registry);
    resolved.sizing.min_height = resolve_dimension_field(&value.sizing.min_height, registry);
    resolved.sizing.max_width = resolve_dimension_field(&value.sizing.max_width, registry);
    resolved.sizing.max_height = resolve_dimension_field(&value.sizing.max_height, registry);

    resolved.spacing.margin.top = resolve_dimension_field(&value.spacing.margin.top, registry);
    resolved.spacing.margin.right = resolve_dimension_field(&value.spacing.margin.right, registry);
    resolved.spacing.margin.bottom = resolve_dimension_field(&value.spacing.margin.bottom, registry);
    resolved.spacing.margin.left = resolve_dimension_field(&value.spacing.margin.left, registry);
    resolved.spacing.padding.top = resolve_dimension_field(&value.spacing.padding.top, registry);
    resolved.spacing.padding.right = resolve_dimension_field(&value.spacing.padding.right, registry);
    resolved.spacing.padding.bottom = resolve_dimension_field(&value.spacing.padding.bottom, registry);
    resolved.spacing.padding.left = resolve_dimension_field(&value.spacing.padding.left, registry);
    resolved.spacing.gap = resolve_dimension_field(&value.spacing.gap, registry);

    resolved.border.width = resolve_dimension_field(&value.border.width, registry);
    resolved.border.radius = resolve_dimension_field(&value.border.radius, registry);
    resolved.typography.font_size = resolve_dimension_field(&value.typography.font_size, registry);

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_arena::{Arena, ArenaKind};
    use vapor_style::{Color, Dimension, Float, VisualStyle};

    use crate::registry::ThemeDefinition;

    #[test]
    fn token_fields_resolve_to_literals() {
        let arena = Arena::new(ArenaKind::Persist);
        let registry = ThemeRegistry::new(&arena);
        registry
            .register("light", ThemeDefinition::new().with_color(SemanticColor::Primary, Color::rgb(10, 20, 30)), true)
            .unwrap();

        let value = StyleValue {
            visual: VisualStyle { color: StyleField::Token(SemanticColor::Primary.token_id()), ..Default::default() },
            ..Default::default()
        };
        let resolved = resolve_style_value(&value, &registry);
        assert_eq!(resolved.visual.color, StyleField::Literal(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn unresolvable_token_becomes_unset_not_a_guess() {
        let arena = Arena::new(ArenaKind::Persist);
        let registry = ThemeRegistry::new(&arena);
        registry.register("light", ThemeDefinition::new(), true).unwrap();

        let value = StyleValue {
            visual: VisualStyle { color: StyleField::Token(SemanticColor::Danger.token_id()), ..Default::default() },
            ..Default::default()
        };
        let resolved = resolve_style_value(&value, &registry);
        assert_eq!(resolved.visual.color, StyleField::Unset);
    }

    #[test]
    fn literal_fields_pass_through_unchanged() {
        let arena = Arena::new(ArenaKind::Persist);
        let registry = ThemeRegistry::new(&arena);
        registry.register("light", ThemeDefinition::new(), true).unwrap();

        let value = StyleValue {
            sizing: vapor_style::SizingStyle {
                width: StyleField::Literal(Dimension::Px(Float::from(42.0))),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve_style_value(&value, &registry);
        assert_eq!(resolved.sizing.width, StyleField::Literal(Dimension::Px(Float::from(42.0))));
    }
}
