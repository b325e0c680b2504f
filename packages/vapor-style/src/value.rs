//! The style value record (spec §3) and its field-wise merge (spec §4.2).

use std::rc::Rc;

use ordered_float::OrderedFloat;

/// A floating-point style field. Wrapped so that [`StyleValue`] can derive
/// `Eq`/`Hash`, which the interner's extensional-equality contract
/// (invariant 3, spec §3) depends on.
pub type Float = OrderedFloat<f32>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Opaque reference to a semantic design token (e.g. "primary"). Resolved
/// against the active theme before a style value reaches the interner
/// (`SPEC_FULL.md` §8). Defined here, not in `vapor-theme`, so that
/// `vapor-style` has no dependency on the theme registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(pub u32);

/// A single style field: unset, a literal value, or a semantic token to be
/// resolved later. All fields default to `Unset` (spec §3).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleField<T> {
    Unset,
    Literal(T),
    Token(TokenId),
}

impl<T> Default for StyleField<T> {
    fn default() -> Self {
        StyleField::Unset
    }
}

impl<T> Copy for StyleField<T> where T: Copy {}

impl<T: Clone> StyleField<T> {
    pub fn is_set(&self) -> bool {
        !matches!(self, StyleField::Unset)
    }

    /// Field-wise merge: `extension`'s value if set, else `self`'s.
    /// Not commutative — `a.merge(b) != b.merge(a)` in general.
    pub fn merge(&self, extension: &Self) -> Self {
        if extension.is_set() {
            extension.clone()
        } else {
            self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Display {
    Flex,
    Block,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Row,
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Px(Float),
    Percent(Float),
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderLineStyle {
    Solid,
    Dashed,
    Dotted,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Thin,
    Light,
    Regular,
    Medium,
    Bold,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionProperty {
    All,
    Color,
    Opacity,
    Transform,
    Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationIterations {
    Finite(u32),
    Infinite,
}

macro_rules! merge_fields {
    ($self:expr, $other:expr, $ty:ident { $($field:ident),+ $(,)? }) => {
        $ty {
            $($field: $self.$field.merge(&$other.$field)),+
        }
    };
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct VisualStyle {
    pub color: StyleField<Color>,
    pub background: StyleField<Color>,
    pub opacity: StyleField<Float>,
}

impl VisualStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, VisualStyle { color, background, opacity })
    }
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct LayoutStyle {
    pub display: StyleField<Display>,
    pub direction: StyleField<Direction>,
    pub justify: StyleField<Align>,
    pub align_items: StyleField<Align>,
}

impl LayoutStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, LayoutStyle { display, direction, justify, align_items })
    }
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct SizingStyle {
    pub width: StyleField<Dimension>,
    pub height: StyleField<Dimension>,
    pub min_width: StyleField<Dimension>,
    pub min_height: StyleField<Dimension>,
    pub max_width: StyleField<Dimension>,
    pub max_height: StyleField<Dimension>,
}

impl SizingStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, SizingStyle {
            width, height, min_width, min_height, max_width, max_height
        })
    }
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct EdgeInsets {
    pub top: StyleField<Dimension>,
    pub right: StyleField<Dimension>,
    pub bottom: StyleField<Dimension>,
    pub left: StyleField<Dimension>,
}

impl EdgeInsets {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, EdgeInsets { top, right, bottom, left })
    }
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct SpacingStyle {
    pub margin: EdgeInsets,
    pub padding: EdgeInsets,
    pub gap: StyleField<Dimension>,
}

impl SpacingStyle {
    fn merge(&self, other: &Self) -> Self {
        SpacingStyle {
            margin: self.margin.merge(&other.margin),
            padding: self.padding.merge(&other.padding),
            gap: self.gap.merge(&other.gap),
        }
    }
}

/// Font family names are interned as `Rc<str>` rather than `String` so
/// that cloning a [`StyleValue`] during merge stays cheap.
pub type FontFamily = Rc<str>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TypographyStyle {
    pub font_family: StyleField<FontFamily>,
    pub font_size: StyleField<Dimension>,
    pub font_weight: StyleField<FontWeight>,
    pub line_height: StyleField<Float>,
    pub text_align: StyleField<Align>,
    pub italic: StyleField<bool>,
}

impl TypographyStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, TypographyStyle {
            font_family, font_size, font_weight, line_height, text_align, italic
        })
    }
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct BorderStyle {
    pub width: StyleField<Dimension>,
    pub color: StyleField<Color>,
    pub radius: StyleField<Dimension>,
    pub style: StyleField<BorderLineStyle>,
}

impl BorderStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, BorderStyle { width, color, radius, style })
    }
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct ShadowStyle {
    pub offset_x: StyleField<Float>,
    pub offset_y: StyleField<Float>,
    pub blur: StyleField<Float>,
    pub spread: StyleField<Float>,
    pub color: StyleField<Color>,
}

impl ShadowStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, ShadowStyle { offset_x, offset_y, blur, spread, color })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InteractiveStyle {
    /// A partial style overlay applied while the node is hovered.
    pub hover: Option<Rc<StyleValue>>,
    /// A partial style overlay applied while the node has focus.
    pub focus: Option<Rc<StyleValue>>,
}

impl InteractiveStyle {
    fn merge(&self, other: &Self) -> Self {
        InteractiveStyle {
            hover: other.hover.clone().or_else(|| self.hover.clone()),
            focus: other.focus.clone().or_else(|| self.focus.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, Hash)]
pub struct TransitionStyle {
    pub property: StyleField<TransitionProperty>,
    pub duration_ms: StyleField<u32>,
    pub delay_ms: StyleField<u32>,
    pub easing: StyleField<Easing>,
}

impl TransitionStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, TransitionStyle { property, duration_ms, delay_ms, easing })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AnimationStyle {
    /// Name of an externally-registered animation this style binds to.
    pub binding: StyleField<Rc<str>>,
    pub iteration_count: StyleField<AnimationIterations>,
    pub duration_ms: StyleField<u32>,
}

impl AnimationStyle {
    fn merge(&self, other: &Self) -> Self {
        merge_fields!(self, other, AnimationStyle { binding, iteration_count, duration_ms })
    }
}

/// A fully value-typed style record. Every field defaults to unset;
/// merging is field-wise, last-writer-wins, non-commutative (spec §3–4.2).
/// Two style values compare equal iff every field compares equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct StyleValue {
    pub visual: VisualStyle,
    pub layout: LayoutStyle,
    pub sizing: SizingStyle,
    pub spacing: SpacingStyle,
    pub typography: TypographyStyle,
    pub border: BorderStyle,
    pub shadow: ShadowStyle,
    pub interactive: InteractiveStyle,
    pub transition: TransitionStyle,
    pub animation: AnimationStyle,
}

impl StyleValue {
    /// `base.merge(extension)`: every field is `extension`'s if set, else
    /// `base`'s. Interning happens after merging (spec §4.2).
    pub fn merge(&self, extension: &Self) -> Self {
        StyleValue {
            visual: self.visual.merge(&extension.visual),
            layout: self.layout.merge(&extension.layout),
            sizing: self.sizing.merge(&extension.sizing),
            spacing: self.spacing.merge(&extension.spacing),
            typography: self.typography.merge(&extension.typography),
            border: self.border.merge(&extension.border),
            shadow: self.shadow.merge(&extension.shadow),
            interactive: self.interactive.merge(&extension.interactive),
            transition: self.transition.merge(&extension.transition),
            animation: self.animation.merge(&extension.animation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_field_wise_last_writer_wins() {
        let base = StyleValue {
            visual: VisualStyle { color: StyleField::Literal(Color::rgb(1, 2, 3)), ..Default::default() },
            ..Default::default()
        };
        let extension = StyleValue {
            visual: VisualStyle { background: StyleField::Literal(Color::rgb(9, 9, 9)), ..Default::default() },
            ..Default::default()
        };
        let merged = base.merge(&extension);
        assert_eq!(merged.visual.color, StyleField::Literal(Color::rgb(1, 2, 3)));
        assert_eq!(merged.visual.background, StyleField::Literal(Color::rgb(9, 9, 9)));
    }

    #[test]
    fn merge_with_empty_is_identity() {
        let base = StyleValue {
            visual: VisualStyle { color: StyleField::Literal(Color::rgb(1, 2, 3)), ..Default::default() },
            ..Default::default()
        };
        let empty = StyleValue::default();
        assert_eq!(base.merge(&empty), base);
        assert_eq!(empty.merge(&base), base);
    }

    #[test]
    fn merge_is_not_commutative() {
        let a = StyleValue {
            visual: VisualStyle { color: StyleField::Literal(Color::rgb(1, 0, 0)), ..Default::default() },
            ..Default::default()
        };
        let b = StyleValue {
            visual: VisualStyle { color: StyleField::Literal(Color::rgb(0, 1, 0)), ..Default::default() },
            ..Default::default()
        };
        assert_ne!(a.merge(&b), b.merge(&a));
    }

    #[test]
    fn field_wise_identical_values_are_equal() {
        let a = StyleValue {
            typography: TypographyStyle {
                font_size: StyleField::Literal(Dimension::Px(Float::from(14.0))),
                ..Default::default()
            },
            ..Default::default()
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}
