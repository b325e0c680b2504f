//! Semantic design tokens (`SPEC_FULL.md` §8): the common color and
//! spacing-scale names a style field can reference instead of a literal
//! value. Token shape is modeled on `vapor-style`'s own field groups —
//! colors resolve against [`SemanticColor`], dimensions against
//! [`SemanticSpacing`].

use vapor_style::TokenId;

/// A semantic color name. Resolved against the active theme's color map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticColor {
    Primary,
    Secondary,
    Background,
    Surface,
    Border,
    Danger,
    OnPrimary,
    OnBackground,
}

impl SemanticColor {
    pub const ALL: [SemanticColor; 8] = [
        SemanticColor::Primary,
        SemanticColor::Secondary,
        SemanticColor::Background,
        SemanticColor::Surface,
        SemanticColor::Border,
        SemanticColor::Danger,
        SemanticColor::OnPrimary,
        SemanticColor::OnBackground,
    ];

    /// Stable `TokenId` encoding: tag bit 0 distinguishes color tokens from
    /// spacing tokens (see [`SemanticSpacing::token_id`]), the rest is the
    /// variant's position.
    pub fn token_id(self) -> TokenId {
        TokenId((self as u32) << 1)
    }
}

/// A step on the spacing scale. Resolved against the active theme's
/// spacing map to a concrete [`vapor_style::Dimension`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticSpacing {
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl SemanticSpacing {
    pub const ALL: [SemanticSpacing; 5] = [
        SemanticSpacing::Xs,
        SemanticSpacing::Sm,
        SemanticSpacing::Md,
        SemanticSpacing::Lg,
        SemanticSpacing::Xl,
    ];

    pub fn token_id(self) -> TokenId {
        TokenId(((self as u32) << 1) | 1)
    }
}
