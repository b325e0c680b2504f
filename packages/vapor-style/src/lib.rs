//! Style values and the content-addressed interner that deduplicates them
//! (C2, spec §3 and §4.2).

mod active;
mod interner;
mod value;

pub use active::{install_interner, intern_active, interner_installed, uninstall_interner};
pub use interner::{InternError, StyleHandle, StyleInterner};
pub use value::{
    Align, AnimationIterations, AnimationStyle, BorderLineStyle, BorderStyle, Color, Dimension,
    Direction, Display, EdgeInsets, Easing, Float, FontFamily, FontWeight, InteractiveStyle,
    LayoutStyle, ShadowStyle, SizingStyle, SpacingStyle, StyleField, StyleValue, TokenId,
    TransitionProperty, TransitionStyle, TypographyStyle, VisualStyle,
};
