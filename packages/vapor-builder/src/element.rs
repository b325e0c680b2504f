//! Fluent, value-returning builder values (C5).
//!
//! Every accessor consumes `self` and returns a fresh value with one field
//! set; the builder itself never mutates the tree. Tree mutation happens
//! only through two call-outs to `vapor_core::stack`: element construction
//! opens the node immediately (so a child block evaluated while this node
//! is the stack top attaches correctly), and a commit method (`end`,
//! `children`, `children_styled`) configures and closes it.

use std::rc::Rc;

use vapor_core::{Attributes, ElementKind, EngineError, HandlerBinding, HandlerIdentity, NodeId};
use vapor_elements::{permits, AttributeKind};
use vapor_style::{
    Align, BorderLineStyle, Color, Dimension, Direction, Display, Easing, Float, FontFamily,
    FontWeight, StyleField, StyleValue, TransitionProperty,
};
use vapor_theme::{SemanticColor, SemanticSpacing};

use crate::salt::call_site_salt;

/// Marker + accessors for the kind-specific attribute payload a builder
/// carries, one impl per element kind. Kept as a trait (rather than a bare
/// enum field) so each constructor can only ever build the one variant its
/// kind admits — a `TextAttrs`-carrying builder has no method that could
/// produce `Attributes::Image`, which is the "kind-gated accessor" contract
/// realized at the type level instead of at runtime.
pub trait KindAttrs: Clone {
    const KIND: ElementKind;
    fn into_attributes(self) -> Attributes;
}

#[derive(Debug, Clone, Default)]
pub struct ContainerAttrs;

impl KindAttrs for ContainerAttrs {
    const KIND: ElementKind = ElementKind::Container;
    fn into_attributes(self) -> Attributes {
        Attributes::Container
    }
}

#[derive(Debug, Clone)]
pub struct TextAttrs {
    pub(crate) content: Rc<str>,
}

impl KindAttrs for TextAttrs {
    const KIND: ElementKind = ElementKind::Text;
    fn into_attributes(self) -> Attributes {
        Attributes::Text { content: self.content }
    }
}

#[derive(Debug, Clone)]
pub struct ImageAttrs {
    pub(crate) src: Rc<str>,
    pub(crate) alt: Option<Rc<str>>,
}

impl Default for ImageAttrs {
    fn default() -> Self {
        Self { src: Rc::from(""), alt: None }
    }
}

impl KindAttrs for ImageAttrs {
    const KIND: ElementKind = ElementKind::Image;
    fn into_attributes(self) -> Attributes {
        Attributes::Image { src: self.src, alt: self.alt }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractiveAttrs {
    pub(crate) handler: Option<HandlerBinding>,
}

impl KindAttrs for InteractiveAttrs {
    const KIND: ElementKind = ElementKind::Interactive;
    fn into_attributes(self) -> Attributes {
        Attributes::Interactive { handler: self.handler }
    }
}

#[derive(Debug, Clone)]
pub struct InputAttrs {
    pub(crate) value: Rc<str>,
    pub(crate) placeholder: Option<Rc<str>>,
    pub(crate) handler: Option<HandlerBinding>,
}

impl Default for InputAttrs {
    fn default() -> Self {
        Self { value: Rc::from(""), placeholder: None, handler: None }
    }
}

impl KindAttrs for InputAttrs {
    const KIND: ElementKind = ElementKind::Input;
    fn into_attributes(self) -> Attributes {
        Attributes::Input { value: self.value, placeholder: self.placeholder, handler: self.handler }
    }
}

/// A builder value for one open node. `A` pins which [`KindAttrs`] variant
/// it carries, and therefore which kind-specific accessors are available —
/// `ElementBuilder<InputAttrs>` has `.value(..)`, `ElementBuilder<ImageAttrs>`
/// does not, enforced by `impl` blocks rather than a runtime check.
pub struct ElementBuilder<A: KindAttrs> {
    pub(crate) id: NodeId,
    pub(crate) style: StyleValue,
    pub(crate) attrs: A,
}

#[track_caller]
pub(crate) fn open_builder<A: KindAttrs>(key: Option<Rc<str>>, attrs: A) -> ElementBuilder<A> {
    let id = vapor_core::open(A::KIND, call_site_salt(), key);
    ElementBuilder { id, style: StyleValue::default(), attrs }
}

/// Generic accessors shared by every kind: the universal style fields
/// (visual/layout/sizing/spacing/typography/border/shadow/transition), plus
/// the per-node user key already baked in at construction.
impl<A: KindAttrs> ElementBuilder<A> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    fn with_style(mut self, f: impl FnOnce(&mut StyleValue)) -> Self {
        f(&mut self.style);
        self
    }

    pub fn color(self, color: Color) -> Self {
        self.with_style(|s| s.visual.color = StyleField::Literal(color))
    }

    /// A semantic color token instead of a literal; resolved against the
    /// active theme when this builder commits (see `finalize`).
    pub fn color_token(self, token: SemanticColor) -> Self {
        self.with_style(|s| s.visual.color = StyleField::Token(token.token_id()))
    }

    pub fn background(self, color: Color) -> Self {
        self.with_style(|s| s.visual.background = StyleField::Literal(color))
    }

    pub fn background_token(self, token: SemanticColor) -> Self {
        self.with_style(|s| s.visual.background = StyleField::Token(token.token_id()))
    }

    pub fn opacity(self, value: f32) -> Self {
        self.with_style(|s| s.visual.opacity = StyleField::Literal(Float::from(value)))
    }

    pub fn display(self, value: Display) -> Self {
        self.with_style(|s| s.layout.display = StyleField::Literal(value))
    }

    pub fn direction(self, value: Direction) -> Self {
        self.with_style(|s| s.layout.direction = StyleField::Literal(value))
    }

    pub fn justify(self, value: Align) -> Self {
        self.with_style(|s| s.layout.justify = StyleField::Literal(value))
    }

    pub fn align_items(self, value: Align) -> Self {
        self.with_style(|s| s.layout.align_items = StyleField::Literal(value))
    }

    pub fn width(self, value: Dimension) -> Self {
        self.with_style(|s| s.sizing.width = StyleField::Literal(value))
    }

    pub fn height(self, value: Dimension) -> Self {
        self.with_style(|s| s.sizing.height = StyleField::Literal(value))
    }

    pub fn padding(self, value: Dimension) -> Self {
        self.with_style(|s| {
            s.spacing.padding.top = StyleField::Literal(value);
            s.spacing.padding.right = StyleField::Literal(value);
            s.spacing.padding.bottom = StyleField::Literal(value);
            s.spacing.padding.left = StyleField::Literal(value);
        })
    }

    pub fn padding_token(self, token: SemanticSpacing) -> Self {
        self.with_style(|s| {
            let id = token.token_id();
            s.spacing.padding.top = StyleField::Token(id);
            s.spacing.padding.right = StyleField::Token(id);
            s.spacing.padding.bottom = StyleField::Token(id);
            s.spacing.padding.left = StyleField::Token(id);
        })
    }

    pub fn margin(self, value: Dimension) -> Self {
        self.with_style(|s| {
            s.spacing.margin.top = StyleField::Literal(value);
            s.spacing.margin.right = StyleField::Literal(value);
            s.spacing.margin.bottom = StyleField::Literal(value);
            s.spacing.margin.left = StyleField::Literal(value);
        })
    }

    pub fn margin_token(self, token: SemanticSpacing) -> Self {
        self.with_style(|s| {
            let id = token.token_id();
            s.spacing.margin.top = StyleField::Token(id);
            s.spacing.margin.right = StyleField::Token(id);
            s.spacing.margin.bottom = StyleField::Token(id);
            s.spacing.margin.left = StyleField::Token(id);
        })
    }

    pub fn gap(self, value: Dimension) -> Self {
        self.with_style(|s| s.spacing.gap = StyleField::Literal(value))
    }

    pub fn gap_token(self, token: SemanticSpacing) -> Self {
        self.with_style(|s| s.spacing.gap = StyleField::Token(token.token_id()))
    }

    pub fn font_family(self, family: FontFamily) -> Self {
        self.with_style(|s| s.typography.font_family = StyleField::Literal(family))
    }

    pub fn font_size(self, value: Dimension) -> Self {
        self.with_style(|s| s.typography.font_size = StyleField::Literal(value))
    }

    pub fn font_size_token(self, token: SemanticSpacing) -> Self {
        self.with_style(|s| s.typography.font_size = StyleField::Token(token.token_id()))
    }

    pub fn font_weight(self, value: FontWeight) -> Self {
        self.with_style(|s| s.typography.font_weight = StyleField::Literal(value))
    }

    pub fn italic(self, value: bool) -> Self {
        self.with_style(|s| s.typography.italic = StyleField::Literal(value))
    }

    pub fn border_width(self, value: Dimension) -> Self {
        self.with_style(|s| s.border.width = StyleField::Literal(value))
    }

    pub fn border_width_token(self, token: SemanticSpacing) -> Self {
        self.with_style(|s| s.border.width = StyleField::Token(token.token_id()))
    }

    pub fn border_color(self, color: Color) -> Self {
        self.with_style(|s| s.border.color = StyleField::Literal(color))
    }

    pub fn border_color_token(self, token: SemanticColor) -> Self {
        self.with_style(|s| s.border.color = StyleField::Token(token.token_id()))
    }

    pub fn border_radius(self, value: Dimension) -> Self {
        self.with_style(|s| s.border.radius = StyleField::Literal(value))
    }

    pub fn border_radius_token(self, token: SemanticSpacing) -> Self {
        self.with_style(|s| s.border.radius = StyleField::Token(token.token_id()))
    }

    pub fn border_style(self, value: BorderLineStyle) -> Self {
        self.with_style(|s| s.border.style = StyleField::Literal(value))
    }

    pub fn transition(self, property: TransitionProperty, duration_ms: u32, easing: Easing) -> Self {
        self.with_style(|s| {
            s.transition.property = StyleField::Literal(property);
            s.transition.duration_ms = StyleField::Literal(duration_ms);
            s.transition.easing = StyleField::Literal(easing);
        })
    }
}

impl ElementBuilder<TextAttrs> {
    pub fn content(mut self, value: impl Into<Rc<str>>) -> Self {
        debug_assert!(permits(ElementKind::Text, AttributeKind::TextContent));
        self.attrs.content = value.into();
        self
    }
}

impl ElementBuilder<ImageAttrs> {
    pub fn src(mut self, value: impl Into<Rc<str>>) -> Self {
        debug_assert!(permits(ElementKind::Image, AttributeKind::ImageSrc));
        self.attrs.src = value.into();
        self
    }

    pub fn alt(mut self, value: impl Into<Rc<str>>) -> Self {
        debug_assert!(permits(ElementKind::Image, AttributeKind::ImageAlt));
        self.attrs.alt = Some(value.into());
        self
    }
}

impl ElementBuilder<InteractiveAttrs> {
    /// Zero-argument handler binding. Takes a plain `fn` item, not an
    /// arbitrary closure: Rust `fn(..)` values coerced from a fn item have
    /// a stable address for the process's lifetime, which is the "stable
    /// function address" the diffing identity needs. A capturing closure
    /// has no such address, so captures belong in [`Self::on_click_with`].
    pub fn on_click(mut self, f: fn(&vapor_core::EventValue)) -> Self {
        debug_assert!(permits(ElementKind::Interactive, AttributeKind::Handler));
        let identity = HandlerIdentity::new(f as usize, 0);
        self.attrs.handler = Some(HandlerBinding::new(identity, Rc::new(f)));
        self
    }

    /// Context-bound handler binding: the precomposed-argument form.
    /// `args` is hashed and captured by value; identity combines a
    /// per-instantiation type id (stable for the process's lifetime, one
    /// per distinct `(F, C)` pair) with the args hash, since a capturing
    /// closure has no fn-pointer address of its own.
    pub fn on_click_with<F, C>(mut self, f: F, args: C) -> Self
    where
        F: Fn(&C, &vapor_core::EventValue) + 'static,
        C: std::hash::Hash + 'static,
    {
        debug_assert!(permits(ElementKind::Interactive, AttributeKind::Handler));
        self.attrs.handler = Some(context_bound_handler(f, args));
        self
    }
}

fn context_bound_handler<F, C>(f: F, args: C) -> HandlerBinding
where
    F: Fn(&C, &vapor_core::EventValue) + 'static,
    C: std::hash::Hash + 'static,
{
    use std::hash::{Hash, Hasher};
    let mut hasher = rustc_hash::FxHasher::default();
    std::any::TypeId::of::<F>().hash(&mut hasher);
    args.hash(&mut hasher);
    let type_hash = hasher.finish();

    let mut args_hasher = rustc_hash::FxHasher::default();
    args.hash(&mut args_hasher);
    let identity = HandlerIdentity::new(type_hash as usize, args_hasher.finish());

    let captured = Rc::new(args);
    HandlerBinding::new(identity, Rc::new(move |ev| f(&captured, ev)))
}

impl ElementBuilder<InputAttrs> {
    pub fn value(mut self, value: impl Into<Rc<str>>) -> Self {
        debug_assert!(permits(ElementKind::Input, AttributeKind::InputValue));
        self.attrs.value = value.into();
        self
    }

    pub fn placeholder(mut self, value: impl Into<Rc<str>>) -> Self {
        debug_assert!(permits(ElementKind::Input, AttributeKind::InputPlaceholder));
        self.attrs.placeholder = Some(value.into());
        self
    }

    pub fn on_input(mut self, f: fn(&vapor_core::EventValue)) -> Self {
        debug_assert!(permits(ElementKind::Input, AttributeKind::Handler));
        let identity = HandlerIdentity::new(f as usize, 0);
        self.attrs.handler = Some(HandlerBinding::new(identity, Rc::new(f)));
        self
    }

    pub fn on_input_with<F, C>(mut self, f: F, args: C) -> Self
    where
        F: Fn(&C, &vapor_core::EventValue) + 'static,
        C: std::hash::Hash + 'static,
    {
        debug_assert!(permits(ElementKind::Input, AttributeKind::Handler));
        self.attrs.handler = Some(context_bound_handler(f, args));
        self
    }
}

/// Intern this builder's accumulated style and hand back `(handle,
/// attributes)`, ready for a commit point to pass to
/// [`vapor_core::configure`].
pub(crate) fn finalize<A: KindAttrs>(builder: ElementBuilder<A>) -> Result<(vapor_style::StyleHandle, Attributes), EngineError> {
    let resolved = vapor_theme::resolve_active(&builder.style);
    let handle = vapor_style::intern_active(resolved)?;
    Ok((handle, builder.attrs.into_attributes()))
}
