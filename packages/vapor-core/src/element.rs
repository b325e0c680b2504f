//! The closed element-kind enumeration crossing the core boundary (spec §3,
//! §1 "concrete set of leaf element kinds... specified only where they
//! cross the core boundary"). `vapor-elements` builds the richer
//! permitted-attribute/arity table on top of this tag; the tag itself and
//! the arity the reconciler/lifecycle stack must enforce live here because
//! the lifecycle stack needs them to validate `open`/`configure` calls.

/// How many children a kind is permitted to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildArity {
    /// Leaves: `text`, `image`, `input`.
    Zero,
    /// Exactly one child slot, e.g. a single-child wrapper.
    One,
    /// Any number of children, e.g. `container`.
    Many,
}

/// A display primitive. Closed per spec §3 ("a closed enumeration of
/// display primitives"); extending it is a breaking change to every
/// downstream crate that matches on it exhaustively, which is the point —
/// the engine knows every kind's shape statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ElementKind {
    Container,
    Text,
    Image,
    Interactive,
    Input,
}

impl ElementKind {
    pub const ALL: [ElementKind; 5] = [
        ElementKind::Container,
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Interactive,
        ElementKind::Input,
    ];

    pub fn child_arity(self) -> ChildArity {
        match self {
            ElementKind::Container => ChildArity::Many,
            ElementKind::Text => ChildArity::Zero,
            ElementKind::Image => ChildArity::Zero,
            ElementKind::Interactive => ChildArity::One,
            ElementKind::Input => ChildArity::Zero,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Container => "container",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
            ElementKind::Interactive => "interactive",
            ElementKind::Input => "input",
        }
    }
}
