//! The closed set of leaf element kinds and their display attributes
//! (spec §1: "out of scope... specified only where they cross the core
//! boundary"; spec §3: "The engine knows each kind's permitted attributes
//! and permitted children arity").
//!
//! [`vapor_core::ElementKind`] carries the tag and child arity the
//! lifecycle stack needs to validate `open`/`configure` calls; this crate
//! adds the richer permitted-attribute table a real host binding (DOM,
//! native) consults when deciding which attribute setters a given kind
//! exposes, trimmed to exactly the kinds spec §3 names.

use vapor_core::ElementKind;

/// One attribute a given [`ElementKind`] is permitted to carry, beyond the
/// universal style fields every kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    TextContent,
    ImageSrc,
    ImageAlt,
    Handler,
    InputValue,
    InputPlaceholder,
}

impl AttributeKind {
    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::TextContent => "text",
            AttributeKind::ImageSrc => "src",
            AttributeKind::ImageAlt => "alt",
            AttributeKind::Handler => "handler",
            AttributeKind::InputValue => "value",
            AttributeKind::InputPlaceholder => "placeholder",
        }
    }
}

/// The permitted attribute set for one [`ElementKind`], returned by
/// [`permitted_attributes`]. A builder accessor for an attribute not in
/// this set is the "kind-gated accessor" misuse spec §9's design note
/// ("an `input`-only accessor on a non-input node is... an error")
/// describes; `vapor-builder` consults this table to reject such calls.
pub fn permitted_attributes(kind: ElementKind) -> &'static [AttributeKind] {
    match kind {
        ElementKind::Container => &[],
        ElementKind::Text => &[AttributeKind::TextContent],
        ElementKind::Image => &[AttributeKind::ImageSrc, AttributeKind::ImageAlt],
        ElementKind::Interactive => &[AttributeKind::Handler],
        ElementKind::Input => {
            &[AttributeKind::InputValue, AttributeKind::InputPlaceholder, AttributeKind::Handler]
        }
    }
}

pub fn permits(kind: ElementKind, attribute: AttributeKind) -> bool {
    permitted_attributes(kind).contains(&attribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_permits_no_kind_specific_attributes() {
        assert!(permitted_attributes(ElementKind::Container).is_empty());
    }

    #[test]
    fn input_permits_value_and_handler_but_not_image_src() {
        assert!(permits(ElementKind::Input, AttributeKind::InputValue));
        assert!(permits(ElementKind::Input, AttributeKind::Handler));
        assert!(!permits(ElementKind::Input, AttributeKind::ImageSrc));
    }

    #[test]
    fn every_kind_has_a_table_entry() {
        for kind in ElementKind::ALL {
            let _ = permitted_attributes(kind);
        }
    }
}
