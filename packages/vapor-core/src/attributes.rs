//! Kind-specific attribute payloads (spec §3: "kind-specific attribute
//! payload (text slice, image source, handler binding, etc.)") and their
//! per-field diff, used by the reconciler to build an `AttributeDelta`
//! (spec §4.6 step 3).

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use crate::element::ElementKind;

/// A fully type-erased event payload handed to a handler at dispatch time.
/// The concrete shape (mouse position, input text, ...) is an external
/// collaborator's concern (spec §1); the core only needs to move it
/// opaquely from the host to the handler.
pub type EventValue = dyn Any;

/// Identity of an event-handler binding for diffing purposes (spec §4.5.2):
/// `(function address, argument-tuple hash)`. Rust function items coerced
/// to `fn()` pointers have a stable address for the process's lifetime, so
/// an `as usize` cast satisfies the "stable function address" requirement
/// the spec's design notes call out directly (§9, open question 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerIdentity {
    fn_addr: usize,
    args_hash: u64,
}

impl HandlerIdentity {
    pub fn new(fn_addr: usize, args_hash: u64) -> Self {
        Self { fn_addr, args_hash }
    }
}

/// A context-bound handler: a callback plus the identity the reconciler
/// diffs against. The zero-argument and precomposed-argument forms in
/// spec §4.5.2 both reduce to this once the arguments have been hashed and
/// captured — the distinction is in the builder surface, not here.
#[derive(Clone)]
pub struct HandlerBinding {
    pub identity: HandlerIdentity,
    callback: Rc<dyn Fn(&EventValue)>,
}

impl HandlerBinding {
    pub fn new(identity: HandlerIdentity, callback: Rc<dyn Fn(&EventValue)>) -> Self {
        Self { identity, callback }
    }

    pub fn dispatch(&self, event: &EventValue) {
        (self.callback)(event)
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding").field("identity", &self.identity).finish()
    }
}

impl PartialEq for HandlerBinding {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

/// The kind-specific attribute payload carried by a [`crate::node::UiNode`].
/// One variant per [`ElementKind`]; the reconciler never compares across
/// variants for a node that kept the same kind (see `diff`).
#[derive(Debug, Clone)]
pub enum Attributes {
    Container,
    Text { content: Rc<str> },
    Image { src: Rc<str>, alt: Option<Rc<str>> },
    Interactive { handler: Option<HandlerBinding> },
    Input { value: Rc<str>, placeholder: Option<Rc<str>>, handler: Option<HandlerBinding> },
}

impl Attributes {
    pub fn kind(&self) -> ElementKind {
        match self {
            Attributes::Container => ElementKind::Container,
            Attributes::Text { .. } => ElementKind::Text,
            Attributes::Image { .. } => ElementKind::Image,
            Attributes::Interactive { .. } => ElementKind::Interactive,
            Attributes::Input { .. } => ElementKind::Input,
        }
    }

    pub fn default_for(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Container => Attributes::Container,
            ElementKind::Text => Attributes::Text { content: Rc::from("") },
            ElementKind::Image => Attributes::Image { src: Rc::from(""), alt: None },
            ElementKind::Interactive => Attributes::Interactive { handler: None },
            ElementKind::Input => {
                Attributes::Input { value: Rc::from(""), placeholder: None, handler: None }
            }
        }
    }

    /// Per-field diff against `other`, assumed to share this value's kind
    /// (the reconciler falls back to remove+add when a matched pair's kind
    /// changed, so `diff` never needs to handle that case — see
    /// `reconcile::diff_pair`).
    pub fn diff(&self, other: &Self) -> AttributeDelta {
        let mut changes = SmallVec::new();
        match (self, other) {
            (Attributes::Container, Attributes::Container) => {}
            (Attributes::Text { content: old }, Attributes::Text { content: new }) => {
                if old != new {
                    changes.push(AttributeChange::Text { old: old.clone(), new: new.clone() });
                }
            }
            (
                Attributes::Image { src: old_src, alt: old_alt },
                Attributes::Image { src: new_src, alt: new_alt },
            ) => {
                if old_src != new_src {
                    changes.push(AttributeChange::ImageSrc {
                        old: old_src.clone(),
                        new: new_src.clone(),
                    });
                }
                if old_alt != new_alt {
                    changes.push(AttributeChange::ImageAlt {
                        old: old_alt.clone(),
                        new: new_alt.clone(),
                    });
                }
            }
            (
                Attributes::Interactive { handler: old },
                Attributes::Interactive { handler: new },
            ) => {
                if handler_identity(old) != handler_identity(new) {
                    changes.push(AttributeChange::Handler {
                        old: handler_identity(old),
                        new: handler_identity(new),
                    });
                }
            }
            (
                Attributes::Input { value: old_v, placeholder: old_p, handler: old_h },
                Attributes::Input { value: new_v, placeholder: new_p, handler: new_h },
            ) => {
                if old_v != new_v {
                    changes.push(AttributeChange::InputValue {
                        old: old_v.clone(),
                        new: new_v.clone(),
                    });
                }
                if old_p != new_p {
                    changes.push(AttributeChange::InputPlaceholder {
                        old: old_p.clone(),
                        new: new_p.clone(),
                    });
                }
                if handler_identity(old_h) != handler_identity(new_h) {
                    changes.push(AttributeChange::Handler {
                        old: handler_identity(old_h),
                        new: handler_identity(new_h),
                    });
                }
            }
            _ => unreachable!("Attributes::diff called across differing kinds"),
        }
        AttributeDelta { changes }
    }
}

fn handler_identity(handler: &Option<HandlerBinding>) -> Option<HandlerIdentity> {
    handler.as_ref().map(|h| h.identity)
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeChange {
    Text { old: Rc<str>, new: Rc<str> },
    ImageSrc { old: Rc<str>, new: Rc<str> },
    ImageAlt { old: Option<Rc<str>>, new: Option<Rc<str>> },
    Handler { old: Option<HandlerIdentity>, new: Option<HandlerIdentity> },
    InputValue { old: Rc<str>, new: Rc<str> },
    InputPlaceholder { old: Option<Rc<str>>, new: Option<Rc<str>> },
}

/// The per-field attribute diff for a matched node pair (spec §4.6 step 3).
/// Empty iff the two payloads are field-wise equal.
#[derive(Debug, Clone, Default)]
pub struct AttributeDelta {
    pub changes: SmallVec<[AttributeChange; 4]>,
}

impl AttributeDelta {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_text_diffs_to_empty() {
        let a = Attributes::Text { content: Rc::from("hi") };
        let b = Attributes::Text { content: Rc::from("hi") };
        assert!(a.diff(&b).is_empty());
    }

    #[test]
    fn text_change_is_reported() {
        let a = Attributes::Text { content: Rc::from("0") };
        let b = Attributes::Text { content: Rc::from("1") };
        let delta = a.diff(&b);
        assert_eq!(delta.changes.len(), 1);
        assert!(matches!(&delta.changes[0], AttributeChange::Text { .. }));
    }

    #[test]
    fn image_diffs_src_and_alt_independently() {
        let a = Attributes::Image { src: Rc::from("a.png"), alt: None };
        let b = Attributes::Image { src: Rc::from("a.png"), alt: Some(Rc::from("alt")) };
        let delta = a.diff(&b);
        assert_eq!(delta.changes.len(), 1);
        assert!(matches!(&delta.changes[0], AttributeChange::ImageAlt { .. }));
    }
}
