//! The UI node record (spec §3) and its lifecycle phase marker.

use std::cell::Cell;
use std::rc::Rc;

use smallvec::SmallVec;
use vapor_style::StyleHandle;

use crate::attributes::Attributes;
use crate::element::ElementKind;
use crate::identity::NodeId;

/// `open → configured → closed`, strictly monotonic (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Open,
    Configured,
    Closed,
}

/// A node in either the new (in-progress) tree or the retained (last
/// reconciled) tree. Parent is stored as an identity, not a pointer — spec
/// §9's "cyclic references" design note: "store the parent's stable
/// identity and look up through the identity index" rather than a true
/// back-pointer, so the ownership graph stays acyclic.
#[derive(Debug, Clone)]
pub struct UiNode {
    pub id: NodeId,
    pub kind: ElementKind,
    pub style: Option<StyleHandle>,
    pub attributes: Attributes,
    pub key: Option<Rc<str>>,
    pub children: SmallVec<[NodeId; 4]>,
    pub parent: Option<NodeId>,
    pub(crate) phase: Cell<LifecyclePhase>,
}

impl UiNode {
    pub(crate) fn opened(id: NodeId, kind: ElementKind, key: Option<Rc<str>>, parent: Option<NodeId>) -> Self {
        Self {
            id,
            kind,
            style: None,
            attributes: Attributes::default_for(kind),
            key,
            children: SmallVec::new(),
            parent,
            phase: Cell::new(LifecyclePhase::Open),
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase.get()
    }
}
