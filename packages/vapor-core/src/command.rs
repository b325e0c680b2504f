//! Command records (spec §3 "Command records", §4.6 step 5) — the three
//! disjoint arrays the reconciler emits.

use vapor_style::StyleHandle;

use crate::attributes::{Attributes, AttributeDelta};
use crate::element::ElementKind;
use crate::identity::NodeId;

/// The full spec for a node and its subtree, as needed by an `Add`
/// command (spec §3: "full node spec").
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub id: NodeId,
    pub kind: ElementKind,
    pub style: StyleHandle,
    pub attributes: Attributes,
    pub children: Vec<NodeSpec>,
}

#[derive(Debug, Clone)]
pub struct AddCommand {
    pub parent: Option<NodeId>,
    pub index: usize,
    pub node: NodeSpec,
}

#[derive(Debug, Clone, Copy)]
pub struct RemoveCommand {
    pub id: NodeId,
}

/// An in-place update. `attr_delta` is `None` when attributes didn't
/// change; `style` is always `(old, new)` — cheap to carry even when equal
/// since comparing two handles is an integer compare (spec §4.6 step 3).
/// `reorder_to` carries a move hint when this node's position among its
/// siblings changed under a keyed reorder (spec §4.6 step 4) without the
/// node itself otherwise differing.
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    pub id: NodeId,
    /// The matched pair's parent in the new tree — `None` for a root-level
    /// node. Needed alongside `reorder_to` so a reorder's `insert` targets
    /// the node's actual parent rather than re-parenting it to the root.
    pub parent: Option<NodeId>,
    pub attr_delta: Option<AttributeDelta>,
    pub style: (StyleHandle, StyleHandle),
    pub reorder_to: Option<usize>,
}

impl UpdateCommand {
    pub fn is_noop(&self) -> bool {
        self.attr_delta.is_none() && self.style.0 == self.style.1 && self.reorder_to.is_none()
    }
}

/// The three disjoint command arrays produced by one reconciliation (spec
/// §3, invariant 4). Concatenated in finalize order — removes, then
/// updates, then adds — per spec §4.6 step 5, realized here as three
/// separately-ordered vectors the applier consumes in that sequence (see
/// [`crate::apply::apply_commands`]).
#[derive(Debug, Clone, Default)]
pub struct CommandSet {
    pub removes: Vec<RemoveCommand>,
    pub updates: Vec<UpdateCommand>,
    pub adds: Vec<AddCommand>,
}

impl CommandSet {
    pub fn is_empty(&self) -> bool {
        self.removes.is_empty() && self.updates.is_empty() && self.adds.is_empty()
    }
}
