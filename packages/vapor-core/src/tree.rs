//! UI node and tree store (C3, spec §4.3).
//!
//! Holds the node table for one tree — either the new tree built this pass
//! or the retained tree from last pass — addressed by stable identity. The
//! spec allows "implementations may double-buffer or copy"; this port
//! keeps nodes in an owned [`slab::Slab`] rather than raw arena pointers
//! and swaps/clears the slab at the frame boundary. That gives the exact
//! externally-observable behavior the spec requires (frame-arena data is
//! unreachable after a reset, spec §3 invariant 6) without threading
//! unsafe arena lifetimes through the tree's own ownership — the `Arena`
//! types in `vapor-arena` still back the style interner and bound
//! element slots, which are the two places the spec actually requires
//! arena-scoped *pointers* to escape to user code.

use rustc_hash::FxHashMap;
use slab::Slab;

use crate::identity::NodeId;
use crate::node::UiNode;

/// One tree's worth of nodes, addressed by stable identity.
#[derive(Default)]
pub struct Tree {
    nodes: Slab<UiNode>,
    index: FxHashMap<NodeId, usize>,
    roots: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self { nodes: Slab::new(), index: FxHashMap::default(), roots: Vec::new() }
    }

    pub fn get(&self, id: NodeId) -> Option<&UiNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut UiNode> {
        let idx = *self.index.get(&id)?;
        Some(&mut self.nodes[idx])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub(crate) fn insert(&mut self, node: UiNode) {
        let id = node.id;
        let slot = self.nodes.insert(node);
        self.index.insert(id, slot);
    }

    pub(crate) fn set_roots(&mut self, roots: Vec<NodeId>) {
        self.roots = roots;
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Check that every recorded parent/child edge resolves to a node
    /// actually present in this tree. Used by the reconciler to detect the
    /// "retained tree identity index inconsistent with its structure"
    /// failure mode (spec §7 kind 4) before trusting it for matching.
    pub fn is_structurally_consistent(&self) -> bool {
        for (_, node) in self.nodes.iter() {
            for &child in &node.children {
                match self.index.get(&child) {
                    Some(&slot) => {
                        if self.nodes[slot].parent != Some(node.id) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
        }
        self.roots.iter().all(|r| self.index.contains_key(r))
    }
}
