//! [`RecordingApplier`]: a `Vec`-backed [`CommandApplier`] test double.
//!
//! Tests across the workspace need a host that doesn't actually touch a real
//! display surface but still lets them assert on what *would* have been
//! sent. Unlike a no-op, this one also keeps a mirror tree so a test can
//! render a human-readable snapshot (see [`crate::snapshot`]) of the
//! surface it would have produced.

use std::convert::Infallible;

use rustc_hash::FxHashMap;
use vapor_core::{AttributeDelta, Attributes, CommandApplier, ElementKind};
use vapor_style::StyleHandle;

/// One opaque handle the applier hands back — just an incrementing id,
/// since there's no real display surface behind it.
pub type RecordedHandle = u64;

/// A single operation the applier was asked to perform, recorded in call
/// order for assertions (spec §4.7: "the applier must not reorder or
/// coalesce commands").
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    Create { handle: RecordedHandle, kind: ElementKind, style: StyleHandle },
    Update { handle: RecordedHandle, delta: AttributeDelta, new_style: StyleHandle },
    Remove { handle: RecordedHandle },
    Insert { child: RecordedHandle, parent: Option<RecordedHandle>, index: usize },
}

struct MirrorNode {
    kind: ElementKind,
    attributes: Attributes,
    style: StyleHandle,
    parent: Option<RecordedHandle>,
    children: Vec<RecordedHandle>,
}

/// Records every call it receives and maintains a mirror tree good enough
/// to render a [`crate::snapshot::render`] of. The mirror tree exists
/// purely for test assertions — a real host applier has no reason to keep
/// one since the actual display surface already is the tree.
#[derive(Default)]
pub struct RecordingApplier {
    pub ops: Vec<RecordedOp>,
    next_handle: RecordedHandle,
    nodes: FxHashMap<RecordedHandle, MirrorNode>,
    roots: Vec<RecordedHandle>,
}

impl RecordingApplier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub(crate) fn node(&self, handle: RecordedHandle) -> Option<&MirrorNode> {
        self.nodes.get(&handle)
    }

    pub(crate) fn roots(&self) -> &[RecordedHandle] {
        &self.roots
    }
}

impl CommandApplier for RecordingApplier {
    type Handle = RecordedHandle;
    type Error = Infallible;

    fn create(
        &mut self,
        kind: ElementKind,
        attributes: &Attributes,
        style: StyleHandle,
    ) -> Result<Self::Handle, Self::Error> {
        self.next_handle += 1;
        let handle = self.next_handle;
        self.nodes.insert(
            handle,
            MirrorNode { kind, attributes: attributes.clone(), style, parent: None, children: Vec::new() },
        );
        self.ops.push(RecordedOp::Create { handle, kind, style });
        Ok(handle)
    }

    fn apply_update(
        &mut self,
        handle: &Self::Handle,
        delta: &AttributeDelta,
        new_style: StyleHandle,
    ) -> Result<(), Self::Error> {
        if let Some(node) = self.nodes.get_mut(handle) {
            node.style = new_style;
            for change in &delta.changes {
                apply_attribute_change(&mut node.attributes, change);
            }
        }
        self.ops.push(RecordedOp::Update { handle: *handle, delta: delta.clone(), new_style });
        Ok(())
    }

    fn remove(&mut self, handle: &Self::Handle) -> Result<(), Self::Error> {
        if let Some(node) = self.nodes.remove(handle) {
            if let Some(parent) = node.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|c| c != handle);
                }
            } else {
                self.roots.retain(|r| r != handle);
            }
        }
        self.ops.push(RecordedOp::Remove { handle: *handle });
        Ok(())
    }

    fn insert(
        &mut self,
        child: &Self::Handle,
        parent: Option<&Self::Handle>,
        index: usize,
    ) -> Result<(), Self::Error> {
        // detach from wherever it currently lives, if anywhere
        if let Some(node) = self.nodes.get(child) {
            if let Some(old_parent) = node.parent {
                if let Some(old_parent_node) = self.nodes.get_mut(&old_parent) {
                    old_parent_node.children.retain(|c| c != child);
                }
            } else {
                self.roots.retain(|r| r != child);
            }
        }

        match parent {
            Some(parent) => {
                if let Some(node) = self.nodes.get_mut(child) {
                    node.parent = Some(*parent);
                }
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    let index = index.min(parent_node.children.len());
                    parent_node.children.insert(index, *child);
                }
            }
            None => {
                if let Some(node) = self.nodes.get_mut(child) {
                    node.parent = None;
                }
                let index = index.min(self.roots.len());
                self.roots.insert(index, *child);
            }
        }

        self.ops.push(RecordedOp::Insert { child: *child, parent: parent.copied(), index });
        Ok(())
    }
}

fn apply_attribute_change(attributes: &mut Attributes, change: &vapor_core::AttributeChange) {
    use vapor_core::AttributeChange;
    match (attributes, change) {
        (Attributes::Text { content }, AttributeChange::Text { new, .. }) => *content = new.clone(),
        (Attributes::Image { src, .. }, AttributeChange::ImageSrc { new, .. }) => *src = new.clone(),
        (Attributes::Image { alt, .. }, AttributeChange::ImageAlt { new, .. }) => *alt = new.clone(),
        (Attributes::Input { value, .. }, AttributeChange::InputValue { new, .. }) => *value = new.clone(),
        (Attributes::Input { placeholder, .. }, AttributeChange::InputPlaceholder { new, .. }) => {
            *placeholder = new.clone()
        }
        _ => {}
    }
}
