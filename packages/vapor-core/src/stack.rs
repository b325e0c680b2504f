//! The lifecycle stack (C4, spec §4.4) and the thread-local engine context
//! that makes it implicitly available to builder calls.
//!
//! Spec §9 "Globally-visible engine state": "make the engine instance the
//! implicit context threaded through builder calls (a thread-local, a
//! pervasive handle, or a singleton with documented lifecycle —
//! implementer's choice, but pick one)." This engine picks a thread-local:
//! the lifecycle stack for the render pass currently in flight lives in
//! `ENGINE_STACK`, and `open`/`configure`/`close` are free functions that
//! reach into it. The engine is explicitly single-threaded (spec §5), so a
//! thread-local is exactly as global as the spec requires and no more.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use vapor_style::StyleHandle;

use crate::attributes::Attributes;
use crate::element::ElementKind;
use crate::error::LifecycleError;
use crate::identity::{compute_identity, NodeId, Salt};
use crate::node::{LifecyclePhase, UiNode};
use crate::tree::Tree;

struct Frame {
    id: NodeId,
    children: Vec<NodeId>,
    occurrences: FxHashMap<(ElementKind, Option<Rc<str>>, Salt), u32>,
}

impl Frame {
    fn root() -> Self {
        Self { id: NodeId::ROOT, children: Vec::new(), occurrences: FxHashMap::default() }
    }

    fn next_occurrence(&mut self, kind: ElementKind, key: Option<&Rc<str>>, salt: Salt) -> u32 {
        let entry = self.occurrences.entry((kind, key.cloned(), salt)).or_insert(0);
        let occurrence = *entry;
        *entry += 1;
        occurrence
    }
}

/// Builds the new tree for one render pass by interpreting a strict
/// `open`/`configure`/`close` protocol (spec §4.4). Owns the [`Tree`] it is
/// constructing; handed back on [`LifecycleStack::finish`].
pub struct LifecycleStack {
    frames: Vec<Frame>,
    tree: Tree,
    /// Nodes whose `(kind, key, salt)` triple collided with an earlier
    /// sibling under the same parent this pass and had to be disambiguated
    /// by occurrence index (spec §4.4 edge case, §7 error kind 3). Exposed
    /// so the driver can report a non-fatal diagnostic; the pass itself
    /// still completes using positional disambiguation.
    collisions: Vec<NodeId>,
}

impl LifecycleStack {
    pub fn new() -> Self {
        Self { frames: vec![Frame::root()], tree: Tree::new(), collisions: Vec::new() }
    }

    /// Current nesting depth, i.e. how deep the next `open` would attach
    /// (spec §4.4 invariant).
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Push a new node whose parent is the stack top (or the root
    /// sentinel if the stack is at depth 0).
    pub fn open(&mut self, kind: ElementKind, salt: Salt, key: Option<Rc<str>>) -> NodeId {
        let parent_frame = self.frames.last_mut().expect("root frame is never popped");
        let parent_id = parent_frame.id;
        let occurrence = parent_frame.next_occurrence(kind, key.as_ref(), salt);
        let id = compute_identity(parent_id, kind, key.as_ref(), salt, occurrence);
        if occurrence > 0 {
            self.collisions.push(id);
        }

        let parent = if parent_id == NodeId::ROOT && self.frames.len() == 1 {
            None
        } else {
            Some(parent_id)
        };
        self.tree.insert(UiNode::opened(id, kind, key, parent));
        self.frames.push(Frame {
            id,
            children: Vec::new(),
            occurrences: FxHashMap::default(),
        });
        id
    }

    /// Update the top-of-stack node in place. Only valid while it is still
    /// in the `open` phase (spec §4.4).
    pub fn configure(
        &mut self,
        style: StyleHandle,
        attributes: Attributes,
    ) -> Result<NodeId, LifecycleError> {
        let frame = self.frames.last().ok_or(LifecycleError::CloseWithEmptyStack)?;
        let id = frame.id;
        if id == NodeId::ROOT && self.frames.len() == 1 {
            return Err(LifecycleError::ConfigureWithEmptyStack);
        }
        let node = self.tree.get_mut(id).expect("open always inserts its node");
        if node.phase() != LifecyclePhase::Open {
            return Err(LifecycleError::ConfigureAfterClose { id });
        }
        node.style = Some(style);
        node.attributes = attributes;
        node.phase.set(LifecyclePhase::Configured);
        Ok(id)
    }

    /// Pop the top of the stack, sealing its child list to whatever was
    /// opened-and-closed while it was the top.
    pub fn close(&mut self) -> Result<NodeId, LifecycleError> {
        if self.frames.len() <= 1 {
            return Err(LifecycleError::CloseWithEmptyStack);
        }
        let frame = self.frames.pop().expect("checked above");
        let id = frame.id;
        {
            let node = self.tree.get_mut(id).expect("open always inserts its node");
            if node.phase() != LifecyclePhase::Configured {
                return Err(LifecycleError::CloseBeforeConfigure { id });
            }
            node.children = frame.children.into_iter().collect();
            node.phase.set(LifecyclePhase::Closed);
        }
        let parent = self.frames.last_mut().expect("root frame is never popped");
        parent.children.push(id);
        Ok(id)
    }

    /// Seal the pass. Errors if any element opened during this pass was
    /// never closed (spec §4.4 edge case: "A render root that finishes
    /// with a non-empty stack is a programmer error"). On success, also
    /// returns the nodes that needed collision disambiguation this pass.
    pub fn finish(mut self) -> Result<(Tree, Vec<NodeId>), LifecycleError> {
        if self.frames.len() != 1 {
            return Err(LifecycleError::UnbalancedAtFinish { remaining_depth: self.frames.len() - 1 });
        }
        let roots = std::mem::take(&mut self.frames[0].children);
        self.tree.set_roots(roots);
        Ok((self.tree, self.collisions))
    }
}

impl Default for LifecycleStack {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static ENGINE_STACK: RefCell<Option<LifecycleStack>> = const { RefCell::new(None) };
}

/// Begin a render pass: install a fresh [`LifecycleStack`] as the implicit
/// context for this thread's builder calls. Panics if a pass is already in
/// flight — the driver guarantees at most one pass runs at a time (spec
/// §4.8 invariant), so this would only fire on an engine bug.
pub fn begin_pass() {
    ENGINE_STACK.with(|cell| {
        let mut slot = cell.borrow_mut();
        assert!(slot.is_none(), "begin_pass called while a pass was already in flight");
        *slot = Some(LifecycleStack::new());
    });
}

/// True if a pass is currently in flight on this thread.
pub fn pass_in_flight() -> bool {
    ENGINE_STACK.with(|cell| cell.borrow().is_some())
}

pub fn open(kind: ElementKind, salt: Salt, key: Option<Rc<str>>) -> NodeId {
    with_stack(|stack| stack.open(kind, salt, key))
}

pub fn configure(style: StyleHandle, attributes: Attributes) -> Result<NodeId, LifecycleError> {
    with_stack(|stack| stack.configure(style, attributes))
}

pub fn close() -> Result<NodeId, LifecycleError> {
    with_stack(|stack| stack.close())
}

pub fn depth() -> usize {
    with_stack(|stack| stack.depth())
}

/// End the pass, discarding the thread-local context either way. On
/// success, returns the freshly-built new tree for the reconciler plus any
/// nodes that needed collision disambiguation this pass.
pub fn end_pass() -> Result<(Tree, Vec<NodeId>), LifecycleError> {
    let stack = ENGINE_STACK
        .with(|cell| cell.borrow_mut().take())
        .expect("end_pass called with no pass in flight");
    stack.finish()
}

/// Discard the in-flight pass without finishing it — used by the driver's
/// recovery path when a pass is aborted mid-flight (spec §7).
pub fn discard_pass() {
    ENGINE_STACK.with(|cell| {
        cell.borrow_mut().take();
    });
}

fn with_stack<R>(f: impl FnOnce(&mut LifecycleStack) -> R) -> R {
    ENGINE_STACK.with(|cell| {
        let mut slot = cell.borrow_mut();
        let stack = slot.as_mut().expect("no render pass in flight on this thread");
        f(stack)
    })
}
