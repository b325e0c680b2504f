//! Commit points: `end()` for leaves, `children(block)` for containers,
//! `children_styled(handle, block)` for containers styled by a precomposed
//! handle.
//!
//! The container forms evaluate `block` — a child-constructing closure —
//! *before* running `configure`+`close` on the container itself. This is
//! the Rust rendering of the evaluate-argument-first requirement: Rust
//! evaluates a closure's *body* only when called, not when it's passed, so
//! the commit function must invoke `block` itself rather than rely on
//! argument-evaluation order.

use vapor_core::{EngineError, NodeId};
use vapor_style::StyleHandle;

use crate::element::{finalize, open_builder, ContainerAttrs, ElementBuilder, InteractiveAttrs, KindAttrs};

impl<A: KindAttrs> ElementBuilder<A> {
    /// Commit a leaf node (text, image, input, interactive with no
    /// children): intern the accumulated style, configure, close.
    pub fn end(self) -> Result<NodeId, EngineError> {
        let id = self.id;
        let (style, attrs) = finalize(self)?;
        vapor_core::configure(style, attrs)?;
        vapor_core::close()?;
        Ok(id)
    }
}

impl ElementBuilder<ContainerAttrs> {
    /// Commit a container: run `block` (which opens and closes this
    /// container's children on the global lifecycle stack), then configure
    /// and close the container itself.
    pub fn children(self, block: impl FnOnce()) -> Result<NodeId, EngineError> {
        let id = self.id;
        block();
        let (style, attrs) = finalize(self)?;
        vapor_core::configure(style, attrs)?;
        vapor_core::close()?;
        Ok(id)
    }

    /// Commit a container using a precomposed style handle instead of this
    /// builder's accumulated fields — skips the intern step entirely.
    pub fn children_styled(self, handle: StyleHandle, block: impl FnOnce()) -> Result<NodeId, EngineError> {
        let id = self.id;
        block();
        vapor_core::configure(handle, self.attrs.into_attributes())?;
        vapor_core::close()?;
        Ok(id)
    }
}

impl ElementBuilder<InteractiveAttrs> {
    /// Commit an interactive wrapper with its single child slot, e.g. a
    /// button wrapping one label element.
    pub fn children(self, block: impl FnOnce()) -> Result<NodeId, EngineError> {
        let id = self.id;
        block();
        let (style, attrs) = finalize(self)?;
        vapor_core::configure(style, attrs)?;
        vapor_core::close()?;
        Ok(id)
    }
}

/// Construct a keyed container and immediately commit it with `block`,
/// convenient for list items where the key is the only configuration
/// needed beyond children.
#[track_caller]
pub fn container_item(key: impl Into<std::rc::Rc<str>>, block: impl FnOnce()) -> Result<NodeId, EngineError> {
    open_builder(Some(key.into()), ContainerAttrs).children(block)
}
