//! Error kinds the core recognizes (spec §7) and the narrower lifecycle
//! error `vapor-core` wraps into [`EngineError`].

use vapor_arena::AllocError;
use vapor_style::InternError;

use crate::identity::NodeId;

/// Lifecycle-stack protocol violations (spec §4.4, §7 kind 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("close() called with an empty stack")]
    CloseWithEmptyStack,
    #[error("configure() called with an empty stack")]
    ConfigureWithEmptyStack,
    #[error("configure() called on node {id:?} after it was already configured or closed")]
    ConfigureAfterClose { id: NodeId },
    #[error("close() called on node {id:?} before it was configured")]
    CloseBeforeConfigure { id: NodeId },
    #[error("pass ended with {remaining_depth} node(s) still open")]
    UnbalancedAtFinish { remaining_depth: usize },
}

/// The six error kinds of spec §7, unified so the reactivity driver (the
/// sole owner of recovery, per §7's propagation policy) can match on one
/// type regardless of which layer raised it.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("allocation exhausted: {0}")]
    AllocationExhausted(#[from] AllocError),

    #[error("style interner exhausted: {0}")]
    StyleInternExhausted(#[from] InternError),

    #[error("lifecycle imbalance: {0}")]
    LifecycleImbalance(#[from] LifecycleError),

    #[error("identity collision unresolved at parent {parent:?}; falling back to positional matching")]
    IdentityCollisionUnresolved { parent: Option<NodeId> },

    #[error("reconciler inconsistency: retained tree's identity index does not match its structure")]
    ReconcilerInconsistency,

    #[error("host apply failure for node {id:?}: {message}")]
    HostApplyFailure { id: NodeId, message: String },

    #[error("event handler panicked or returned an error: {message}")]
    HandlerException { message: String },
}

impl EngineError {
    /// Whether this error still leaves the retained tree trustworthy for
    /// the *next* pass, or demands a full replace (spec §7 recovery
    /// policy table).
    pub fn requires_full_replace(&self) -> bool {
        matches!(
            self,
            EngineError::ReconcilerInconsistency | EngineError::HostApplyFailure { .. }
        )
    }
}
