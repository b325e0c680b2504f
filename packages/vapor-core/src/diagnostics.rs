//! The diagnostic callback contract (spec §7, SPEC_FULL §6): errors never
//! unwind through builder calls, so recovery is this crate's and the
//! reactivity driver's to own, and user code only ever observes a failure
//! as a call to [`Diagnostics::report`].

use std::fmt;

use crate::error::EngineError;
use crate::identity::NodeId;

impl EngineError {
    /// A stable, human-readable tag for the error kind, independent of the
    /// `Display` message (which interpolates node ids and text).
    pub fn kind_name(&self) -> &'static str {
        match self {
            EngineError::AllocationExhausted(_) => "allocation_exhausted",
            EngineError::StyleInternExhausted(_) => "style_intern_exhausted",
            EngineError::LifecycleImbalance(_) => "lifecycle_imbalance",
            EngineError::IdentityCollisionUnresolved { .. } => "identity_collision_unresolved",
            EngineError::ReconcilerInconsistency => "reconciler_inconsistency",
            EngineError::HostApplyFailure { .. } => "host_apply_failure",
            EngineError::HandlerException { .. } => "handler_exception",
        }
    }
}

/// One reported failure: its kind, the node it concerns (if any), and a
/// message ready to show a developer.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    pub kind: &'static str,
    pub node: Option<NodeId>,
    pub message: String,
}

impl DiagnosticEvent {
    pub fn from_error(error: &EngineError, node: Option<NodeId>) -> Self {
        Self { kind: error.kind_name(), node, message: error.to_string() }
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(node) => write!(f, "[{}] node {node:?}: {}", self.kind, self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}

/// Registered once at `init`; the sole sink for errors the core and
/// driver decide not to propagate as a `Result`.
pub trait Diagnostics {
    fn report(&self, event: DiagnosticEvent);
}

/// Default `Diagnostics` impl: logs at `warn` via `tracing` and takes no
/// other action.
#[derive(Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, event: DiagnosticEvent) {
        tracing::warn!(kind = event.kind, node = ?event.node, "{}", event.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifecycleError;

    #[test]
    fn kind_name_is_stable_per_variant() {
        let err = EngineError::LifecycleImbalance(LifecycleError::CloseWithEmptyStack);
        assert_eq!(err.kind_name(), "lifecycle_imbalance");
    }

    #[test]
    fn tracing_diagnostics_does_not_panic() {
        let err = EngineError::ReconcilerInconsistency;
        let event = DiagnosticEvent::from_error(&err, None);
        TracingDiagnostics.report(event);
    }
}
