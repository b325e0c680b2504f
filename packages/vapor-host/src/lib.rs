//! Reference command applier, persisted-state hooks, and test harness for
//! the vapor UI engine.
//!
//! This crate is the "host" the rest of the workspace's integration tests
//! target: a [`CommandApplier`](vapor_core::CommandApplier) that records
//! rather than displays, plus the `store`/`load` persistence hook real
//! host adapters implement.

mod applier;
mod persist;
mod snapshot;

pub use applier::{RecordedHandle, RecordedOp, RecordingApplier};
pub use persist::{InMemoryStore, PersistedStore};
pub use snapshot::render as render_snapshot;
