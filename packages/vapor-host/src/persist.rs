//! The `store`/`load` persisted-state hook (spec §6: "Host adapters may
//! persist theme choice under a key; the core exposes a `store(key,
//! value)` / `load(key)` hook interface the host implements").
//!
//! A thin trait the core depends on, implemented by whatever the real
//! host is (browser `localStorage`, a native preferences file, or — here
//! — an in-memory map for tests and non-persistent embedders).

use std::cell::RefCell;

use rustc_hash::FxHashMap;

/// A host-implemented key/value store for state the engine itself has no
/// opinion about persisting (theme choice, route history, etc). The core
/// never calls this on its own; it's a hook other crates (`vapor-theme`,
/// the facade's `init`) may use.
pub trait PersistedStore {
    fn store(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
}

/// An in-memory [`PersistedStore`] with no real persistence across
/// process restarts. Useful for tests and for embedders that don't need
/// durable storage (a test harness, a one-shot SSR render).
#[derive(Default)]
pub struct InMemoryStore {
    entries: RefCell<FxHashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistedStore for InMemoryStore {
    fn store(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}
