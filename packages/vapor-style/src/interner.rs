//! The style interner (C2, spec §4.2).

use std::cell::RefCell;
use std::hash::{Hash, Hasher};

use rustc_hash::{FxHashMap, FxHasher};
use vapor_arena::{AllocError, Arena};

use crate::value::StyleValue;

/// Opaque handle naming an interned style value. Two handles compare
/// equal iff the underlying style values compare equal (spec §3
/// invariant 3) — this is enforced by construction: `intern` never
/// issues two different handles for equal values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyleHandle(u32);

impl StyleHandle {
    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InternError {
    #[error("style interner's persist arena is exhausted: {0}")]
    ArenaExhausted(#[from] AllocError),
}

fn hash_of(value: &StyleValue) -> u64 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Hashes and deduplicates [`StyleValue`]s, yielding stable handles.
/// Backed by the persist arena: handles live for the session and are
/// never individually freed (spec §3 "Lifecycles").
pub struct StyleInterner<'a> {
    arena: &'a Arena,
    canonical: RefCell<Vec<&'a StyleValue>>,
    index: RefCell<FxHashMap<u64, Vec<StyleHandle>>>,
}

impl<'a> StyleInterner<'a> {
    pub fn new(persist_arena: &'a Arena) -> Self {
        Self {
            arena: persist_arena,
            canonical: RefCell::new(Vec::new()),
            index: RefCell::new(FxHashMap::default()),
        }
    }

    /// Equal values collapse to equal handles regardless of submission
    /// order; lookup is expected O(1) via the hash-then-probe-equality
    /// scheme, matching a hash collision only needing an exact-equality
    /// tiebreak (spec §3 "Style table").
    pub fn intern(&self, value: StyleValue) -> Result<StyleHandle, InternError> {
        let hash = hash_of(&value);

        if let Some(bucket) = self.index.borrow().get(&hash) {
            let canonical = self.canonical.borrow();
            for &handle in bucket {
                if *canonical[handle.0 as usize] == value {
                    return Ok(handle);
                }
            }
        }

        let stored: &'a StyleValue = self.arena.alloc(value)?;
        let handle = {
            let mut canonical = self.canonical.borrow_mut();
            let handle = StyleHandle(canonical.len() as u32);
            canonical.push(stored);
            handle
        };
        self.index.borrow_mut().entry(hash).or_default().push(handle);
        tracing::trace!(handle = handle.0, "interned new style value");
        Ok(handle)
    }

    /// The canonical value for a handle. Panics if the handle was not
    /// issued by this interner — handles are never forged by callers.
    pub fn resolve(&self, handle: StyleHandle) -> &'a StyleValue {
        self.canonical.borrow()[handle.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.canonical.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
