//! Four named bump arenas with distinct reset lifetimes.
//!
//! The engine treats allocation as bulk, not per-node: nodes, attribute
//! payloads, and style merges are carved out of one of four [`Arena`]s and
//! freed only when the arena as a whole is reset. See `SPEC_FULL.md` §0 and
//! `spec.md` §4.1.

use std::cell::{Cell, RefCell};

use bumpalo::Bump;

/// Which of the four engine-wide arenas a value lives in.
///
/// - `Frame` is reset at the end of every render pass.
/// - `View` is reset when the router crosses a route boundary.
/// - `Persist` is reset only on teardown.
/// - `Scratch` is never reset by the engine; callers own its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArenaKind {
    Frame,
    View,
    Persist,
    Scratch,
}

impl ArenaKind {
    pub const ALL: [ArenaKind; 4] = [
        ArenaKind::Frame,
        ArenaKind::View,
        ArenaKind::Persist,
        ArenaKind::Scratch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ArenaKind::Frame => "frame",
            ArenaKind::View => "view",
            ArenaKind::Persist => "persist",
            ArenaKind::Scratch => "scratch",
        }
    }
}

/// Allocation failure. Always recoverable: the caller must abort whatever
/// it was building and leave previously-allocated data untouched.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AllocError {
    #[error("arena `{arena}` exhausted its budget ({used} + {requested} > {limit} bytes)")]
    Exhausted {
        arena: &'static str,
        used: usize,
        requested: usize,
        limit: usize,
    },
    #[error("arena `{arena}` could not satisfy a {size}-byte/{align}-align allocation")]
    Underlying { arena: &'static str, size: usize, align: usize },
}

/// One bump arena. Allocation is infallible in the common case (the
/// underlying `bumpalo::Bump` grows on demand); a `limit` may be set so
/// that exhaustion can be exercised deterministically in tests (spec §8
/// scenario 4).
pub struct Arena {
    kind: ArenaKind,
    bump: RefCell<Bump>,
    limit: Option<usize>,
    used: Cell<usize>,
}

impl Arena {
    pub fn new(kind: ArenaKind) -> Self {
        Self {
            kind,
            bump: RefCell::new(Bump::new()),
            limit: None,
            used: Cell::new(0),
        }
    }

    /// Construct an arena that fails allocation once more than `limit`
    /// bytes have been requested from it. Used by tests that exercise the
    /// allocation-exhaustion recovery path.
    pub fn with_limit(kind: ArenaKind, limit: usize) -> Self {
        Self {
            kind,
            bump: RefCell::new(Bump::new()),
            limit: Some(limit),
            used: Cell::new(0),
        }
    }

    pub fn kind(&self) -> ArenaKind {
        self.kind
    }

    pub fn used_bytes(&self) -> usize {
        self.used.get()
    }

    fn check_budget(&self, requested: usize) -> Result<(), AllocError> {
        if let Some(limit) = self.limit {
            let used = self.used.get();
            if used.saturating_add(requested) > limit {
                return Err(AllocError::Exhausted {
                    arena: self.kind.name(),
                    used,
                    requested,
                    limit,
                });
            }
        }
        Ok(())
    }

    /// Copy `value` into the arena, returning a reference valid until the
    /// next [`Arena::reset`].
    pub fn alloc<T>(&self, value: T) -> Result<&T, AllocError> {
        self.check_budget(std::mem::size_of::<T>())?;
        let bump = self.bump.borrow();
        // SAFETY: the reference is only handed to callers who respect the
        // arena's reset boundary; `Bump` itself never moves allocations.
        let ptr = bump.alloc(value) as *const T;
        self.used.set(self.used.get() + std::mem::size_of::<T>());
        Ok(unsafe { &*ptr })
    }

    /// Copy a byte/`Copy` slice into the arena.
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> Result<&[T], AllocError> {
        let bytes = std::mem::size_of_val(slice);
        self.check_budget(bytes)?;
        let bump = self.bump.borrow();
        let out = bump.alloc_slice_copy(slice) as *const [T];
        self.used.set(self.used.get() + bytes);
        Ok(unsafe { &*out })
    }

    /// Copy a string slice into the arena.
    pub fn alloc_str(&self, s: &str) -> Result<&str, AllocError> {
        self.check_budget(s.len())?;
        let bump = self.bump.borrow();
        let out = bump.alloc_str(s) as *const str;
        self.used.set(self.used.get() + s.len());
        Ok(unsafe { &*out })
    }

    /// Borrow the underlying `bumpalo::Bump` directly, e.g. to build a
    /// `bumpalo::collections::Vec` via the facade's `array()` (spec §6:
    /// "a growing ordered sequence allocated in the named arena"). Same
    /// contract as [`Arena::alloc`]: valid until this arena's next
    /// `reset()`.
    pub fn bump(&self) -> &Bump {
        let bump = self.bump.borrow();
        let ptr = &*bump as *const Bump;
        unsafe { &*ptr }
    }

    /// Reset the arena to empty. All previously-returned references become
    /// logically invalid; none may be dereferenced after this call
    /// (invariant 6, spec §3).
    pub fn reset(&self) {
        // `Bump::reset` requires `&mut self`; we hold allocations behind a
        // `RefCell` so the arena can be shared by value through the engine
        // without a surrounding `&mut`. `alloc`/`alloc_slice_copy`/
        // `alloc_str`/`bump` all drop their `RefCell` borrow before handing
        // back a raw-pointer-derived reference, so this `borrow_mut()` never
        // observes an outstanding borrow and never panics as a backstop —
        // it silently invalidates whatever references callers still hold,
        // exactly the same way resetting a `bumpalo::Bump` out from under a
        // live reference does in the teacher. Respecting the reset boundary
        // (never dereferencing a reference past the arena's next `reset()`,
        // invariant 6 of spec §3) is therefore a caller discipline this type
        // cannot enforce, not something the borrow checker catches here.
        self.bump.borrow_mut().reset();
        self.used.set(0);
        tracing::trace!(arena = self.kind.name(), "arena reset");
    }
}

/// Owns all four engine-wide arenas.
pub struct ArenaSet {
    frame: Arena,
    view: Arena,
    persist: Arena,
    scratch: Arena,
}

impl ArenaSet {
    pub fn new() -> Self {
        Self {
            frame: Arena::new(ArenaKind::Frame),
            view: Arena::new(ArenaKind::View),
            persist: Arena::new(ArenaKind::Persist),
            scratch: Arena::new(ArenaKind::Scratch),
        }
    }

    pub fn get(&self, kind: ArenaKind) -> &Arena {
        match kind {
            ArenaKind::Frame => &self.frame,
            ArenaKind::View => &self.view,
            ArenaKind::Persist => &self.persist,
            ArenaKind::Scratch => &self.scratch,
        }
    }

    pub fn frame(&self) -> &Arena {
        &self.frame
    }

    pub fn view(&self) -> &Arena {
        &self.view
    }

    pub fn persist(&self) -> &Arena {
        &self.persist
    }

    pub fn scratch(&self) -> &Arena {
        &self.scratch
    }

    /// Reset the frame arena. Called after commands are emitted and
    /// dispatched at the end of a render pass.
    pub fn reset_frame(&self) {
        self.frame.reset();
    }

    /// Reset the view arena. Called when the router crosses a route
    /// boundary.
    pub fn reset_view(&self) {
        self.view.reset();
    }
}

impl Default for ArenaSet {
    fn default() -> Self {
        Self::new()
    }
}

fn arena_with_optional_limit(kind: ArenaKind, limit: Option<usize>) -> Arena {
    match limit {
        Some(limit) => Arena::with_limit(kind, limit),
        None => Arena::new(kind),
    }
}

impl ArenaSet {
    /// Build an [`ArenaSet`] where any of the four arenas may be given a
    /// byte budget up front (`SPEC_FULL.md` §3's "arena chunk sizes ...
    /// defaults chosen, override for embedders with tight memory
    /// budgets"). `None` leaves that arena growing freely.
    pub fn with_limits(
        frame: Option<usize>,
        view: Option<usize>,
        persist: Option<usize>,
        scratch: Option<usize>,
    ) -> Self {
        Self {
            frame: arena_with_optional_limit(ArenaKind::Frame, frame),
            view: arena_with_optional_limit(ArenaKind::View, view),
            persist: arena_with_optional_limit(ArenaKind::Persist, persist),
            scratch: arena_with_optional_limit(ArenaKind::Scratch, scratch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocates_and_reads_back() {
        let arena = Arena::new(ArenaKind::Frame);
        let value = arena.alloc(42u32).unwrap();
        assert_eq!(*value, 42);
    }

    #[test]
    fn reset_clears_usage_accounting() {
        let arena = Arena::with_limit(ArenaKind::Frame, 16);
        arena.alloc(1u64).unwrap();
        assert_eq!(arena.used_bytes(), 8);
        arena.reset();
        assert_eq!(arena.used_bytes(), 0);
        // the budget is available again after reset
        arena.alloc(2u64).unwrap();
        assert_eq!(arena.used_bytes(), 8);
    }

    #[test]
    fn exhaustion_is_recoverable() {
        let arena = Arena::with_limit(ArenaKind::Scratch, 4);
        let err = arena.alloc(0u64).unwrap_err();
        assert!(matches!(err, AllocError::Exhausted { .. }));
        // the arena is still usable for requests within budget
        arena.alloc(0u8).unwrap();
        assert_eq!(arena.used_bytes(), 1);
    }

    #[test]
    fn arena_isolation() {
        let set = ArenaSet::new();
        set.frame().alloc(1u32).unwrap();
        assert_eq!(set.frame().used_bytes(), 4);
        assert_eq!(set.view().used_bytes(), 0);
        assert_eq!(set.persist().used_bytes(), 0);
        assert_eq!(set.scratch().used_bytes(), 0);
    }

    #[test]
    fn reset_frame_does_not_touch_persist() {
        let set = ArenaSet::new();
        set.persist().alloc_str("theme-token").unwrap();
        set.frame().alloc_str("transient").unwrap();
        set.reset_frame();
        assert_eq!(set.frame().used_bytes(), 0);
        assert_eq!(set.persist().used_bytes(), "theme-token".len());
    }
}
