//! Source-location salts for builder call sites.
//!
//! Stable node identity needs "a source-location salt provided by the
//! builder call site"; `#[track_caller]` gives every element constructor
//! its caller's `file!`/`line!`/`column!` without a macro, which is exactly
//! that salt once hashed down to a `u64`.

use std::hash::{Hash, Hasher};
use std::panic::Location;

use rustc_hash::FxHasher;
use vapor_core::Salt;

#[track_caller]
pub(crate) fn call_site_salt() -> Salt {
    let loc = Location::caller();
    let mut hasher = FxHasher::default();
    loc.file().hash(&mut hasher);
    loc.line().hash(&mut hasher);
    loc.column().hash(&mut hasher);
    hasher.finish()
}
