//! Stable node identity (spec §3 "Stable identity", invariant 5).
//!
//! Identity is computed from `(parent identity, element kind, user key if
//! present, source-location salt, occurrence index)`. The occurrence index
//! — "position among siblings" in the spec's phrasing — only advances when
//! two sibling `open` calls under the same parent share `(kind, key,
//! salt)`; it is not the child's raw list index. This is what makes keyed
//! list reordering identity-stable across passes (spec §8 scenario 2: an
//! insertion at the head does not perturb "b", "c", "d"'s identities,
//! because each keeps its own `(kind, key, salt)` tuple regardless of
//! where it sits in the list) while still giving two *unkeyed* siblings
//! built from the same call site a deterministic, distinct identity (spec
//! §4.4's disambiguation rule) that degrades gracefully to positional
//! matching for them.

use std::hash::{Hash, Hasher};
use std::rc::Rc;

use rustc_hash::FxHasher;

use crate::element::ElementKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Sentinel parent identity for top-level (rootless) nodes — "the root
    /// sentinel if empty" in spec §4.4.
    pub const ROOT: NodeId = NodeId(0);

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// A builder call site's salt. Opaque to the engine; callers typically
/// derive it from `file!()`/`line!()`/`column!()` or an explicit loop
/// index, per spec §3 "source-location salt provided by the builder call
/// site".
pub type Salt = u64;

pub(crate) fn compute_identity(
    parent: NodeId,
    kind: ElementKind,
    key: Option<&Rc<str>>,
    salt: Salt,
    occurrence: u32,
) -> NodeId {
    let mut hasher = FxHasher::default();
    parent.0.hash(&mut hasher);
    (kind as u8).hash(&mut hasher);
    key.map(|k| &**k).hash(&mut hasher);
    salt.hash(&mut hasher);
    occurrence.hash(&mut hasher);
    // Never collide with the root sentinel; a collision here would let a
    // real node silently masquerade as the rootless parent.
    let hash = hasher.finish();
    NodeId(if hash == NodeId::ROOT.0 { hash | 1 } else { hash })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_deterministic_given_identical_inputs() {
        let a = compute_identity(NodeId::ROOT, ElementKind::Text, None, 42, 0);
        let b = compute_identity(NodeId::ROOT, ElementKind::Text, None, 42, 0);
        assert_eq!(a, b);
    }

    #[test]
    fn differing_salts_produce_differing_identities() {
        let a = compute_identity(NodeId::ROOT, ElementKind::Text, None, 1, 0);
        let b = compute_identity(NodeId::ROOT, ElementKind::Text, None, 2, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn differing_keys_produce_differing_identities_for_same_salt() {
        let key_a: Rc<str> = Rc::from("a");
        let key_b: Rc<str> = Rc::from("b");
        let a = compute_identity(NodeId::ROOT, ElementKind::Text, Some(&key_a), 7, 0);
        let b = compute_identity(NodeId::ROOT, ElementKind::Text, Some(&key_b), 7, 0);
        assert_ne!(a, b);
    }

    #[test]
    fn keyed_identity_is_independent_of_occurrence_position() {
        // Simulates scenario 2 (§8): a keyed child's identity must not
        // depend on where it sits in the list, only on its own key.
        let key: Rc<str> = Rc::from("b");
        let first_pass = compute_identity(NodeId::ROOT, ElementKind::Container, Some(&key), 99, 0);
        let second_pass = compute_identity(NodeId::ROOT, ElementKind::Container, Some(&key), 99, 0);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn occurrence_disambiguates_true_collisions() {
        let a = compute_identity(NodeId::ROOT, ElementKind::Text, None, 5, 0);
        let b = compute_identity(NodeId::ROOT, ElementKind::Text, None, 5, 1);
        assert_ne!(a, b);
    }
}
