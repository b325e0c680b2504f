//! The reconciler (C6, spec §4.6). Diffs a newly-built tree against the
//! retained tree from the previous pass and produces three disjoint
//! command arrays.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::command::{AddCommand, CommandSet, NodeSpec, RemoveCommand, UpdateCommand};
use crate::error::EngineError;
use crate::identity::NodeId;
use crate::tree::Tree;

/// Diff `new_tree` against `retained_tree`. Returns
/// [`EngineError::ReconcilerInconsistency`] if the retained tree's
/// identity index doesn't match its own structure (spec §7 kind 4) —
/// callers should recover with [`full_replace`].
pub fn reconcile(new_tree: &Tree, retained_tree: &Tree) -> Result<CommandSet, EngineError> {
    if !retained_tree.is_structurally_consistent() {
        return Err(EngineError::ReconcilerInconsistency);
    }
    let mut commands = CommandSet::default();
    diff_children(new_tree, retained_tree, None, None, &mut commands);
    Ok(commands)
}

/// Discard the entire retained tree and add the entire new tree. Used on
/// reconciler inconsistency (spec §7 kind 4), host apply failure (kind 5),
/// and route changes (spec §4.9).
pub fn full_replace(new_tree: &Tree, retained_tree: &Tree) -> CommandSet {
    let mut commands = CommandSet::default();
    for &id in retained_tree.roots() {
        commands.removes.push(RemoveCommand { id });
    }
    for (index, &id) in new_tree.roots().iter().enumerate() {
        commands.adds.push(AddCommand { parent: None, index, node: build_spec(new_tree, id) });
    }
    commands
}

fn children_of(tree: &Tree, parent: Option<NodeId>) -> Vec<NodeId> {
    match parent {
        None => tree.roots().to_vec(),
        Some(id) => tree.get(id).map(|n| n.children.to_vec()).unwrap_or_default(),
    }
}

fn build_spec(tree: &Tree, id: NodeId) -> NodeSpec {
    let node = tree.get(id).expect("node must exist in the tree it was read from");
    NodeSpec {
        id,
        kind: node.kind,
        style: node.style.expect("a closed node is always configured"),
        attributes: node.attributes.clone(),
        children: node.children.iter().map(|&child| build_spec(tree, child)).collect(),
    }
}

/// Pair `new_children` against `old_children` by stable identity first,
/// then user key, then position (spec §4.6 step 2). Returns, for each new
/// index, the matched old index (if any).
fn pair_children(
    new_tree: &Tree,
    retained_tree: &Tree,
    new_children: &[NodeId],
    old_children: &[NodeId],
) -> Vec<Option<usize>> {
    let mut pairing: Vec<Option<usize>> = vec![None; new_children.len()];
    let mut old_used = vec![false; old_children.len()];

    // Tier 1: direct identity match.
    let old_index_by_id: FxHashMap<NodeId, usize> =
        old_children.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    for (ni, &nid) in new_children.iter().enumerate() {
        if let Some(&oi) = old_index_by_id.get(&nid) {
            if !old_used[oi] {
                pairing[ni] = Some(oi);
                old_used[oi] = true;
            }
        }
    }

    // Tier 2: user-supplied key match among what's left.
    for ni in 0..new_children.len() {
        if pairing[ni].is_some() {
            continue;
        }
        let Some(nkey) = new_tree.get(new_children[ni]).and_then(|n| n.key.clone()) else {
            continue;
        };
        for (oi, &oid) in old_children.iter().enumerate() {
            if old_used[oi] {
                continue;
            }
            if retained_tree.get(oid).and_then(|n| n.key.clone()).as_deref() == Some(&*nkey) {
                pairing[ni] = Some(oi);
                old_used[oi] = true;
                break;
            }
        }
    }

    // Tier 3: positional match among what's left, in order.
    let mut remaining_old = (0..old_children.len()).filter(|&oi| !old_used[oi]);
    for ni in 0..new_children.len() {
        if pairing[ni].is_some() {
            continue;
        }
        if let Some(oi) = remaining_old.next() {
            pairing[ni] = Some(oi);
            old_used[oi] = true;
        }
    }

    pairing
}

fn diff_children(
    new_tree: &Tree,
    retained_tree: &Tree,
    new_parent: Option<NodeId>,
    retained_parent: Option<NodeId>,
    commands: &mut CommandSet,
) {
    let new_children = children_of(new_tree, new_parent);
    let old_children = children_of(retained_tree, retained_parent);
    let pairing = pair_children(new_tree, retained_tree, &new_children, &old_children);

    let mut old_used = vec![false; old_children.len()];
    for slot in pairing.iter().flatten() {
        old_used[*slot] = true;
    }
    for (oi, &oid) in old_children.iter().enumerate() {
        if !old_used[oi] {
            commands.removes.push(RemoveCommand { id: oid });
        }
    }

    // Reorder detection: the longest increasing subsequence of matched
    // retained-indices (in new-tree order) is the maximal subset that can
    // stay in place; everything else gets a reorder hint (spec §4.6 step 4).
    let matched: Vec<(usize, usize)> = pairing
        .iter()
        .enumerate()
        .filter_map(|(ni, oi)| oi.map(|oi| (ni, oi)))
        .collect();
    let old_idx_sequence: Vec<usize> = matched.iter().map(|&(_, oi)| oi).collect();
    let keep_in_place: FxHashSet<usize> =
        longest_increasing_subsequence::lis(&old_idx_sequence).into_iter().collect();

    for (seq_i, &(ni, oi)) in matched.iter().enumerate() {
        let nid = new_children[ni];
        let oid = old_children[oi];
        let new_node = new_tree.get(nid).expect("present in new tree");
        let old_node = retained_tree.get(oid).expect("present in retained tree");

        if new_node.kind != old_node.kind {
            // A matched pair that changed element kind can't be diffed
            // field-wise — its attribute shape is entirely different.
            commands.removes.push(RemoveCommand { id: oid });
            commands.adds.push(AddCommand {
                parent: new_parent,
                index: ni,
                node: build_spec(new_tree, nid),
            });
            continue;
        }

        let attr_delta = old_node.attributes.diff(&new_node.attributes);
        let old_style = old_node.style.expect("closed node is configured");
        let new_style = new_node.style.expect("closed node is configured");
        let reorder_to = if keep_in_place.contains(&seq_i) { None } else { Some(ni) };

        let update = UpdateCommand {
            id: nid,
            parent: new_parent,
            attr_delta: if attr_delta.is_empty() { None } else { Some(attr_delta) },
            style: (old_style, new_style),
            reorder_to,
        };
        if !update.is_noop() {
            commands.updates.push(update);
        }

        diff_children(new_tree, retained_tree, Some(nid), Some(oid), commands);
    }

    for (ni, &nid) in new_children.iter().enumerate() {
        if pairing[ni].is_none() {
            commands.adds.push(AddCommand { parent: new_parent, index: ni, node: build_spec(new_tree, nid) });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attributes;
    use crate::element::ElementKind;
    use crate::stack::LifecycleStack;
    use std::rc::Rc;
    use vapor_arena::{Arena, ArenaKind};
    use vapor_style::{StyleInterner, StyleValue};

    fn build(f: impl FnOnce(&mut LifecycleStack, &StyleInterner)) -> Tree {
        let arena = Arena::new(ArenaKind::Persist);
        let interner = StyleInterner::new(&arena);
        let mut stack = LifecycleStack::new();
        f(&mut stack, &interner);
        stack.finish().unwrap().0
    }

    fn h(interner: &StyleInterner) -> vapor_style::StyleHandle {
        interner.intern(StyleValue::default()).unwrap()
    }

    /// Scenario 1 (§8): a container with one text child "0" → "1" produces
    /// exactly one update, zero adds, zero removes.
    #[test]
    fn counter_increment_produces_one_update() {
        let retained = build(|stack, interner| {
            stack.open(ElementKind::Container, 1, None);
            stack.open(ElementKind::Text, 2, None);
            stack.configure(h(interner), Attributes::Text { content: Rc::from("0") }).unwrap();
            stack.close().unwrap();
            stack.configure(h(interner), Attributes::Container).unwrap();
            stack.close().unwrap();
        });
        let new = build(|stack, interner| {
            stack.open(ElementKind::Container, 1, None);
            stack.open(ElementKind::Text, 2, None);
            stack.configure(h(interner), Attributes::Text { content: Rc::from("1") }).unwrap();
            stack.close().unwrap();
            stack.configure(h(interner), Attributes::Container).unwrap();
            stack.close().unwrap();
        });

        let commands = reconcile(&new, &retained).unwrap();
        assert_eq!(commands.adds.len(), 0);
        assert_eq!(commands.removes.len(), 0);
        assert_eq!(commands.updates.len(), 1);
        assert!(commands.updates[0].attr_delta.is_some());
    }

    /// Scenario 2 (§8): list insertion at head adds "a" and touches
    /// nothing else.
    #[test]
    fn list_insertion_at_head_only_adds() {
        let retained = build(|stack, interner| {
            stack.open(ElementKind::Container, 1, None);
            for key in ["b", "c", "d"] {
                stack.open(ElementKind::Text, 2, Some(Rc::from(key)));
                stack.configure(h(interner), Attributes::Text { content: Rc::from(key) }).unwrap();
                stack.close().unwrap();
            }
            stack.configure(h(interner), Attributes::Container).unwrap();
            stack.close().unwrap();
        });
        let new = build(|stack, interner| {
            stack.open(ElementKind::Container, 1, None);
            for key in ["a", "b", "c", "d"] {
                stack.open(ElementKind::Text, 2, Some(Rc::from(key)));
                stack.configure(h(interner), Attributes::Text { content: Rc::from(key) }).unwrap();
                stack.close().unwrap();
            }
            stack.configure(h(interner), Attributes::Container).unwrap();
            stack.close().unwrap();
        });

        let commands = reconcile(&new, &retained).unwrap();
        assert_eq!(commands.removes.len(), 0);
        assert_eq!(commands.adds.len(), 1);
        assert_eq!(commands.updates.len(), 0);
    }

    /// Reordering three keyed children A,B,C → C,A,B produces reorder
    /// hints and zero adds/removes.
    #[test]
    fn keyed_reorder_produces_hints_not_adds_or_removes() {
        let retained = build(|stack, interner| {
            stack.open(ElementKind::Container, 1, None);
            for key in ["a", "b", "c"] {
                stack.open(ElementKind::Text, 2, Some(Rc::from(key)));
                stack.configure(h(interner), Attributes::Text { content: Rc::from(key) }).unwrap();
                stack.close().unwrap();
            }
            stack.configure(h(interner), Attributes::Container).unwrap();
            stack.close().unwrap();
        });
        let new = build(|stack, interner| {
            stack.open(ElementKind::Container, 1, None);
            for key in ["c", "a", "b"] {
                stack.open(ElementKind::Text, 2, Some(Rc::from(key)));
                stack.configure(h(interner), Attributes::Text { content: Rc::from(key) }).unwrap();
                stack.close().unwrap();
            }
            stack.configure(h(interner), Attributes::Container).unwrap();
            stack.close().unwrap();
        });

        let commands = reconcile(&new, &retained).unwrap();
        assert_eq!(commands.removes.len(), 0);
        assert_eq!(commands.adds.len(), 0);
        assert!(commands.updates.iter().any(|u| u.reorder_to.is_some()));
    }

    #[test]
    fn no_op_pass_produces_empty_command_set() {
        let build_once = |interner: &StyleInterner| {
            let mut stack = LifecycleStack::new();
            stack.open(ElementKind::Container, 1, None);
            stack.open(ElementKind::Text, 2, None);
            stack.configure(interner.intern(StyleValue::default()).unwrap(), Attributes::Text { content: Rc::from("x") }).unwrap();
            stack.close().unwrap();
            stack.configure(interner.intern(StyleValue::default()).unwrap(), Attributes::Container).unwrap();
            stack.close().unwrap();
            stack.finish().unwrap().0
        };
        let arena = Arena::new(ArenaKind::Persist);
        let interner = StyleInterner::new(&arena);
        let retained = build_once(&interner);
        let new = build_once(&interner);

        let commands = reconcile(&new, &retained).unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn inconsistent_retained_tree_is_reported() {
        let mut retained = Tree::new();
        let root = crate::identity::compute_identity(NodeId::ROOT, ElementKind::Container, None, 1, 0);
        let dangling = crate::identity::compute_identity(root, ElementKind::Text, None, 2, 0);
        let mut node = crate::node::UiNode::opened(root, ElementKind::Container, None, None);
        node.children.push(dangling);
        retained.insert(node);
        retained.set_roots(vec![root]);

        let new = Tree::new();
        let err = reconcile(&new, &retained).unwrap_err();
        assert!(matches!(err, EngineError::ReconcilerInconsistency));
    }
}
