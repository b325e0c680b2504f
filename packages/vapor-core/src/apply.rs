//! The command applier contract (C7, spec §4.7) and the driver-facing
//! function that walks a [`CommandSet`] in the required order.

use rustc_hash::FxHashMap;
use vapor_style::StyleHandle;

use crate::attributes::{Attributes, AttributeDelta};
use crate::command::{CommandSet, NodeSpec};
use crate::element::ElementKind;
use crate::error::EngineError;
use crate::identity::NodeId;

/// A host that mutates the real display surface. Four operations, exactly
/// as named in spec §4.7: create, apply-update, remove, insert. The
/// applier must not reorder or coalesce commands — `apply_commands` is the
/// single source of ordering decisions, matching "the reconciler is the
/// single source of ordering decisions."
pub trait CommandApplier {
    type Handle: Clone;
    type Error: std::fmt::Display;

    fn create(
        &mut self,
        kind: ElementKind,
        attributes: &Attributes,
        style: StyleHandle,
    ) -> Result<Self::Handle, Self::Error>;

    fn apply_update(
        &mut self,
        handle: &Self::Handle,
        delta: &AttributeDelta,
        new_style: StyleHandle,
    ) -> Result<(), Self::Error>;

    fn remove(&mut self, handle: &Self::Handle) -> Result<(), Self::Error>;

    fn insert(
        &mut self,
        child: &Self::Handle,
        parent: Option<&Self::Handle>,
        index: usize,
    ) -> Result<(), Self::Error>;
}

/// Bridges [`NodeId`]s to the host's opaque handles across passes — the
/// concrete mechanism behind "the reconciler's single source of ordering
/// decisions" reaching an applier that only knows its own handle type.
pub type HandleTable<H> = FxHashMap<NodeId, H>;

/// Apply a [`CommandSet`] to `applier` in the order the spec mandates:
/// removes, then updates, then adds (spec §4.6 step 5) — so the host never
/// sees a dangling reference. `handles` is mutated in place to reflect the
/// new retained-tree membership; on error, the caller should treat the
/// host as in an inconsistent state and fall back to `full_replace` on the
/// next pass (spec §7 kind 5).
pub fn apply_commands<A: CommandApplier>(
    applier: &mut A,
    commands: &CommandSet,
    handles: &mut HandleTable<A::Handle>,
) -> Result<(), EngineError> {
    for remove in &commands.removes {
        let handle = handles
            .remove(&remove.id)
            .ok_or_else(|| host_failure(remove.id, "remove() targeted an unknown handle"))?;
        applier
            .remove(&handle)
            .map_err(|e| host_failure(remove.id, &e.to_string()))?;
    }

    for update in &commands.updates {
        let handle = handles
            .get(&update.id)
            .cloned()
            .ok_or_else(|| host_failure(update.id, "update() targeted an unknown handle"))?;
        let (old_style, new_style) = update.style;
        if update.attr_delta.is_some() || old_style != new_style {
            let empty = AttributeDelta::default();
            let delta = update.attr_delta.as_ref().unwrap_or(&empty);
            applier
                .apply_update(&handle, delta, new_style)
                .map_err(|e| host_failure(update.id, &e.to_string()))?;
        }
        if let Some(index) = update.reorder_to {
            let parent_handle = update.parent.and_then(|p| handles.get(&p)).cloned();
            applier
                .insert(&handle, parent_handle.as_ref(), index)
                .map_err(|e| host_failure(update.id, &e.to_string()))?;
        }
    }

    for add in &commands.adds {
        create_recursive(applier, &add.node, handles)?;
        let parent_handle = add.parent.and_then(|p| handles.get(&p)).cloned();
        let child_handle = handles.get(&add.node.id).cloned().expect("just created");
        applier
            .insert(&child_handle, parent_handle.as_ref(), add.index)
            .map_err(|e| host_failure(add.node.id, &e.to_string()))?;
    }

    Ok(())
}

fn create_recursive<A: CommandApplier>(
    applier: &mut A,
    spec: &NodeSpec,
    handles: &mut HandleTable<A::Handle>,
) -> Result<(), EngineError> {
    let handle = applier
        .create(spec.kind, &spec.attributes, spec.style)
        .map_err(|e| host_failure(spec.id, &e.to_string()))?;
    handles.insert(spec.id, handle.clone());
    for (index, child) in spec.children.iter().enumerate() {
        create_recursive(applier, child, handles)?;
        let child_handle = handles.get(&child.id).cloned().expect("just created");
        applier
            .insert(&child_handle, Some(&handle), index)
            .map_err(|e| host_failure(child.id, &e.to_string()))?;
    }
    Ok(())
}

fn host_failure(id: NodeId, message: &str) -> EngineError {
    EngineError::HostApplyFailure { id, message: message.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{AddCommand, NodeSpec};
    use std::convert::Infallible;
    use vapor_style::StyleHandle;

    #[derive(Default)]
    struct CountingApplier {
        created: u32,
        inserted: u32,
        next_handle: u32,
    }

    impl CommandApplier for CountingApplier {
        type Handle = u32;
        type Error = Infallible;

        fn create(
            &mut self,
            _kind: ElementKind,
            _attributes: &Attributes,
            _style: StyleHandle,
        ) -> Result<u32, Infallible> {
            self.created += 1;
            self.next_handle += 1;
            Ok(self.next_handle)
        }

        fn apply_update(&mut self, _: &u32, _: &AttributeDelta, _: StyleHandle) -> Result<(), Infallible> {
            Ok(())
        }

        fn remove(&mut self, _: &u32) -> Result<(), Infallible> {
            Ok(())
        }

        fn insert(&mut self, _: &u32, _: Option<&u32>, _: usize) -> Result<(), Infallible> {
            self.inserted += 1;
            Ok(())
        }
    }

    fn leaf(id: NodeId, style: StyleHandle) -> NodeSpec {
        NodeSpec { id, kind: ElementKind::Text, style, attributes: Attributes::default_for(ElementKind::Text), children: vec![] }
    }

    #[test]
    fn add_creates_then_inserts() {
        use crate::identity::compute_identity;
        let arena = vapor_arena::Arena::new(vapor_arena::ArenaKind::Persist);
        let interner = vapor_style::StyleInterner::new(&arena);
        let style = interner.intern(vapor_style::StyleValue::default()).unwrap();

        let id = compute_identity(NodeId::ROOT, ElementKind::Text, None, 1, 0);
        let mut commands = CommandSet::default();
        commands.adds.push(AddCommand { parent: None, index: 0, node: leaf(id, style) });

        let mut applier = CountingApplier::default();
        let mut handles = HandleTable::default();
        apply_commands(&mut applier, &commands, &mut handles).unwrap();

        assert_eq!(applier.created, 1);
        assert_eq!(applier.inserted, 1);
        assert!(handles.contains_key(&id));
    }
}
