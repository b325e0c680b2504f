//! A deterministic text rendering of a [`RecordingApplier`]'s mirror tree,
//! for snapshot-style test assertions: a cheap, host-independent way to
//! look at what a pass produced without standing up a real display
//! surface.

use std::fmt::Write as _;

use vapor_core::Attributes;

use crate::applier::{RecordedHandle, RecordingApplier};

/// Render every root (and its subtree) as an indented outline, e.g.:
///
/// ```text
/// container
///   text "hello"
///   image src=a.png
/// ```
pub fn render(applier: &RecordingApplier) -> String {
    let mut out = String::new();
    for &root in applier.roots() {
        render_node(applier, root, 0, &mut out);
    }
    out
}

fn render_node(applier: &RecordingApplier, handle: RecordedHandle, depth: usize, out: &mut String) {
    let Some(node) = applier.node(handle) else { return };
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}{}", node_label(&node.attributes));
    let _ = writeln!(out);
    for &child in &node.children {
        render_node(applier, child, depth + 1, out);
    }
}

fn node_label(attributes: &Attributes) -> String {
    match attributes {
        Attributes::Container => "container".to_string(),
        Attributes::Text { content } => format!("text \"{content}\""),
        Attributes::Image { src, alt } => match alt {
            Some(alt) => format!("image src={src} alt={alt}"),
            None => format!("image src={src}"),
        },
        Attributes::Interactive { handler } => {
            format!("interactive handler={}", handler.is_some())
        }
        Attributes::Input { value, placeholder, handler } => {
            format!(
                "input value=\"{value}\" placeholder={:?} handler={}",
                placeholder.as_deref(),
                handler.is_some()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vapor_core::{apply_commands, reconcile, ElementKind, HandleTable, LifecycleStack};
    use vapor_style::{StyleInterner, StyleValue};

    #[test]
    fn renders_nested_structure() {
        let arena = vapor_arena::Arena::new(vapor_arena::ArenaKind::Persist);
        let interner = StyleInterner::new(&arena);
        let h = interner.intern(StyleValue::default()).unwrap();

        let mut stack = LifecycleStack::new();
        stack.open(ElementKind::Container, 1, None);
        stack.open(ElementKind::Text, 2, None);
        stack.configure(h, Attributes::Text { content: "hi".into() }).unwrap();
        stack.close().unwrap();
        stack.configure(h, Attributes::Container).unwrap();
        stack.close().unwrap();
        let (tree, _) = stack.finish().unwrap();

        let empty = vapor_core::Tree::new();
        let commands = reconcile(&tree, &empty).unwrap();

        let mut applier = RecordingApplier::new();
        let mut handles = HandleTable::default();
        apply_commands(&mut applier, &commands, &mut handles).unwrap();

        assert_eq!(render(&applier), "container\n  text \"hi\"\n");
    }

    /// A keyed reorder must reposition the child under its *own* parent,
    /// not detach it to the root — the host applier's `insert` treats
    /// `parent: None` as "move to the document root" (see
    /// `RecordingApplier::insert`), so `reconcile`'s reorder hint has to
    /// carry the matched pair's actual parent through to `apply_commands`.
    #[test]
    fn keyed_reorder_stays_under_its_parent() {
        let arena = vapor_arena::Arena::new(vapor_arena::ArenaKind::Persist);
        let interner = StyleInterner::new(&arena);
        let h = interner.intern(StyleValue::default()).unwrap();

        let build = |order: [&str; 3]| {
            let mut stack = LifecycleStack::new();
            stack.open(ElementKind::Container, 1, None);
            for key in order {
                stack.open(ElementKind::Text, 2, Some(std::rc::Rc::from(key)));
                stack.configure(h, Attributes::Text { content: key.into() }).unwrap();
                stack.close().unwrap();
            }
            stack.configure(h, Attributes::Container).unwrap();
            stack.close().unwrap();
            stack.finish().unwrap().0
        };

        let retained = build(["a", "b", "c"]);
        let empty = vapor_core::Tree::new();
        let mut applier = RecordingApplier::new();
        let mut handles = HandleTable::default();
        apply_commands(&mut applier, &reconcile(&retained, &empty).unwrap(), &mut handles).unwrap();
        assert_eq!(render(&applier), "container\n  text \"a\"\n  text \"b\"\n  text \"c\"\n");

        let reordered = build(["c", "a", "b"]);
        let commands = reconcile(&reordered, &retained).unwrap();
        apply_commands(&mut applier, &commands, &mut handles).unwrap();

        assert_eq!(render(&applier), "container\n  text \"c\"\n  text \"a\"\n  text \"b\"\n");
    }
}
