//! Replaying a [`crate::compile::BuilderCall`] sequence through the
//! builder surface (`SPEC_FULL.md` §7: markdown "interacts only through
//! the builder surface"). Kept separate from `compile` so the pure parse
//! step stays unit-testable without an installed engine (`compile`'s own
//! tests build no tree at all); `emit` is the half that actually calls
//! `vapor-builder`, and is exercised against a real lifecycle pass.

use vapor_builder::{container, image, text};
use vapor_core::{EngineError, NodeId};

use crate::compile::BuilderCall;

/// Replay `calls` (as produced by [`crate::compile::compile`]) against the
/// currently-installed lifecycle stack, wrapping the whole sequence in one
/// container so the markdown document commits as a single subtree. Must be
/// called with a render pass in flight, exactly like any other builder
/// call (spec §4.5).
pub fn emit(calls: &[BuilderCall]) -> Result<NodeId, EngineError> {
    container().children(|| emit_blocks(calls))
}

/// Walks `calls` once; every time it sees `OpenContainer` it recurses to
/// find that container's matching `CloseContainer` and commits exactly
/// that slice as its children before continuing after it. This is what
/// turns `compile`'s flat call sequence back into nested builder calls
/// (the evaluate-argument-first requirement applies recursively: an outer
/// container's `children` block must finish opening/closing every inner
/// container before the outer one commits).
fn emit_blocks(calls: &[BuilderCall]) {
    let mut i = 0;
    while i < calls.len() {
        i = emit_one(calls, i);
    }
}

fn emit_one(calls: &[BuilderCall], start: usize) -> usize {
    match &calls[start] {
        BuilderCall::OpenContainer => {
            let end = matching_close(calls, start);
            container()
                .children(|| emit_blocks(&calls[start + 1..end]))
                .expect("markdown container commit");
            end + 1
        }
        BuilderCall::CloseContainer => start + 1,
        BuilderCall::Text(run) => {
            let mut builder = text(run.content.clone());
            if let Some(level) = run.heading_level {
                let px = vapor_style::Float::from(heading_px(level));
                builder = builder.font_size(vapor_style::Dimension::Px(px));
                builder = builder.font_weight(vapor_style::FontWeight::Bold);
            }
            if run.bold {
                builder = builder.font_weight(vapor_style::FontWeight::Bold);
            }
            if run.italic {
                builder = builder.italic(true);
            }
            if run.code {
                builder = builder.font_family(std::rc::Rc::from("monospace"));
            }
            builder.end().expect("markdown text commit");
            start + 1
        }
        BuilderCall::Image { src, alt } => {
            let mut builder = image(src.clone());
            if let Some(alt) = alt {
                builder = builder.alt(alt.clone());
            }
            builder.end().expect("markdown image commit");
            start + 1
        }
        BuilderCall::Placeholder { label } => {
            text(format!("[{label}]")).end().expect("markdown placeholder commit");
            start + 1
        }
    }
}

fn matching_close(calls: &[BuilderCall], open_index: usize) -> usize {
    let mut depth = 0;
    for (offset, call) in calls[open_index..].iter().enumerate() {
        match call {
            BuilderCall::OpenContainer => depth += 1,
            BuilderCall::CloseContainer => {
                depth -= 1;
                if depth == 0 {
                    return open_index + offset;
                }
            }
            _ => {}
        }
    }
    panic!("unbalanced markdown container calls: compile() always balances its own output");
}

fn heading_px(level: u8) -> f32 {
    match level {
        1 => 32.0,
        2 => 28.0,
        3 => 24.0,
        4 => 20.0,
        5 => 17.0,
        _ => 15.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile;
    use vapor_arena::{Arena, ArenaKind};
    use vapor_core::{begin_pass, end_pass, ElementKind};
    use vapor_style::{install_interner, uninstall_interner, StyleInterner};

    fn leaked_arena() -> &'static Arena {
        Box::leak(Box::new(Arena::new(ArenaKind::Persist)))
    }

    #[test]
    fn paragraph_emits_a_container_wrapping_a_text_leaf() {
        install_interner(StyleInterner::new(leaked_arena()));
        begin_pass();
        emit(&compile("hello world")).unwrap();
        let (tree, _) = end_pass().unwrap();

        let root = tree.roots()[0];
        let node = tree.get(root).unwrap();
        assert_eq!(node.kind, ElementKind::Container);
        assert_eq!(node.children.len(), 1);
        let paragraph = tree.get(node.children[0]).unwrap();
        assert_eq!(paragraph.kind, ElementKind::Container);
        assert_eq!(paragraph.children.len(), 1);
        assert_eq!(tree.get(paragraph.children[0]).unwrap().kind, ElementKind::Text);
        uninstall_interner();
    }

    #[test]
    fn list_items_each_become_their_own_container() {
        install_interner(StyleInterner::new(leaked_arena()));
        begin_pass();
        emit(&compile("- one\n- two\n")).unwrap();
        let (tree, _) = end_pass().unwrap();

        let root = tree.roots()[0];
        let list = tree.get(tree.get(root).unwrap().children[0]).unwrap();
        assert_eq!(list.children.len(), 2);
        uninstall_interner();
    }

    #[test]
    fn image_becomes_a_leaf_with_no_children() {
        install_interner(StyleInterner::new(leaked_arena()));
        begin_pass();
        emit(&compile("![a cat](cat.png)")).unwrap();
        let (tree, _) = end_pass().unwrap();

        let root = tree.roots()[0];
        let image_node = tree.get(tree.get(root).unwrap().children[0]).unwrap();
        assert_eq!(image_node.kind, ElementKind::Image);
        assert!(image_node.children.is_empty());
        uninstall_interner();
    }
}
