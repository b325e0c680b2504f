//! The route registry and view boundary (C9, spec §4.9): binds path
//! patterns to render roots, composes layouts as higher-order render
//! roots, and runs the destroy-hook / view-arena-reset protocol on every
//! route change. The destroy-hook-on-leave concept is folded in directly
//! rather than kept as a separate crate.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use vapor_arena::Arena;
use vapor_reactivity::Signal;

use crate::pattern::{PathPattern, RouteParams};

pub type RenderRoot = Rc<dyn Fn(&RouteParams)>;
pub type DestroyHook = Rc<dyn Fn()>;
/// A layout receives the matched params and the inner render root it
/// wraps as a callable, and decides where to invoke it (spec §4.9:
/// "layout wrappers compose as higher-order render roots that receive the
/// inner render root as a callable and invoke it at the desired
/// position").
pub type LayoutRenderRoot = Rc<dyn Fn(&RouteParams, &dyn Fn(&RouteParams))>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("no registered route matches path `{path}`")]
    NoMatchingRoute { path: String },
}

struct PageEntry {
    pattern: PathPattern,
    render_root: RenderRoot,
    destroy_hook: Option<DestroyHook>,
}

struct LayoutEntry {
    prefix: String,
    layout_root: LayoutRenderRoot,
    reset: bool,
}

#[derive(Clone)]
struct ActiveRoute {
    pattern_key: String,
    params: RouteParams,
}

/// Owns the route table and the currently-active route. One `Router` per
/// app; the view arena it resets belongs to the same `ArenaSet` the rest
/// of the engine shares. The active route lives in a [`Signal`] rather
/// than a plain cell so render code reading it picks up the reactivity
/// driver's notify-on-write for free, the same as any other signal.
pub struct Router<'a> {
    view_arena: &'a Arena,
    pages: RefCell<Vec<PageEntry>>,
    layouts: RefCell<Vec<LayoutEntry>>,
    active: Signal<Option<ActiveRoute>>,
    route_changed: Cell<bool>,
}

impl<'a> Router<'a> {
    pub fn new(view_arena: &'a Arena) -> Self {
        Self {
            view_arena,
            pages: RefCell::new(Vec::new()),
            layouts: RefCell::new(Vec::new()),
            active: Signal::new(None),
            route_changed: Cell::new(false),
        }
    }

    /// Register a page. Idempotent by pattern string: registering the same
    /// pattern again replaces the prior entry in place rather than
    /// duplicating it.
    pub fn register_page(
        &self,
        path_pattern: &str,
        render_root: impl Fn(&RouteParams) + 'static,
        destroy_hook: Option<DestroyHook>,
    ) {
        let parsed = PathPattern::parse(path_pattern);
        let entry = PageEntry { pattern: parsed, render_root: Rc::new(render_root), destroy_hook };
        let mut pages = self.pages.borrow_mut();
        if let Some(existing) = pages.iter_mut().find(|p| p.pattern.raw() == path_pattern) {
            *existing = entry;
        } else {
            pages.push(entry);
        }
    }

    /// Register a layout wrapping every page under `path_prefix`.
    /// `reset: true` means navigating between two routes that both resolve
    /// to this same layout still forces a full view-arena reset; `reset:
    /// false` lets such a same-layout transition skip the reset, so state
    /// allocated in the view arena by the layout itself survives the page
    /// swap underneath it. Crossing into or out of a *different* layout
    /// (or a route with no layout) always resets regardless of this flag —
    /// there is no same-layout state to preserve in that case.
    pub fn register_layout(&self, path_prefix: &str, layout_root: impl Fn(&RouteParams, &dyn Fn(&RouteParams)) + 'static, reset: bool) {
        let entry = LayoutEntry { prefix: path_prefix.to_string(), layout_root: Rc::new(layout_root), reset };
        let mut layouts = self.layouts.borrow_mut();
        if let Some(existing) = layouts.iter_mut().find(|l| l.prefix == path_prefix) {
            *existing = entry;
        } else {
            layouts.push(entry);
        }
    }

    fn best_page_match<'p>(pages: &'p [PageEntry], path: &str) -> Option<(usize, RouteParams)> {
        pages
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.pattern.matches(path).map(|params| (i, params)))
            .max_by_key(|(i, _)| pages[*i].pattern.specificity())
    }

    fn best_layout_match<'p>(layouts: &'p [LayoutEntry], path: &str) -> Option<usize> {
        layouts
            .iter()
            .enumerate()
            .filter(|(_, l)| PathPattern::is_prefix_of(&l.prefix, path))
            .max_by_key(|(_, l)| l.prefix.matches('/').count() + 1)
            .map(|(i, _)| i)
    }

    /// Cross to `path` (spec §4.9): run the outgoing route's destroy hook,
    /// reset the view arena unless the incoming and outgoing routes share
    /// a layout registered with `reset: false`, and make the incoming
    /// route active. The caller is responsible for treating the *next*
    /// render pass as a full add (see [`Router::take_route_changed`]) —
    /// that happens unconditionally, independent of whether the view
    /// arena itself was reset.
    pub fn navigate(&self, path: &str) -> Result<(), RouterError> {
        let pages = self.pages.borrow();
        let (index, params) =
            Self::best_page_match(&pages, path).ok_or_else(|| RouterError::NoMatchingRoute { path: path.to_string() })?;
        let pattern_key = pages[index].pattern.raw().to_string();

        let layouts = self.layouts.borrow();
        let incoming_layout = Self::best_layout_match(&layouts, &pattern_key);

        let outgoing = self.active.get();
        let mut should_reset = true;
        if let Some(outgoing) = &outgoing {
            if outgoing.pattern_key != pattern_key {
                if let Some(entry) = pages.iter().find(|p| p.pattern.raw() == outgoing.pattern_key) {
                    if let Some(hook) = &entry.destroy_hook {
                        hook();
                    }
                }
            }
            let outgoing_layout = Self::best_layout_match(&layouts, &outgoing.pattern_key);
            if let (Some(o), Some(i)) = (outgoing_layout, incoming_layout) {
                if o == i {
                    should_reset = layouts[i].reset;
                }
            }
        }
        drop(layouts);

        if should_reset {
            self.view_arena.reset();
        }
        tracing::debug!(path, pattern = pattern_key.as_str(), reset = should_reset, "route changed");

        self.active.set(Some(ActiveRoute { pattern_key, params }));
        self.route_changed.set(true);
        Ok(())
    }

    pub fn active_path_pattern(&self) -> Option<String> {
        self.active.get().map(|a| a.pattern_key)
    }

    pub fn active_params(&self) -> Option<RouteParams> {
        self.active.get().map(|a| a.params)
    }

    /// Whether a route change happened since the last call (consumes the
    /// flag). The driver consults this to decide whether the next pass
    /// must be a full replace rather than a diff (spec §4.9, scenario 5).
    pub fn take_route_changed(&self) -> bool {
        let changed = self.route_changed.get();
        self.route_changed.set(false);
        changed
    }

    /// Invoke the active route's composed render root (page wrapped by
    /// its matching layout, if any). Intended to be installed as the
    /// reactivity driver's zero-arg render root.
    pub fn render(&self) {
        let pages = self.pages.borrow();
        let layouts = self.layouts.borrow();
        let Some(active) = self.active.get() else { return };
        let ActiveRoute { pattern_key, params } = active;
        let Some(page) = pages.iter().find(|p| p.pattern.raw() == pattern_key) else { return };

        match Self::best_layout_match(&layouts, pattern_key.as_str()) {
            Some(layout_index) => {
                let page_root = page.render_root.clone();
                let inner = move |params: &RouteParams| page_root(params);
                (layouts[layout_index].layout_root)(&params, &inner);
            }
            None => (page.render_root)(&params),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell as StdRefCell;
    use vapor_arena::ArenaKind;

    #[test]
    fn registration_is_idempotent_by_pattern() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        router.register_page("/a", |_| {}, None);
        router.register_page("/a", |_| {}, None);
        assert_eq!(router.pages.borrow().len(), 1);
    }

    #[test]
    fn navigate_binds_params_and_resets_view_arena() {
        let arena = Arena::new(ArenaKind::View);
        arena.alloc_str("stale").unwrap();
        assert!(arena.used_bytes() > 0);

        let router = Router::new(&arena);
        router.register_page("/:id/test", |_| {}, None);
        router.navigate("/42/test").unwrap();

        assert_eq!(arena.used_bytes(), 0);
        assert_eq!(router.active_params().unwrap().get("id"), Some(&"42".to_string()));
        assert!(router.take_route_changed());
        assert!(!router.take_route_changed());
    }

    #[test]
    fn navigate_to_unknown_path_errors() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        router.register_page("/a", |_| {}, None);
        assert_eq!(router.navigate("/b"), Err(RouterError::NoMatchingRoute { path: "/b".to_string() }));
    }

    #[test]
    fn destroy_hook_runs_only_when_leaving_its_route() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        let destroyed = Rc::new(StdRefCell::new(false));
        let destroyed_clone = destroyed.clone();
        router.register_page("/a", |_| {}, Some(Rc::new(move || *destroyed_clone.borrow_mut() = true)));
        router.register_page("/b", |_| {}, None);

        router.navigate("/a").unwrap();
        assert!(!*destroyed.borrow());
        router.navigate("/b").unwrap();
        assert!(*destroyed.borrow());
    }

    #[test]
    fn layout_wraps_page_render_root() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        let order = Rc::new(StdRefCell::new(Vec::new()));

        let order_page = order.clone();
        router.register_page("/admin/dash", move |_| order_page.borrow_mut().push("page"), None);

        let order_layout = order.clone();
        router.register_layout(
            "/admin",
            move |params, inner| {
                order_layout.borrow_mut().push("layout-before");
                inner(params);
                order_layout.borrow_mut().push("layout-after");
            },
            false,
        );

        router.navigate("/admin/dash").unwrap();
        router.render();
        assert_eq!(*order.borrow(), vec!["layout-before", "page", "layout-after"]);
    }

    /// `reset: false` lets a same-layout transition skip the view-arena
    /// reset, so state the layout allocated there survives the page swap.
    #[test]
    fn same_layout_with_reset_false_skips_view_arena_reset() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        router.register_page("/admin/a", |_| {}, None);
        router.register_page("/admin/b", |_| {}, None);
        router.register_layout("/admin", |_, inner| inner(&RouteParams::default()), false);

        router.navigate("/admin/a").unwrap();
        arena.alloc_str("layout state").unwrap();
        assert!(arena.used_bytes() > 0);

        router.navigate("/admin/b").unwrap();
        assert!(arena.used_bytes() > 0, "same-layout transition with reset: false must not reset the view arena");
        assert!(router.take_route_changed(), "the next pass is still a full add regardless of the arena reset");
    }

    /// `reset: true` forces the view-arena reset even when the destination
    /// layout is unchanged.
    #[test]
    fn same_layout_with_reset_true_still_resets_view_arena() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        router.register_page("/admin/a", |_| {}, None);
        router.register_page("/admin/b", |_| {}, None);
        router.register_layout("/admin", |_, inner| inner(&RouteParams::default()), true);

        router.navigate("/admin/a").unwrap();
        arena.alloc_str("layout state").unwrap();
        assert!(arena.used_bytes() > 0);

        router.navigate("/admin/b").unwrap();
        assert_eq!(arena.used_bytes(), 0, "reset: true resets the view arena even for an unchanged layout");
    }

    /// Crossing into a different layout always resets, regardless of either
    /// layout's `reset` flag.
    #[test]
    fn crossing_into_a_different_layout_always_resets() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        router.register_page("/a/one", |_| {}, None);
        router.register_page("/b/one", |_| {}, None);
        router.register_layout("/a", |_, inner| inner(&RouteParams::default()), false);
        router.register_layout("/b", |_, inner| inner(&RouteParams::default()), false);

        router.navigate("/a/one").unwrap();
        arena.alloc_str("layout state").unwrap();
        assert!(arena.used_bytes() > 0);

        router.navigate("/b/one").unwrap();
        assert_eq!(arena.used_bytes(), 0, "a different layout always resets even with reset: false on both");
    }

    #[test]
    fn most_specific_pattern_wins_over_a_dynamic_one() {
        let arena = Arena::new(ArenaKind::View);
        let router = Router::new(&arena);
        router.register_page("/users/:id", |_| {}, None);
        router.register_page("/users/new", |_| {}, None);
        router.navigate("/users/new").unwrap();
        assert_eq!(router.active_path_pattern(), Some("/users/new".to_string()));
    }
}
