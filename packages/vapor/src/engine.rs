//! The engine singleton (spec §6 `init(config)`) and the free functions
//! that reach it through [`crate::context`].

use std::rc::Rc;

use vapor_arena::ArenaSet;
use vapor_core::{CommandApplier, Diagnostics, TracingDiagnostics};
use vapor_reactivity::{install_driver, Driver};
use vapor_style::{install_interner, StyleInterner};
use vapor_theme::{IconRegistry, ThemeRegistry};

#[cfg(feature = "router")]
use vapor_router::{DestroyHook, RouteParams, Router, RouterError};

use crate::config::VaporConfig;
use crate::context::{self, EngineContext};

/// One running instance of the engine: the four arenas, the theme/icon
/// registries, the router (when enabled), and the reactivity driver that
/// owns reconciliation and command application. Constructed by
/// [`init`]; dropping every `Rc<Engine<A>>` without calling
/// [`Engine::teardown`] first still releases memory correctly, but leaves
/// the thread-local engine context and the style interner installed.
pub struct Engine<A: CommandApplier + 'static> {
    arenas: &'static ArenaSet,
    theme: &'static ThemeRegistry<'static>,
    icons: IconRegistry<'static>,
    #[cfg(feature = "router")]
    router: Rc<Router<'static>>,
    driver: Rc<Driver<A>>,
}

impl<A: CommandApplier + 'static> Engine<A> {
    pub fn arenas(&self) -> &'static ArenaSet {
        self.arenas
    }

    pub fn theme(&self) -> &ThemeRegistry<'static> {
        self.theme
    }

    pub fn icons(&self) -> &IconRegistry<'static> {
        &self.icons
    }

    #[cfg(feature = "router")]
    pub fn router(&self) -> &Rc<Router<'static>> {
        &self.router
    }

    pub fn driver(&self) -> &Rc<Driver<A>> {
        &self.driver
    }

    /// Force a render pass now (the `cycle()` of spec §6).
    pub fn cycle(&self) {
        self.driver.cycle();
    }

    /// Tear down this engine instance: reset the persist arena (the one
    /// arena [`vapor_arena::ArenaSet`] never resets on its own) and
    /// uninstall every thread-local this engine installed, so a fresh
    /// [`init`] call on the same thread starts clean. Intended for tests
    /// and for hosts that genuinely restart the engine in-process; a
    /// long-lived application never needs to call this.
    pub fn teardown(&self) {
        self.arenas.persist().reset();
        vapor_style::uninstall_interner();
        vapor_theme::uninstall_theme();
        vapor_reactivity::uninstall_driver();
        context::uninstall();
    }
}

/// Initialize the engine (spec §6 `init(config)`): seed the arenas, the
/// style interner, the theme/icon registries, and — when the `router`
/// feature is enabled — an empty route table. `render_root` is the single
/// top-level render root the driver reruns on every pass (spec §4.8, C8);
/// when routing is enabled, a typical `render_root` is
/// `move || vapor::render_active_route()`, but the caller always decides.
pub fn init<A: CommandApplier + 'static>(
    config: VaporConfig,
    applier: A,
    render_root: impl Fn() + 'static,
) -> Rc<Engine<A>> {
    let limits = &config.arena_chunk_bytes;
    let arenas: &'static ArenaSet = Box::leak(Box::new(ArenaSet::with_limits(
        limits.frame_limit,
        limits.view_limit,
        limits.persist_limit,
        limits.scratch_limit,
    )));

    install_interner(StyleInterner::new(arenas.persist()));

    let theme: &'static ThemeRegistry<'static> = Box::leak(Box::new(ThemeRegistry::new(arenas.persist())));
    for (name, definition, default) in config.themes {
        theme
            .register(&name, definition, default)
            .expect("theme registry's persist arena exhausted during init");
    }
    vapor_theme::install_theme(theme);

    let icons = IconRegistry::new(arenas.persist());
    for (name, source) in config.icons {
        icons
            .register(&name, &source)
            .expect("icon registry's persist arena exhausted during init");
    }

    let diagnostics: Rc<dyn Diagnostics> =
        config.diagnostics.unwrap_or_else(|| Rc::new(TracingDiagnostics));

    #[cfg(feature = "router")]
    let router = Rc::new(Router::new(arenas.view()));

    let driver = Driver::new(config.mode, applier, render_root, diagnostics, arenas.frame());
    install_driver(driver.clone());

    let cycle_closure: Rc<dyn Fn()> = {
        let driver = driver.clone();
        Rc::new(move || driver.cycle())
    };

    #[cfg(feature = "router")]
    let force_full_replace_closure: Rc<dyn Fn()> = {
        let driver = driver.clone();
        Rc::new(move || driver.force_full_replace())
    };

    context::install(Rc::new(EngineContext {
        arenas,
        cycle: cycle_closure,
        #[cfg(feature = "router")]
        force_full_replace: force_full_replace_closure,
        #[cfg(feature = "router")]
        router: router.clone(),
    }));

    Rc::new(Engine {
        arenas,
        theme,
        icons,
        #[cfg(feature = "router")]
        router,
        driver,
    })
}

/// `cycle()` (spec §6): force a render pass on the installed engine.
pub fn cycle() {
    context::cycle_active();
}

/// `register_page(path_pattern, render_root, destroy_hook?)` (spec §6).
#[cfg(feature = "router")]
pub fn register_page(path_pattern: &str, render_root: impl Fn(&RouteParams) + 'static, destroy_hook: Option<DestroyHook>) {
    context::router_active().register_page(path_pattern, render_root, destroy_hook);
}

/// `register_layout(path_prefix, layout_render_root, {reset?})` (spec §6).
#[cfg(feature = "router")]
pub fn register_layout(
    path_prefix: &str,
    layout_root: impl Fn(&RouteParams, &dyn Fn(&RouteParams)) + 'static,
    reset: bool,
) {
    context::router_active().register_layout(path_prefix, layout_root, reset);
}

/// Cross to `path`, forcing the next pass to a full replace (spec §4.9).
#[cfg(feature = "router")]
pub fn navigate(path: &str) -> Result<(), RouterError> {
    context::navigate_active(path)
}

/// Render the currently-active route (page composed with its matching
/// layout, if any). Install this as your `render_root` at [`init`] time
/// to let the router drive the top-level view.
#[cfg(feature = "router")]
pub fn render_active_route() {
    context::router_active().render();
}
