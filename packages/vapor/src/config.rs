//! `init(config)`'s configuration struct (spec §6, `SPEC_FULL.md` §3):
//! the reactivity mode, the theme/icon tables to seed at startup, the
//! diagnostics sink, and arena chunk sizing. A single plain config struct
//! consumed once at startup, not threaded through afterward.

use std::rc::Rc;

use vapor_core::Diagnostics;
use vapor_reactivity::ReactivityMode;
use vapor_theme::ThemeDefinition;

/// Per-arena byte budgets, each optional (`None` leaves that arena
/// growing freely). Only matters to embedders with a tight memory
/// budget or to tests exercising the allocation-exhaustion recovery path
/// (spec §8 scenario 4) — most applications leave this at its default.
#[derive(Debug, Clone, Default)]
pub struct ArenaChunkConfig {
    pub frame_limit: Option<usize>,
    pub view_limit: Option<usize>,
    pub persist_limit: Option<usize>,
    pub scratch_limit: Option<usize>,
}

/// Config consumed once by [`crate::init`] (spec §6: "`init(config)` —
/// initialize engine; config enumerates: `{mode, themes, icon_registry}`").
pub struct VaporConfig {
    pub mode: ReactivityMode,
    /// `(name, definition, default?)` triples, registered in order.
    pub themes: Vec<(String, ThemeDefinition, bool)>,
    /// `(name, source)` pairs for the icon registry.
    pub icons: Vec<(String, String)>,
    pub diagnostics: Option<Rc<dyn Diagnostics>>,
    pub arena_chunk_bytes: ArenaChunkConfig,
}

impl VaporConfig {
    pub fn new(mode: ReactivityMode) -> Self {
        Self {
            mode,
            themes: Vec::new(),
            icons: Vec::new(),
            diagnostics: None,
            arena_chunk_bytes: ArenaChunkConfig::default(),
        }
    }

    pub fn with_theme(mut self, name: impl Into<String>, definition: ThemeDefinition, default: bool) -> Self {
        self.themes.push((name.into(), definition, default));
        self
    }

    pub fn with_icon(mut self, name: impl Into<String>, source: impl Into<String>) -> Self {
        self.icons.push((name.into(), source.into()));
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Rc<dyn Diagnostics>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    pub fn with_arena_chunk_bytes(mut self, limits: ArenaChunkConfig) -> Self {
        self.arena_chunk_bytes = limits;
        self
    }
}

impl Default for VaporConfig {
    fn default() -> Self {
        Self::new(ReactivityMode::default())
    }
}
