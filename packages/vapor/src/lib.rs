//! Vapor: a compiled UI engine that treats the display surface as a thin
//! graphics driver. This crate is the facade: it wires together
//! `vapor-arena`, `vapor-style`, `vapor-core`, `vapor-builder`,
//! `vapor-reactivity`, and (behind their respective features)
//! `vapor-router`, `vapor-forms`, `vapor-markdown`, and `vapor-log` behind
//! a single `init(config)` call and a handful of free functions.
//!
//! Most applications only need `use vapor::prelude::*` plus [`init`].

mod array;
mod config;
mod context;
mod engine;
mod events;

pub use array::array;
pub use config::{ArenaChunkConfig, VaporConfig};
pub use context::arena;
pub use engine::{cycle, init, Engine};
pub use events::{dispatch_global_event, event_listener, GlobalEventKind};

#[cfg(feature = "router")]
pub use engine::{navigate, register_layout, register_page, render_active_route};

pub use vapor_arena::ArenaKind;
pub use vapor_core::{CommandApplier, Diagnostics, DiagnosticEvent, ElementKind, EngineError, EventValue, NodeId, TracingDiagnostics};
pub use vapor_elements::{permits, permitted_attributes, AttributeKind};
pub use vapor_reactivity::ReactivityMode;
pub use vapor_slot::{BoundElement, Owner, SlotStore};
pub use vapor_theme::{IconRegistry, SemanticColor, SemanticSpacing, ThemeDefinition, ThemeRegistry};

#[cfg(feature = "router")]
pub use vapor_router::{DestroyHook, PathPattern, RouteParams, Router, RouterError};

#[cfg(feature = "forms")]
pub use vapor_forms::{render_form, FieldKind, FieldSpec, FieldValue, FormError, FormRuntime, FormSchema, FormSubmission, ValidationRule};

#[cfg(feature = "markdown")]
pub use vapor_markdown::{compile as compile_markdown, emit as emit_markdown, BuilderCall, TextRun};

#[cfg(feature = "logger")]
pub use vapor_log::{init_logging, LogConfig, LogLevel};

/// Everything a render root typically needs in scope: element
/// constructors, the style value types, `arena`/`array`/`cycle`, and
/// (feature-gated) the router, forms, and markdown re-exports.
pub mod prelude {
    pub use vapor_builder::{
        container, container_item, container_keyed, image, image_keyed, input, input_keyed,
        interactive, interactive_keyed, text, text_keyed, ContainerAttrs, ElementBuilder,
        ImageAttrs, InputAttrs, InteractiveAttrs, KindAttrs, TextAttrs,
    };
    pub use vapor_core::{EventValue, NodeId};
    pub use vapor_style::{
        Align, BorderLineStyle, Color, Dimension, Direction, Display, Easing, FontFamily,
        FontWeight, TransitionProperty,
    };

    pub use crate::{arena, array, cycle, event_listener, ArenaKind, GlobalEventKind, VaporConfig};

    #[cfg(feature = "router")]
    pub use crate::{navigate, register_layout, register_page, render_active_route, RouteParams};

    #[cfg(feature = "forms")]
    pub use vapor_forms::*;

    #[cfg(feature = "markdown")]
    pub use crate::{compile_markdown, emit_markdown};

    #[cfg(feature = "logger")]
    pub use crate::{init_logging, LogConfig};
}
