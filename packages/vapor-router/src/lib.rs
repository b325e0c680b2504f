//! Path-based routing and the view boundary for the vapor UI engine
//! (C9). A route binds a path pattern to a render root; crossing a route
//! boundary runs the outgoing route's destroy hook and resets the view
//! arena before the incoming route's render root becomes active.

mod pattern;
mod router;

pub use pattern::{PathPattern, RouteParams};
pub use router::{DestroyHook, LayoutRenderRoot, RenderRoot, Router, RouterError};
