//! Markdown-to-builder-calls compiler (`SPEC_FULL.md` §7): parses a
//! markdown string into a flat [`BuilderCall`] sequence ([`compile`]) and
//! replays that sequence through the builder surface ([`emit`]).

mod compile;
mod emit;

pub use compile::{compile, BuilderCall, TextRun};
pub use emit::emit;
