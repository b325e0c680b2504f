//! Typed-schema form compiler (C10): given a [`FormSchema`], produces a
//! render root that emits one input per field, honors validation
//! annotations, and dispatches a typed [`FormSubmission`] to a callback.
//! Grounded on `vapor-builder`'s own fluent surface; forms otherwise have
//! no dedicated lower-level primitive and are built from hand-written
//! components.

mod render;
mod runtime;
mod schema;
mod submission;
mod validate;

pub use render::render_form;
pub use runtime::FormRuntime;
pub use schema::{FieldKind, FieldSpec, FormSchema, ValidationRule};
pub use submission::{FieldValue, FormError, FormSubmission};
pub use validate::{parse_value, validate_all, validate_field};
