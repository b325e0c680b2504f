//! Compiling a [`FormSchema`] into a render root: one labeled input per
//! field plus a submit control that validates and dispatches a
//! [`FormSubmission`] (`SPEC_FULL.md` §7). Modeled on `vapor-builder`'s own
//! fluent surface — this crate has no special access to the core beyond
//! what any application render root uses.

use std::rc::Rc;

use vapor_builder::{container, input, interactive, text};
use vapor_core::{EngineError, EventValue, NodeId};

use crate::runtime::FormRuntime;
use crate::schema::FieldKind;
use crate::submission::FormSubmission;

/// Build the form's render root now. Re-invoke on every pass the same way
/// any other render root is re-invoked; `runtime` carries the live field
/// values across passes so re-rendering doesn't lose in-progress input.
pub fn render_form(runtime: Rc<FormRuntime>, on_submit: Rc<dyn Fn(FormSubmission)>) -> Result<NodeId, EngineError> {
    container().children(|| {
        for field in &runtime.schema().fields {
            text(field.label.clone()).end().expect("form label commit");

            let field_name = field.name.clone();
            let current = runtime.raw(&field_name);
            let runtime_for_input = runtime.clone();
            let mut builder = input().value(current).on_input_with(
                move |name: &String, ev: &EventValue| {
                    if let Some(raw) = ev.downcast_ref::<String>() {
                        runtime_for_input.set_raw(name, raw.clone());
                    }
                },
                field_name,
            );
            if let FieldKind::Select { options } = &field.kind {
                builder = builder.placeholder(format!("one of: {}", options.join(", ")));
            }
            builder.end().expect("form field commit");
        }

        let runtime_for_submit = runtime.clone();
        let on_submit = on_submit.clone();
        interactive()
            .on_click_with(
                move |_: &(), _: &EventValue| match runtime_for_submit.submit() {
                    Ok(submission) => on_submit(submission),
                    Err(errors) => {
                        tracing::warn!(count = errors.len(), "form submission failed validation");
                    }
                },
                (),
            )
            .children(|| {
                text("Submit").end().expect("submit label commit");
            })
            .expect("submit control commit");
    })
}
