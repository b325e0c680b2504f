//! Live per-field raw values collected while a form is being filled in,
//! and the submit step that validates and hands off a [`FormSubmission`].

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::schema::FormSchema;
use crate::submission::{FormError, FormSubmission};
use crate::validate::validate_all;

/// Backs one rendered form instance: the schema it was rendered from plus
/// whatever raw text each field currently holds. Cheap to share by `Rc`
/// between the render root and the input handlers it wires up.
pub struct FormRuntime {
    schema: FormSchema,
    raw_values: RefCell<FxHashMap<String, String>>,
}

impl FormRuntime {
    pub fn new(schema: FormSchema) -> Self {
        Self { schema, raw_values: RefCell::new(FxHashMap::default()) }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn set_raw(&self, field: &str, raw: impl Into<String>) {
        self.raw_values.borrow_mut().insert(field.to_string(), raw.into());
    }

    pub fn raw(&self, field: &str) -> String {
        self.raw_values.borrow().get(field).cloned().unwrap_or_default()
    }

    /// Validate every current field value and produce a submission, or
    /// every validation failure collected (`SPEC_FULL.md` §7).
    pub fn submit(&self) -> Result<FormSubmission, Vec<FormError>> {
        validate_all(&self.schema, &self.raw_values.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSpec, ValidationRule};

    #[test]
    fn set_raw_then_submit_round_trips() {
        let runtime = FormRuntime::new(FormSchema::new(vec![FieldSpec::new(
            "name",
            "Name",
            FieldKind::Text,
        )
        .with_validation(ValidationRule::required())]));
        runtime.set_raw("name", "Ada");
        let submission = runtime.submit().unwrap();
        assert_eq!(submission.get("name"), Some(&crate::submission::FieldValue::Text("Ada".to_string())));
    }

    #[test]
    fn submit_without_required_field_fails() {
        let runtime = FormRuntime::new(FormSchema::new(vec![FieldSpec::new(
            "name",
            "Name",
            FieldKind::Text,
        )
        .with_validation(ValidationRule::required())]));
        assert!(runtime.submit().is_err());
    }
}
