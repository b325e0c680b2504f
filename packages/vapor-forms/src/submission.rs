//! The typed value a field holds and the submission dispatched once every
//! field validates (`SPEC_FULL.md` §7: "dispatches a typed `FormSubmission`
//! to a callback").

use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl FieldValue {
    pub fn as_raw(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("field `{field}` is required")]
    Required { field: String },
    #[error("field `{field}` value `{value}` is not a valid {expected}")]
    WrongType { field: String, value: String, expected: &'static str },
    #[error("field `{field}` value {value} is below the minimum of {min}")]
    BelowMin { field: String, value: f64, min: f64 },
    #[error("field `{field}` value {value} is above the maximum of {max}")]
    AboveMax { field: String, value: f64, max: f64 },
    #[error("field `{field}` value `{value}` is not one of the allowed options")]
    NotAnOption { field: String, value: String },
    #[error("field `{field}` has no registered schema entry")]
    UnknownField { field: String },
}

/// The validated values of every field in a schema, ready to hand to the
/// application's submission callback.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    pub values: FxHashMap<String, FieldValue>,
}

impl FormSubmission {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.values.get(field)
    }
}
