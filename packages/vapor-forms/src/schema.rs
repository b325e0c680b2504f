//! Typed field descriptions a form compiles from (`SPEC_FULL.md` §7: "a
//! small typed field-description list: text, number, boolean, select").

/// The value shape a field accepts. `Select`'s options are the only
/// field-kind-specific configuration; every other validation concern is
/// in [`ValidationRule`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Number,
    Boolean,
    Select { options: Vec<String> },
}

/// Validation annotations honored at submission time (`SPEC_FULL.md` §7:
/// "honoring a `required`/`min`/`max` validation annotation set"). `min`
/// and `max` apply to `Number` fields; ignored otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationRule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValidationRule {
    pub fn required() -> Self {
        Self { required: true, ..Self::default() }
    }

    pub fn range(min: f64, max: f64) -> Self {
        Self { min: Some(min), max: Some(max), ..Self::default() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub validation: ValidationRule,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), label: label.into(), kind, validation: ValidationRule::default() }
    }

    pub fn with_validation(mut self, validation: ValidationRule) -> Self {
        self.validation = validation;
        self
    }
}

/// An ordered list of fields a form renders and validates against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}
