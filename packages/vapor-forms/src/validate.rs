//! Parsing raw input text into a field's typed value and checking it
//! against that field's [`ValidationRule`] (`SPEC_FULL.md` §7).

use crate::schema::{FieldKind, FieldSpec, FormSchema};
use crate::submission::{FieldValue, FormError, FormSubmission};

/// Parse `raw` according to `spec.kind`. An empty string parses to an
/// empty `Text`/`false` `Boolean` rather than erroring — emptiness is a
/// `required` concern, checked separately in [`validate_field`].
pub fn parse_value(spec: &FieldSpec, raw: &str) -> Result<FieldValue, FormError> {
    match &spec.kind {
        FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
        FieldKind::Number => {
            if raw.is_empty() {
                return Ok(FieldValue::Number(0.0));
            }
            raw.parse::<f64>().map(FieldValue::Number).map_err(|_| FormError::WrongType {
                field: spec.name.clone(),
                value: raw.to_string(),
                expected: "number",
            })
        }
        FieldKind::Boolean => match raw {
            "" | "false" => Ok(FieldValue::Boolean(false)),
            "true" => Ok(FieldValue::Boolean(true)),
            other => Err(FormError::WrongType {
                field: spec.name.clone(),
                value: other.to_string(),
                expected: "boolean",
            }),
        },
        FieldKind::Select { options } => {
            if raw.is_empty() || options.iter().any(|o| o == raw) {
                Ok(FieldValue::Text(raw.to_string()))
            } else {
                Err(FormError::NotAnOption { field: spec.name.clone(), value: raw.to_string() })
            }
        }
    }
}

fn is_empty(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Text(s) if s.is_empty())
}

/// Check one field's value against its validation rule. Assumes `value`
/// already went through [`parse_value`] for the same spec.
pub fn validate_field(spec: &FieldSpec, value: &FieldValue) -> Result<(), FormError> {
    if spec.validation.required && is_empty(value) {
        return Err(FormError::Required { field: spec.name.clone() });
    }
    if let FieldValue::Number(n) = value {
        if let Some(min) = spec.validation.min {
            if *n < min {
                return Err(FormError::BelowMin { field: spec.name.clone(), value: *n, min });
            }
        }
        if let Some(max) = spec.validation.max {
            if *n > max {
                return Err(FormError::AboveMax { field: spec.name.clone(), value: *n, max });
            }
        }
    }
    Ok(())
}

/// Validate every field of `schema` against `raw_values` (field name ->
/// raw text, as collected from input events), collecting every failure
/// rather than stopping at the first one.
pub fn validate_all(schema: &FormSchema, raw_values: &rustc_hash::FxHashMap<String, String>) -> Result<FormSubmission, Vec<FormError>> {
    let mut values = rustc_hash::FxHashMap::default();
    let mut errors = Vec::new();

    for spec in &schema.fields {
        let raw = raw_values.get(&spec.name).map(String::as_str).unwrap_or("");
        match parse_value(spec, raw) {
            Ok(value) => match validate_field(spec, &value) {
                Ok(()) => {
                    values.insert(spec.name.clone(), value);
                }
                Err(err) => errors.push(err),
            },
            Err(err) => errors.push(err),
        }
    }

    if errors.is_empty() {
        Ok(FormSubmission { values })
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ValidationRule;

    fn number_field() -> FieldSpec {
        FieldSpec::new("age", "Age", FieldKind::Number).with_validation(ValidationRule::range(0.0, 120.0))
    }

    #[test]
    fn parses_number_field() {
        let spec = number_field();
        assert_eq!(parse_value(&spec, "42").unwrap(), FieldValue::Number(42.0));
    }

    #[test]
    fn non_numeric_text_fails_to_parse() {
        let spec = number_field();
        assert!(matches!(parse_value(&spec, "abc"), Err(FormError::WrongType { .. })));
    }

    #[test]
    fn required_empty_field_fails_validation() {
        let spec = FieldSpec::new("name", "Name", FieldKind::Text).with_validation(ValidationRule::required());
        let value = parse_value(&spec, "").unwrap();
        assert_eq!(validate_field(&spec, &value), Err(FormError::Required { field: "name".to_string() }));
    }

    #[test]
    fn number_below_min_is_rejected() {
        let spec = number_field();
        let value = parse_value(&spec, "-1").unwrap();
        assert_eq!(validate_field(&spec, &value), Err(FormError::BelowMin { field: "age".to_string(), value: -1.0, min: 0.0 }));
    }

    #[test]
    fn select_rejects_values_outside_its_options() {
        let spec = FieldSpec::new("color", "Color", FieldKind::Select { options: vec!["red".into(), "blue".into()] });
        assert!(parse_value(&spec, "green").is_err());
        assert!(parse_value(&spec, "red").is_ok());
    }

    #[test]
    fn validate_all_collects_every_failure() {
        let schema = FormSchema::new(vec![
            FieldSpec::new("name", "Name", FieldKind::Text).with_validation(ValidationRule::required()),
            number_field(),
        ]);
        let mut raw = rustc_hash::FxHashMap::default();
        raw.insert("age".to_string(), "999".to_string());
        let errors = validate_all(&schema, &raw).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn validate_all_succeeds_when_every_field_is_valid() {
        let schema = FormSchema::new(vec![number_field()]);
        let mut raw = rustc_hash::FxHashMap::default();
        raw.insert("age".to_string(), "30".to_string());
        let submission = validate_all(&schema, &raw).unwrap();
        assert_eq!(submission.get("age"), Some(&FieldValue::Number(30.0)));
    }
}
