//! Static argument schemas: validation and JSON Schema rendering
//!
//! Each [`Operation`] carries a fixed table of [`FieldSpec`]s. This module
//! checks raw MCP arguments against that table and renders the same table as
//! the JSON Schema advertised in `tools/list`, so the two can never drift.

use serde_json::{Map, Value, json};

use crate::{
    error::ValidationError,
    model::{ArgValue, ArgumentSet, FieldKind, FieldSpec, Operation},
};

/// Validates raw tool arguments against the operation's field table
///
/// Fields are checked in the order the caller supplied them and the first
/// violation is returned. `null` counts as absent. On success the returned
/// set preserves the caller's key order.
///
/// # Examples
///
/// ```
/// use cleanshot_mcp::{model::Operation, schema::validate_arguments};
/// use serde_json::json;
///
/// let raw = json!({"x": 10, "action": "copy"});
/// let args = validate_arguments(Operation::CaptureArea, raw.as_object().unwrap()).unwrap();
/// assert_eq!(args.len(), 2);
///
/// let bad = json!({"action": "invalid-value"});
/// assert!(validate_arguments(Operation::CaptureArea, bad.as_object().unwrap()).is_err());
/// ```
pub fn validate_arguments(
    operation: Operation,
    raw: &Map<String, Value>,
) -> Result<ArgumentSet, ValidationError> {
    let mut args = ArgumentSet::new();

    for (name, value) in raw {
        let spec = operation
            .field(name)
            .ok_or_else(|| ValidationError::UnknownField {
                operation: operation.path().to_string(),
                field:     name.clone(),
            })?;

        if value.is_null() {
            continue;
        }

        args.push(spec.name, check_value(spec, value)?);
    }

    if let Some(missing) = operation
        .fields()
        .iter()
        .find(|spec| spec.required && args.get(spec.name).is_none())
    {
        return Err(ValidationError::MissingField {
            operation: operation.path().to_string(),
            field:     missing.name.to_string(),
        });
    }

    Ok(args)
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<ArgValue, ValidationError> {
    let mismatch = || ValidationError::TypeMismatch {
        field:    spec.name.to_string(),
        expected: spec.kind.json_type(),
        received: json_type_name(value),
    };

    match (spec.kind, value) {
        (FieldKind::Number, Value::Number(n)) => Ok(ArgValue::Number(n.clone())),
        (FieldKind::Boolean, Value::Bool(b)) => Ok(ArgValue::Boolean(*b)),
        (FieldKind::String, Value::String(s)) => Ok(ArgValue::String(s.clone())),
        (FieldKind::Enum(allowed), Value::String(s)) => {
            if allowed.contains(&s.as_str()) {
                Ok(ArgValue::String(s.clone()))
            } else {
                Err(ValidationError::InvalidEnumValue {
                    field: spec.name.to_string(),
                    value: s.clone(),
                    allowed,
                })
            }
        }
        _ => Err(mismatch()),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders an operation's field table as a JSON Schema object
///
/// Unknown properties are rejected at validation time, so the schema
/// advertises `additionalProperties: false`.
pub fn input_schema(operation: Operation) -> Map<String, Value> {
    let mut properties = Map::new();
    for spec in operation.fields() {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(spec.kind.json_type()));
        if let FieldKind::Enum(allowed) = spec.kind {
            property.insert("enum".to_string(), json!(allowed));
        }
        property.insert("description".to_string(), json!(spec.description));
        properties.insert(spec.name.to_string(), Value::Object(property));
    }

    let required: Vec<&str> = operation
        .fields()
        .iter()
        .filter(|spec| spec.required)
        .map(|spec| spec.name)
        .collect();

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    schema.insert("additionalProperties".to_string(), json!(false));
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CAPTURE_ACTIONS, SETTINGS_TABS};

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_validate_capture_area_full() {
        let raw = object(json!({
            "x": 10, "y": 20, "width": 300, "height": 200, "action": "copy"
        }));
        let args = validate_arguments(Operation::CaptureArea, &raw).unwrap();

        let keys: Vec<_> = args.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["x", "y", "width", "height", "action"]);
        assert_eq!(args.get("action"), Some(&ArgValue::String("copy".to_string())));
    }

    #[test]
    fn test_validate_empty_arguments_for_every_optional_operation() {
        for op in Operation::ALL {
            if op.fields().iter().any(|f| f.required) {
                continue;
            }
            let args = validate_arguments(op, &Map::new()).unwrap();
            assert!(args.is_empty(), "{} should accept no arguments", op);
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let raw = object(json!({"path": "/tmp/a.png"}));
        let err = validate_arguments(Operation::Pin, &raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                operation: "pin".to_string(),
                field:     "path".to_string(),
            }
        );
    }

    #[test]
    fn test_parameterless_operation_rejects_any_field() {
        let raw = object(json!({"action": "copy"}));
        let err = validate_arguments(Operation::OpenFromClipboard, &raw).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField { .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let err = validate_arguments(Operation::AddQuickAccessOverlay, &Map::new()).unwrap_err();
        assert_eq!(err.field(), "filepath");
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let raw = object(json!({"filepath": null}));
        let err = validate_arguments(Operation::AddQuickAccessOverlay, &raw).unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn test_null_optional_field_is_dropped() {
        let raw = object(json!({"x": null, "y": 5}));
        let args = validate_arguments(Operation::AllInOne, &raw).unwrap();
        assert_eq!(args.len(), 1);
        assert!(args.get("x").is_none());
    }

    #[test]
    fn test_number_type_mismatch() {
        let raw = object(json!({"x": "10"}));
        let err = validate_arguments(Operation::CaptureArea, &raw).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                field:    "x".to_string(),
                expected: "number",
                received: "string",
            }
        );
    }

    #[test]
    fn test_boolean_type_mismatch() {
        let raw = object(json!({"autoscroll": 1}));
        let err = validate_arguments(Operation::ScrollingCapture, &raw).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::TypeMismatch { expected: "boolean", received: "number", .. }
        ));
    }

    #[test]
    fn test_string_type_mismatch() {
        let raw = object(json!({"filepath": ["/tmp/a.png"]}));
        let err = validate_arguments(Operation::OpenAnnotate, &raw).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { received: "array", .. }));
    }

    #[test]
    fn test_enum_value_outside_set_rejected_for_every_enum_field() {
        for op in Operation::ALL {
            for spec in op.fields() {
                if !matches!(spec.kind, FieldKind::Enum(_)) {
                    continue;
                }
                let mut raw = Map::new();
                raw.insert(spec.name.to_string(), json!("invalid-value"));
                let err = validate_arguments(op, &raw).unwrap_err();
                assert!(
                    matches!(err, ValidationError::InvalidEnumValue { .. }),
                    "{}.{} accepted an invalid value",
                    op,
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_enum_match_is_case_sensitive() {
        let raw = object(json!({"action": "Copy"}));
        let err = validate_arguments(Operation::CaptureFullscreen, &raw).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEnumValue { .. }));
    }

    #[test]
    fn test_every_declared_enum_value_accepted() {
        for action in CAPTURE_ACTIONS {
            let raw = object(json!({"action": action}));
            assert!(validate_arguments(Operation::CaptureWindow, &raw).is_ok());
        }
        for tab in SETTINGS_TABS {
            let raw = object(json!({"tab": tab}));
            assert!(validate_arguments(Operation::OpenSettings, &raw).is_ok());
        }
    }

    #[test]
    fn test_enum_rejects_non_string() {
        let raw = object(json!({"tab": 3}));
        let err = validate_arguments(Operation::OpenSettings, &raw).unwrap_err();
        assert!(matches!(err, ValidationError::TypeMismatch { expected: "string", .. }));
    }

    #[test]
    fn test_input_schema_capture_area() {
        let schema = input_schema(Operation::CaptureArea);

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert!(schema.get("required").is_none());

        let properties = schema["properties"].as_object().unwrap();
        let keys: Vec<_> = properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["x", "y", "width", "height", "display", "action"]);
        assert_eq!(properties["x"]["type"], "number");
        assert_eq!(properties["action"]["type"], "string");
        assert_eq!(properties["action"]["enum"], json!(CAPTURE_ACTIONS));
        assert_eq!(properties["display"]["description"], "Display number (1 is main display)");
    }

    #[test]
    fn test_input_schema_required_field() {
        let schema = input_schema(Operation::AddQuickAccessOverlay);
        assert_eq!(schema["required"], json!(["filepath"]));
    }

    #[test]
    fn test_input_schema_parameterless() {
        let schema = input_schema(Operation::OpenHistory);
        assert!(schema["properties"].as_object().unwrap().is_empty());
    }
}
