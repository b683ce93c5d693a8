//! Declarative parameter schemas.
//!
//! Each tool declares its accepted fields as a static `&[FieldSpec]` table.
//! One generic validator checks untyped agent input against that table and
//! produces a [`ParamSet`]; the same table also generates the JSON Schema
//! advertised to the host. Validation fails closed: unknown fields, wrong
//! types and violated constraints are all rejected before any network call.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;

use super::render::ResponseFormat;

/// Maximum number of entry ids in one batch or marker call.
pub const MAX_BATCH_SIZE: usize = 1000;

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Boolean,
    StringList,
    /// A string restricted to the listed values.
    Enum(&'static [&'static str]),
}

/// Default substituted when a field is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    Integer(i64),
    Boolean(bool),
    Str(&'static str),
}

impl DefaultValue {
    fn to_value(self) -> Value {
        match self {
            Self::Integer(i) => Value::from(i),
            Self::Boolean(b) => Value::Bool(b),
            Self::Str(s) => Value::from(s),
        }
    }
}

/// Constraint checked after defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    None,
    /// Integers outside the range are silently brought into it.
    Clamp { min: i64, max: i64 },
    /// Lists must have a length within the range.
    ListLength { min: usize, max: usize },
}

/// One accepted parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<DefaultValue>,
    pub constraint: Constraint,
    pub description: &'static str,
}

impl FieldSpec {
    /// A field the caller must supply.
    pub const fn required(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            constraint: Constraint::None,
            description,
        }
    }

    /// A field the caller may omit.
    pub const fn optional(name: &'static str, kind: FieldKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            constraint: Constraint::None,
            description,
        }
    }

    pub const fn with_default(self, default: DefaultValue) -> Self {
        Self {
            default: Some(default),
            ..self
        }
    }

    pub const fn with_constraint(self, constraint: Constraint) -> Self {
        Self { constraint, ..self }
    }

    /// Check the raw value's type and normalize it. Returns `None` for an
    /// optional string that is blank.
    fn coerce(&self, raw: &Value) -> Result<Option<Value>, ValidationError> {
        match self.kind {
            FieldKind::String => {
                let s = raw
                    .as_str()
                    .ok_or_else(|| self.invalid("expected a string"))?
                    .trim();
                if s.is_empty() {
                    if self.required {
                        return Err(self.invalid("must not be empty"));
                    }
                    return Ok(None);
                }
                Ok(Some(Value::from(s)))
            }
            FieldKind::Integer => integer(raw)
                .map(|i| Some(Value::from(i)))
                .ok_or_else(|| self.invalid("expected an integer")),
            FieldKind::Boolean => raw
                .as_bool()
                .map(|b| Some(Value::Bool(b)))
                .ok_or_else(|| self.invalid("expected a boolean")),
            FieldKind::StringList => {
                let items = raw
                    .as_array()
                    .ok_or_else(|| self.invalid("expected an array of strings"))?;
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let s = item
                        .as_str()
                        .ok_or_else(|| self.invalid(format!("item {} is not a string", i)))?
                        .trim();
                    if s.is_empty() {
                        return Err(self.invalid(format!("item {} must not be empty", i)));
                    }
                    out.push(Value::from(s));
                }
                Ok(Some(Value::Array(out)))
            }
            FieldKind::Enum(options) => {
                let s = raw
                    .as_str()
                    .map(str::trim)
                    .filter(|s| options.contains(s))
                    .ok_or_else(|| {
                        self.invalid(format!("must be one of: {}", options.join(", ")))
                    })?;
                Ok(Some(Value::from(s)))
            }
        }
    }

    fn constrain(&self, value: Value) -> Result<Value, ValidationError> {
        match self.constraint {
            Constraint::None => Ok(value),
            Constraint::Clamp { min, max } => match value.as_i64() {
                Some(i) => Ok(Value::from(i.clamp(min, max))),
                None => Err(self.invalid("expected an integer")),
            },
            Constraint::ListLength { min, max } => {
                let len = value.as_array().map_or(0, Vec::len);
                if len < min {
                    Err(self.invalid(format!("must contain at least {} item(s)", min)))
                } else if len > max {
                    Err(self.invalid(format!("must contain at most {} items", max)))
                } else {
                    Ok(value)
                }
            }
        }
    }

    fn invalid(&self, reason: impl Into<String>) -> ValidationError {
        ValidationError::new(self.name, reason)
    }

    /// JSON Schema fragment for this field.
    fn json_schema(&self) -> Value {
        let mut schema = match self.kind {
            FieldKind::String if self.required => json!({ "type": "string", "minLength": 1 }),
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::Integer => json!({ "type": "integer" }),
            FieldKind::Boolean => json!({ "type": "boolean" }),
            FieldKind::StringList => json!({ "type": "array", "items": { "type": "string" } }),
            FieldKind::Enum(options) => json!({ "type": "string", "enum": options }),
        };

        if let Value::Object(obj) = &mut schema {
            obj.insert("description".into(), Value::from(self.description));
            if let Some(default) = self.default {
                obj.insert("default".into(), default.to_value());
            }
            if let Constraint::ListLength { min, max } = self.constraint {
                obj.insert("minItems".into(), Value::from(min));
                obj.insert("maxItems".into(), Value::from(max));
            }
        }
        schema
    }
}

/// Read a JSON number as an integer. Values past the `i64` range saturate,
/// and floats are accepted when they have no fractional part.
fn integer(raw: &Value) -> Option<i64> {
    if let Some(i) = raw.as_i64() {
        return Some(i);
    }
    if raw.as_u64().is_some() {
        return Some(i64::MAX);
    }
    raw.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| f as i64)
}

/// `response_format`, accepted by every tool.
pub const RESPONSE_FORMAT: FieldSpec = FieldSpec::optional(
    "response_format",
    FieldKind::Enum(&["markdown", "json"]),
    "Output format: 'markdown' for human-readable or 'json' for machine-readable",
)
.with_default(DefaultValue::Str("markdown"));

/// A non-empty list of entry ids, capped at [`MAX_BATCH_SIZE`].
pub const fn entry_ids(description: &'static str) -> FieldSpec {
    FieldSpec::required("entry_ids", FieldKind::StringList, description).with_constraint(
        Constraint::ListLength {
            min: 1,
            max: MAX_BATCH_SIZE,
        },
    )
}

/// A parameter that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid parameter '{field}': {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Validated, normalized parameters for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    values: Map<String, Value>,
}

impl ParamSet {
    /// Raw access to a validated value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// The requested output format, markdown unless `json` was asked for.
    pub fn response_format(&self) -> ResponseFormat {
        match self.get(RESPONSE_FORMAT.name).and_then(Value::as_str) {
            Some("json") => ResponseFormat::Json,
            _ => ResponseFormat::Markdown,
        }
    }

    /// Deserialize into a typed parameter struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(Value::Object(self.values.clone()))
    }
}

/// Validate untyped input against a field table.
///
/// `null` input counts as an empty object; `null` field values count as
/// absent. Defaults are substituted before constraints are checked.
pub fn validate(fields: &[FieldSpec], arguments: Value) -> Result<ParamSet, ValidationError> {
    let input = match arguments {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(ValidationError::new(
                "arguments",
                "expected an object of named parameters",
            ));
        }
    };

    if let Some(unknown) = input
        .keys()
        .find(|key| !fields.iter().any(|f| f.name == key.as_str()))
    {
        return Err(ValidationError::new(unknown.as_str(), "unknown parameter"));
    }

    let mut values = Map::new();
    for field in fields {
        let supplied = match input.get(field.name).filter(|v| !v.is_null()) {
            Some(raw) => field.coerce(raw)?,
            None => None,
        };

        match supplied.or_else(|| field.default.map(DefaultValue::to_value)) {
            Some(value) => {
                values.insert(field.name.to_string(), field.constrain(value)?);
            }
            None if field.required => return Err(field.invalid("is required")),
            None => {}
        }
    }

    Ok(ParamSet { values })
}

/// Generate the JSON Schema object for a field table.
pub fn input_schema(fields: &[FieldSpec]) -> Map<String, Value> {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), f.json_schema()))
        .collect();
    let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();

    let mut schema = Map::new();
    schema.insert("type".into(), Value::from("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    schema.insert("additionalProperties".into(), Value::Bool(false));
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT: FieldSpec = FieldSpec::optional("count", FieldKind::Integer, "count")
        .with_default(DefaultValue::Integer(20))
        .with_constraint(Constraint::Clamp { min: 1, max: 100 });

    const STREAM_FIELDS: &[FieldSpec] = &[
        FieldSpec::required("stream_id", FieldKind::String, "stream"),
        COUNT,
        FieldSpec::optional("continuation", FieldKind::String, "cursor"),
        FieldSpec::optional("unread_only", FieldKind::Boolean, "unread")
            .with_default(DefaultValue::Boolean(true)),
        RESPONSE_FORMAT,
    ];

    const MARK_FIELDS: &[FieldSpec] = &[entry_ids("ids"), RESPONSE_FORMAT];

    #[test]
    fn test_defaults_are_applied() {
        let params = validate(STREAM_FIELDS, json!({ "stream_id": " feed/x " })).unwrap();
        assert_eq!(params.get("stream_id"), Some(&json!("feed/x")));
        assert_eq!(params.get("count"), Some(&json!(20)));
        assert_eq!(params.get("unread_only"), Some(&json!(true)));
        assert_eq!(params.get("continuation"), None);
        assert_eq!(params.response_format(), ResponseFormat::Markdown);
    }

    #[test]
    fn test_count_is_clamped() {
        let params = validate(STREAM_FIELDS, json!({ "stream_id": "s", "count": 500 })).unwrap();
        assert_eq!(params.get("count"), Some(&json!(100)));

        let params = validate(STREAM_FIELDS, json!({ "stream_id": "s", "count": -3 })).unwrap();
        assert_eq!(params.get("count"), Some(&json!(1)));

        let params =
            validate(STREAM_FIELDS, json!({ "stream_id": "s", "count": u64::MAX })).unwrap();
        assert_eq!(params.get("count"), Some(&json!(100)));

        let params = validate(STREAM_FIELDS, json!({ "stream_id": "s", "count": -1e300 })).unwrap();
        assert_eq!(params.get("count"), Some(&json!(1)));
    }

    #[test]
    fn test_integral_float_is_an_integer() {
        let params = validate(STREAM_FIELDS, json!({ "stream_id": "s", "count": 50.0 })).unwrap();
        assert_eq!(params.get("count"), Some(&json!(50)));

        let err = validate(STREAM_FIELDS, json!({ "stream_id": "s", "count": 2.5 })).unwrap_err();
        assert_eq!(err.reason, "expected an integer");
    }

    #[test]
    fn test_blank_optional_string_is_absent() {
        let params =
            validate(STREAM_FIELDS, json!({ "stream_id": "s", "continuation": "  " })).unwrap();
        assert_eq!(params.get("continuation"), None);

        let params =
            validate(STREAM_FIELDS, json!({ "stream_id": "s", "continuation": null })).unwrap();
        assert_eq!(params.get("continuation"), None);
    }

    #[test]
    fn test_missing_required_field_is_named() {
        let err = validate(MARK_FIELDS, json!({})).unwrap_err();
        assert_eq!(err.field, "entry_ids");
        assert_eq!(err.to_string(), "Invalid parameter 'entry_ids': is required");
    }

    #[test]
    fn test_blank_required_string_is_rejected() {
        let err = validate(STREAM_FIELDS, json!({ "stream_id": "" })).unwrap_err();
        assert_eq!(err.field, "stream_id");
        assert_eq!(err.reason, "must not be empty");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = validate(MARK_FIELDS, json!({ "entry_ids": ["a"], "entryIds": ["a"] }))
            .unwrap_err();
        assert_eq!(err.field, "entryIds");
        assert_eq!(err.reason, "unknown parameter");
    }

    #[test]
    fn test_type_mismatches() {
        let err = validate(STREAM_FIELDS, json!({ "stream_id": 7 })).unwrap_err();
        assert_eq!(err.reason, "expected a string");

        let err = validate(STREAM_FIELDS, json!({ "stream_id": "s", "count": "10" })).unwrap_err();
        assert_eq!(err.reason, "expected an integer");

        let err = validate(STREAM_FIELDS, json!({ "stream_id": "s", "unread_only": "yes" }))
            .unwrap_err();
        assert_eq!(err.reason, "expected a boolean");

        let err = validate(MARK_FIELDS, json!({ "entry_ids": ["a", 2] })).unwrap_err();
        assert_eq!(err.reason, "item 1 is not a string");
    }

    #[test]
    fn test_list_length_bounds() {
        let err = validate(MARK_FIELDS, json!({ "entry_ids": [] })).unwrap_err();
        assert_eq!(err.reason, "must contain at least 1 item(s)");

        let too_many: Vec<String> = (0..=MAX_BATCH_SIZE).map(|i| i.to_string()).collect();
        let err = validate(MARK_FIELDS, json!({ "entry_ids": too_many })).unwrap_err();
        assert_eq!(err.reason, "must contain at most 1000 items");
    }

    #[test]
    fn test_enum_values() {
        let params = validate(MARK_FIELDS, json!({ "entry_ids": ["a"], "response_format": "json" }))
            .unwrap();
        assert_eq!(params.response_format(), ResponseFormat::Json);

        let err = validate(MARK_FIELDS, json!({ "entry_ids": ["a"], "response_format": "xml" }))
            .unwrap_err();
        assert_eq!(err.field, "response_format");
        assert_eq!(err.reason, "must be one of: markdown, json");
    }

    #[test]
    fn test_non_object_arguments() {
        assert!(validate(&[RESPONSE_FORMAT], Value::Null).is_ok());
        let err = validate(&[RESPONSE_FORMAT], json!(["x"])).unwrap_err();
        assert_eq!(err.field, "arguments");
    }

    #[test]
    fn test_input_schema_shape() {
        let schema = Value::Object(input_schema(STREAM_FIELDS));
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["required"], json!(["stream_id"]));
        assert_eq!(schema["properties"]["count"]["default"], 20);
        assert_eq!(
            schema["properties"]["response_format"]["enum"],
            json!(["markdown", "json"])
        );

        let schema = Value::Object(input_schema(MARK_FIELDS));
        assert_eq!(schema["properties"]["entry_ids"]["minItems"], 1);
        assert_eq!(schema["properties"]["entry_ids"]["maxItems"], 1000);

        let schema = Value::Object(input_schema(&[RESPONSE_FORMAT]));
        assert!(schema.get("required").is_none());
    }
}
