//! Envelope shapes and per-field normalization.

use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Declared field shapes of one entity: `(field name, shape)`.
pub type Schema = &'static [(&'static str, Shape)];

/// How a response field is wrapped by the service.
///
/// Shapes compose: `ListOf(&KeyRef)` unwraps a list of key references
/// element-wise, `Singleton(&Versioned)` unwraps each element before
/// collapsing the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Kept as-is
    Plain,
    /// `{"type": ..., "value": X}` to `X`; a bare scalar passes through
    Versioned,
    /// `{"key": "/type/OL1W"}` to `"OL1W"`
    KeyRef,
    /// `"/works/OL1W"` to `"OL1W"`
    Path,
    /// One-element list to its element; empty list to absent
    Singleton(&'static Shape),
    /// Element-wise
    ListOf(&'static Shape),
    /// Object member, then the inner shape
    Member(&'static str, &'static Shape),
    /// Nested object with its own schema
    Record(Schema),
}

impl Shape {
    /// Short description used in error messages.
    fn expectation(self) -> &'static str {
        match self {
            Self::Plain => "any value",
            Self::Versioned => "versioned value object or scalar",
            Self::KeyRef => "key reference object",
            Self::Path => "path string",
            Self::Singleton(_) => "list of at most one element",
            Self::ListOf(_) => "list",
            Self::Member(..) | Self::Record(_) => "object",
        }
    }
}

/// Applies `shape` to the raw value of `field`.
///
/// Returns `Ok(None)` when the field is null, or when it normalizes to
/// nothing (an empty singleton list).
///
/// # Errors
///
/// - [`DecodeError::MissingKey`] if an envelope lacks its `value`, `key` or member
/// - [`DecodeError::UnexpectedShape`] if the JSON kind does not fit the shape
pub fn normalize(field: &str, raw: Value, shape: &Shape) -> Result<Option<Value>, DecodeError> {
    if raw.is_null() {
        return Ok(None);
    }

    match *shape {
        Shape::Plain => Ok(Some(raw)),
        Shape::Versioned => match raw {
            Value::Object(mut object) => match object.remove("value") {
                Some(Value::Null) => Ok(None),
                Some(value) => Ok(Some(value)),
                None => Err(missing_key(field, "value")),
            },
            array @ Value::Array(_) => Err(unexpected(field, *shape, &array)),
            scalar => Ok(Some(scalar)),
        },
        Shape::KeyRef => match raw {
            Value::Object(mut object) => match object.remove("key") {
                Some(Value::String(key)) => Ok(Some(Value::String(last_segment(&key)))),
                Some(other) => Err(unexpected(&format!("{field}.key"), Shape::Path, &other)),
                None => Err(missing_key(field, "key")),
            },
            other => Err(unexpected(field, *shape, &other)),
        },
        Shape::Path => match raw {
            Value::String(path) => Ok(Some(Value::String(last_segment(&path)))),
            other => Err(unexpected(field, *shape, &other)),
        },
        Shape::Singleton(inner) => match raw {
            Value::Array(items) => {
                let count = items.len();
                let mut values = normalize_elements(field, items, inner)?;
                match values.len() {
                    0 => Ok(None),
                    1 => Ok(values.pop()),
                    _ => Err(DecodeError::UnexpectedShape {
                        field: field.to_string(),
                        expected: shape.expectation(),
                        found: format!("list of {count}"),
                    }),
                }
            }
            scalar => normalize(field, scalar, inner),
        },
        Shape::ListOf(inner) => match raw {
            Value::Array(items) => Ok(Some(Value::Array(normalize_elements(field, items, inner)?))),
            other => Err(unexpected(field, *shape, &other)),
        },
        Shape::Member(name, inner) => match raw {
            Value::Object(mut object) => match object.remove(name) {
                Some(member) => normalize(&format!("{field}.{name}"), member, inner),
                None => Err(missing_key(field, name)),
            },
            other => Err(unexpected(field, *shape, &other)),
        },
        Shape::Record(schema) => match raw {
            Value::Object(object) => Ok(Some(Value::Object(apply_schema_at(field, object, schema)?))),
            other => Err(unexpected(field, *shape, &other)),
        },
    }
}

/// Normalizes every declared field of `object`; undeclared fields pass through.
///
/// Fields that normalize to nothing are removed.
///
/// # Errors
///
/// Returns the first [`DecodeError`] raised by a declared field.
pub fn apply_schema(object: Map<String, Value>, schema: Schema) -> Result<Map<String, Value>, DecodeError> {
    apply_schema_at("", object, schema)
}

pub(crate) fn apply_schema_at(
    prefix: &str,
    object: Map<String, Value>,
    schema: Schema,
) -> Result<Map<String, Value>, DecodeError> {
    let mut normalized = Map::with_capacity(object.len());
    for (name, raw) in object {
        match schema.iter().find(|(declared, _)| *declared == name) {
            Some((_, shape)) => {
                let path = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                if let Some(value) = normalize(&path, raw, shape)? {
                    normalized.insert(name, value);
                }
            }
            None => {
                normalized.insert(name, raw);
            }
        }
    }
    Ok(normalized)
}

/// Every element must normalize to a value; a null or empty element is an
/// error at `field[index]` so lists never shrink.
fn normalize_elements(field: &str, items: Vec<Value>, inner: &Shape) -> Result<Vec<Value>, DecodeError> {
    let mut values = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let path = format!("{field}[{index}]");
        let found = describe(&item);
        match normalize(&path, item, inner)? {
            Some(value) => values.push(value),
            None => {
                return Err(DecodeError::UnexpectedShape {
                    field: path,
                    expected: inner.expectation(),
                    found,
                });
            }
        }
    }
    Ok(values)
}

/// Trailing segment of a `/type/OL1W` style path.
fn last_segment(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
}

fn missing_key(field: &str, key: &str) -> DecodeError {
    DecodeError::MissingKey {
        field: field.to_string(),
        key: key.to_string(),
    }
}

fn unexpected(field: &str, shape: Shape, found: &Value) -> DecodeError {
    DecodeError::UnexpectedShape {
        field: field.to_string(),
        expected: shape.expectation(),
        found: describe(found),
    }
}

pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "number".to_string(),
        Value::String(_) => "string".to_string(),
        Value::Array(items) => format!("list of {}", items.len()),
        Value::Object(_) => "object".to_string(),
    }
}
