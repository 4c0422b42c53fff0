//! Response normalization.
//!
//! The service wraps many fields in envelopes: versioned values
//! (`{"type": "/type/text", "value": "..."}`), key references
//! (`{"key": "/authors/OL1A"}`) and one-element lists. Each entity declares
//! the [`Shape`] of every wrapped field in a [`Schema`]; decoding applies those
//! shapes before handing the flattened document to serde. Shapes are looked
//! up, never guessed from the data.

mod shape;

pub use shape::{Schema, Shape, apply_schema, normalize};
pub(crate) use shape::describe;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// A response document with a declared shape table.
pub trait Entity: DeserializeOwned {
    /// Name used in decode errors.
    const NAME: &'static str;
    /// Shapes of the fields that need unwrapping.
    const SCHEMA: Schema;
}

/// Parses a response body and decodes it into `T`.
///
/// # Errors
///
/// - [`DecodeError::InvalidJson`] if the body is not JSON
/// - [`DecodeError::UnexpectedShape`] or [`DecodeError::MissingKey`] if a
///   declared field does not match its shape
/// - [`DecodeError::Schema`] if the normalized document does not fit `T`
pub fn decode<T: Entity>(body: &[u8]) -> Result<T, DecodeError> {
    let object = parse_object(body, T::NAME)?;
    decode_object(object, T::NAME)
}

/// Decodes an already parsed value into `T`.
///
/// # Errors
///
/// Same as [`decode`], minus JSON parsing.
pub fn decode_value<T: Entity>(value: Value) -> Result<T, DecodeError> {
    match value {
        Value::Object(object) => decode_object(object, T::NAME),
        other => Err(root_not_object(T::NAME, &other)),
    }
}

pub(crate) fn parse_object(body: &[u8], target: &'static str) -> Result<Map<String, Value>, DecodeError> {
    let value: Value = serde_json::from_slice(body).map_err(|e| DecodeError::InvalidJson {
        message: e.to_string(),
    })?;
    match value {
        Value::Object(object) => Ok(object),
        other => Err(root_not_object(target, &other)),
    }
}

fn decode_object<T: Entity>(object: Map<String, Value>, target: &'static str) -> Result<T, DecodeError> {
    let normalized = apply_schema(object, T::SCHEMA)?;
    serde_json::from_value(Value::Object(normalized)).map_err(|e| DecodeError::Schema {
        target,
        message: e.to_string(),
    })
}

fn root_not_object(target: &'static str, found: &Value) -> DecodeError {
    DecodeError::UnexpectedShape {
        field: target.to_string(),
        expected: "JSON object",
        found: describe(found),
    }
}
