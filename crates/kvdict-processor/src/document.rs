//! JSON document adapter

use kvdict_domain::{Document, FieldValue};
use serde_json::{Map, Value};
use std::convert::Infallible;
use thiserror::Error;

/// Errors turning input into a [`JsonDocument`]
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Input is valid JSON but not an object
    #[error("Document must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Input is not valid JSON
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

/// A document backed by a JSON object
///
/// Field names are top-level keys; dots are not interpreted as paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonDocument {
    fields: Map<String, Value>,
}

impl JsonDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a document from JSON text
    pub fn parse(json: &str) -> Result<Self, DocumentError> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Wrap a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(DocumentError::NotAnObject(kind_of(&other))),
        }
    }

    /// Raw value of a field
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Serialize as a single line of JSON
    pub fn to_json_line(&self) -> String {
        Value::Object(self.fields.clone()).to_string()
    }
}

impl Document for JsonDocument {
    type Error = Infallible;

    fn get_field(&self, name: &str) -> Option<FieldValue<'_>> {
        self.fields.get(name).map(|value| match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Null => FieldValue::Null,
            other => FieldValue::Other {
                kind: kind_of(other),
            },
        })
    }

    fn set_field(&mut self, name: &str, value: Option<String>) -> Result<(), Self::Error> {
        let value = value.map(Value::String).unwrap_or(Value::Null);
        self.fields.insert(name.to_string(), value);
        Ok(())
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
