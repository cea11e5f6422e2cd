// JSON Kind Schema - minimal validator for tests and demos
//
// Checks the JSON value kind and, for objects, required keys. Stands in
// for a real schema library behind the opaque SchemaValidator port.

use serde_json::Value;
use trellis_core::port::schema::{SchemaError, SchemaValidator};

#[derive(Debug, Clone)]
enum Expect {
    Number,
    String,
    Bool,
    Object { required: Vec<String> },
}

#[derive(Debug, Clone)]
pub struct JsonKindSchema {
    expect: Expect,
}

impl JsonKindSchema {
    pub fn number() -> Self {
        Self {
            expect: Expect::Number,
        }
    }

    pub fn string() -> Self {
        Self {
            expect: Expect::String,
        }
    }

    pub fn bool() -> Self {
        Self {
            expect: Expect::Bool,
        }
    }

    /// Object with the given required keys
    pub fn object(required: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            expect: Expect::Object {
                required: required.into_iter().map(String::from).collect(),
            },
        }
    }
}

impl SchemaValidator for JsonKindSchema {
    fn parse(&self, value: &Value) -> Result<Value, SchemaError> {
        match &self.expect {
            Expect::Number if value.is_number() => Ok(value.clone()),
            Expect::String if value.is_string() => Ok(value.clone()),
            Expect::Bool if value.is_boolean() => Ok(value.clone()),
            Expect::Object { required } => {
                let map = value
                    .as_object()
                    .ok_or_else(|| SchemaError::new("expected an object"))?;
                for key in required {
                    if !map.contains_key(key) {
                        return Err(SchemaError::new(format!("missing required key '{}'", key)));
                    }
                }
                Ok(value.clone())
            }
            Expect::Number => Err(SchemaError::new("expected a number")),
            Expect::String => Err(SchemaError::new("expected a string")),
            Expect::Bool => Err(SchemaError::new("expected a boolean")),
        }
    }
}
