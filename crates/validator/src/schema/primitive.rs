//! Leaf schemas: string, number, boolean, enum, and the pass-through `any`.

use super::descriptor::FieldType;
use super::Schema;
use crate::core::ValidationError;
use serde_json::Value;

/// Matches any value unconditionally; introspects as an empty field list.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnySchema;

impl Schema for AnySchema {
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        Ok(value.clone())
    }
}

/// A JSON string, with optional length bounds.
#[derive(Debug, Clone, Default)]
pub struct StringSchema {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl StringSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }
}

impl Schema for StringSchema {
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let Value::String(s) = value else {
            return Err(ValidationError::type_mismatch("", "string", type_name(value)));
        };
        if let Some(min) = self.min_length {
            if s.len() < min {
                return Err(ValidationError::min_length("", min, s.len()));
            }
        }
        if let Some(max) = self.max_length {
            if s.len() > max {
                return Err(ValidationError::max_length("", max, s.len()));
            }
        }
        Ok(value.clone())
    }

    fn field_type(&self) -> FieldType {
        FieldType::String
    }
}

/// A JSON number, with optional inclusive bounds.
#[derive(Debug, Clone, Default)]
pub struct NumberSchema {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumberSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }
}

impl Schema for NumberSchema {
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let Some(n) = value.as_f64() else {
            return Err(ValidationError::type_mismatch("", "number", type_name(value)));
        };
        if let Some(min) = self.min {
            if n < min {
                return Err(ValidationError::new("", format!("must be >= {min}, was {n}")));
            }
        }
        if let Some(max) = self.max {
            if n > max {
                return Err(ValidationError::new("", format!("must be <= {max}, was {n}")));
            }
        }
        Ok(value.clone())
    }

    fn field_type(&self) -> FieldType {
        FieldType::Number
    }
}

/// A JSON boolean.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolSchema;

impl Schema for BoolSchema {
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        if value.is_boolean() {
            Ok(value.clone())
        } else {
            Err(ValidationError::type_mismatch("", "boolean", type_name(value)))
        }
    }

    fn field_type(&self) -> FieldType {
        FieldType::Boolean
    }
}

/// A string restricted to a fixed set of allowed values.
#[derive(Debug, Clone)]
pub struct EnumSchema {
    pub allowed: Vec<String>,
}

impl EnumSchema {
    #[must_use]
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }
}

impl Schema for EnumSchema {
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let Value::String(s) = value else {
            return Err(ValidationError::type_mismatch("", "string", type_name(value)));
        };
        if self.allowed.iter().any(|a| a == s) {
            Ok(value.clone())
        } else {
            Err(ValidationError::not_in_enum("", &self.allowed))
        }
    }

    fn field_type(&self) -> FieldType {
        FieldType::Enum
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
