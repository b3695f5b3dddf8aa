//! Array schemas: a homogeneous sequence validated against an element schema.

use super::descriptor::{FieldDescriptor, FieldType};
use super::primitive::type_name;
use super::Schema;
use crate::core::ValidationError;
use serde_json::Value;
use std::sync::Arc;

/// A JSON array whose elements all conform to `element`.
pub struct ArraySchema {
    pub element: Arc<dyn Schema>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

impl ArraySchema {
    #[must_use]
    pub fn new(element: impl Schema + 'static) -> Self {
        Self {
            element: Arc::new(element),
            min_items: None,
            max_items: None,
        }
    }

    #[must_use]
    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    #[must_use]
    pub fn max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }
}

impl Schema for ArraySchema {
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let Value::Array(items) = value else {
            return Err(ValidationError::type_mismatch("", "array", type_name(value)));
        };

        if let Some(min) = self.min_items {
            if items.len() < min {
                return Err(ValidationError::min_length("", min, items.len()));
            }
        }
        if let Some(max) = self.max_items {
            if items.len() > max {
                return Err(ValidationError::max_length("", max, items.len()));
            }
        }

        let validated = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                self.element.validate(item).map_err(|e| {
                    let field = if e.field.is_empty() {
                        format!("[{i}]")
                    } else {
                        format!("[{i}].{}", e.field)
                    };
                    ValidationError::new(field, e.message)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Value::Array(validated))
    }

    /// For an array of objects, `children` describes the element's fields
    /// (per spec); for arrays of scalars this is empty.
    fn introspect(&self) -> Vec<FieldDescriptor> {
        self.element.introspect()
    }

    fn field_type(&self) -> FieldType {
        FieldType::Array
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::primitive::{NumberSchema, StringSchema};

    #[test]
    fn validates_each_element() {
        let schema = ArraySchema::new(StringSchema::new().min_length(1));
        assert!(schema.validate(&serde_json::json!(["a", "b"])).is_ok());
        let err = schema.validate(&serde_json::json!(["a", ""])).unwrap_err();
        assert_eq!(err.field, "[1]");
    }

    #[test]
    fn enforces_item_count_bounds() {
        let schema = ArraySchema::new(NumberSchema::new()).min_items(1).max_items(2);
        assert!(schema.validate(&serde_json::json!([])).is_err());
        assert!(schema.validate(&serde_json::json!([1, 2, 3])).is_err());
        assert!(schema.validate(&serde_json::json!([1])).is_ok());
    }
}
