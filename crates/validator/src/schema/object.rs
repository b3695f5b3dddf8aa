//! Object schemas: a fixed set of named fields, each with its own schema.

use super::descriptor::{FieldDescriptor, FieldType};
use super::primitive::type_name;
use super::Schema;
use crate::core::ValidationError;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A single field of an [`ObjectSchema`].
pub struct ObjectField {
    pub name: String,
    pub schema: Arc<dyn Schema>,
    /// A field is optional if it is marked optional, nullable, or has a
    /// default — a missing required field without a default fails.
    pub optional: bool,
    pub nullable: bool,
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl ObjectField {
    #[must_use]
    pub fn new(name: impl Into<String>, schema: impl Schema + 'static) -> Self {
        Self {
            name: name.into(),
            schema: Arc::new(schema),
            optional: false,
            nullable: false,
            default: None,
            description: None,
        }
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn is_required(&self) -> bool {
        !self.optional && !self.nullable && self.default.is_none()
    }
}

/// An object with a fixed, named set of fields.
pub struct ObjectSchema {
    pub fields: Vec<ObjectField>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new(fields: Vec<ObjectField>) -> Self {
        Self { fields }
    }
}

impl Schema for ObjectSchema {
    fn validate(&self, value: &Value) -> Result<Value, ValidationError> {
        let Value::Object(input) = value else {
            return Err(ValidationError::type_mismatch("", "object", type_name(value)));
        };

        let mut normalized = Map::new();
        for field in &self.fields {
            match input.get(&field.name) {
                Some(Value::Null) if field.nullable => {
                    normalized.insert(field.name.clone(), Value::Null);
                }
                Some(v) => {
                    let validated = field
                        .schema
                        .validate(v)
                        .map_err(|e| prefix_field(&field.name, e))?;
                    normalized.insert(field.name.clone(), validated);
                }
                None => {
                    if let Some(default) = &field.default {
                        normalized.insert(field.name.clone(), default.clone());
                    } else if field.is_required() {
                        return Err(ValidationError::required(&field.name));
                    }
                    // optional/nullable field with no default and no value: omit.
                }
            }
        }
        Ok(Value::Object(normalized))
    }

    fn introspect(&self) -> Vec<FieldDescriptor> {
        self.fields
            .iter()
            .map(|field| {
                let mut descriptor = FieldDescriptor::new(
                    field.name.clone(),
                    field.schema.field_type(),
                    field.is_required(),
                );
                if let Some(description) = &field.description {
                    descriptor = descriptor.with_description(description.clone());
                }
                if let Some(default) = &field.default {
                    descriptor = descriptor.with_default(default.clone());
                }
                let children = field.schema.introspect();
                if !children.is_empty() {
                    descriptor = descriptor.with_children(children);
                }
                descriptor
            })
            .collect()
    }

    fn field_type(&self) -> FieldType {
        FieldType::Object
    }
}

fn prefix_field(name: &str, err: ValidationError) -> ValidationError {
    if err.field.is_empty() {
        ValidationError::new(name, err.message)
    } else {
        ValidationError::new(format!("{name}.{}", err.field), err.message)
    }
}
