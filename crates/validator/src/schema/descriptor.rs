//! Field descriptors surfaced by [`super::Schema::introspect`].

use serde_json::Value;

/// The primitive shape of a field, for UI rendering / documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Enum,
    Array,
    Object,
    Unknown,
}

/// Describes a single field of an [`ObjectSchema`](super::ObjectSchema), or
/// the element shape of an [`ArraySchema`](super::ArraySchema).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub required: bool,
    pub description: Option<String>,
    pub default_value: Option<Value>,
    pub enum_values: Option<Vec<String>>,
    /// For nested objects: the inner fields. For arrays of objects: the
    /// element's fields.
    pub children: Option<Vec<FieldDescriptor>>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, required: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            required,
            description: None,
            default_value: None,
            enum_values: None,
            children: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<FieldDescriptor>) -> Self {
        self.children = Some(children);
        self
    }
}
