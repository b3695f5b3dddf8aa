//! Declarative input/output shape validation and field introspection.
//!
//! A [`Schema`] describes the shape of a `serde_json::Value`: [`Schema::validate`]
//! checks (and normalizes) a value, applying defaults and stripping absent
//! optional fields; [`Schema::introspect`] returns an ordered list of
//! [`FieldDescriptor`]s describing the shape for UI/documentation purposes.
//!
//! Unlike the [`Validate`](crate::Validate) trait, a schema owns normalization
//! (it may change the value, not just accept/reject it) and always operates
//! on `serde_json::Value` rather than an arbitrary `Input` type.

mod array;
mod descriptor;
mod object;
mod primitive;

pub use array::ArraySchema;
pub use descriptor::{FieldDescriptor, FieldType};
pub use object::{ObjectField, ObjectSchema};
pub use primitive::{AnySchema, BoolSchema, EnumSchema, NumberSchema, StringSchema};

use crate::core::ValidationError;
use serde_json::Value;

/// Describes the shape of a value: validates/normalizes it, and introspects
/// its field set for documentation or UI rendering.
pub trait Schema: Send + Sync {
    /// Validate `value`, returning a normalized copy (defaults applied,
    /// absent-optional fields stripped) or the first failure encountered.
    fn validate(&self, value: &Value) -> Result<Value, ValidationError>;

    /// Ordered field descriptors for this schema. Non-object top-level
    /// schemas (string/number/bool/enum/array/any) return an empty list —
    /// introspection only describes an object's member fields.
    fn introspect(&self) -> Vec<FieldDescriptor> {
        Vec::new()
    }

    /// The [`FieldType`] this schema describes, used by [`ObjectSchema`] and
    /// [`ArraySchema`] to build field descriptors for nested schemas without
    /// downcasting.
    fn field_type(&self) -> FieldType {
        FieldType::Unknown
    }
}
