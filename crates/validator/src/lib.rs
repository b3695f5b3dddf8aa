//! # Validator
//!
//! Composable, introspectable validation rules shared by the schema layer
//! (field-level constraints) and other crates that need to check a value
//! before acting on it.
//!
//! A validator is anything implementing [`Validate`]: a single method that
//! checks an input and returns the first [`ValidationError`] encountered, plus
//! optional [`ValidatorMetadata`] for diagnostics. Validators compose via
//! [`combinators`] — [`And`] requires every sub-validator to pass, [`Cached`]
//! memoizes results for validators expensive enough to benefit from it.
//!
//! Validation failures are distinct from executor failures: they halt a node
//! before its executor ever runs.

pub mod combinators;
pub mod core;
pub mod schema;

pub use crate::core::{Validate, ValidateExt, ValidationComplexity, ValidationError, ValidatorMetadata};
pub use combinators::{And, AndAll, CacheStats, Cached, and, and_all, cached};
pub use schema::{
    AnySchema, ArraySchema, BoolSchema, EnumSchema, FieldDescriptor, FieldType, NumberSchema,
    ObjectField, ObjectSchema, Schema, StringSchema,
};

/// Common prelude.
pub mod prelude {
    pub use super::{Validate, ValidateExt, ValidationComplexity, ValidationError, ValidatorMetadata};
    pub use super::schema::{FieldDescriptor, FieldType, ObjectField, ObjectSchema, Schema};
}
