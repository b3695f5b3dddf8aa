//! Core validation traits and error types.

use std::borrow::Cow;

/// A single validation failure.
///
/// Distinct from an executor failure (§7 of the design): validation errors
/// halt a node before its executor ever runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dot-path of the field that failed, empty for a top-level failure.
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ValidationError {
    /// Build a validation error for the given field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A required field was missing.
    #[must_use]
    pub fn required(field: impl Into<String>) -> Self {
        Self::new(field, "field is required")
    }

    /// A value did not match the expected type.
    #[must_use]
    pub fn type_mismatch(field: impl Into<String>, expected: &str, actual: &str) -> Self {
        Self::new(field, format!("expected {expected}, found {actual}"))
    }

    /// A string/array value was shorter than its minimum length.
    #[must_use]
    pub fn min_length(field: impl Into<String>, min: usize, actual: usize) -> Self {
        Self::new(
            field,
            format!("length must be at least {min}, was {actual}"),
        )
    }

    /// A string/array value exceeded its maximum length.
    #[must_use]
    pub fn max_length(field: impl Into<String>, max: usize, actual: usize) -> Self {
        Self::new(
            field,
            format!("length must be at most {max}, was {actual}"),
        )
    }

    /// A value was not one of the permitted enum variants.
    #[must_use]
    pub fn not_in_enum(field: impl Into<String>, allowed: &[String]) -> Self {
        Self::new(field, format!("must be one of {allowed:?}"))
    }
}

/// Relative cost of running a validator, used only for metadata/ordering
/// hints — never enforced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationComplexity {
    /// O(1) — field presence / type checks.
    Constant,
    /// O(n) in the size of the input.
    Linear,
    /// Anything worse than linear (e.g. cross-field or external lookups).
    Expensive,
}

/// Descriptive metadata about a validator, surfaced for diagnostics and
/// composed by combinators.
#[derive(Debug, Clone)]
pub struct ValidatorMetadata {
    /// Human-readable validator name.
    pub name: Cow<'static, str>,
    /// Optional longer description.
    pub description: Option<Cow<'static, str>>,
    /// Relative cost of running this validator.
    pub complexity: ValidationComplexity,
    /// Whether results may be safely memoized by input.
    pub cacheable: bool,
    /// Free-form tags, used by combinators to merge provenance.
    pub tags: Vec<Cow<'static, str>>,
}

impl ValidatorMetadata {
    /// Construct metadata for a leaf (non-combinator) validator.
    #[must_use]
    pub fn leaf(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            description: None,
            complexity: ValidationComplexity::Constant,
            cacheable: true,
            tags: Vec::new(),
        }
    }
}

/// A composable validation rule over a fixed input type.
pub trait Validate {
    /// The type this validator checks.
    type Input: ?Sized;

    /// Validate `input`, returning the first failure encountered.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Descriptive metadata about this validator.
    fn metadata(&self) -> ValidatorMetadata {
        ValidatorMetadata::leaf(std::any::type_name::<Self>())
    }
}

/// Fluent combinator methods available on every [`Validate`] implementation.
pub trait ValidateExt: Validate + Sized {
    /// Combine with another validator: both must pass.
    fn and<V>(self, other: V) -> crate::combinators::And<Self, V>
    where
        V: Validate<Input = Self::Input>,
    {
        crate::combinators::And::new(self, other)
    }
}

impl<T: Validate> ValidateExt for T {}
