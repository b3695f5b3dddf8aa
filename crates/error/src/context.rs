//! Rich, lazily-allocated context attached to an error.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Additional context information for an error.
///
/// Metadata is boxed and only allocated once something is actually attached,
/// keeping the common case (no context) cheap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Human-readable context description.
    pub description: String,
    /// Component or module where the error occurred (e.g. `"registry"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Operation being performed when the error occurred (e.g. `"register"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Additional key-value pairs for context (lazily allocated).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Box<HashMap<String, String>>>,
    /// Timestamp when the error occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,
}

impl ErrorContext {
    /// Create a new context with just a description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            component: None,
            operation: None,
            metadata: None,
            timestamp: None,
        }
    }

    /// Stamp the context with the current time.
    #[must_use]
    pub fn with_timestamp_now(mut self) -> Self {
        self.timestamp = Some(chrono::Utc::now());
        self
    }

    /// Attach the component where the error occurred.
    #[must_use]
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Attach the operation that was being performed.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Add a metadata key-value pair.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(|| Box::new(HashMap::new()))
            .insert(key.into(), value.into());
        self
    }
}

/// Builder for [`ErrorContext`], mirroring the `with_*` fluent API but usable
/// without an initial error value in hand.
#[derive(Debug, Default)]
pub struct ErrorContextBuilder {
    description: String,
    component: Option<String>,
    operation: Option<String>,
    metadata: HashMap<String, String>,
}

impl ErrorContextBuilder {
    /// Start building with the given description.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }

    /// Set the component.
    #[must_use]
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set the operation.
    #[must_use]
    pub fn operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Add a metadata entry.
    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Finish building, stamping the context with the current time.
    #[must_use]
    pub fn build(self) -> ErrorContext {
        let mut ctx = ErrorContext::new(self.description).with_timestamp_now();
        if let Some(component) = self.component {
            ctx = ctx.with_component(component);
        }
        if let Some(operation) = self.operation {
            ctx = ctx.with_operation(operation);
        }
        for (k, v) in self.metadata {
            ctx = ctx.with_metadata(k, v);
        }
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_no_metadata() {
        let ctx = ErrorContext::new("something broke");
        assert!(ctx.metadata.is_none());
        assert!(ctx.timestamp.is_none());
    }

    #[test]
    fn with_metadata_allocates_lazily() {
        let ctx = ErrorContext::new("oops").with_metadata("node_id", "n1");
        assert_eq!(
            ctx.metadata.unwrap().get("node_id").map(String::as_str),
            Some("n1")
        );
    }

    #[test]
    fn builder_produces_equivalent_context() {
        let ctx = ErrorContextBuilder::new("registry failure")
            .component("registry")
            .operation("register")
            .metadata("type_id", "http.request")
            .build();

        assert_eq!(ctx.description, "registry failure");
        assert_eq!(ctx.component.as_deref(), Some("registry"));
        assert_eq!(ctx.operation.as_deref(), Some("register"));
        assert!(ctx.timestamp.is_some());
    }
}
