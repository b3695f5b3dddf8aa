//! `Result` alias and context-attaching extension trait.

use crate::context::ErrorContext;
use crate::error::NebulaError;

/// `Result` alias used throughout the engine.
pub type Result<T> = std::result::Result<T, NebulaError>;

/// Extension trait for attaching [`ErrorContext`] to a failing `Result`.
pub trait ResultExt<T> {
    /// Attach a plain description as context.
    fn context(self, description: impl Into<String>) -> Result<T>;

    /// Attach a lazily-built context.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> ErrorContext;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<NebulaError>,
{
    fn context(self, description: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(ErrorContext::new(description)))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> ErrorContext,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails() -> std::result::Result<(), NebulaError> {
        Err(NebulaError::validation("missing field"))
    }

    #[test]
    fn context_wraps_description() {
        let err = fails().context("validating node input").unwrap_err();
        assert_eq!(
            err.context.unwrap().description,
            "validating node input"
        );
    }

    #[test]
    fn with_context_builds_lazily() {
        let err = fails()
            .with_context(|| ErrorContext::new("lazy").with_component("schema"))
            .unwrap_err();
        let ctx = err.context.unwrap();
        assert_eq!(ctx.component.as_deref(), Some("schema"));
    }
}
