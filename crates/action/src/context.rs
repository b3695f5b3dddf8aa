//! Node-execution context: the per-node view handed to an executor.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use nebula_error::NebulaError;

/// A string that redacts its contents in Debug and Display.
///
/// Used for credential values to prevent accidental logging.
#[derive(Clone)]
pub struct SecureString {
    inner: String,
}

impl SecureString {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self { inner: value.into() }
    }

    /// Access the underlying value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.inner
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureString(***)")
    }
}

impl fmt::Display for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Port trait for providing credentials to a node executor.
///
/// The engine never inspects credential values; this trait exists purely so
/// executors can resolve secrets without coupling to a storage backend.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Retrieve a credential value by key.
    async fn get(&self, key: &str) -> Result<SecureString, NebulaError>;
}

/// Opaque bag of caller-provided services (HTTP clients, SDK handles, …),
/// keyed by name. The engine does not inspect its contents; it exists so
/// executors can receive dependencies without every node type threading
/// its own constructor arguments through the registry.
#[derive(Clone, Default)]
pub struct ServiceBag {
    services: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl ServiceBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a service under `key`.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: Arc<T>) {
        self.services.insert(key.into(), value);
    }

    /// Fetch a service by key, downcasting to `T`. Returns `None` if the key
    /// is absent or registered under a different type.
    #[must_use]
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.services.get(key)?.clone().downcast::<T>().ok()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.services.contains_key(key)
    }
}

impl fmt::Debug for ServiceBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceBag")
            .field("keys", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Per-node view of an execution run, handed to an executor alongside its
/// validated input.
///
/// `variables` is a **snapshot** taken when the context is derived — later
/// writes to the owning execution context are not retroactively visible
/// through it. `resolve_nested_path`, by contrast, closes over the live
/// variable map and reflects writes made after derivation. This asymmetry
/// is intentional (inputs are resolved at launch; ad-hoc lookups are live).
#[non_exhaustive]
pub struct NodeContext {
    pub user_id: String,
    pub campaign_id: Option<String>,
    pub workflow_execution_id: String,
    variables: Map<String, Value>,
    resolve_nested_path: Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>,
    pub credentials: Option<Arc<dyn CredentialProvider>>,
    pub services: Option<ServiceBag>,
}

impl NodeContext {
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        workflow_execution_id: impl Into<String>,
        variables: Map<String, Value>,
        resolve_nested_path: Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            campaign_id: None,
            workflow_execution_id: workflow_execution_id.into(),
            variables,
            resolve_nested_path,
            credentials: None,
            services: None,
        }
    }

    #[must_use]
    pub fn with_campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = Some(provider);
        self
    }

    #[must_use]
    pub fn with_services(mut self, services: ServiceBag) -> Self {
        self.services = Some(services);
        self
    }

    /// Read a variable from the snapshot taken at derivation time.
    #[must_use]
    pub fn get_variable(&self, key: &str) -> Option<&Value> {
        self.variables.get(key)
    }

    /// The full variable snapshot.
    #[must_use]
    pub fn variables(&self) -> &Map<String, Value> {
        &self.variables
    }

    /// Resolve a dot/bracket path against the **live** execution context.
    #[must_use]
    pub fn resolve_nested_path(&self, path: &str) -> Option<Value> {
        (self.resolve_nested_path)(path)
    }

    /// Retrieve a credential value by key.
    ///
    /// # Errors
    /// Returns an error if no credential provider is configured, or if the
    /// provider itself fails to resolve the key.
    pub async fn credential(&self, key: &str) -> Result<SecureString, NebulaError> {
        match &self.credentials {
            Some(provider) => provider.get(key).await,
            None => Err(NebulaError::executor_exception(
                "no credential provider configured",
            )),
        }
    }
}

impl fmt::Debug for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeContext")
            .field("user_id", &self.user_id)
            .field("campaign_id", &self.campaign_id)
            .field("workflow_execution_id", &self.workflow_execution_id)
            .field("variables", &self.variables)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> NodeContext {
        let mut vars = Map::new();
        vars.insert("count".into(), serde_json::json!(1));
        NodeContext::new("user-1", "exec-1", vars, Arc::new(|_: &str| None))
    }

    #[test]
    fn variables_are_a_snapshot() {
        let ctx = test_context();
        assert_eq!(ctx.get_variable("count"), Some(&serde_json::json!(1)));
        assert_eq!(ctx.get_variable("missing"), None);
    }

    #[test]
    fn resolve_nested_path_delegates_to_closure() {
        let ctx = NodeContext::new(
            "user-1",
            "exec-1",
            Map::new(),
            Arc::new(|path: &str| (path == "live.key").then(|| serde_json::json!("live-value"))),
        );
        assert_eq!(
            ctx.resolve_nested_path("live.key"),
            Some(serde_json::json!("live-value"))
        );
        assert_eq!(ctx.resolve_nested_path("other"), None);
    }

    #[test]
    fn campaign_id_defaults_to_none() {
        assert!(test_context().campaign_id.is_none());
        let with_campaign = test_context().with_campaign_id("camp-1");
        assert_eq!(with_campaign.campaign_id.as_deref(), Some("camp-1"));
    }

    #[tokio::test]
    async fn credential_without_provider_errors() {
        let ctx = test_context();
        assert!(ctx.credential("api-key").await.is_err());
    }

    #[test]
    fn secure_string_redacts_debug_and_display() {
        let s = SecureString::new("secret123");
        assert_eq!(format!("{s:?}"), "SecureString(***)");
        assert_eq!(format!("{s}"), "***");
        assert_eq!(s.expose(), "secret123");
    }

    #[test]
    fn service_bag_roundtrips_by_type_and_key() {
        let mut bag = ServiceBag::new();
        bag.insert("http", Arc::new(42u32));
        assert_eq!(bag.get::<u32>("http"), Some(Arc::new(42u32)));
        assert_eq!(bag.get::<String>("http"), None);
        assert!(bag.contains("http"));
        assert!(!bag.contains("missing"));
    }
}
