//! Workflow-level execution configuration (§4.8) and observer callbacks (§6).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use nebula_error::{NebulaError, RetryStrategy};
use nebula_execution::{CacheConfig, NodeExecutionConfig};

use crate::status::NodeStatus;

/// Overrides for one or more of the five fields a per-type config may
/// shallow-override (§4.8: "if `cfg.nodeConfig[type]` exists, shallow-override
/// those five fields"). `None` in any field means "inherit the workflow-level
/// value"; the sixth field, `retry_on`, is intentionally excluded — the spec
/// names exactly five.
#[derive(Clone, Default)]
pub struct NodeConfigOverride {
    pub retry: Option<RetryStrategy>,
    pub cache: Option<CacheConfig>,
    pub timeout: Option<Duration>,
    pub signal: Option<CancellationToken>,
    pub on_retry: Option<Arc<dyn Fn(u32, &str) + Send + Sync>>,
}

impl NodeConfigOverride {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryStrategy) -> Self {
        self.retry = Some(retry);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_signal(mut self, signal: CancellationToken) -> Self {
        self.signal = Some(signal);
        self
    }
}

/// Configuration driving one `execute_workflow` call.
///
/// The five overridable fields (`retry`, `cache`, `timeout`, `signal`,
/// `on_retry`) live on an embedded [`NodeExecutionConfig`] so the
/// workflow-level default and any per-type override share one shape (§4.8,
/// "per-type config: start from the workflow-level `cfg` ... shallow-override
/// those five fields").
#[derive(Clone)]
pub struct WorkflowExecutionConfig {
    pub user_id: String,
    pub campaign_id: Option<String>,
    /// Default §7: stop downstream propagation on node failure (Open
    /// Question 1 of spec §9, resolved in favor of "stop").
    pub stop_on_error: bool,
    pub base: NodeExecutionConfig,
    pub node_config: HashMap<String, NodeConfigOverride>,
    pub on_node_start: Option<Arc<dyn Fn(&str, &str) + Send + Sync>>,
    pub on_node_complete: Option<Arc<dyn Fn(&str, &nebula_action::NodeExecutionResult) + Send + Sync>>,
    pub on_node_error: Option<Arc<dyn Fn(&str, &NebulaError) + Send + Sync>>,
}

impl Default for WorkflowExecutionConfig {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            campaign_id: None,
            stop_on_error: true,
            base: NodeExecutionConfig::new(),
            node_config: HashMap::new(),
            on_node_start: None,
            on_node_complete: None,
            on_node_error: None,
        }
    }
}

impl WorkflowExecutionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    #[must_use]
    pub fn with_campaign_id(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    #[must_use]
    pub fn with_stop_on_error(mut self, stop_on_error: bool) -> Self {
        self.stop_on_error = stop_on_error;
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: NodeExecutionConfig) -> Self {
        self.base = base;
        self
    }

    #[must_use]
    pub fn with_node_config(
        mut self,
        node_type: impl Into<String>,
        overrides: NodeConfigOverride,
    ) -> Self {
        self.node_config.insert(node_type.into(), overrides);
        self
    }

    #[must_use]
    pub fn with_on_node_start(
        mut self,
        callback: impl Fn(&str, &str) + Send + Sync + 'static,
    ) -> Self {
        self.on_node_start = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn with_on_node_complete(
        mut self,
        callback: impl Fn(&str, &nebula_action::NodeExecutionResult) + Send + Sync + 'static,
    ) -> Self {
        self.on_node_complete = Some(Arc::new(callback));
        self
    }

    #[must_use]
    pub fn with_on_node_error(
        mut self,
        callback: impl Fn(&str, &NebulaError) + Send + Sync + 'static,
    ) -> Self {
        self.on_node_error = Some(Arc::new(callback));
        self
    }

    /// Resolve the effective per-node-type config: `self.base`, with any of
    /// the five overridable fields replaced by `self.node_config[node_type]`
    /// when present (§4.8).
    #[must_use]
    pub fn resolve_node_config(&self, node_type: &str) -> NodeExecutionConfig {
        let mut cfg = self.base.clone();
        if let Some(overrides) = self.node_config.get(node_type) {
            if let Some(retry) = &overrides.retry {
                cfg.retry = retry.clone();
            }
            if let Some(cache) = &overrides.cache {
                cfg.cache = Some(cache.clone());
            }
            if let Some(timeout) = overrides.timeout {
                cfg.timeout = Some(timeout);
            }
            if let Some(signal) = &overrides.signal {
                cfg.signal = Some(signal.clone());
            }
            if let Some(on_retry) = &overrides.on_retry {
                cfg.on_retry = Some(on_retry.clone());
            }
        }
        cfg
    }
}

/// Result of one `execute_workflow` call (§6 "Workflow execution result").
#[derive(Debug, Clone)]
pub struct WorkflowExecutionResult {
    pub success: bool,
    pub results: HashMap<String, nebula_action::NodeExecutionResult>,
    pub statuses: HashMap<String, NodeStatus>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn default_stop_on_error_is_true() {
        assert!(WorkflowExecutionConfig::new().stop_on_error);
    }

    #[test]
    fn resolve_node_config_without_override_returns_base() {
        let cfg = WorkflowExecutionConfig::new()
            .with_base(NodeExecutionConfig::new().with_timeout(Duration::from_millis(50)));
        let resolved = cfg.resolve_node_config("any.type");
        assert_eq!(resolved.timeout, Some(Duration::from_millis(50)));
    }

    #[test]
    fn resolve_node_config_shallow_overrides_only_named_type() {
        let cfg = WorkflowExecutionConfig::new()
            .with_base(NodeExecutionConfig::new().with_timeout(Duration::from_millis(50)))
            .with_node_config(
                "slow.type",
                NodeConfigOverride::new().with_timeout(Duration::from_secs(5)),
            );

        assert_eq!(
            cfg.resolve_node_config("slow.type").timeout,
            Some(Duration::from_secs(5))
        );
        assert_eq!(
            cfg.resolve_node_config("other.type").timeout,
            Some(Duration::from_millis(50))
        );
    }

    #[test]
    fn resolve_node_config_override_leaves_unset_fields_at_base() {
        let base = NodeExecutionConfig::new()
            .with_retry(RetryStrategy::new().with_max_attempts(3))
            .with_timeout(Duration::from_millis(10));
        let cfg = WorkflowExecutionConfig::new().with_base(base).with_node_config(
            "t",
            NodeConfigOverride::new().with_timeout(Duration::from_secs(1)),
        );

        let resolved = cfg.resolve_node_config("t");
        assert_eq!(resolved.timeout, Some(Duration::from_secs(1)));
        assert_eq!(resolved.retry.max_attempts, 3);
    }

    #[test]
    fn on_retry_override_replaces_base_callback() {
        let base_calls = Arc::new(AtomicU32::new(0));
        let base_calls_clone = base_calls.clone();
        let override_calls = Arc::new(AtomicU32::new(0));
        let override_calls_clone = override_calls.clone();

        let base = NodeExecutionConfig::new()
            .with_on_retry(move |_attempt, _err| {
                base_calls_clone.fetch_add(1, Ordering::SeqCst);
            });
        let cfg = WorkflowExecutionConfig::new().with_base(base).with_node_config(
            "t",
            NodeConfigOverride {
                on_retry: Some(Arc::new(move |_attempt, _err| {
                    override_calls_clone.fetch_add(1, Ordering::SeqCst);
                })),
                ..NodeConfigOverride::new()
            },
        );

        let resolved = cfg.resolve_node_config("t");
        (resolved.on_retry.unwrap())(1, "boom");
        assert_eq!(override_calls.load(Ordering::SeqCst), 1);
        assert_eq!(base_calls.load(Ordering::SeqCst), 0);
    }
}
