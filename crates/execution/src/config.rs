//! Per-node execution configuration (§4.6.2).

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use nebula_error::RetryStrategy;

use crate::cache::CacheStore;

/// Cache participation for a single node type.
#[derive(Clone)]
pub struct CacheConfig {
    pub store: Arc<dyn CacheStore>,
    pub ttl: Duration,
    /// Override for the default canonical-JSON cache key.
    pub key_fn: Option<Arc<dyn Fn(&serde_json::Value) -> String + Send + Sync>>,
}

impl CacheConfig {
    #[must_use]
    pub fn new(store: Arc<dyn CacheStore>, ttl: Duration) -> Self {
        Self {
            store,
            ttl,
            key_fn: None,
        }
    }

    #[must_use]
    pub fn with_key_fn(
        mut self,
        key_fn: impl Fn(&serde_json::Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.key_fn = Some(Arc::new(key_fn));
        self
    }

    #[must_use]
    pub fn key_for(&self, input: &serde_json::Value) -> String {
        match &self.key_fn {
            Some(f) => f(input),
            None => serde_json::to_string(input).unwrap_or_default(),
        }
    }
}

impl std::fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheConfig").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

/// Configuration driving a single [`crate::node_executor::execute_node`] call.
///
/// Mirrors spec §4.6: retry/backoff shape, optional cache participation,
/// per-attempt timeout, a cooperative cancellation signal, and hooks the
/// workflow executor threads through unchanged (`retry_on`, `on_retry`).
#[derive(Clone)]
pub struct NodeExecutionConfig {
    pub retry: RetryStrategy,
    pub cache: Option<CacheConfig>,
    /// Per-attempt timeout; raced against each individual attempt, not the
    /// whole retry loop (§5, "Timeout. Per-attempt, not cumulative.").
    pub timeout: Option<Duration>,
    pub signal: Option<CancellationToken>,
    /// Returning `false` halts retrying even if attempts remain. Absence
    /// means "retry any error" (§4.6.2).
    pub retry_on: Option<Arc<dyn Fn(&str) -> bool + Send + Sync>>,
    /// Fired after each failed attempt that will be retried.
    pub on_retry: Option<Arc<dyn Fn(u32, &str) + Send + Sync>>,
}

impl Default for NodeExecutionConfig {
    fn default() -> Self {
        Self {
            retry: RetryStrategy::default(),
            cache: None,
            timeout: None,
            signal: None,
            retry_on: None,
            on_retry: None,
        }
    }
}

impl NodeExecutionConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryStrategy) -> Self {
        self.retry = retry;
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

    #[must_use]
    pub fn with_retry_on(
        mut self,
        retry_on: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.retry_on = Some(Arc::new(retry_on));
        self
    }

    #[must_use]
    pub fn with_on_retry(
        mut self,
        on_retry: impl Fn(u32, &str) + Send + Sync + 'static,
    ) -> Self {
        self.on_retry = Some(Arc::new(on_retry));
        self
    }
}

impl std::fmt::Debug for NodeExecutionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeExecutionConfig")
            .field("retry", &self.retry)
            .field("timeout", &self.timeout)
            .field("has_cache", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}
