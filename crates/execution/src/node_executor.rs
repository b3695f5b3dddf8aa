//! Single-node executor (C6): validate, cache, retry-with-timeout (§4.6).

use std::sync::Arc;

use nebula_action::{NodeContext, NodeDefinition, NodeExecutionResult};
use nebula_error::NebulaError;
use serde_json::Value;

use crate::config::NodeExecutionConfig;

/// Run one node to completion per the pipeline of spec §4.6:
///
/// 1. Validate `raw_input` against `def.input_schema`; a validation failure
///    is not retried and returns its `Err` directly (the caller converts it
///    to an in-band node failure — see §7, `ValidationError`).
/// 2. If caching is enabled, look up the canonical key; a hit short-circuits
///    the executor entirely and is returned unchanged.
/// 3. Otherwise run the retry loop: each attempt races
///    `def.executor.execute(..)` against a per-attempt timeout and the
///    cancellation signal (§4.6.1, §5 "per-attempt, not cumulative").
///    A thrown error and an `Ok(result)` with `result.success == false` are
///    treated identically for retry purposes (§4.6.3).
/// 4. A successful, non-cached-from-store result is written back to the
///    cache (§8 invariant 6: failures are never cached).
///
/// # Errors
/// Returns `Err` only for schema validation failure. All other outcomes —
/// executor failure, timeout, cancellation, retry exhaustion — are surfaced
/// in-band as `Ok(NodeExecutionResult { success: false, .. })`.
pub async fn execute_node(
    def: &NodeDefinition,
    raw_input: Value,
    node_ctx: &NodeContext,
    cfg: &NodeExecutionConfig,
) -> Result<NodeExecutionResult, NebulaError> {
    let validated = def
        .input_schema
        .validate(&raw_input)
        .map_err(|e| NebulaError::validation(e.to_string()))?;

    let cache_key = cfg.cache.as_ref().map(|cache| cache.key_for(&validated));

    if let (Some(cache), Some(key)) = (&cfg.cache, &cache_key) {
        if let Some(cached) = cache.store.get(key) {
            tracing::debug!(node_type = %def.node_type, "cache hit");
            if let Ok(result) = serde_json::from_value::<NodeExecutionResult>(cached) {
                return Ok(result);
            }
        }
    }

    let result = retry_loop(def, validated, node_ctx, cfg).await;

    if result.success {
        if let (Some(cache), Some(key)) = (&cfg.cache, &cache_key) {
            if let Ok(encoded) = serde_json::to_value(&result) {
                cache.store.set(key, encoded, cache.ttl);
            }
        }
    }

    Ok(result)
}

async fn retry_loop(
    def: &NodeDefinition,
    validated_input: Value,
    node_ctx: &NodeContext,
    cfg: &NodeExecutionConfig,
) -> NodeExecutionResult {
    let max_attempts = cfg.retry.max_attempts.max(1);

    for attempt in 0..max_attempts {
        if cfg.signal.as_ref().is_some_and(|signal| signal.is_cancelled()) {
            return NodeExecutionResult::failure("Execution aborted");
        }

        let outcome = run_one_attempt(def, validated_input.clone(), node_ctx, cfg).await;

        let error_message = match &outcome {
            Ok(result) if result.success => return result.clone(),
            Ok(result) => result.error.clone().unwrap_or_default(),
            Err(message) => message.clone(),
        };

        let is_last_attempt = attempt + 1 >= max_attempts;
        let should_retry = cfg.retry_on.as_ref().is_none_or(|f| f(&error_message));

        if is_last_attempt || !should_retry {
            return NodeExecutionResult::failure(error_message);
        }

        if let Some(on_retry) = &cfg.on_retry {
            on_retry(attempt + 1, &error_message);
        }

        let delay = cfg.retry.calculate_delay(attempt);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    unreachable!("loop always returns by the last attempt")
}

/// Run exactly one attempt, racing the executor against a per-attempt
/// timeout and the cancellation signal (§4.6.1).
///
/// `Ok(result)` carries whatever the executor returned (possibly
/// `success: false`); `Err(message)` carries the message for a thrown
/// error, a timeout, or a cancellation — all equivalent for retry purposes.
async fn run_one_attempt(
    def: &NodeDefinition,
    input: Value,
    node_ctx: &NodeContext,
    cfg: &NodeExecutionConfig,
) -> Result<NodeExecutionResult, String> {
    let execution = def.executor.execute(input, node_ctx);

    let cancellation = async {
        match &cfg.signal {
            Some(signal) => signal.cancelled().await,
            None => std::future::pending().await,
        }
    };

    let timer = async {
        match cfg.timeout {
            Some(timeout) => tokio::time::sleep(timeout).await,
            None => std::future::pending().await,
        }
    };

    tokio::select! {
        biased;
        _ = cancellation => Err("Execution aborted".to_string()),
        () = timer => Err(format!(
            "Execution timed out after {}ms",
            cfg.timeout.unwrap_or_default().as_millis()
        )),
        outcome = execution => match outcome {
            Ok(result) => Ok(result),
            Err(err) => Err(err.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheStore;
    use crate::config::CacheConfig;
    use async_trait::async_trait;
    use nebula_action::{NodeCategory, NodeDefinitionBuilder, NodeExecutor};
    use nebula_validator::AnySchema;
    use serde_json::Map;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn node_ctx() -> NodeContext {
        NodeContext::new("u", "e", Map::new(), Arc::new(|_: &str| None))
    }

    struct Echo;
    #[async_trait]
    impl NodeExecutor for Echo {
        async fn execute(
            &self,
            input: Value,
            _ctx: &NodeContext,
        ) -> Result<NodeExecutionResult, NebulaError> {
            Ok(NodeExecutionResult::success_with(input))
        }
    }

    struct AlwaysFails;
    #[async_trait]
    impl NodeExecutor for AlwaysFails {
        async fn execute(
            &self,
            _input: Value,
            _ctx: &NodeContext,
        ) -> Result<NodeExecutionResult, NebulaError> {
            Ok(NodeExecutionResult::failure("nope"))
        }
    }

    struct FailsNTimes {
        remaining: AtomicU32,
    }
    #[async_trait]
    impl NodeExecutor for FailsNTimes {
        async fn execute(
            &self,
            _input: Value,
            _ctx: &NodeContext,
        ) -> Result<NodeExecutionResult, NebulaError> {
            if self.remaining.fetch_sub(1, Ordering::SeqCst) > 1 {
                Ok(NodeExecutionResult::failure("not yet"))
            } else {
                Ok(NodeExecutionResult::success_with(serde_json::json!({"attempt": "last"})))
            }
        }
    }

    struct SleepsForever;
    #[async_trait]
    impl NodeExecutor for SleepsForever {
        async fn execute(
            &self,
            _input: Value,
            _ctx: &NodeContext,
        ) -> Result<NodeExecutionResult, NebulaError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(NodeExecutionResult::success())
        }
    }

    struct CountingExecutor {
        calls: Arc<AtomicU32>,
    }
    #[async_trait]
    impl NodeExecutor for CountingExecutor {
        async fn execute(
            &self,
            input: Value,
            _ctx: &NodeContext,
        ) -> Result<NodeExecutionResult, NebulaError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(NodeExecutionResult::success_with(input))
        }
    }

    fn definition(executor: impl NodeExecutor + 'static) -> NodeDefinition {
        NodeDefinitionBuilder::new()
            .node_type("t")
            .name("t")
            .category(NodeCategory::Action)
            .input_schema(AnySchema)
            .output_schema(AnySchema)
            .executor(executor)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn validation_failure_returns_err_without_invoking_executor() {
        let def = NodeDefinitionBuilder::new()
            .node_type("t")
            .name("t")
            .category(NodeCategory::Action)
            .input_schema(nebula_validator::ObjectSchema::new(vec![
                nebula_validator::ObjectField::new("id", nebula_validator::StringSchema::new()),
            ]))
            .output_schema(AnySchema)
            .executor(Echo)
            .build()
            .unwrap();
        let err = execute_node(&def, serde_json::json!({}), &node_ctx(), &NodeExecutionConfig::new())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn successful_executor_yields_success_result() {
        let def = definition(Echo);
        let result = execute_node(&def, serde_json::json!(1), &node_ctx(), &NodeExecutionConfig::new())
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.output, Some(serde_json::json!(1)));
    }

    #[tokio::test]
    async fn in_band_failure_is_not_retried_by_default() {
        let def = definition(AlwaysFails);
        let result = execute_node(&def, serde_json::json!(1), &node_ctx(), &NodeExecutionConfig::new())
            .await
            .unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("nope"));
    }

    #[tokio::test]
    async fn retry_exhausts_max_attempts_then_reports_failure() {
        let calls = Arc::new(AtomicU32::new(0));
        struct Counting(Arc<AtomicU32>);
        #[async_trait]
        impl NodeExecutor for Counting {
            async fn execute(
                &self,
                _input: Value,
                _ctx: &NodeContext,
            ) -> Result<NodeExecutionResult, NebulaError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(NodeExecutionResult::failure("always"))
            }
        }
        let def = definition(Counting(calls.clone()));
        let cfg = NodeExecutionConfig::new()
            .with_retry(nebula_error::RetryStrategy::new().with_max_attempts(3));
        let result = execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        assert!(!result.success);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_succeeds_on_third_attempt() {
        let def = definition(FailsNTimes {
            remaining: AtomicU32::new(3),
        });
        let cfg = NodeExecutionConfig::new()
            .with_retry(nebula_error::RetryStrategy::new().with_max_attempts(3));
        let result = execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, Some(serde_json::json!({"attempt": "last"})));
    }

    #[tokio::test]
    async fn on_retry_fires_for_each_retried_attempt() {
        let retries = Arc::new(AtomicU32::new(0));
        let retries_clone = retries.clone();
        let def = definition(FailsNTimes {
            remaining: AtomicU32::new(3),
        });
        let cfg = NodeExecutionConfig::new()
            .with_retry(nebula_error::RetryStrategy::new().with_max_attempts(3))
            .with_on_retry(move |_attempt, _msg| {
                retries_clone.fetch_add(1, Ordering::SeqCst);
            });
        execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        assert_eq!(retries.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_on_false_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        struct Counting(Arc<AtomicU32>);
        #[async_trait]
        impl NodeExecutor for Counting {
            async fn execute(
                &self,
                _input: Value,
                _ctx: &NodeContext,
            ) -> Result<NodeExecutionResult, NebulaError> {
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(NodeExecutionResult::failure("permanent"))
            }
        }
        let def = definition(Counting(calls.clone()));
        let cfg = NodeExecutionConfig::new()
            .with_retry(nebula_error::RetryStrategy::new().with_max_attempts(5))
            .with_retry_on(|_| false);
        execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn timeout_aborts_a_slow_executor() {
        let def = definition(SleepsForever);
        let cfg = NodeExecutionConfig::new().with_timeout(Duration::from_millis(10));
        let result = execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        assert!(!result.success);
        assert!(result.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn cancellation_signal_aborts_before_first_attempt() {
        let def = definition(Echo);
        let signal = CancellationToken::new();
        signal.cancel();
        let cfg = NodeExecutionConfig::new().with_signal(signal);
        let result = execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Execution aborted"));
    }

    #[tokio::test]
    async fn cache_hit_bypasses_the_executor() {
        let calls = Arc::new(AtomicU32::new(0));
        let def = definition(CountingExecutor { calls: calls.clone() });
        let cfg = NodeExecutionConfig::new().with_cache(CacheConfig::new(
            Arc::new(InMemoryCacheStore::new()),
            Duration::from_secs(60),
        ));
        let first = execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        let second = execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.output, second.output);
    }

    #[tokio::test]
    async fn failed_result_is_never_cached() {
        let def = definition(AlwaysFails);
        let store = Arc::new(InMemoryCacheStore::new());
        let cfg = NodeExecutionConfig::new()
            .with_cache(CacheConfig::new(store.clone(), Duration::from_secs(60)));
        execute_node(&def, serde_json::json!(1), &node_ctx(), &cfg).await.unwrap();
        let key = cfg.cache.as_ref().unwrap().key_for(&serde_json::json!(1));
        assert!(store.get(&key).is_none());
    }
}
