//! Cache store, single-node executor, and topological planner.
//!
//! Bundles the spec's C5 (pluggable TTL cache), C6 (single-node
//! validate/cache/retry/timeout pipeline), and C7 (Kahn-style topological
//! wave planner) components. `nebula-engine` drives [`node_executor::execute_node`]
//! once per node and [`planner::plan_waves`] once per workflow run.

pub mod cache;
pub mod config;
pub mod node_executor;
pub mod planner;

pub use cache::{CacheStore, InMemoryCacheStore};
pub use config::{CacheConfig, NodeExecutionConfig};
pub use node_executor::execute_node;
pub use planner::plan_waves;

/// Common prelude.
pub mod prelude {
    pub use super::{
        execute_node, plan_waves, CacheConfig, CacheStore, InMemoryCacheStore, NodeExecutionConfig,
    };
}
