//! Structured logging for the workflow execution engine.
//!
//! Thin wrapper around [`tracing`] / [`tracing_subscriber`]: a [`Config`]
//! describes the desired level, output format, and display options, and
//! [`builder::init`] installs a global subscriber from it. Crates elsewhere
//! in the workspace emit events with the re-exported `tracing` macros and
//! rely on this crate only at process startup.

pub mod builder;
pub mod config;
pub mod format;
mod macros;

pub use config::{Config, DisplayConfig, Fields, Format};
pub use builder::{init, init_development, init_production, InitError};

// Re-exported so downstream crates can depend solely on `nebula-log` for
// both configuration and the logging macros themselves, and so `log_error!`
// can call `$crate::error!` from this crate.
pub use tracing::{debug, error, info, trace, warn};

/// Convenience re-exports for `use nebula_log::prelude::*;`.
pub mod prelude {
    pub use crate::{debug, error, info, trace, warn};
    pub use crate::{init, init_development, init_production};
    pub use crate::Config;
}
