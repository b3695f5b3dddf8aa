//! Builds and installs a global [`tracing`] subscriber from a [`Config`].

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;

use crate::config::{Config, Format};

/// Errors that can occur while installing the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// A global subscriber was already installed (e.g. by a previous call,
    /// or by the test harness).
    #[error("a global tracing subscriber is already set")]
    AlreadyInitialized,
}

/// Install a global subscriber built from `config`.
///
/// Idempotent in the sense that a second call returns
/// [`InitError::AlreadyInitialized`] rather than panicking — matching the
/// teacher's convention of surfacing subscriber-install failures rather
/// than letting `tracing`'s default panic propagate.
pub fn init(config: &Config) -> Result<(), InitError> {
    let env_filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        Format::Json => {
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(config.fields.target)
                .with_span_events(FmtSpan::NONE)
                .with_timer(crate::format::make_timer(None));
            registry.with(layer).try_init()
        }
        Format::Pretty => {
            let layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_ansi(config.display.colors)
                .with_target(config.fields.target)
                .with_file(config.display.source)
                .with_line_number(config.display.source)
                .with_timer(crate::format::make_timer(None));
            registry.with(layer).try_init()
        }
        Format::Compact | Format::Logfmt => {
            let layer = tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(config.display.colors)
                .with_target(config.fields.target)
                .with_timer(crate::format::make_timer(None));
            registry.with(layer).try_init()
        }
    };

    result.map_err(|_| InitError::AlreadyInitialized)
}

/// Install the [`Config::development`] preset. Convenience for `main.rs`.
pub fn init_development() -> Result<(), InitError> {
    init(&Config::development())
}

/// Install the [`Config::production`] preset. Convenience for `main.rs`.
pub fn init_production() -> Result<(), InitError> {
    init(&Config::production())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_init_reports_already_initialized() {
        let _ = init(&Config::test());
        let second = init(&Config::test());
        assert!(second.is_err());
    }
}
