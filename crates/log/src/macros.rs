//! Convenience macros for structured logging.

/// Log an error at `error` level and return it unchanged — for use inline
/// in a `?`-chain without breaking the expression into a separate statement.
#[macro_export]
macro_rules! log_error {
    ($err:expr) => {{
        let e = $err;
        $crate::error!(error = ?e);
        e
    }};
    ($err:expr, $($arg:tt)*) => {{
        let e = $err;
        $crate::error!(error = ?e, $($arg)*);
        e
    }};
}

/// Create a span pre-declaring an `elapsed_ms` field for [`measure!`] to fill in.
#[macro_export]
macro_rules! timed_span {
    ($name:expr) => {
        tracing::info_span!($name, elapsed_ms = tracing::field::Empty)
    };
    ($level:expr, $name:expr) => {
        tracing::span!($level, $name, elapsed_ms = tracing::field::Empty)
    };
    ($level:expr, $name:expr, $($field:tt)*) => {
        tracing::span!($level, $name, elapsed_ms = tracing::field::Empty, $($field)*)
    };
}

/// Instrument and time an async operation, logging its completion.
#[macro_export]
macro_rules! measure {
    ($name:expr, $future:expr) => {{
        use tracing::Instrument;
        let __start = std::time::Instant::now();
        let span = $crate::timed_span!($name);
        let instrumented_future = async move { $future.await }.instrument(span);

        let result = instrumented_future.await;
        let elapsed = __start.elapsed().as_millis();
        tracing::info!(name = %$name, elapsed_ms = elapsed, "operation completed");
        result
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn log_error_passes_through_value() {
        let result: Result<(), &str> = Err("boom");
        let err = result.unwrap_err();
        let returned = crate::log_error!(err);
        assert_eq!(returned, "boom");
    }
}
