//! Logging configuration: level, output format, and display options.

mod presets;

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Single-line, human-readable (default).
    #[default]
    Compact,
    /// Multi-line, colorized, for local development.
    Pretty,
    /// Newline-delimited JSON, for log aggregators.
    Json,
    /// `key=value` pairs, for logfmt-compatible collectors.
    Logfmt,
}

/// Which extra fields to attach to every record.
#[derive(Debug, Clone, Default)]
pub struct Fields {
    /// Include the originating module path.
    pub target: bool,
    /// Include the thread name/id.
    pub thread: bool,
}

impl Fields {
    /// Build from `NEBULA_LOG_FIELDS=target,thread`.
    #[must_use]
    pub fn from_env() -> Self {
        let mut fields = Self::default();
        if let Ok(raw) = std::env::var("NEBULA_LOG_FIELDS") {
            for part in raw.split(',') {
                match part.trim() {
                    "target" => fields.target = true,
                    "thread" => fields.thread = true,
                    _ => {}
                }
            }
        }
        fields
    }
}

/// Display toggles for the chosen [`Format`].
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Whether to colorize output (ignored for `Json`).
    pub colors: bool,
    /// Whether to include file:line source location.
    pub source: bool,
    /// Whether to include a timestamp.
    pub time: bool,
    /// Whether to flatten event fields into the top-level JSON object
    /// instead of nesting them under a `fields` key.
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            source: false,
            time: true,
            flatten: false,
        }
    }
}

impl DisplayConfig {
    /// Apply `NEBULA_LOG_NO_COLOR` / `NEBULA_LOG_SOURCE` overrides.
    pub fn parse_env(&mut self) {
        if std::env::var("NEBULA_LOG_NO_COLOR").is_ok() {
            self.colors = false;
        }
        if std::env::var("NEBULA_LOG_SOURCE").is_ok() {
            self.source = true;
        }
    }
}

/// Top-level logging configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `tracing_subscriber::EnvFilter` directive string (e.g. `"info"`,
    /// `"nebula_engine=debug,info"`).
    pub level: String,
    /// Output format.
    pub format: Format,
    /// Display toggles.
    pub display: DisplayConfig,
    /// Extra fields to attach.
    pub fields: Fields,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            display: DisplayConfig::default(),
            fields: Fields::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_info_compact() {
        let cfg = Config::default();
        assert_eq!(cfg.level, "info");
        assert_eq!(cfg.format, Format::Compact);
    }

    #[test]
    fn development_preset_is_pretty_debug() {
        let cfg = Config::development();
        assert_eq!(cfg.level, "debug");
        assert_eq!(cfg.format, Format::Pretty);
        assert!(cfg.display.colors);
    }

    #[test]
    fn production_preset_is_json_info() {
        let cfg = Config::production();
        assert_eq!(cfg.level, "info");
        assert_eq!(cfg.format, Format::Json);
        assert!(!cfg.display.colors);
        assert!(cfg.display.flatten);
    }

    #[test]
    fn fields_from_env_parses_comma_list() {
        // SAFETY: test-only, single-threaded access to this specific var.
        unsafe { std::env::set_var("NEBULA_LOG_FIELDS", "target,thread") };
        let fields = Fields::from_env();
        assert!(fields.target);
        assert!(fields.thread);
        unsafe { std::env::remove_var("NEBULA_LOG_FIELDS") };
    }
}
