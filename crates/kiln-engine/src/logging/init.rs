use std::sync::Once;

/// Default filter when neither the config nor the environment provides one.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Where log records are written.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

impl From<LogTarget> for env_logger::Target {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Stdout => env_logger::Target::Stdout,
            LogTarget::Stderr => env_logger::Target::Stderr,
        }
    }
}

/// Options for [`init_logging`].
///
/// `env_filter` uses `env_logger` directive syntax, e.g.
/// `"kiln_engine=debug,wgpu=warn"`. Without it `KILN_LOG`, then `RUST_LOG`, apply.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub target: LogTarget,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            target: LogTarget::Stdout,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the process logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        let filter = resolve_filter(
            config.env_filter,
            std::env::var("KILN_LOG").ok(),
            std::env::var("RUST_LOG").ok(),
        );
        builder.parse_filters(&filter);

        builder.write_style(config.write_style);
        builder.target(config.target.into());

        // `try_init` so an embedding host that installed its own logger keeps it.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter `{filter}`");
        }
    });
}

fn resolve_filter(
    explicit: Option<String>,
    kiln_log: Option<String>,
    rust_log: Option<String>,
) -> String {
    [explicit, kiln_log, rust_log]
        .into_iter()
        .flatten()
        .find(|f| !f.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let f = resolve_filter(Some("debug".into()), Some("warn".into()), Some("error".into()));
        assert_eq!(f, "debug");
    }

    #[test]
    fn kiln_log_before_rust_log() {
        let f = resolve_filter(None, Some("warn".into()), Some("error".into()));
        assert_eq!(f, "warn");
    }

    #[test]
    fn blank_values_fall_through_to_default() {
        let f = resolve_filter(Some("  ".into()), None, Some(String::new()));
        assert_eq!(f, DEFAULT_FILTER);
    }
}
