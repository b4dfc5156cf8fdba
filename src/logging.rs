//! Console logging for generator runs.
//!
//! Wraps `tracing-subscriber` so the binary and tests share one filter
//! convention: `RUST_LOG` wins, otherwise the configured level applies to
//! this crate only.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter string used when neither `RUST_LOG` nor the config name a level.
pub const DEFAULT_FILTER: &str = "info";

/// Builds the filter for a configured level such as `"debug"`.
pub fn env_filter(level: &str) -> EnvFilter {
    let level = if level.trim().is_empty() {
        DEFAULT_FILTER
    } else {
        level.trim()
    };
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,tfc_worldgen={level}")))
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(level: &str) {
    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .without_time();

    let _ = tracing_subscriber::registry()
        .with(env_filter(level))
        .with(console_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_scopes_level_to_crate() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = env_filter("debug").to_string();
        assert!(filter.contains("tfc_worldgen=debug"));
        assert!(filter.contains("warn"));
    }

    #[test]
    fn blank_level_falls_back_to_default() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let filter = env_filter("  ").to_string();
        assert!(filter.contains("tfc_worldgen=info"));
    }
}
