//! Diagnostic logging to stderr, powered by tracing-subscriber.
//!
//! The library crates log through the `log` facade; the subscriber's
//! `tracing-log` bridge routes those records through the same filter.

use tracing_subscriber::EnvFilter;

/// Crates whose records are shown at the configured level.
const OWN_TARGETS: &[&str] = &["gridscope", "gridscope_cli", "gridscope_host", "gridscope_seeker"];

/// Level selected by the config value and the `-v` count.
pub fn effective_level(configured: &str, verbose: u8) -> &str {
    match verbose {
        0 => configured,
        1 => "debug",
        _ => "trace",
    }
}

/// Builds the filter: own crates at `level`, everything else at `warn`.
pub fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    let mut directives = vec!["warn".to_string()];
    for target in OWN_TARGETS {
        directives.push(format!("{}={}", target, level));
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", level, e))
}

/// Installs the global subscriber. `RUST_LOG` overrides the level when set.
pub fn init(configured: &str, verbose: u8) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if verbose == 0 => filter,
        _ => build_env_filter(effective_level(configured, verbose))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("cannot install logger: {}", e))?;

    tracing::trace!("logging initialized");
    Ok(())
}
