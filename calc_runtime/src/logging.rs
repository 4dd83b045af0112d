//! `tracing` subscriber setup for the binary.
//!
//! Filter precedence: explicit directive, then `RUST_LOG`, then the
//! configured filter. Output goes to stderr so stdout stays clean for
//! views and JSON.

use tracing_subscriber::EnvFilter;

/// Pick the filter for this run. An unparsable directive falls back to
/// the next source.
pub fn resolve_filter(directive: Option<&str>, configured: &str) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .or_else(|| EnvFilter::try_new(configured).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_tracing(filter: EnvFilter) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_directive_wins() {
        let filter = resolve_filter(Some("calc_engine=trace"), "warn");
        assert!(filter.to_string().starts_with("calc_engine="));
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing(resolve_filter(Some("error"), "warn"));
        init_tracing(resolve_filter(Some("error"), "warn"));
    }
}
